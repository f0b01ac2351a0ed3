mod db_model;
mod settings;
mod utils;

pub use db_model::*;
pub use settings::*;
pub use utils::*;
