pub mod db_model;
pub mod error;
pub mod handlers;
pub mod interfaces;
pub mod limits;
pub mod service;
