pub mod db_model;
pub mod error;
pub mod handlers;
pub mod hashing;
pub mod interfaces;
pub mod service;
pub mod session;
