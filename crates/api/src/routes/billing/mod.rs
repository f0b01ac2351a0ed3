pub mod error;
pub mod handlers;
pub mod interfaces;
pub mod service;
pub mod stripe;
