pub mod archive;
pub mod error;
pub mod handlers;
pub mod interfaces;
pub mod service;
