pub mod endpoints;
pub mod interfaces;
pub mod models;
