pub mod auth;
pub mod coach;
pub mod config;
pub mod error;
mod routes;
pub mod security;
pub mod state;

pub use routes::{configure, not_found};
