//! HTTP route handlers.

pub mod extract;
pub mod health;

pub use extract::extract_handler;
pub use health::health_handler;
