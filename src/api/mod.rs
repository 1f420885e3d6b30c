// API module - HTTP transport to the chatbot backend
pub mod client;

pub use client::{ApiClient, TransportError};
