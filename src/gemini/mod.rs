pub mod types;
pub mod client;

pub use types::*;
pub use client::*;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Cannot reach the Gemini API at {0}")]
    Connection(String),

    #[error("Gemini API returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response contained no text candidate")]
    EmptyResponse,

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
