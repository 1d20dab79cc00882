// src/error.rs

use serde_json::{json, Value};
use thiserror::Error;

/// Every way a tracking lookup can fail. Each variant maps to exactly one
/// HTTP status and canonical JSON body.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Missing tracking_number")]
    InvalidBody,

    /// The sheet could not be fetched or read.
    #[error("{0}")]
    UpstreamFetch(String),

    #[error("Tracking not found")]
    NotFound,

    /// Catch-all for anything unexpected while building the response.
    #[error("{0}")]
    Internal(String),
}

impl LookupError {
    pub fn status_code(&self) -> u16 {
        match self {
            LookupError::MethodNotAllowed => 405,
            LookupError::InvalidBody => 400,
            LookupError::NotFound => 404,
            LookupError::UpstreamFetch(_) | LookupError::Internal(_) => 500,
        }
    }

    /// The JSON body the aggregator receives for this failure.
    pub fn to_body(&self) -> Value {
        match self {
            LookupError::MethodNotAllowed => json!({ "error": self.to_string() }),
            LookupError::UpstreamFetch(_) | LookupError::Internal(_) => json!({
                "meta": {
                    "code": self.status_code(),
                    "message": format!("Internal Server Error: {}", self),
                }
            }),
            _ => json!({
                "meta": { "code": self.status_code(), "message": self.to_string() }
            }),
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Internal(err.to_string())
    }
}
