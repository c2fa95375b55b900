//! Client-facing error taxonomy.
//!
//! These are the only failures rendered with their own status line and body.
//! Anything else that escapes a dispatch is reported as a 500.

use std::fmt;

use crate::http::response::StatusCode;

/// A classified request failure with a fixed status code and reason phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpError {
    /// Missing or malformed request line.
    BadRequest,
    /// No file or route for the resolved path.
    NotFound,
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest => StatusCode::BadRequest,
            HttpError::NotFound => StatusCode::NotFound,
        }
    }

    /// Numeric status code, e.g. `404`.
    pub fn code(&self) -> u16 {
        self.status().as_u16()
    }

    /// The reason phrase, which doubles as the plain-text response body.
    pub fn reason_phrase(&self) -> &'static str {
        self.status().reason_phrase()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason_phrase())
    }
}

impl std::error::Error for HttpError {}
