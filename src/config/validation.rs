//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that configured headers can be sent as HTTP header fields
//! - Validate value ranges (timeout > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: &ExtraHeadersConfig → Result<(), Vec<ValidationError>>
//! - The environment variable is not read here; its contents are only known
//!   at resolve time

use http::header::{HeaderName, HeaderValue};
use thiserror::Error;

use crate::config::schema::ExtraHeadersConfig;
use crate::headers::{parse_headers_string, HeaderSet};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("header name {0:?} is not a valid HTTP header name")]
    InvalidHeaderName(String),

    #[error("value of header {0:?} is not a valid HTTP header value")]
    InvalidHeaderValue(String),

    #[error("transport.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("headers.env_var must not be empty")]
    EmptyEnvVar,
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ExtraHeadersConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_headers(&config.headers.extra, &mut errors);
    if let Some(spec) = &config.headers.spec {
        check_headers(&parse_headers_string(spec), &mut errors);
    }

    if config.headers.env_var.trim().is_empty() {
        errors.push(ValidationError::EmptyEnvVar);
    }
    if config.transport.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_headers(headers: &HeaderSet, errors: &mut Vec<ValidationError>) {
    for (name, value) in headers.iter() {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidHeaderName(name.to_string()));
        } else if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::InvalidHeaderValue(name.to_string()));
        }
    }
}
