//! Error types for the SOAP transport layer.
//!
//! # Design
//! Failures split into two kinds that callers handle differently:
//! `TransportError` covers everything up to and including the HTTP exchange
//! (session setup, transfer options, the blocking call itself), while
//! `ParseError` covers turning the received bytes into an XML document.
//! Both carry one prebuilt message so the engine's and parser's own error
//! types stay out of the public API.

use std::fmt;

/// The HTTP engine could not be set up, configured, or the transfer failed.
#[derive(Debug, Clone)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build an error from a failed engine call, keeping the engine's own
    /// diagnostic text: `<context>: '<engine message>'`.
    pub(crate) fn from_engine(context: &str, cause: &curl::Error) -> Self {
        Self {
            message: format!("{context}: '{}'", cause.description()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}

/// A response body could not be parsed as XML.
///
/// Carries the underlying parser's diagnostic text only; the parser's own
/// error type does not appear here.
#[derive(Debug, Clone)]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}
