//! Blocking HTTP engine plumbing: process-wide setup, the per-request
//! session handle, and the outgoing header list.
//!
//! # Design
//! Everything here wraps libcurl through the `curl` crate. A
//! `TransportHandle` owns exactly one easy session for the lifetime of one
//! `Request`; sessions are never shared between requests or threads. Engine
//! failures are translated into `TransportError` at this boundary so the
//! rest of the crate never sees engine error codes.

use std::panic;

use curl::easy::{Easy, List};

use crate::error::TransportError;

/// Initialize the HTTP engine's process-wide state.
///
/// Called automatically when the first handle is acquired. Applications
/// that spin up requests from several threads at startup may call it once
/// up front instead. Idempotent and thread-safe; engine teardown happens
/// at process exit, so there is no matching shutdown call.
pub fn init() {
    curl::init();
}

/// Translate a failed engine option call into a `TransportError`.
///
/// The engine reports an option it does not understand with dedicated
/// failure codes; everything else gets the generic message. Both keep the
/// engine's own diagnostic text.
fn option_error(cause: &curl::Error) -> TransportError {
    if cause.is_unknown_option() || cause.is_failed_init() {
        TransportError::from_engine("unsupported option", cause)
    } else {
        TransportError::from_engine("failed setting option", cause)
    }
}

/// Exclusive owner of one engine session.
///
/// Acquired when a `Request` is constructed and released when it drops.
#[derive(Debug)]
pub struct TransportHandle {
    easy: Easy,
}

impl TransportHandle {
    /// Acquire a fresh engine session.
    pub fn acquire() -> Result<Self, TransportError> {
        init();
        let easy = panic::catch_unwind(Easy::new)
            .map_err(|_| TransportError::new("could not start transport session"))?;
        Ok(Self { easy })
    }

    /// Apply one transfer option to the session.
    pub(crate) fn set_option(
        &mut self,
        apply: impl FnOnce(&mut Easy) -> Result<(), curl::Error>,
    ) -> Result<(), TransportError> {
        apply(&mut self.easy).map_err(|e| option_error(&e))
    }

    pub(crate) fn easy_mut(&mut self) -> &mut Easy {
        &mut self.easy
    }
}

/// Ordered list of outgoing header lines for one request.
///
/// Lines go to the engine verbatim in insertion order; no header syntax
/// validation happens at this layer.
#[derive(Debug)]
pub struct HeaderList {
    list: List,
}

impl HeaderList {
    pub fn new() -> Self {
        Self { list: List::new() }
    }

    /// Append one literal header line.
    pub fn append(&mut self, line: &str) -> Result<(), TransportError> {
        self.list
            .append(line)
            .map_err(|e| TransportError::from_engine("failed appending header", &e))
    }

    pub(crate) fn into_inner(self) -> List {
        self.list
    }
}

impl Default for HeaderList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_option_codes_get_the_distinguished_message() {
        // 2 is the engine's failed-init code, 48 its unknown-option code.
        for code in [2, 48] {
            let err = option_error(&curl::Error::new(code));
            assert!(
                err.message().contains("unsupported option"),
                "code {code}: {}",
                err.message()
            );
        }
    }

    #[test]
    fn other_option_failures_get_the_generic_message() {
        // 43 is the engine's bad-function-argument code.
        let err = option_error(&curl::Error::new(43));
        assert!(err.message().contains("failed setting option"));
        assert!(!err.message().contains("unsupported option"));
    }

    #[test]
    fn acquire_yields_a_usable_session() {
        let mut handle = TransportHandle::acquire().unwrap();
        handle.set_option(|e| e.url("http://localhost/")).unwrap();
    }

    #[test]
    fn header_list_accepts_literal_lines() {
        let mut headers = HeaderList::new();
        headers.append("Content-Type: text/xml; charset=utf-8").unwrap();
        headers.append("X-Anything: no validation here").unwrap();
    }
}
