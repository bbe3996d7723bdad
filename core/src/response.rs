//! Received HTTP response and its lazily parsed XML payload.
//!
//! # Design
//! The response owns the raw received bytes. The first `payload` call
//! consumes them into an independently owned XML tree (string data copied
//! out of the buffer), so the tree's lifetime is not tied to the buffer and
//! the raw bytes cannot be observed once parsing has happened. Parsing runs
//! at most once per response, however often `payload` is called.

use std::cell::Cell;
use std::mem;

use log::debug;
use xmltree::Element;

use crate::error::ParseError;
use crate::guard::ScopeGuard;

#[cfg(test)]
thread_local! {
    /// Number of parse runs observed by the current test thread.
    pub(crate) static PARSE_RUNS: Cell<usize> = Cell::new(0);
}

/// One received HTTP response: status code plus body bytes.
#[derive(Debug)]
pub struct Response {
    code: u16,
    data: Vec<u8>,
    parsed: Cell<bool>,
    doc: Option<Element>,
}

impl Response {
    /// Wrap a status code and the received bytes.
    ///
    /// `data` must not be empty; the transfer layer always appends a
    /// terminating byte, so an empty buffer is a programming error.
    pub fn new(code: u16, data: Vec<u8>) -> Self {
        debug_assert!(!data.is_empty());
        Self {
            code,
            data,
            parsed: Cell::new(false),
            doc: None,
        }
    }

    /// HTTP status code of the response. Independent of parse state.
    pub fn status_code(&self) -> u16 {
        self.code
    }

    /// The response body as an XML document.
    ///
    /// The first call parses the received bytes and caches the document;
    /// later calls return the cache without reparsing. A response whose
    /// body failed to parse keeps answering with `ParseError` (the first
    /// call carries the parser's own diagnostic).
    pub fn payload(&mut self) -> Result<&Element, ParseError> {
        if !self.parsed.get() {
            let parsed = &self.parsed;
            let _mark = ScopeGuard::new(|| parsed.set(true));
            let data = mem::take(&mut self.data);
            self.doc = Some(parse_document(&data)?);
        }
        self.doc
            .as_ref()
            .ok_or_else(|| ParseError::new("response body was not parseable"))
    }
}

/// Parse `data` into an owned element tree, trimming the transfer layer's
/// terminating bytes first.
fn parse_document(data: &[u8]) -> Result<Element, ParseError> {
    #[cfg(test)]
    PARSE_RUNS.with(|runs| runs.set(runs.get() + 1));

    let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    debug!("parsing {end} byte response body");
    Element::parse(&data[..end]).map_err(|e| ParseError::new(e.to_string()))
}
