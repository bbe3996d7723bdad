//! Blocking SOAP-over-HTTP transport for Exchange Web Services style
//! endpoints.
//!
//! # Overview
//! Builds an authenticated HTTP POST carrying a SOAP envelope, ships it
//! through a blocking engine session, and returns a [`Response`] whose XML
//! payload is parsed lazily, at most once.
//!
//! # Design
//! - One [`Request`] owns one engine session and one header list; `send`
//!   consumes the request, so a configured request performs exactly one
//!   transfer.
//! - [`Credentials`] is a trait with a single `certify` operation; NTLM is
//!   the built-in implementation and further schemes plug in without
//!   touching `Request`.
//! - [`Response`] owns the received bytes until the first `payload` call
//!   turns them into an independently owned XML tree.
//! - [`send_soap_request`] is the one-call path: envelope assembly, NTLM
//!   setup and the blocking send.

pub mod credentials;
pub mod envelope;
pub mod error;
pub mod guard;
pub mod request;
pub mod response;
pub mod transport;

pub use credentials::{AuthOption, AuthScheme, AuthTarget, Credentials, NtlmCredentials};
pub use envelope::{build_envelope, send_soap_request};
pub use error::{ParseError, TransportError};
pub use guard::ScopeGuard;
pub use request::{Method, Request, DEFAULT_TIMEOUT};
pub use response::Response;
pub use transport::{init, HeaderList, TransportHandle};

// The payload tree type is part of the public contract.
pub use xmltree::{Element, XMLNode};
