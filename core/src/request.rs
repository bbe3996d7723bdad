//! One-shot HTTP request configuration and the blocking send.
//!
//! # Design
//! A `Request` owns its engine session and header list for its whole life.
//! Configuration methods may run in any order; `send` consumes the request,
//! so a configured request performs exactly one transfer and can never be
//! silently resent with stale options.

use std::time::Duration;

use curl::easy::Auth;
use log::debug;

use crate::credentials::{AuthOption, AuthScheme, AuthTarget, Credentials};
use crate::error::TransportError;
use crate::response::Response;
use crate::transport::{HeaderList, TransportHandle};

/// Sent with every request; some servers reject requests without one.
const DEFAULT_USER_AGENT: &str = concat!("ews-transport/", env!("CARGO_PKG_VERSION"));

/// Default whole-transfer timeout. The engine's own default is "no limit",
/// which turns an unresponsive server into a hang.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP method of a request. The protocol only ever POSTs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
}

/// A single outgoing HTTP request.
#[derive(Debug)]
pub struct Request {
    handle: TransportHandle,
    headers: HeaderList,
}

impl Request {
    /// Start a request to `url`, acquiring a fresh engine session.
    pub fn new(url: &str) -> Result<Self, TransportError> {
        let mut handle = TransportHandle::acquire()?;
        handle.set_option(|e| e.url(url))?;
        handle.set_option(|e| e.timeout(DEFAULT_TIMEOUT))?;
        Ok(Self {
            handle,
            headers: HeaderList::new(),
        })
    }

    pub fn set_method(&mut self, method: Method) -> Result<(), TransportError> {
        match method {
            Method::Post => self.handle.set_option(|e| e.post(true)),
        }
    }

    /// Append a `Content-Type` header for the request body.
    pub fn set_content_type(&mut self, content_type: &str) -> Result<(), TransportError> {
        self.headers.append(&format!("Content-Type: {content_type}"))
    }

    /// Append one literal header line.
    pub fn append_header(&mut self, line: &str) -> Result<(), TransportError> {
        self.headers.append(line)
    }

    /// Let `credentials` install its authentication options.
    pub fn set_credentials(&mut self, credentials: &dyn Credentials) -> Result<(), TransportError> {
        credentials.certify(self)
    }

    /// Override the whole-transfer timeout.
    pub fn set_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        self.handle.set_option(|e| e.timeout(timeout))
    }

    /// Trace the raw request and response headers to stderr.
    ///
    /// Debugging aid only; never enabled unless called.
    pub fn enable_wire_trace(&mut self) -> Result<(), TransportError> {
        self.handle.set_option(|e| e.verbose(true))
    }

    /// Skip TLS peer verification. Insecure; only for debugging against
    /// servers with self-signed certificates. Never enabled unless called.
    pub fn danger_disable_tls_verification(&mut self) -> Result<(), TransportError> {
        self.handle.set_option(|e| e.ssl_verify_peer(false))
    }

    /// Perform the blocking HTTP transfer and return the response.
    ///
    /// `body` is sent exactly as given; no re-encoding happens here. Blocks
    /// the calling thread until the transfer completes, fails, or hits the
    /// configured timeout. Any engine failure (DNS, connect, TLS, timeout,
    /// server abort) comes back as a `TransportError` carrying the engine's
    /// diagnostic text.
    pub fn send(self, body: &str) -> Result<Response, TransportError> {
        let Self {
            mut handle,
            headers,
        } = self;

        handle.set_option(|e| e.useragent(DEFAULT_USER_AGENT))?;
        handle.set_option(|e| e.post_field_size(body.len() as u64))?;
        handle.set_option(|e| e.post_fields_copy(body.as_bytes()))?;
        handle.set_option(|e| e.http_headers(headers.into_inner()))?;

        debug!("sending {} byte request", body.len());

        let mut data = Vec::new();
        {
            let mut transfer = handle.easy_mut().transfer();
            transfer
                .write_function(|chunk| {
                    if data.try_reserve(chunk.len()).is_err() {
                        // A short write tells the engine to abort the
                        // transfer instead of truncating the response.
                        return Ok(0);
                    }
                    data.extend_from_slice(chunk);
                    Ok(chunk.len())
                })
                .map_err(|e| TransportError::from_engine("failed installing receive callback", &e))?;
            transfer
                .perform()
                .map_err(|e| TransportError::from_engine("transfer failed", &e))?;
        }

        // The payload parser expects a terminating byte after the content.
        data.push(0);

        let code = handle
            .easy_mut()
            .response_code()
            .map_err(|e| TransportError::from_engine("failed reading response code", &e))?;

        debug!("received {} bytes, HTTP status {code}", data.len() - 1);

        Ok(Response::new(code as u16, data))
    }
}

impl AuthTarget for Request {
    fn install(&mut self, option: AuthOption) -> Result<(), TransportError> {
        match option {
            AuthOption::Login(login) => {
                // Engine convention: the login string splits at the first
                // colon, since the user part cannot contain one.
                let (user, password) = login.split_once(':').unwrap_or((login.as_str(), ""));
                self.handle.set_option(|e| e.username(user))?;
                self.handle.set_option(|e| e.password(password))
            }
            AuthOption::Scheme(AuthScheme::Ntlm) => self
                .handle
                .set_option(|e| e.http_auth(Auth::new().ntlm(true))),
        }
    }
}
