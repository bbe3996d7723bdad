//! Request authentication.
//!
//! # Design
//! `Credentials` is the single seam for authentication schemes: a credential
//! certifies a request by installing auth-related transfer options and
//! touches nothing else. New schemes implement `Credentials` rather than
//! growing branches inside `Request`. Options travel through the narrow
//! `AuthTarget` trait, which also lets tests capture them with a fake.

use crate::error::TransportError;

/// Authentication scheme the engine negotiates with the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// Windows challenge-response authentication.
    Ntlm,
}

/// Authentication-related transfer options a credential may install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOption {
    /// Login string in the engine's `user:password` form. NTLM logins put
    /// the Windows domain in the user part: `domain\user:password`.
    Login(String),
    /// Scheme to negotiate.
    Scheme(AuthScheme),
}

/// The slice of a request that credentials are allowed to touch.
pub trait AuthTarget {
    fn install(&mut self, option: AuthOption) -> Result<(), TransportError>;
}

/// A way to certify an outgoing request.
pub trait Credentials {
    /// Install this credential's authentication options on `request`.
    ///
    /// Must not alter the request's method, body, or unrelated headers.
    fn certify(&self, request: &mut dyn AuthTarget) -> Result<(), TransportError>;
}

/// NTLM credentials: username, password and Windows domain.
#[derive(Debug, Clone)]
pub struct NtlmCredentials {
    username: String,
    password: String,
    domain: String,
}

impl NtlmCredentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            domain: domain.into(),
        }
    }
}

impl Credentials for NtlmCredentials {
    fn certify(&self, request: &mut dyn AuthTarget) -> Result<(), TransportError> {
        let login = format!("{}\\{}:{}", self.domain, self.username, self.password);
        request.install(AuthOption::Login(login))?;
        request.install(AuthOption::Scheme(AuthScheme::Ntlm))
    }
}
