use axum::http::{header, HeaderMap};
use thiserror::Error;

/// Rejection reasons for the bearer-token gate. Messages are part of the API
/// contract and map 1:1 to 401 responses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingCredentials,

    #[error("Invalid authorization header format")]
    MalformedHeader,

    #[error("Invalid token")]
    InvalidToken,
}

/// Pure predicate over a request's Authorization header, compared against a
/// single static token configured at startup. Applied by the mutating
/// handlers only; GET requests never consult it. The token is never logged.
#[derive(Clone)]
pub struct AuthGate {
    api_token: String,
}

impl AuthGate {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self { api_token: api_token.into() }
    }

    /// Check the raw header value. Scheme matching is case-insensitive and
    /// whitespace-tolerant; the token itself is compared by exact equality.
    pub fn authenticate(&self, header: Option<&str>) -> Result<(), AuthError> {
        let raw = header.unwrap_or("");
        if raw.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let (scheme, rest) = raw
            .trim()
            .split_once(|c: char| c.is_whitespace())
            .ok_or(AuthError::MalformedHeader)?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::MalformedHeader);
        }

        let token = rest.trim();
        if token.is_empty() {
            return Err(AuthError::MalformedHeader);
        }

        if token != self.api_token {
            return Err(AuthError::InvalidToken);
        }

        Ok(())
    }

    /// Convenience wrapper for handlers holding the full header map.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let header = match headers.get(header::AUTHORIZATION) {
            None => None,
            Some(value) => Some(value.to_str().map_err(|_| AuthError::MalformedHeader)?),
        };
        self.authenticate(header)
    }
}
