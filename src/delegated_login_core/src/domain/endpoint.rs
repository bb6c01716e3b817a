//! Homeserver endpoint derivation.
//!
//! The backend may hand us a bare hostname (`matrix.example.org`), a full URL
//! (`http://localhost:8008`) or nothing at all. Everything downstream needs an
//! absolute, scheme-qualified base URL, so the raw value is normalized here
//! before any request is built from it.

use std::fmt;

use thiserror::Error;

const HTTP_SCHEME: &str = "http://";
const HTTPS_SCHEME: &str = "https://";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("Endpoint is empty")]
    Empty,
    #[error("Endpoint `{0}` must start with http:// or https://")]
    MissingScheme(String),
}

/// Absolute base URL of a homeserver.
///
/// Always starts with `http://` or `https://`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint(String);

impl Endpoint {
    /// Parse an endpoint that must already carry an explicit scheme.
    ///
    /// Used for configured values such as the default homeserver, where a
    /// missing scheme is a configuration mistake rather than something to
    /// paper over.
    pub fn parse(value: &str) -> Result<Self, EndpointError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(EndpointError::Empty);
        }
        if !has_scheme(value) {
            return Err(EndpointError::MissingScheme(value.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Derive the endpoint for a backend-supplied `home_server` value.
    ///
    /// 1. absent or blank: `default`
    /// 2. already `http://` / `https://`: used verbatim
    /// 3. anything else: prefixed with `https://`
    pub fn normalize(home_server: Option<&str>, default: &Endpoint) -> Self {
        match home_server.map(str::trim) {
            None | Some("") => default.clone(),
            Some(host) if has_scheme(host) => Self(host.to_owned()),
            Some(host) => Self(format!("{HTTPS_SCHEME}{host}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append an absolute API path, collapsing any trailing slash on the base.
    pub fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn has_scheme(value: &str) -> bool {
    starts_with_ignore_case(value, HTTPS_SCHEME) || starts_with_ignore_case(value, HTTP_SCHEME)
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Endpoint {
    type Error = EndpointError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
