use async_trait::async_trait;
use thiserror::Error;

use crate::domain::token_bundle::TokenBundle;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenBackendError {
    #[error("Request to the token backend failed: {0}")]
    Transport(String),
    #[error("Token backend returned a malformed body: {0}")]
    MalformedBody(String),
}

/// What the backend said, before any trust decision is made.
#[derive(Debug, Clone)]
pub enum BackendResponse {
    /// Non-success HTTP status: the caller isn't provisioned for delegated login.
    Declined { status: u16 },
    /// A parsed bundle; it may still decline to offer a credential.
    Bundle(TokenBundle),
}

/// Port for the trusted backend that issues delegated credentials.
///
/// Implementations carry whatever ambient authentication the backend needs
/// to identify the caller (cookies, in the HTTP adapter).
#[async_trait]
pub trait TokenBackend: Send + Sync {
    async fn fetch_bundle(&self) -> Result<BackendResponse, TokenBackendError>;
}
