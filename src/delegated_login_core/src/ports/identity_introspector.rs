use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{endpoint::Endpoint, introspection::IntrospectionResult};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntrospectionError {
    #[error("Homeserver rejected the access token (HTTP {status}, {errcode}): {message}")]
    Rejected {
        status: u16,
        errcode: String,
        message: String,
    },
    #[error("Request to the homeserver failed: {0}")]
    Transport(String),
    #[error("Homeserver returned a malformed whoami response: {0}")]
    MalformedResponse(String),
}

/// Port for the homeserver's "who am I" query.
///
/// Returns `Ok(None)` when the server answered successfully but did not
/// describe any identity.
#[async_trait]
pub trait IdentityIntrospector: Send + Sync {
    async fn whoami(
        &self,
        endpoint: &Endpoint,
        access_token: &Secret<String>,
    ) -> Result<Option<IntrospectionResult>, IntrospectionError>;
}
