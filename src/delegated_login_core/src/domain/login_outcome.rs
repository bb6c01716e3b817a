use thiserror::Error;

use crate::{
    domain::{session_credentials::SessionCredentials, user_id::UserId},
    ports::{identity_introspector::IntrospectionError, token_backend::TokenBackendError},
};

/// Why a delegated credential could not be turned into a session.
///
/// The `Display` output is meant for end users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginFailure {
    #[error("Could not obtain a delegated login token: {0}")]
    Acquisition(#[from] TokenBackendError),
    #[error("Could not verify the delegated login token: {0}")]
    Introspection(#[from] IntrospectionError),
    #[error("Homeserver {homeserver} did not report who the delegated login token belongs to")]
    MissingIdentity { homeserver: String },
    #[error("Delegated login token belongs to {actual}, but {expected} was expected")]
    IdentityMismatch { expected: UserId, actual: UserId },
}

impl LoginFailure {
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// Result of one delegated-login handshake.
///
/// `Unavailable` is not an error: the caller isn't set up for delegated login
/// and should quietly offer another login method. `Failure` means a
/// credential existed but could not be trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Unavailable,
    Success(SessionCredentials),
    Failure(LoginFailure),
}

impl LoginOutcome {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn credentials(&self) -> Option<&SessionCredentials> {
        match self {
            Self::Success(credentials) => Some(credentials),
            _ => None,
        }
    }

    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Failure(failure) => Some(failure.reason()),
            _ => None,
        }
    }

    /// `None` when delegated login is unavailable, otherwise the attempt's result.
    pub fn into_result(self) -> Option<Result<SessionCredentials, LoginFailure>> {
        match self {
            Self::Unavailable => None,
            Self::Success(credentials) => Some(Ok(credentials)),
            Self::Failure(failure) => Some(Err(failure)),
        }
    }
}

impl From<LoginFailure> for LoginOutcome {
    fn from(failure: LoginFailure) -> Self {
        Self::Failure(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_reason_names_both_identities() {
        let failure = LoginFailure::IdentityMismatch {
            expected: UserId::from("@bob:example.org"),
            actual: UserId::from("@alice:example.org"),
        };

        let reason = failure.reason();
        assert!(reason.contains("@bob:example.org"));
        assert!(reason.contains("@alice:example.org"));
    }

    #[test]
    fn introspection_reason_carries_underlying_message() {
        let failure = LoginFailure::from(IntrospectionError::Transport(
            "operation timed out".to_string(),
        ));
        assert!(failure.reason().contains("operation timed out"));
    }

    #[test]
    fn unavailable_maps_to_no_result() {
        assert!(LoginOutcome::Unavailable.into_result().is_none());
        assert!(LoginOutcome::Unavailable.failure_reason().is_none());
    }

    #[test]
    fn failure_maps_to_err() {
        let outcome = LoginOutcome::from(LoginFailure::MissingIdentity {
            homeserver: "https://matrix.org".to_string(),
        });

        assert!(!outcome.is_unavailable());
        assert!(!outcome.is_success());
        assert!(outcome.credentials().is_none());
        assert!(matches!(outcome.into_result(), Some(Err(_))));
    }
}
