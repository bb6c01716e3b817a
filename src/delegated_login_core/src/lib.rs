pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    endpoint::{Endpoint, EndpointError},
    introspection::IntrospectionResult,
    login_outcome::{LoginFailure, LoginOutcome},
    session_credentials::SessionCredentials,
    token_bundle::{DelegatedCredential, TokenBundle},
    user_id::UserId,
};

pub use ports::{
    identity_introspector::{IdentityIntrospector, IntrospectionError},
    token_backend::{BackendResponse, TokenBackend, TokenBackendError},
};
