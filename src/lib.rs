//! # Delegated Login
//!
//! This is a facade crate that re-exports all public APIs from the delegated login components.
//! Use this crate to get access to the whole handshake in one place.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use delegated_login::{CookieJar, DelegatedLoginSetting, LoginOutcome, build_http_resolver};
//!
//! let setting = DelegatedLoginSetting::load()?;
//! let resolver = build_http_resolver(&setting, Arc::new(CookieJar::default()))?;
//!
//! match resolver.resolve().await {
//!     LoginOutcome::Unavailable => { /* offer another login method */ }
//!     LoginOutcome::Success(credentials) => { /* start the session */ }
//!     LoginOutcome::Failure(failure) => eprintln!("{failure}"),
//! }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `TokenBundle`, `Endpoint`, `SessionCredentials`, `LoginOutcome`, etc.
//! - **Port traits**: `TokenBackend`, `IdentityIntrospector`
//! - **Use cases**: `DelegatedLoginResolver`
//! - **Adapters**: `ReqwestTokenBackend`, `MatrixWhoamiClient`, mocks, configuration, telemetry

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use delegated_login_core::*;
}

// Re-export most commonly used core types at the root level
pub use delegated_login_core::{
    DelegatedCredential, Endpoint, EndpointError, IntrospectionResult, LoginFailure,
    LoginOutcome, SessionCredentials, TokenBundle, UserId,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use delegated_login_core::{
        BackendResponse, IdentityIntrospector, IntrospectionError, TokenBackend,
        TokenBackendError,
    };
}

// Re-export port traits at root level
pub use delegated_login_core::{
    BackendResponse, IdentityIntrospector, IntrospectionError, TokenBackend, TokenBackendError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use delegated_login_application::*;
}

// Re-export use cases at root level
pub use delegated_login_application::DelegatedLoginResolver;

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Token backend clients
    pub mod backend {
        pub use delegated_login_adapters::backend::*;
    }

    /// Homeserver introspection clients
    pub mod introspection {
        pub use delegated_login_adapters::introspection::*;
    }

    /// Configuration
    pub mod config {
        pub use delegated_login_adapters::config::*;
    }

    /// Tracing setup
    pub mod telemetry {
        pub use delegated_login_adapters::telemetry::*;
    }
}

// Re-export commonly used adapters at root level
pub use delegated_login_adapters::{
    HttpDelegatedLoginResolver, ResolverBuildError,
    backend::{MockTokenBackend, ReqwestTokenBackend},
    build_http_resolver,
    config::DelegatedLoginSetting,
    init_tracing,
    introspection::{MatrixWhoamiClient, MockIdentityIntrospector},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

/// Cookie store holding the caller's session with the token backend
pub use reqwest::cookie::Jar as CookieJar;
