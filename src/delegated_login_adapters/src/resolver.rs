use std::sync::Arc;

use delegated_login_application::DelegatedLoginResolver;
use delegated_login_core::EndpointError;
use reqwest::cookie::Jar;
use thiserror::Error;

use crate::{
    backend::ReqwestTokenBackend, config::DelegatedLoginSetting,
    introspection::MatrixWhoamiClient,
};

/// The resolver wired to the real backend and a Matrix homeserver over HTTP.
pub type HttpDelegatedLoginResolver =
    DelegatedLoginResolver<ReqwestTokenBackend, MatrixWhoamiClient>;

#[derive(Debug, Error)]
pub enum ResolverBuildError {
    #[error("Invalid default homeserver: {0}")]
    InvalidDefaultHomeserver(#[from] EndpointError),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Build the HTTP resolver from settings.
///
/// `cookie_jar` holds the caller's session with the token backend. It is only
/// attached to backend requests, never to the homeserver.
pub fn build_http_resolver(
    setting: &DelegatedLoginSetting,
    cookie_jar: Arc<Jar>,
) -> Result<HttpDelegatedLoginResolver, ResolverBuildError> {
    let default_endpoint = setting.homeserver.default_endpoint()?;
    let timeout = setting.http_client.timeout();

    let token_backend =
        ReqwestTokenBackend::with_cookie_jar(setting.backend.url.clone(), cookie_jar, timeout)?;
    let introspector = MatrixWhoamiClient::with_timeout(timeout)?;

    Ok(DelegatedLoginResolver::new(
        token_backend,
        introspector,
        default_endpoint,
    ))
}
