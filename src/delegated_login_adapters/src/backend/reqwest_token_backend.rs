use std::{sync::Arc, time::Duration};

use delegated_login_core::{BackendResponse, TokenBackend, TokenBackendError, TokenBundle};
use reqwest::{Client, cookie::Jar, header::ACCEPT};

/// Fetches delegated login tokens from the backend over HTTP.
///
/// The backend identifies the caller from its session cookies, so the
/// `http_client` must carry a cookie store holding them.
pub struct ReqwestTokenBackend {
    http_client: Client,
    backend_url: String,
}

impl ReqwestTokenBackend {
    pub fn new(backend_url: String, http_client: Client) -> Self {
        Self {
            http_client,
            backend_url,
        }
    }

    /// Build a backend client that sends the cookies held in `cookie_jar`.
    pub fn with_cookie_jar(
        backend_url: String,
        cookie_jar: Arc<Jar>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .cookie_provider(cookie_jar)
            .timeout(timeout)
            .build()?;

        Ok(Self::new(backend_url, http_client))
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }
}

#[async_trait::async_trait]
impl TokenBackend for ReqwestTokenBackend {
    #[tracing::instrument(name = "Fetching delegated login token", skip_all, fields(backend = %self.backend_url))]
    async fn fetch_bundle(&self) -> Result<BackendResponse, TokenBackendError> {
        let response = self
            .http_client
            .get(self.backend_url.as_str())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| TokenBackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(BackendResponse::Declined {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TokenBackendError::Transport(e.to_string()))?;

        let json = serde_json::from_slice::<serde_json::Value>(&body)
            .map_err(|e| TokenBackendError::MalformedBody(e.to_string()))?;

        // Well-formed JSON that isn't a bundle object offers no token.
        let bundle = if json.is_object() {
            serde_json::from_value::<TokenBundle>(json).unwrap_or_default()
        } else {
            TokenBundle::default()
        };

        Ok(BackendResponse::Bundle(bundle))
    }
}
