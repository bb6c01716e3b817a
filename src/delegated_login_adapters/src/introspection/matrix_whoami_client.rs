use std::time::Duration;

use delegated_login_core::{
    Endpoint, IdentityIntrospector, IntrospectionError, IntrospectionResult,
};
use reqwest::{Client, header::ACCEPT};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

const WHOAMI_PATH: &str = "/_matrix/client/v3/account/whoami";
const UNKNOWN_ERRCODE: &str = "M_UNKNOWN";

/// Asks a Matrix homeserver which account an access token belongs to.
#[derive(Clone)]
pub struct MatrixWhoamiClient {
    http_client: Client,
}

impl MatrixWhoamiClient {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(http_client))
    }
}

#[async_trait::async_trait]
impl IdentityIntrospector for MatrixWhoamiClient {
    #[tracing::instrument(name = "Querying homeserver whoami", skip_all, fields(homeserver = %endpoint))]
    async fn whoami(
        &self,
        endpoint: &Endpoint,
        access_token: &Secret<String>,
    ) -> Result<Option<IntrospectionResult>, IntrospectionError> {
        let response = self
            .http_client
            .get(endpoint.join(WHOAMI_PATH))
            .bearer_auth(access_token.expose_secret())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| IntrospectionError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| IntrospectionError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(rejection(status.as_u16(), &body));
        }

        // A 2xx with nothing in it: the server vouched for no one.
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice::<Option<IntrospectionResult>>(&body)
            .map_err(|e| IntrospectionError::MalformedResponse(e.to_string()))
    }
}

/// Standard Matrix error body, e.g. `{"errcode": "M_UNKNOWN_TOKEN", "error": "..."}`.
#[derive(Debug, Default, Deserialize)]
struct MatrixErrorBody {
    #[serde(default)]
    errcode: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn rejection(status: u16, body: &[u8]) -> IntrospectionError {
    let parsed = serde_json::from_slice::<MatrixErrorBody>(body).unwrap_or_default();

    let message = parsed.error.unwrap_or_else(|| {
        let raw = String::from_utf8_lossy(body).trim().to_string();
        if raw.is_empty() {
            "no error message".to_string()
        } else {
            raw
        }
    });

    IntrospectionError::Rejected {
        status,
        errcode: parsed
            .errcode
            .unwrap_or_else(|| UNKNOWN_ERRCODE.to_string()),
        message,
    }
}
