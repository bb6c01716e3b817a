use std::sync::Arc;

use delegated_login_core::{
    Endpoint, IdentityIntrospector, IntrospectionError, IntrospectionResult,
};
use secrecy::Secret;
use tokio::sync::RwLock;

/// Introspector that replays a fixed answer and records every endpoint it was asked about.
#[derive(Debug, Clone)]
pub struct MockIdentityIntrospector {
    response: Result<Option<IntrospectionResult>, IntrospectionError>,
    endpoints: Arc<RwLock<Vec<Endpoint>>>,
}

impl MockIdentityIntrospector {
    pub fn new(response: Result<Option<IntrospectionResult>, IntrospectionError>) -> Self {
        Self {
            response,
            endpoints: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_identity(identity: IntrospectionResult) -> Self {
        Self::new(Ok(Some(identity)))
    }

    /// Endpoints queried so far, oldest first.
    pub async fn endpoints(&self) -> Vec<Endpoint> {
        self.endpoints.read().await.clone()
    }
}

#[async_trait::async_trait]
impl IdentityIntrospector for MockIdentityIntrospector {
    async fn whoami(
        &self,
        endpoint: &Endpoint,
        _access_token: &Secret<String>,
    ) -> Result<Option<IntrospectionResult>, IntrospectionError> {
        self.endpoints.write().await.push(endpoint.clone());
        self.response.clone()
    }
}
