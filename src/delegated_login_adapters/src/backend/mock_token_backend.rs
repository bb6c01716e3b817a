use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use delegated_login_core::{BackendResponse, TokenBackend, TokenBackendError, TokenBundle};

/// Token backend that replays a fixed response and counts how often it was asked.
#[derive(Debug, Clone)]
pub struct MockTokenBackend {
    response: Result<BackendResponse, TokenBackendError>,
    calls: Arc<AtomicUsize>,
}

impl MockTokenBackend {
    pub fn new(response: Result<BackendResponse, TokenBackendError>) -> Self {
        Self {
            response,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_bundle(bundle: TokenBundle) -> Self {
        Self::new(Ok(BackendResponse::Bundle(bundle)))
    }

    pub fn declined(status: u16) -> Self {
        Self::new(Ok(BackendResponse::Declined { status }))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TokenBackend for MockTokenBackend {
    async fn fetch_bundle(&self) -> Result<BackendResponse, TokenBackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}
