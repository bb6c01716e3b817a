use secrecy::{ExposeSecret, Secret};

use crate::domain::{endpoint::Endpoint, introspection::IntrospectionResult, user_id::UserId};

/// Verified session credentials handed back to the caller.
///
/// Can only be assembled from an [`IntrospectionResult`], so the user and
/// device ids always come from the homeserver and never from the backend's
/// claim. Fields are read-only once built.
#[derive(Debug, Clone)]
pub struct SessionCredentials {
    homeserver_url: Endpoint,
    access_token: Secret<String>,
    user_id: UserId,
    device_id: Option<String>,
}

impl SessionCredentials {
    pub fn assemble(
        homeserver_url: Endpoint,
        access_token: Secret<String>,
        identity: IntrospectionResult,
    ) -> Self {
        Self {
            homeserver_url,
            access_token,
            user_id: identity.user_id,
            device_id: identity.device_id,
        }
    }

    pub fn homeserver_url(&self) -> &Endpoint {
        &self.homeserver_url
    }

    pub fn access_token(&self) -> &Secret<String> {
        &self.access_token
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }
}

impl PartialEq for SessionCredentials {
    fn eq(&self, other: &Self) -> bool {
        self.homeserver_url == other.homeserver_url
            && self.access_token.expose_secret() == other.access_token.expose_secret()
            && self.user_id == other.user_id
            && self.device_id == other.device_id
    }
}

impl Eq for SessionCredentials {}
