use serde::{Deserialize, Serialize};

use crate::domain::user_id::UserId;

/// Identity a homeserver reports for a presented access token.
///
/// This is the only identity the resolver ever trusts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectionResult {
    pub user_id: UserId,
    #[serde(default)]
    pub device_id: Option<String>,
}

impl IntrospectionResult {
    pub fn new(user_id: impl Into<UserId>, device_id: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            device_id,
        }
    }
}
