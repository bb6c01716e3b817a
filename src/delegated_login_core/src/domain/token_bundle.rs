use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, de::IgnoredAny};

use crate::domain::user_id::UserId;

/// Raw credential bundle as returned by the delegated-auth backend.
///
/// Nothing in here is trusted yet. A bundle only yields a credential when the
/// backend says `ok` and actually hands over a token; anything else means the
/// caller simply isn't provisioned for delegated login.
///
/// Decoding is lenient per field: a value of the wrong type reads as absent,
/// so only a JSON `true` sets `ok`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenBundle {
    #[serde(default, deserialize_with = "only_true")]
    pub ok: bool,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub access_token: Option<Secret<String>>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub home_server: Option<String>,
    /// Identity the backend *claims* the token belongs to. Advisory only.
    #[serde(default, rename = "matrix_user_id", deserialize_with = "string_or_absent")]
    pub claimed_user_id: Option<UserId>,
}

/// Either the expected type or anything else, discarded.
#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum Lenient<T> {
    Expected(T),
    Other(IgnoredAny),
}

fn only_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(
        Lenient::<bool>::deserialize(deserializer)?,
        Lenient::Expected(true)
    ))
}

fn string_or_absent<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    Ok(match Lenient::<String>::deserialize(deserializer)? {
        Lenient::Expected(value) => Some(T::from(value)),
        Lenient::Other(_) => None,
    })
}

/// A bundle that passed the availability check and carries a usable token.
#[derive(Debug, Clone)]
pub struct DelegatedCredential {
    pub access_token: Secret<String>,
    pub home_server: Option<String>,
    pub claimed_user_id: Option<UserId>,
}

impl TokenBundle {
    /// Extract the credential, or `None` if the backend declined to offer one.
    pub fn into_credential(self) -> Option<DelegatedCredential> {
        if !self.ok {
            return None;
        }

        let access_token = self
            .access_token
            .filter(|token| !token.expose_secret().is_empty())?;

        Some(DelegatedCredential {
            access_token,
            home_server: self.home_server,
            claimed_user_id: self
                .claimed_user_id
                .filter(|user_id| !user_id.as_str().is_empty()),
        })
    }
}
