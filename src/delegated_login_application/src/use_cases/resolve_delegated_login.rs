use std::future::Future;

use delegated_login_core::{
    BackendResponse, DelegatedCredential, Endpoint, IdentityIntrospector, LoginFailure,
    LoginOutcome, SessionCredentials, TokenBackend,
};

/// Delegated login use case - trades a backend-issued token for verified
/// session credentials.
///
/// The handshake runs in order:
/// 1. fetch a token bundle from the backend
/// 2. derive the homeserver endpoint from the bundle
/// 3. ask the homeserver who the token belongs to
/// 4. assemble credentials from the homeserver's answer
///
/// The resolver holds no mutable state, so `resolve` may be called any
/// number of times, concurrently or not, and each call runs the full
/// handshake.
pub struct DelegatedLoginResolver<B, I>
where
    B: TokenBackend,
    I: IdentityIntrospector,
{
    token_backend: B,
    introspector: I,
    default_endpoint: Endpoint,
}

impl<B, I> DelegatedLoginResolver<B, I>
where
    B: TokenBackend,
    I: IdentityIntrospector,
{
    pub fn new(token_backend: B, introspector: I, default_endpoint: Endpoint) -> Self {
        Self {
            token_backend,
            introspector,
            default_endpoint,
        }
    }

    /// Homeserver used when the backend doesn't name one.
    pub fn default_endpoint(&self) -> &Endpoint {
        &self.default_endpoint
    }

    /// Run the handshake.
    ///
    /// Never fails: every fault is folded into [`LoginOutcome::Failure`].
    #[tracing::instrument(name = "DelegatedLoginResolver::resolve", skip(self))]
    pub async fn resolve(&self) -> LoginOutcome {
        match self.handshake().await {
            Ok(outcome) => outcome,
            Err(failure) => LoginOutcome::Failure(failure),
        }
    }

    async fn handshake(&self) -> Result<LoginOutcome, LoginFailure> {
        let Some(credential) = self.acquire().await? else {
            return Ok(LoginOutcome::Unavailable);
        };

        let endpoint =
            Endpoint::normalize(credential.home_server.as_deref(), &self.default_endpoint);

        // An empty user id vouches for no one.
        let identity = attempt(
            "introspection",
            self.introspector.whoami(&endpoint, &credential.access_token),
        )
        .await?
        .filter(|identity| !identity.user_id.as_str().is_empty());

        let Some(identity) = identity else {
            let failure = LoginFailure::MissingIdentity {
                homeserver: endpoint.to_string(),
            };
            tracing::error!(error = %failure, "Whoami returned no identity");
            return Err(failure);
        };

        // The backend's claim is only checked, never used.
        if let Some(expected) = credential.claimed_user_id {
            if expected != identity.user_id {
                tracing::warn!(
                    expected = %expected,
                    actual = %identity.user_id,
                    homeserver = %endpoint,
                    "Delegated login token belongs to a different account"
                );
                return Err(LoginFailure::IdentityMismatch {
                    expected,
                    actual: identity.user_id,
                });
            }
        }

        tracing::debug!(user_id = %identity.user_id, homeserver = %endpoint, "Delegated login verified");

        Ok(LoginOutcome::Success(SessionCredentials::assemble(
            endpoint,
            credential.access_token,
            identity,
        )))
    }

    /// Stage A: `Ok(None)` means there is nothing to log in with.
    async fn acquire(&self) -> Result<Option<DelegatedCredential>, LoginFailure> {
        match attempt("acquisition", self.token_backend.fetch_bundle()).await? {
            BackendResponse::Declined { status } => {
                tracing::info!(status, "Delegated login not available for this caller");
                Ok(None)
            }
            BackendResponse::Bundle(bundle) => {
                let credential = bundle.into_credential();
                if credential.is_none() {
                    tracing::info!("Token backend did not offer a delegated login token");
                }
                Ok(credential)
            }
        }
    }
}

/// Await a network stage, logging and converting any error into a [`LoginFailure`].
async fn attempt<T, E>(
    stage: &'static str,
    operation: impl Future<Output = Result<T, E>>,
) -> Result<T, LoginFailure>
where
    E: std::error::Error + Into<LoginFailure>,
{
    operation.await.map_err(|error| {
        tracing::error!(stage, error = %error, "Delegated login stage failed");
        error.into()
    })
}
