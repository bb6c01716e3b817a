pub mod endpoint;
pub mod introspection;
pub mod login_outcome;
pub mod session_credentials;
pub mod token_bundle;
pub mod user_id;
