pub mod matrix_whoami_client;
pub mod mock_identity_introspector;

pub use matrix_whoami_client::MatrixWhoamiClient;
pub use mock_identity_introspector::MockIdentityIntrospector;
