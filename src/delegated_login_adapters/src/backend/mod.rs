pub mod mock_token_backend;
pub mod reqwest_token_backend;

pub use mock_token_backend::MockTokenBackend;
pub use reqwest_token_backend::ReqwestTokenBackend;
