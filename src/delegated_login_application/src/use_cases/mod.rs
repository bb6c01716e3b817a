pub mod resolve_delegated_login;

pub use resolve_delegated_login::DelegatedLoginResolver;
