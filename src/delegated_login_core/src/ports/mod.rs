pub mod identity_introspector;
pub mod token_backend;
