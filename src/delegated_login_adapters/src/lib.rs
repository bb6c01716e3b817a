pub mod backend;
pub mod config;
pub mod introspection;
pub mod resolver;
pub mod telemetry;

pub use resolver::{HttpDelegatedLoginResolver, ResolverBuildError, build_http_resolver};
pub use telemetry::init_tracing;
