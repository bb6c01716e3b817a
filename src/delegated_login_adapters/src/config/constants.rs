pub mod env {
    pub const SETTINGS_ENV_PREFIX: &str = "DELEGATED_LOGIN";
    pub const SETTINGS_ENV_SEPARATOR: &str = "__";
}

pub mod prod {
    pub const BACKEND_URL: &str = "http://localhost:3000/api/auth/matrix-token";
    pub const DEFAULT_HOMESERVER_URL: &str = "https://matrix.org";

    pub mod http_client {
        use std::time::Duration;

        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
        pub const TIMEOUT: Duration = Duration::from_millis(TIMEOUT_IN_MILLIS);
    }
}

pub mod test {
    pub mod http_client {
        use std::time::Duration;

        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
