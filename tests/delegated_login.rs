//! End-to-end tests for the delegated login handshake over HTTP.

use std::sync::{Arc, Once};

use config::{File, FileFormat};
use delegated_login::{
    CookieJar, DelegatedLoginSetting, ExposeSecret, HttpDelegatedLoginResolver,
    IntrospectionResult, LoginFailure, LoginOutcome, MockIdentityIntrospector, MockTokenBackend,
    TokenBundle, UserId, build_http_resolver, DelegatedLoginResolver, Endpoint, Secret,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const TOKEN_PATH: &str = "/api/auth/matrix-token";
const WHOAMI_PATH: &str = "/_matrix/client/v3/account/whoami";

static TRACING: Once = Once::new();

struct TestApp {
    backend: MockServer,
    homeserver: MockServer,
    resolver: HttpDelegatedLoginResolver,
}

impl TestApp {
    async fn spawn() -> Self {
        // The global subscriber can only be installed once per test binary.
        TRACING.call_once(|| {
            delegated_login::init_tracing().expect("Failed to initialise tracing");
        });

        let backend = MockServer::start().await;
        let homeserver = MockServer::start().await;

        let json = serde_json::json!({
            "backend": { "url": format!("{}{TOKEN_PATH}", backend.uri()) },
            "homeserver": { "default_url": homeserver.uri() },
            "http_client": { "timeout_in_millis": 500 }
        })
        .to_string();
        let setting =
            DelegatedLoginSetting::load_with(File::from_str(&json, FileFormat::Json)).unwrap();

        let resolver = build_http_resolver(&setting, Arc::new(CookieJar::default())).unwrap();

        Self {
            backend,
            homeserver,
            resolver,
        }
    }

    async fn backend_responds(&self, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(TOKEN_PATH))
            .respond_with(template)
            .mount(&self.backend)
            .await;
    }

    async fn whoami_responds(&self, template: ResponseTemplate, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path(WHOAMI_PATH))
            .and(header("authorization", "Bearer syt_delegated"))
            .respond_with(template)
            .expect(expected_calls)
            .mount(&self.homeserver)
            .await;
    }
}

fn whoami(user_id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "user_id": user_id,
        "device_id": "DEVICEID"
    }))
}

#[tokio::test]
async fn backend_not_found_is_unavailable() {
    let app = TestApp::spawn().await;
    app.backend_responds(ResponseTemplate::new(404)).await;
    app.whoami_responds(whoami("@alice:example.org"), 0).await;

    assert_eq!(app.resolver.resolve().await, LoginOutcome::Unavailable);
}

#[tokio::test]
async fn backend_declining_is_unavailable() {
    let app = TestApp::spawn().await;
    app.backend_responds(
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": false })),
    )
    .await;
    app.whoami_responds(whoami("@alice:example.org"), 0).await;

    assert_eq!(app.resolver.resolve().await, LoginOutcome::Unavailable);
}

#[tokio::test]
async fn bundle_without_token_is_unavailable() {
    let app = TestApp::spawn().await;
    app.backend_responds(
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })),
    )
    .await;
    app.whoami_responds(whoami("@alice:example.org"), 0).await;

    assert_eq!(app.resolver.resolve().await, LoginOutcome::Unavailable);
}

#[tokio::test]
async fn malformed_backend_body_is_failure() {
    let app = TestApp::spawn().await;
    app.backend_responds(ResponseTemplate::new(200).set_body_string("{ not json"))
        .await;
    app.whoami_responds(whoami("@alice:example.org"), 0).await;

    let outcome = app.resolver.resolve().await;

    assert!(matches!(
        outcome,
        LoginOutcome::Failure(LoginFailure::Acquisition(_))
    ));
}

#[tokio::test]
async fn wrongly_typed_bundle_fields_are_unavailable() {
    for body in [
        serde_json::json!({ "ok": "true", "access_token": "syt_delegated" }),
        serde_json::json!({ "ok": 1, "access_token": "syt_delegated" }),
        serde_json::json!({ "ok": true, "access_token": 5 }),
        serde_json::json!({ "ok": false, "access_token": 5 }),
        serde_json::json!(null),
    ] {
        let app = TestApp::spawn().await;
        app.backend_responds(ResponseTemplate::new(200).set_body_json(&body))
            .await;
        app.whoami_responds(whoami("@alice:example.org"), 0).await;

        assert_eq!(
            app.resolver.resolve().await,
            LoginOutcome::Unavailable,
            "body {body}"
        );
    }
}

#[tokio::test]
async fn blank_user_id_from_homeserver_is_failure() {
    let app = TestApp::spawn().await;
    app.backend_responds(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "ok": true,
        "access_token": "syt_delegated"
    })))
    .await;
    app.whoami_responds(
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "user_id": "" })),
        1,
    )
    .await;

    let outcome = app.resolver.resolve().await;

    assert!(outcome.credentials().is_none());
    assert!(matches!(
        outcome,
        LoginOutcome::Failure(LoginFailure::MissingIdentity { .. })
    ));
}

#[tokio::test]
async fn missing_home_server_targets_default_homeserver() {
    let app = TestApp::spawn().await;
    app.backend_responds(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "ok": true,
        "access_token": "syt_delegated"
    })))
    .await;
    app.whoami_responds(whoami("@alice:example.org"), 1).await;

    let outcome = app.resolver.resolve().await;

    let credentials = outcome.credentials().unwrap();
    assert_eq!(credentials.homeserver_url().as_str(), app.homeserver.uri());
}

#[tokio::test]
async fn explicit_http_home_server_is_used_verbatim() {
    let app = TestApp::spawn().await;
    let other_homeserver = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WHOAMI_PATH))
        .respond_with(whoami("@alice:example.org"))
        .expect(1)
        .mount(&other_homeserver)
        .await;
    app.backend_responds(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "ok": true,
        "access_token": "syt_delegated",
        "home_server": other_homeserver.uri()
    })))
    .await;
    app.whoami_responds(whoami("@alice:example.org"), 0).await;

    let outcome = app.resolver.resolve().await;

    assert_eq!(
        outcome.credentials().unwrap().homeserver_url().as_str(),
        other_homeserver.uri()
    );
}

#[tokio::test]
async fn identity_mismatch_is_failure_naming_both_accounts() {
    let app = TestApp::spawn().await;
    app.backend_responds(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "ok": true,
        "access_token": "syt_delegated",
        "matrix_user_id": "@bob:example.org"
    })))
    .await;
    app.whoami_responds(whoami("@alice:example.org"), 1).await;

    let outcome = app.resolver.resolve().await;

    assert!(outcome.credentials().is_none());
    let reason = outcome.failure_reason().unwrap();
    assert!(reason.contains("@alice:example.org"));
    assert!(reason.contains("@bob:example.org"));
}

#[tokio::test]
async fn user_id_comes_from_homeserver_when_backend_makes_no_claim() {
    let app = TestApp::spawn().await;
    app.backend_responds(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "ok": true,
        "access_token": "syt_delegated"
    })))
    .await;
    app.whoami_responds(whoami("@alice:example.org"), 1).await;

    let outcome = app.resolver.resolve().await;

    assert_eq!(
        outcome.credentials().unwrap().user_id(),
        &UserId::from("@alice:example.org")
    );
}

#[tokio::test]
async fn rejected_token_is_failure_with_server_message() {
    let app = TestApp::spawn().await;
    app.backend_responds(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "ok": true,
        "access_token": "syt_delegated"
    })))
    .await;
    app.whoami_responds(
        ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errcode": "M_UNKNOWN_TOKEN",
            "error": "Invalid access token passed."
        })),
        1,
    )
    .await;

    let reason = app.resolver.resolve().await.failure_reason().unwrap();

    assert!(reason.contains("M_UNKNOWN_TOKEN"));
    assert!(reason.contains("Invalid access token passed."));
}

#[tokio::test]
async fn homeserver_timeout_is_failure() {
    let app = TestApp::spawn().await;
    app.backend_responds(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "ok": true,
        "access_token": "syt_delegated"
    })))
    .await;
    app.whoami_responds(
        whoami("@alice:example.org").set_delay(std::time::Duration::from_secs(30)),
        1,
    )
    .await;

    let outcome = app.resolver.resolve().await;

    assert!(matches!(
        outcome,
        LoginOutcome::Failure(LoginFailure::Introspection(_))
    ));
}

#[tokio::test]
async fn happy_path_returns_verified_credentials() {
    let app = TestApp::spawn().await;
    app.backend_responds(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "ok": true,
        "access_token": "syt_delegated",
        "home_server": app.homeserver.uri(),
        "matrix_user_id": "@alice:example.org"
    })))
    .await;
    app.whoami_responds(whoami("@alice:example.org"), 1).await;

    let LoginOutcome::Success(credentials) = app.resolver.resolve().await else {
        panic!("expected verified credentials");
    };

    assert_eq!(credentials.homeserver_url().as_str(), app.homeserver.uri());
    assert_eq!(credentials.access_token().expose_secret(), "syt_delegated");
    assert_eq!(credentials.user_id().as_str(), "@alice:example.org");
    assert_eq!(credentials.device_id(), Some("DEVICEID"));
}

#[tokio::test]
async fn repeated_resolution_runs_the_full_handshake_each_time() {
    let app = TestApp::spawn().await;
    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "access_token": "syt_delegated"
        })))
        .expect(2)
        .mount(&app.backend)
        .await;
    app.whoami_responds(whoami("@alice:example.org"), 2).await;

    let first = app.resolver.resolve().await;
    let second = app.resolver.resolve().await;

    assert!(first.is_success());
    assert_eq!(first, second);
}

#[tokio::test]
async fn concurrent_resolutions_are_independent() {
    let backend = MockTokenBackend::with_bundle(TokenBundle {
        ok: true,
        access_token: Some(Secret::new("syt_delegated".to_string())),
        home_server: Some("matrix.example.org".to_string()),
        claimed_user_id: None,
    });
    let introspector = MockIdentityIntrospector::with_identity(IntrospectionResult::new(
        "@alice:example.org",
        None,
    ));
    let resolver = DelegatedLoginResolver::new(
        backend.clone(),
        introspector.clone(),
        Endpoint::parse("https://matrix.org").unwrap(),
    );

    let (first, second) = tokio::join!(resolver.resolve(), resolver.resolve());

    assert_eq!(first, second);
    assert_eq!(backend.calls(), 2);
    let endpoints = introspector.endpoints().await;
    assert_eq!(endpoints.len(), 2);
    assert!(
        endpoints
            .iter()
            .all(|endpoint| endpoint.as_str() == "https://matrix.example.org")
    );
}
