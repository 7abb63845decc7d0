#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use session_auth::jwt::JwtTokenService;
use session_auth::token::{ExtraClaims, TokenService};
use session_web::identity::User;
use sessiond::{api::router, config::SessiondConfig, users::StaticIdentityStore};
use tokio::net::TcpListener;

pub const SECRET: &[u8] = b"sessiond-test-secret";
pub const COOKIE_NAME: &str = "session";
pub const UPSTREAM_HEADER: &str = "X-Forwarded-User";

pub fn test_config() -> SessiondConfig {
    let mut config = SessiondConfig::default();
    config.session.cookie_name = String::from(COOKIE_NAME);
    config.trusted_identity_header = Some(String::from(UPSTREAM_HEADER));
    config.users = vec![User {
        id: String::from("u1"),
        name: Some(String::from("Ada")),
    }];
    config
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub tokens: Arc<JwtTokenService>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(test_config()).await
    }

    pub async fn start_with(config: SessiondConfig) -> Self {
        let tokens = Arc::new(
            JwtTokenService::new(SECRET, config.token_ttl_seconds())
                .expect("Failed to create token service"),
        );
        let users = StaticIdentityStore::new(config.users.clone());
        let app = router(&config, tokens.clone(), Arc::new(users)).expect("Failed to build router");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server failed");
        });

        Self { addr, tokens }
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("http://{}/v1/{endpoint}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/v1/ws", self.addr)
    }

    /// A `Cookie` header carrying a session token for `subject`, signed
    /// `age_seconds` ago.
    pub async fn session_cookie(&self, subject: &str, age_seconds: i64) -> String {
        let mut claims = ExtraClaims::new();
        claims.insert(
            "iat".into(),
            serde_json::json!(chrono::Utc::now().timestamp() - age_seconds),
        );
        let token = self
            .tokens
            .sign(subject, claims, None)
            .await
            .expect("Failed to sign token");
        format!("{COOKIE_NAME}={token}")
    }
}
