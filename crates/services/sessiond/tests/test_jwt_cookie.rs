use std::error::Error;

use common::{COOKIE_NAME, TestServer, UPSTREAM_HEADER, test_config};
use reqwest::StatusCode;
use session_web::ctx::CtxSource;
use sessiond::api::Me;

mod common;

const MINUTE: i64 = 60;

fn set_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get("set-cookie")
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}

#[tokio::test]
async fn anonymous_requests_pass_through() -> Result<(), Box<dyn Error>> {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    for cookie in ["", "session=garbage", "other=1; session"] {
        let response = client
            .get(server.url("health"))
            .header("cookie", cookie)
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text().await?, "ok");
    }
    Ok(())
}

#[tokio::test]
async fn protected_route_requires_identity() -> Result<(), Box<dyn Error>> {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client.get(server.url("me")).send().await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .get(server.url("me"))
        .header("cookie", "session=garbage")
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .get(server.url("me"))
        .header("cookie", server.session_cookie("u1", MINUTE).await)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let me: Me = response.json().await?;
    assert_eq!(me.user_id, "u1");
    assert_eq!(me.source, CtxSource::SessionCookie);
    Ok(())
}

#[tokio::test]
async fn valid_cookie_for_unknown_user_stays_anonymous() -> Result<(), Box<dyn Error>> {
    let server = TestServer::start().await;
    let response = reqwest::Client::new()
        .get(server.url("me"))
        .header("cookie", server.session_cookie("ghost", MINUTE).await)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn conversion_without_caller_is_rejected() -> Result<(), Box<dyn Error>> {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    for cookie in ["", "session=garbage"] {
        let response = client
            .get(server.url("auth/jwt-cookie"))
            .header("cookie", cookie)
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookie(&response).is_none());
        assert_eq!(response.text().await?, "User has no valid session.");
    }
    Ok(())
}

#[tokio::test]
async fn upstream_identity_gets_a_new_cookie() -> Result<(), Box<dyn Error>> {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("auth/jwt-cookie"))
        .header(UPSTREAM_HEADER, "u1")
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response).expect("session cookie set");
    assert_eq!(response.text().await?, "New JWT cookie issued.");

    assert!(cookie.starts_with(&format!("{COOKIE_NAME}=")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=604800"));

    let session = cookie.split(';').next().expect("cookie pair").to_string();
    let response = client
        .get(server.url("me"))
        .header("cookie", session)
        .send()
        .await?;
    let me: Me = response.json().await?;
    assert_eq!(me.user_id, "u1");
    Ok(())
}

#[tokio::test]
async fn stale_cookie_is_refreshed() -> Result<(), Box<dyn Error>> {
    let server = TestServer::start().await;
    let response = reqwest::Client::new()
        .post(server.url("auth/jwt-cookie"))
        .header("cookie", server.session_cookie("u1", 120 * MINUTE).await)
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).is_some());
    assert_eq!(response.text().await?, "Refreshed JWT cookie issued.");
    Ok(())
}

#[tokio::test]
async fn fresh_cookie_is_confirmed() -> Result<(), Box<dyn Error>> {
    let server = TestServer::start().await;
    let response = reqwest::Client::new()
        .get(server.url("auth/jwt-cookie"))
        .header("cookie", server.session_cookie("u1", 10 * MINUTE).await)
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).is_none());
    assert_eq!(
        response.text().await?,
        "User session already has a valid JWT session."
    );
    Ok(())
}

#[tokio::test]
async fn invalid_cookie_is_reported() -> Result<(), Box<dyn Error>> {
    let server = TestServer::start().await;
    let response = reqwest::Client::new()
        .get(server.url("auth/jwt-cookie"))
        .header(UPSTREAM_HEADER, "u1")
        .header("cookie", "session=garbage")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).is_none());
    assert_eq!(response.text().await?, "JWT Session is invalid");
    Ok(())
}

#[tokio::test]
async fn upstream_header_is_ignored_unless_configured() -> Result<(), Box<dyn Error>> {
    let mut config = test_config();
    config.trusted_identity_header = None;
    let server = TestServer::start_with(config).await;

    let response = reqwest::Client::new()
        .get(server.url("auth/jwt-cookie"))
        .header(UPSTREAM_HEADER, "u1")
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn logout_clears_the_cookie() -> Result<(), Box<dyn Error>> {
    let server = TestServer::start().await;
    let response = reqwest::Client::new()
        .post(server.url("auth/logout"))
        .header("cookie", server.session_cookie("u1", MINUTE).await)
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = set_cookie(&response).expect("removal cookie set");
    assert!(cookie.starts_with(&format!("{COOKIE_NAME}=;")));
    assert!(cookie.contains("Max-Age=0"));
    Ok(())
}

#[tokio::test]
async fn session_identity_takes_precedence_over_upstream() -> Result<(), Box<dyn Error>> {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let me: Me = client
        .get(server.url("me"))
        .header(UPSTREAM_HEADER, "u9")
        .header("cookie", server.session_cookie("u1", MINUTE).await)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(me.user_id, "u1");
    assert_eq!(me.source, CtxSource::SessionCookie);

    let me: Me = client
        .get(server.url("me"))
        .header(UPSTREAM_HEADER, "u9")
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(me.user_id, "u9");
    assert_eq!(me.source, CtxSource::Upstream);
    Ok(())
}
