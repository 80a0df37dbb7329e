//! Tests the liveness route and the layers every response goes through.

use anyhow::Result;
use reqwest::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn home_returns_running_message() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.home_get().await?;

    assert_eq!(res.status(), StatusCode::OK, "Liveness check FAILED!");
    assert_eq!("API is running", res.text().await?);

    Ok(())
}

#[tokio::test]
async fn invalid_path_404() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app
        .http_client
        .get(format!("http://{}/invalidpath", app.addr))
        .send()
        .await?;

    assert!(
        res.status() == StatusCode::NOT_FOUND,
        "Invalid Path check FAILED!, expected: {}, got: {}",
        404,
        res.status().as_u16()
    );

    Ok(())
}

#[tokio::test]
async fn subscribe_only_accepts_put() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app
        .http_client
        .post(format!("http://{}/subscribe", app.addr))
        .json(&serde_json::json!({ "email": "a@b.com" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    Ok(())
}

#[tokio::test]
async fn responses_carry_request_id() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.home_get().await?;

    let req_id = res
        .headers()
        .get("x-request-id")
        .expect("x-request-id header is set")
        .to_str()?;
    assert_eq!(36, req_id.len(), "not a uuid: {req_id}");

    Ok(())
}

#[tokio::test]
async fn cors_allows_any_origin() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app
        .http_client
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{}/subscribe", app.addr),
        )
        .header("Origin", "https://quiz.example.com")
        .header("Access-Control-Request-Method", "PUT")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await?;

    assert!(res.status().is_success(), "preflight got {}", res.status());
    assert!(res.headers().contains_key("access-control-allow-origin"));
    assert!(res.headers().contains_key("access-control-allow-methods"));

    Ok(())
}

#[tokio::test]
async fn cross_origin_responses_keep_request_id() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app
        .http_client
        .get(format!("http://{}/", app.addr))
        .header("Origin", "https://quiz.example.com")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        Some("*"),
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|origin| origin.to_str().ok())
    );
    assert!(res.headers().contains_key("x-request-id"));

    Ok(())
}
