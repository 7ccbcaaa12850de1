use crate::helpers::{assert_cors_headers, spawn_app};

#[tokio::test]
async fn options_returns_empty_200_with_cors() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, app.upload_url())
        .send()
        .await
        .expect("failed to send preflight");

    assert_eq!(response.status(), 200);
    assert_cors_headers(&response);
    let body = response.text().await.expect("readable body");
    assert!(body.is_empty());
}

#[tokio::test]
async fn options_ignores_fetch_only() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .request(
            reqwest::Method::OPTIONS,
            format!("{}?fetchOnly=true", app.upload_url()),
        )
        .send()
        .await
        .expect("failed to send preflight");

    assert_eq!(response.status(), 200);
    assert!(response.text().await.expect("readable body").is_empty());
    assert!(app.store.is_empty().await);
}
