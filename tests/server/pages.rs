use crate::helpers::spawn_app;

#[tokio::test]
async fn gallery_page_renders() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(app.page_url("/"))
        .send()
        .await
        .expect("failed to fetch gallery page");

    assert_eq!(response.status(), 200);
    assert!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/html"))
    );
    assert_eq!(
        response
            .headers()
            .get("x-content-type-options")
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );

    let html = response.text().await.expect("readable body");
    assert!(html.contains(r#"data-upload-path="/upload""#));
}

#[tokio::test]
async fn gallery_page_has_no_cors_headers() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(app.page_url("/"))
        .send()
        .await
        .expect("failed to fetch gallery page");

    assert!(response.headers().get("access-control-allow-origin").is_none());
}
