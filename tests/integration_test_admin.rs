mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use appointment_backend::api::extractors::admin::ADMIN_PASSWORD_HEADER;
use common::{parse_body, TestApp, ADMIN_PASSWORD};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_admin_login() {
    let app = TestApp::new().await;

    let res = app.post("/api/admin/auth", json!({"password": ADMIN_PASSWORD})).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["success"], true);

    let res = app.post("/api/admin/auth", json!({"password": "wrong"})).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(parse_body(res).await["code"], "unauthorized");
}

#[tokio::test]
async fn test_listing_requires_password_header() {
    let app = TestApp::new().await;

    let res = app.get("/api/admin/appointments").await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/admin/appointments")
            .header(ADMIN_PASSWORD_HEADER, "wrong")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_listing_is_newest_first_with_filters() {
    let app = TestApp::new().await;
    let first = app.book_ok("2025-12-15", "09:00-09:30", "Alice").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = app.book_ok("2025-12-16", "10:00-10:30", "Bob").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let third = app.book_ok("2025-12-16", "11:00-11:30", "Carol").await;
    app.admin_post("/api/admin/approve", json!({"id": second})).await;

    let body = parse_body(app.admin_get("/api/admin/appointments").await).await;
    let ids: Vec<&str> = body["appointments"].as_array().unwrap().iter().map(|a| a["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec![third.as_str(), second.as_str(), first.as_str()]);

    let body = parse_body(app.admin_get("/api/admin/appointments?status=approved").await).await;
    let list = body["appointments"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], second);

    let body = parse_body(app.admin_get("/api/admin/appointments?date=2025-12-16&status=pending").await).await;
    let list = body["appointments"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], third);

    let body = parse_body(app.admin_get("/api/admin/appointments?status=").await).await;
    assert_eq!(body["appointments"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_listing_rejects_unknown_filters() {
    let app = TestApp::new().await;

    let res = app.admin_get("/api/admin/appointments?status=cancelled").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(parse_body(res).await["field"], "status");

    let res = app.admin_get("/api/admin/appointments?date=someday").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(parse_body(res).await["code"], "invalid_date");
}

#[tokio::test]
async fn test_delete_frees_the_slot() {
    let app = TestApp::new().await;
    let id = app.book_ok("2025-12-15", "09:00-09:30", "Alice").await;

    let res = app.admin_post("/api/admin/delete", json!({"id": id})).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(app.state.appointment_repo.find_by_id(&id).await.unwrap().is_none());

    app.book_ok("2025-12-15", "09:00-09:30", "Bob").await;

    let res = app.admin_post("/api/admin/delete", json!({"id": id})).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let res = app.get("/health").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "ok");
}
