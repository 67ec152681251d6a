use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use hexcoord::server::{AppState, build_router};
use hexcoord::{Database, ShapeKind, ShapeService};
use http_body_util::BodyExt;
use serde_json::{Value as JsonValue, json};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    assets: TempDir,
    service: ShapeService,
    router: Router,
}

fn test_app() -> TestApp {
    let assets = tempfile::tempdir().expect("tempdir");
    let service = ShapeService::new(Database::open_in_memory().expect("in-memory db"));
    let state = Arc::new(AppState::new(service.clone(), assets.path().to_path_buf()));
    TestApp {
        assets,
        service,
        router: build_router(state),
    }
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let req = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();
    let resp = app.router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.expect("collect body").to_bytes();
    (status, bytes.to_vec())
}

async fn post_json(app: &TestApp, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    let (status, bytes) = send(app, "POST", uri, Some(body.to_string())).await;
    let json: JsonValue = serde_json::from_slice(&bytes).expect("valid JSON response");
    (status, json)
}

#[tokio::test]
async fn create_triangle_scenario() {
    let app = test_app();
    let (status, json) = post_json(
        &app,
        "/api/create-triangle/",
        json!({
            "vertices": [
                {"q": 0, "r": 0, "s": 0},
                {"q": 1, "r": -1, "s": 0},
                {"q": 0, "r": -1, "s": 1}
            ],
            "magnitude": 0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"ok": true, "shape_id": 1}));

    let shapes = app.service.shapes();
    assert_eq!(shapes.count().unwrap(), 1);
    assert_eq!(shapes.count_points().unwrap(), 3);
    let shape = shapes.get(1).unwrap().expect("shape 1");
    assert_eq!(shape.kind, ShapeKind::Triangle);
    let origin = app.service.points().get(shape.origin_id).unwrap().unwrap();
    assert_eq!(origin.coord.q, 0);
}

#[tokio::test]
async fn create_circle_scenario() {
    let app = test_app();
    let (status, json) = post_json(
        &app,
        "/api/create-circle/",
        json!({"origin": {"q": 0, "r": 0, "s": 0}, "magnitude": 4}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.get("ok"), Some(&json!(true)));
    let id = json.get("shape_id").and_then(|v| v.as_i64()).unwrap();

    let shape = app.service.shapes().get(id).unwrap().unwrap();
    assert_eq!(shape.kind, ShapeKind::Circle);
    assert_eq!(shape.magnitude, 4);
    assert_eq!(app.service.shapes().count_points().unwrap(), 0);
}

#[tokio::test]
async fn invalid_cube_sum_is_400() {
    let app = test_app();
    let (status, json) = post_json(
        &app,
        "/api/create-circle/",
        json!({"origin": {"q": 1, "r": 1, "s": 1}, "magnitude": 1}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json.get("ok"), Some(&json!(false)));
    assert!(
        json.get("error")
            .and_then(|v| v.as_str())
            .unwrap()
            .contains("Cube coords sum should be 0")
    );
    assert_eq!(app.service.points().count().unwrap(), 0);
}

#[tokio::test]
async fn triangle_needs_three_vertices() {
    let app = test_app();
    let (status, json) = post_json(
        &app,
        "/api/create-triangle/",
        json!({"vertices": [{"q": 0, "r": 0, "s": 0}, {"q": 1, "r": -1, "s": 0}]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({"ok": false, "error": "Triangle requires 3 clicks"})
    );
    assert_eq!(app.service.shapes().count().unwrap(), 0);
}

#[tokio::test]
async fn malformed_and_mistyped_bodies_are_400() {
    let app = test_app();

    let (status, bytes) = send(&app, "POST", "/api/create-circle/", Some("{oops".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json.get("ok"), Some(&json!(false)));

    let (status, _) = post_json(
        &app,
        "/api/create-circle/",
        json!({"origin": {"q": 0, "r": 0, "s": 0}, "magnitude": "four"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/api/create-circle/",
        json!({"origin": {"q": 0, "r": 0}, "magnitude": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_method_is_405() {
    let app = test_app();
    for uri in [
        "/api/create-circle/",
        "/api/create-triangle/",
        "/api/clear-db/",
    ] {
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
    }
}

#[tokio::test]
async fn clear_db_on_populated_and_empty_store() {
    let app = test_app();
    post_json(
        &app,
        "/api/create-circle/",
        json!({"origin": {"q": 0, "r": 0, "s": 0}, "magnitude": 1, "points": [{"q": 1, "r": -1, "s": 0}]}),
    )
    .await;
    assert_eq!(app.service.shapes().count().unwrap(), 1);

    for _ in 0..2 {
        let (status, bytes) = send(&app, "POST", "/api/clear-db/", None).await;
        assert_eq!(status, StatusCode::OK);
        let json: JsonValue = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, json!({"ok": true}));
    }

    assert_eq!(app.service.shapes().count().unwrap(), 0);
    assert_eq!(app.service.shapes().count_points().unwrap(), 0);
    assert_eq!(app.service.points().count().unwrap(), 0);
}

#[tokio::test]
async fn export_is_xlsx_attachment() {
    let app = test_app();
    post_json(
        &app,
        "/api/create-circle/",
        json!({"origin": {"q": 2, "r": -1, "s": -1}, "magnitude": 3}),
    )
    .await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/export-shapes-xlsx/")
        .body(Body::empty())
        .unwrap();
    let resp = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"shapes.xlsx\""
    );
    assert!(
        resp.headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("spreadsheetml")
    );
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"PK"));

    let table = app.service.export_table().unwrap();
    assert_eq!(table.rows.len(), 1);
}

#[tokio::test]
async fn template_assets_served_or_404() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/template/style.css", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "style.css not found");

    std::fs::write(app.assets.path().join("ops.js"), "console.log('hex');").unwrap();
    let req = Request::builder()
        .uri("/template/ops.js")
        .body(Body::empty())
        .unwrap();
    let resp = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/javascript; charset=utf-8"
    );
}

#[tokio::test]
async fn root_serves_home_page_not_template() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "home.html not found");

    std::fs::write(app.assets.path().join("home.html"), "<h1>home</h1>").unwrap();
    std::fs::write(app.assets.path().join("template.html"), "<h1>template</h1>").unwrap();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "<h1>home</h1>");

    let (status, body) = send(&app, "GET", "/template/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "<h1>template</h1>");
}
