//! End-to-end HTTP tests against the in-memory repository

use axum::http::{self, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use todoctl_server::{build_router, AppState, MemoryTodoRepository, ServerConfig, Todo};
use tower::ServiceExt;

fn app() -> (Router, MemoryTodoRepository) {
    let repo = MemoryTodoRepository::new();
    let router = build_router(AppState::new(repo.clone()), &ServerConfig::default());
    (router, repo)
}

async fn send(app: &Router, request: Request<String>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

async fn create(app: &Router, title: &str) -> Todo {
    let body = format!(r#"{{"title":"{title}","description":"d","completed":false}}"#);
    let resp = send(app, json_request("POST", "/api/todos", &body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

async fn assert_error(resp: Response, status: StatusCode) {
    assert_eq!(resp.status(), status);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status_code"], status.as_u16());
    assert!(body["error"].is_string());
}

// --- scenario ---

#[tokio::test]
async fn full_lifecycle_scenario() {
    let (app, _) = app();
    let body = r#"{"title":"buy milk","description":"2%","completed":false}"#;

    let resp = send(&app, json_request("POST", "/api/todos", body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Todo = body_json(resp).await;
    assert!(created.id > 0);
    assert_eq!(created.title, "buy milk");
    assert_eq!(created.description, "2%");
    assert!(!created.completed);

    let resp = send(&app, json_request("POST", "/api/todos", body)).await;
    assert_error(resp, StatusCode::CONFLICT).await;

    let uri = format!("/api/todos/{}", created.id);
    let resp = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Todo = body_json(resp).await;
    assert_eq!(fetched, created);

    let update = r#"{"title":"buy milk","description":"whole","completed":true}"#;
    let resp = send(&app, json_request("PUT", &uri, update)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.description, "whole");
    assert!(updated.completed);

    let resp = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    let resp = send(&app, empty_request("GET", &uri)).await;
    assert_error(resp, StatusCode::NOT_FOUND).await;
}

// --- create ---

#[tokio::test]
async fn create_malformed_json_returns_400() {
    let (app, _) = app();
    let resp = send(&app, json_request("POST", "/api/todos", r#"{"title":"#)).await;
    assert_error(resp, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn create_missing_title_stores_empty_title() {
    let (app, _) = app();
    let body = r#"{"description":"x","completed":true}"#;
    let resp = send(&app, json_request("POST", "/api/todos", body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Todo = body_json(resp).await;
    assert_eq!(created.title, "");
    assert_eq!(created.description, "x");
    assert!(created.completed);

    // The empty title is unique like any other
    let resp = send(&app, json_request("POST", "/api/todos", body)).await;
    assert_error(resp, StatusCode::CONFLICT).await;
}

#[tokio::test]
async fn create_without_json_content_type_returns_400() {
    let (app, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/todos")
        .body(r#"{"title":"plain"}"#.to_string())
        .unwrap();
    let resp = send(&app, request).await;
    assert_error(resp, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn create_store_failure_returns_500() {
    let (app, repo) = app();
    repo.fail_next();
    let resp = send(&app, json_request("POST", "/api/todos", r#"{"title":"x"}"#)).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "internal server error");
}

// --- list ---

#[tokio::test]
async fn list_empty_returns_empty_array() {
    let (app, _) = app();
    let resp = send(&app, empty_request("GET", "/api/todos")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn list_returns_only_live_todos() {
    let (app, _) = app();
    let a = create(&app, "a").await;
    let b = create(&app, "b").await;
    let c = create(&app, "c").await;

    let resp = send(&app, empty_request("DELETE", &format!("/api/todos/{}", b.id))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, empty_request("GET", "/api/todos")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![a, c]);
}

#[tokio::test]
async fn list_store_failure_returns_500() {
    let (app, repo) = app();
    repo.fail_next();
    let resp = send(&app, empty_request("GET", "/api/todos")).await;
    assert_error(resp, StatusCode::INTERNAL_SERVER_ERROR).await;
}

// --- retrieve ---

#[tokio::test]
async fn retrieve_non_integer_id_returns_422() {
    let (app, _) = app();
    for id in ["abc", "1.5", "99999999999"] {
        let resp = send(&app, empty_request("GET", &format!("/api/todos/{id}"))).await;
        assert_error(resp, StatusCode::UNPROCESSABLE_ENTITY).await;
    }
}

#[tokio::test]
async fn retrieve_never_created_returns_404() {
    let (app, _) = app();
    let resp = send(&app, empty_request("GET", "/api/todos/12345")).await;
    assert_error(resp, StatusCode::NOT_FOUND).await;
}

// --- update ---

#[tokio::test]
async fn update_missing_id_returns_404() {
    let (app, _) = app();
    let body = r#"{"title":"t","description":"d","completed":true}"#;
    let resp = send(&app, json_request("PUT", "/api/todos/9999", body)).await;
    assert_error(resp, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn update_bad_id_with_valid_body_returns_422() {
    let (app, _) = app();
    let body = r#"{"title":"t","description":"d","completed":true}"#;
    let resp = send(&app, json_request("PUT", "/api/todos/abc", body)).await;
    assert_error(resp, StatusCode::UNPROCESSABLE_ENTITY).await;
}

#[tokio::test]
async fn update_checks_body_before_id() {
    let (app, _) = app();
    let resp = send(&app, json_request("PUT", "/api/todos/abc", "not json")).await;
    assert_error(resp, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn update_malformed_body_returns_400() {
    let (app, _) = app();
    let todo = create(&app, "keep").await;
    let uri = format!("/api/todos/{}", todo.id);
    let resp = send(&app, json_request("PUT", &uri, r#"{"title":5}"#)).await;
    assert_error(resp, StatusCode::BAD_REQUEST).await;

    let resp = send(&app, empty_request("GET", &uri)).await;
    let unchanged: Todo = body_json(resp).await;
    assert_eq!(unchanged, todo);
}

#[tokio::test]
async fn update_store_failure_returns_500() {
    let (app, repo) = app();
    let todo = create(&app, "x").await;
    repo.fail_next();

    let body = r#"{"title":"y","description":"d","completed":true}"#;
    let resp = send(&app, json_request("PUT", &format!("/api/todos/{}", todo.id), body)).await;
    assert_error(resp, StatusCode::INTERNAL_SERVER_ERROR).await;
}

// --- delete ---

#[tokio::test]
async fn delete_twice_returns_404_second_time() {
    let (app, _) = app();
    let todo = create(&app, "once").await;
    let uri = format!("/api/todos/{}", todo.id);

    let resp = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, empty_request("DELETE", &uri)).await;
    assert_error(resp, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn delete_non_integer_id_returns_422() {
    let (app, _) = app();
    let resp = send(&app, empty_request("DELETE", "/api/todos/one")).await;
    assert_error(resp, StatusCode::UNPROCESSABLE_ENTITY).await;
}

#[tokio::test]
async fn delete_store_failure_returns_500() {
    let (app, repo) = app();
    let todo = create(&app, "x").await;
    repo.fail_next();

    let resp = send(&app, empty_request("DELETE", &format!("/api/todos/{}", todo.id))).await;
    assert_error(resp, StatusCode::INTERNAL_SERVER_ERROR).await;
}

// --- misc ---

#[tokio::test]
async fn health_at_root() {
    let (app, _) = app();
    let resp = send(&app, empty_request("GET", "/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unsupported_method_returns_json_405() {
    let (app, _) = app();
    let todo = create(&app, "patched").await;

    let resp = send(&app, json_request("PATCH", &format!("/api/todos/{}", todo.id), "{}")).await;
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/json"
    );
    assert_error(resp, StatusCode::METHOD_NOT_ALLOWED).await;

    let resp = send(&app, empty_request("DELETE", "/api/todos")).await;
    assert_error(resp, StatusCode::METHOD_NOT_ALLOWED).await;
}

#[tokio::test]
async fn trailing_slash_serves_collection() {
    let (app, _) = app();
    let created = create(&app, "slash").await;

    let resp = send(&app, empty_request("GET", "/api/todos/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![created]);

    let resp = send(&app, json_request("POST", "/api/todos/", r#"{"title":"via slash"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let (app, _) = app();
    let resp = send(&app, empty_request("GET", "/api/nope")).await;
    assert_error(resp, StatusCode::NOT_FOUND).await;
}
