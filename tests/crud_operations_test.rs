use axum_test::TestServer;
use http::StatusCode;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_create_then_list() {
    let app = common::setup_test_app().await.unwrap();
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/usuarios")
        .json(&json!({ "nome": "Ana Silva", "email": "ana@x.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let id = body["id"].as_i64().expect("create should return the new id");

    let response = server.get("/api/usuarios").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let usuarios: Value = response.json();
    assert_eq!(
        usuarios,
        json!([{ "id": id, "nome": "Ana Silva", "email": "ana@x.com" }])
    );
}

#[tokio::test]
async fn test_list_is_ordered_by_nome() {
    let app = common::setup_test_app().await.unwrap();
    let server = TestServer::new(app).unwrap();

    for (nome, email) in [
        ("Carla", "carla@x.com"),
        ("Ana", "ana@x.com"),
        ("Bruno", "bruno@x.com"),
    ] {
        let response = server
            .post("/api/usuarios")
            .json(&json!({ "nome": nome, "email": email }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let usuarios: Value = server.get("/api/usuarios").await.json();
    let nomes: Vec<&str> = usuarios
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["nome"].as_str().unwrap())
        .collect();
    assert_eq!(nomes, vec!["Ana", "Bruno", "Carla"]);
}

#[tokio::test]
async fn test_list_empty_database() {
    let app = common::setup_test_app().await.unwrap();
    let server = TestServer::new(app).unwrap();

    let response = server.get("/api/usuarios").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_create_rejects_missing_fields() {
    let app = common::setup_test_app().await.unwrap();
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/usuarios")
        .json(&json!({ "nome": "Ana" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Empty strings count as missing, same as the original API.
    let response = server
        .post("/api/usuarios")
        .json(&json!({ "nome": "", "email": "ana@x.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_existing_usuario() {
    let app = common::setup_test_app().await.unwrap();
    let server = TestServer::new(app).unwrap();

    let body: Value = server
        .post("/api/usuarios")
        .json(&json!({ "nome": "Ana Silva", "email": "ana@x.com" }))
        .await
        .json();
    let id = body["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/usuarios/{}", id))
        .json(&json!({ "nome": "Ana S.", "email": "ana@x.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let usuarios: Value = server.get("/api/usuarios").await.json();
    assert_eq!(usuarios[0]["nome"], "Ana S.");
    assert_eq!(usuarios[0]["id"], id);
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let app = common::setup_test_app().await.unwrap();
    let server = TestServer::new(app).unwrap();

    let response = server
        .put("/api/usuarios/999")
        .json(&json!({ "nome": "Ana", "email": "ana@x.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rejects_missing_fields() {
    let app = common::setup_test_app().await.unwrap();
    let server = TestServer::new(app).unwrap();

    let response = server
        .put("/api/usuarios/1")
        .json(&json!({ "email": "ana@x.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_twice_yields_404_second_time() {
    let app = common::setup_test_app().await.unwrap();
    let server = TestServer::new(app).unwrap();

    let body: Value = server
        .post("/api/usuarios")
        .json(&json!({ "nome": "Ana Silva", "email": "ana@x.com" }))
        .await
        .json();
    let id = body["id"].as_i64().unwrap();

    let response = server.delete(&format!("/api/usuarios/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.delete(&format!("/api/usuarios/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    assert_eq!(server.get("/api/usuarios").await.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let app = common::setup_test_app().await.unwrap();
    let server = TestServer::new(app).unwrap();

    let response = server.delete("/api/usuarios/abc").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
