use serde_json::json;

use blog_server::config::BlogMode;
use blog_server::server::Server;

use crate::common::{TestApp, routes, sqlite_url, test_config};

#[tokio::test]
async fn unknown_path_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get("/nonexistent").await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["message"], "Not Found");
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unsupported_method_on_known_path_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.delete(routes::POSTS).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["message"], "Not Found");

    let res = app.put(routes::AUTHORS, &json!({})).await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn api_reference_is_served() {
    let app = TestApp::spawn().await;

    let res = app.get("/scalar").await;

    assert_eq!(res.status, 200);
    assert!(res.text.contains("<html"));
}

#[tokio::test]
async fn stopped_server_refuses_connections() {
    let app = TestApp::spawn().await;
    let addr = app.addr;
    let client = app.client.clone();

    app.stop().await;

    let result = client.get(format!("http://{addr}/posts")).send().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn data_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let client = reqwest::Client::new();

    let server = Server::start(test_config(BlogMode::Relational, sqlite_url(&dir)))
        .await
        .unwrap();
    let res = client
        .post(format!("http://{}/authors", server.addr()))
        .json(&json!({ "firstName": "Ada", "lastName": "Lovelace", "userName": "ada" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 201);
    server.stop().await.unwrap();

    let server = Server::start(test_config(BlogMode::Relational, sqlite_url(&dir)))
        .await
        .unwrap();
    let authors: serde_json::Value = client
        .get(format!("http://{}/authors", server.addr()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(authors[0]["userName"], "ada");
    server.stop().await.unwrap();
}

#[tokio::test]
async fn both_modes_can_share_a_database() {
    let dir = tempfile::tempdir().unwrap();
    let client = reqwest::Client::new();

    let relational = Server::start(test_config(BlogMode::Relational, sqlite_url(&dir)))
        .await
        .unwrap();
    let standalone = Server::start(test_config(BlogMode::Standalone, sqlite_url(&dir)))
        .await
        .unwrap();

    let res = client
        .post(format!("http://{}/posts", standalone.addr()))
        .json(&json!({ "title": "T", "content": "C", "author": { "firstName": "Grace" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 201);

    let posts: serde_json::Value = client
        .get(format!("http://{}/posts", relational.addr()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(posts, json!({ "posts": [] }));

    standalone.stop().await.unwrap();
    relational.stop().await.unwrap();
}
