use std::net::SocketAddr;

use reqwest::Client;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tempfile::TempDir;

use blog_server::config::{
    AppConfig, BlogConfig, BlogMode, CorsConfig, DatabaseConfig, LoggingConfig, ServerConfig,
};
use blog_server::server::Server;

pub mod routes {
    pub const AUTHORS: &str = "/authors";
    pub const POSTS: &str = "/posts";

    pub fn author(id: &str) -> String {
        format!("/authors/{id}")
    }

    pub fn post(id: &str) -> String {
        format!("/posts/{id}")
    }

    pub fn comments(post_id: &str) -> String {
        format!("/posts/{post_id}/comments")
    }
}

/// A running test server backed by its own SQLite database file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    server: Server,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

pub fn test_config(mode: BlogMode, db_url: String) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig::default(),
        },
        database: DatabaseConfig {
            max_connections: 4,
            ..DatabaseConfig::new(db_url)
        },
        blog: BlogConfig { mode },
        logging: LoggingConfig::default(),
    }
}

pub fn sqlite_url(dir: &TempDir) -> String {
    format!("sqlite://{}?mode=rwc", dir.path().join("blog.db").display())
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_mode(BlogMode::Relational).await
    }

    pub async fn spawn_standalone() -> Self {
        Self::spawn_with_mode(BlogMode::Standalone).await
    }

    pub async fn spawn_with_mode(mode: BlogMode) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(mode, sqlite_url(&dir));

        let server = Server::start(config)
            .await
            .expect("Failed to start test server");

        Self {
            addr: server.addr(),
            client: Client::new(),
            db: server.db().clone(),
            server,
            _dir: dir,
        }
    }

    pub async fn stop(self) {
        self.server.stop().await.expect("Failed to stop server");
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Send every body to `path` at once and collect the response statuses,
    /// in completion order.
    pub async fn post_concurrently(&self, path: &str, bodies: Vec<Value>) -> Vec<u16> {
        let url = self.url(path);
        let mut requests = tokio::task::JoinSet::new();
        for body in bodies {
            let request = self.client.post(&url).json(&body);
            requests.spawn(async move {
                request
                    .send()
                    .await
                    .expect("Failed to send POST request")
                    .status()
                    .as_u16()
            });
        }

        let mut statuses = Vec::new();
        while let Some(status) = requests.join_next().await {
            statuses.push(status.expect("Request task panicked"));
        }
        statuses
    }

    /// Create an author via the API and return its `id`.
    pub async fn create_author(&self, first: &str, last: &str, user_name: &str) -> String {
        let res = self
            .post(
                routes::AUTHORS,
                &serde_json::json!({
                    "firstName": first,
                    "lastName": last,
                    "userName": user_name,
                }),
            )
            .await;
        assert_eq!(res.status, 201, "create_author failed: {}", res.text);
        res.id()
    }

    /// Create a post via the API and return its `id`.
    pub async fn create_post(&self, title: &str, author_id: &str) -> String {
        let res = self
            .post(
                routes::POSTS,
                &serde_json::json!({
                    "title": title,
                    "content": format!("Content of {title}"),
                    "author": author_id,
                }),
            )
            .await;
        assert_eq!(res.status, 201, "create_post failed: {}", res.text);
        res.id()
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn id(&self) -> String {
        self.body["id"]
            .as_str()
            .expect("response body should contain a string 'id'")
            .to_string()
    }
}
