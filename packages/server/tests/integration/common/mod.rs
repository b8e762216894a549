use std::net::SocketAddr;

use reqwest::Client;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;

use server::config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig};
use server::state::AppState;

pub mod routes {
    pub const SEASONINGS: &str = "/api/v1/seasonings";
    pub const SEASONING_TYPES: &str = "/api/v1/seasoning-types";
    pub const TEMPLATES: &str = "/api/v1/templates";

    pub fn seasoning(id: i32) -> String {
        format!("/api/v1/seasonings/{id}")
    }

    pub fn template(id: i32) -> String {
        format!("/api/v1/templates/{id}")
    }
}

/// Id of "Soy Sauce" in a freshly seeded database.
pub const SOY_SAUCE_TYPE: i32 = 3;
/// Id of "Miso" in a freshly seeded database.
pub const MISO_TYPE: i32 = 5;

/// A running test server backed by its own in-memory SQLite database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_url = "sqlite::memory:".to_string();
        // Every pooled connection would get its own in-memory database.
        let mut opts = ConnectOptions::new(&db_url);
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts)
            .await
            .expect("Failed to connect to test database");

        server::database::sync_schema(&db)
            .await
            .expect("Failed to sync schema");
        server::seed::seed_seasoning_types(&db)
            .await
            .expect("Failed to seed seasoning types");
        server::seed::ensure_indexes(&db)
            .await
            .expect("Failed to create indexes");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: db_url,
                max_connections: 1,
            },
        };

        let app = server::build_router(AppState::new(db.clone(), app_config));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
        }
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

    pub async fn patch(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH request");

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

    /// Create a seasoning via the API and return its `id`.
    ///
    /// `expires_in_days` is relative to now; `None` leaves both expiry dates unset.
    pub async fn create_seasoning(
        &self,
        name: &str,
        type_id: i32,
        expires_in_days: Option<i64>,
    ) -> i32 {
        let expires_at = expires_in_days.map(|d| iso(days_from_now(d)));
        let res = self
            .post(
                routes::SEASONINGS,
                &serde_json::json!({
                    "name": name,
                    "typeId": type_id,
                    "expiresAt": expires_at,
                }),
            )
            .await;
        assert_eq!(res.status, 201, "create_seasoning failed: {}", res.text);
        res.id()
    }

    /// Create a template via the API and return its `id`.
    pub async fn create_template(&self, name: &str, seasoning_ids: &[i32]) -> i32 {
        let res = self
            .post(
                routes::TEMPLATES,
                &serde_json::json!({
                    "name": name,
                    "seasoningIds": seasoning_ids,
                }),
            )
            .await;
        assert_eq!(res.status, 201, "create_template failed: {}", res.text);
        res.id()
    }
}

/// An instant `days` whole days from now, minus an hour so the rounded-up day
/// count is still `days` when the server evaluates it a moment later.
pub fn days_from_now(days: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now() + chrono::Duration::days(days) - chrono::Duration::hours(1)
}

pub fn iso(value: chrono::DateTime<chrono::Utc>) -> String {
    value.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn id(&self) -> i32 {
        self.body["id"]
            .as_i64()
            .expect("response body should contain 'id'") as i32
    }

    /// Names in a list response's `data`, in order.
    pub fn names(&self) -> Vec<String> {
        self.body["data"]
            .as_array()
            .expect("response body should contain 'data'")
            .iter()
            .map(|item| item["name"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}
