/// Common test utilities for integration tests
///
/// Provides the shared infrastructure: a database connection with migrations
/// applied, a router wired to test configuration, and helpers for creating
/// authenticated users and issuing requests.
///
/// Tests skip themselves when `DATABASE_URL` is not set, so the pure-logic
/// suites still run on machines without Postgres.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use taskboard_shared::auth::jwt::{create_token, Claims};
use taskboard_shared::auth::password::hash_password;
use taskboard_shared::models::user::{CreateUser, User};
use tower::Service as _;
use uuid::Uuid;

/// Secret used to sign test tokens
pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Password assigned to every test user
pub const TEST_PASSWORD: &str = "correct-horse";

/// Test context containing the app, database, and a ready-made user
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub user: User,
    pub token: String,
    created_users: Vec<Uuid>,
}

impl TestContext {
    /// Creates a test context, or `None` when `DATABASE_URL` is unset
    pub async fn try_new() -> anyhow::Result<Option<Self>> {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            eprintln!("skipping: DATABASE_URL not set");
            return Ok(None);
        };

        let db = PgPool::connect(&database_url).await?;

        // Path is relative to the crate's Cargo.toml
        sqlx::migrate!("../migrations").run(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
            },
        };

        let app = build_router(AppState::new(db.clone(), config));

        let (user, token) = new_user(&db).await?;
        let created_users = vec![user.id];

        Ok(Some(Self {
            db,
            app,
            user,
            token,
            created_users,
        }))
    }

    /// Creates a fresh user with a unique email and a valid token
    pub async fn create_user(&mut self) -> anyhow::Result<(User, String)> {
        let (user, token) = new_user(&self.db).await?;
        self.created_users.push(user.id);
        Ok((user, token))
    }

    /// Authorization header value for the context's primary user
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Sends a request and returns the status plus parsed JSON body
    pub async fn send(
        &mut self,
        request: Request<Body>,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let response = self.app.call(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, json))
    }

    /// Creates a task through the API as the given token's user
    pub async fn create_task(
        &mut self,
        token: &str,
        body: serde_json::Value,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let request = Request::builder()
            .method("POST")
            .uri("/api/tasks")
            .header("authorization", format!("Bearer {}", token))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))?;
        self.send(request).await
    }

    /// GET helper with the given bearer token
    pub async fn get(
        &mut self,
        uri: &str,
        token: &str,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())?;
        self.send(request).await
    }

    /// Deletes every user (and, via cascade, their tasks) this context made
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        for user_id in &self.created_users {
            sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(user_id)
                .execute(&self.db)
                .await?;
        }
        Ok(())
    }
}

async fn new_user(db: &PgPool) -> anyhow::Result<(User, String)> {
    let user = User::create(
        db,
        CreateUser {
            name: "Test User".to_string(),
            email: format!("test-{}@example.com", Uuid::new_v4()),
            password_hash: hash_password(TEST_PASSWORD)?,
        },
    )
    .await?;

    let token = create_token(&Claims::new(user.id), TEST_JWT_SECRET)?;
    Ok((user, token))
}
