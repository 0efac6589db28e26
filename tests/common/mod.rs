#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use van_nav_api::database::DatabaseManager;
use van_nav_api::logo::{LogoError, LogoFetcher, LogoJobs};
use van_nav_api::{app, AppState};

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap_or(Value::Null)
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

struct OfflineFetcher;

#[async_trait]
impl LogoFetcher for OfflineFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, LogoError> {
        Err(LogoError::Empty)
    }
}

/// Router over a fresh in-memory database, logo fetching switched off
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        let pool = DatabaseManager::in_memory().await.context("in-memory database")?;
        DatabaseManager::migrate(&pool).await.context("migrate")?;
        let logo_jobs = LogoJobs::new(pool.clone(), Arc::new(OfflineFetcher), false);
        let router = app(AppState::new(pool.clone(), logo_jobs));
        Ok(Self { router, pool })
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        headers: &[(header::HeaderName, &str)],
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(name, *value);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?.to_vec();
        Ok(TestResponse { status, headers, bytes })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.send(Method::GET, uri, None, &[]).await
    }

    /// Request carrying `Authorization: Bearer <token>`
    pub async fn admin(&self, method: Method, uri: &str, token: &str, body: Option<Value>) -> Result<TestResponse> {
        let bearer = format!("Bearer {}", token);
        self.send(method, uri, body, &[(header::AUTHORIZATION, bearer.as_str())]).await
    }

    /// Session token for the seeded admin account
    pub async fn login(&self) -> Result<String> {
        let res = self
            .send(
                Method::POST,
                "/api/login",
                Some(json!({ "name": "admin", "password": "admin" })),
                &[],
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "login failed: {}", res.status);
        res.json()["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("login response without token")
    }

    pub async fn add_tool(&self, token: &str, name: &str, catelog: &str) -> Result<i64> {
        let body = json!({
            "name": name,
            "url": format!("https://{}.example.com", name.to_lowercase()),
            "logo": format!("https://{}.example.com/favicon.ico", name.to_lowercase()),
            "catelog": catelog,
        });
        let res = self.admin(Method::POST, "/api/admin/tool", token, Some(body)).await?;
        anyhow::ensure!(res.status == StatusCode::OK, "add tool failed: {}", res.status);
        res.json()["data"]["id"].as_i64().context("add tool without id")
    }

    pub async fn add_catelog(&self, token: &str, name: &str, hide: bool) -> Result<i64> {
        let body = json!({ "name": name, "hide": hide });
        let res = self.admin(Method::POST, "/api/admin/catelog", token, Some(body)).await?;
        anyhow::ensure!(res.status == StatusCode::OK, "add catalog failed: {}", res.status);
        res.json()["data"]["id"].as_i64().context("add catalog without id")
    }
}

pub fn tool_names(body: &Value, key: &str) -> Vec<String> {
    body["data"][key]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|t| t["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
