#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use ecommerce_api::config::AppConfig;
use ecommerce_api::server;
use ecommerce_api::state::AppState;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start the real router with in-memory stores on a free port.
    ///
    /// Each test gets its own server and empty stores; the server task lives
    /// on the test's runtime and stops with it.
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        // Minimum bcrypt cost keeps registration fast
        config.security.bcrypt_cost = 4;
        config.server.enable_request_logging = false;

        let state = AppState::in_memory(&config).context("failed to build app state")?;
        let router = server::app(state, &config);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, email: &str, password: &str, is_admin: bool) -> Result<reqwest::Response> {
        let resp = self
            .client
            .post(self.url("/v1/auth/register"))
            .json(&json!({
                "name": "Test Customer",
                "email": email,
                "password": password,
                "isAdmin": is_admin,
            }))
            .send()
            .await?;
        Ok(resp)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<reqwest::Response> {
        let resp = self
            .client
            .post(self.url("/v1/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Ok(resp)
    }

    /// Register a customer and return a bearer token for it.
    pub async fn token_for(&self, email: &str, is_admin: bool) -> Result<String> {
        let resp = self.register(email, "p1", is_admin).await?;
        anyhow::ensure!(resp.status() == StatusCode::CREATED, "register failed: {}", resp.status());

        let resp = self.login(email, "p1").await?;
        anyhow::ensure!(resp.status() == StatusCode::OK, "login failed: {}", resp.status());
        let body: Value = resp.json().await?;
        body["token"]
            .as_str()
            .map(String::from)
            .context("login response has no token")
    }

    pub async fn create_product(&self, token: &str, body: Value) -> Result<reqwest::Response> {
        let resp = self
            .client
            .post(self.url("/v1/products"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Ok(resp)
    }

    pub async fn list_products(&self, token: &str, query: &[(&str, &str)]) -> Result<reqwest::Response> {
        let resp = self
            .client
            .get(self.url("/v1/products"))
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        Ok(resp)
    }
}

pub fn product(name: &str, category: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{} description", name),
        "category": category,
        "price": 10.0,
        "amountAvailable": 5,
    })
}

pub fn names(products: &Value) -> Vec<String> {
    products
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|p| p["name"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
