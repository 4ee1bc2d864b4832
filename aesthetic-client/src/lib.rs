//! Aesthetic HTTP Client
//!
//! A typed HTTP client for the aesthetic simulation service.
//!
//! It covers authentication, patient registration, the intervention
//! catalogue and the simulation lifecycle (create, fetch, list). The job
//! poller uses [`SimulationClient::get_simulation`] as its status fetch.
//!
//! # Example
//!
//! ```no_run
//! use aesthetic_client::SimulationClient;
//! use aesthetic_core::dto::auth::LoginRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut client = SimulationClient::new("http://localhost:8000");
//!
//!     let token = client.login(LoginRequest {
//!         username: "dr.martin".to_string(),
//!         pin: "1234".to_string(),
//!     }).await?;
//!     client.set_token(token.access_token);
//!
//!     for sim in client.list_simulations().await? {
//!         println!("{} {}", sim.id, sim.status);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
mod auth;
mod interventions;
mod patients;
mod simulations;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ClientError, Result};

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the simulation service API
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct SimulationClient {
    /// Base URL of the service (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Bearer token attached to every request once set
    token: Option<String>,
}

impl SimulationClient {
    /// Create a new client with default HTTP settings
    ///
    /// # Example
    /// ```
    /// use aesthetic_client::SimulationClient;
    ///
    /// let client = SimulationClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
        }
    }

    /// Build a client from validated configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(config.base_url.clone(), client))
    }

    /// Builder-style variant of [`SimulationClient::set_token`]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.set_token(token);
        self
    }

    /// Attach a bearer token to all subsequent requests
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL under which the service serves a stored image
    ///
    /// Accepts either a bare file name or the storage path reported in a
    /// simulation record; only the final path component is used.
    pub fn image_url(&self, path: &str) -> String {
        let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        format!("{}/images/{}", self.base_url, file_name)
    }

    /// Start a request to `path`, with authentication applied
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        self.authorize(self.client.request(method, &url))
    }

    /// Start a request to `path` extended by one caller-supplied segment
    ///
    /// The segment is percent-encoded, so `/`, `?` and `#` stay part of it.
    fn request_item(&self, method: Method, path: &str, segment: &str) -> Result<RequestBuilder> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ClientError::InvalidConfig(format!("invalid base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidConfig(format!("base URL cannot carry a path: {}", self.base_url)))?
            .push(segment);
        debug!("{} {}", method, url);

        Ok(self.authorize(self.client.request(method, url)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(
                status.as_u16(),
                error_detail(&error_text),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Extracts the `detail` field of an error body, falling back to the raw text
///
/// Validation failures carry a list of `{loc, msg}` objects instead of a string.
fn error_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.to_string(),
    }
}
