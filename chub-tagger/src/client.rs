//! CameraHub catalog API client
//!
//! Looks up negatives by film/frame, registers new scan records and fetches
//! the full nested scan record that gets translated into EXIF tags.
//! All requests use HTTP basic auth.

use chub_common::FrameRef;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("chub-tagger/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Catalog client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Paginated list response
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct NegativeSummary {
    slug: String,
}

#[derive(Debug, Deserialize)]
struct CreatedScan {
    uuid: String,
}

/// Operations the tagger needs from the catalog
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// True if the server accepts the configured credentials
    async fn check_credentials(&self) -> Result<bool, ClientError>;

    /// Slug of the negative identified by film and frame
    async fn find_negative(&self, frame: &FrameRef) -> Result<String, ClientError>;

    /// Register a scan of `negative`; returns the new scan UUID
    async fn create_scan(&self, negative: &str, filename: &str) -> Result<String, ClientError>;

    /// Full nested scan record
    async fn get_scan(&self, scan_id: &str) -> Result<Value, ClientError>;
}

/// HTTP implementation of [`Catalog`]
pub struct CameraHubClient {
    http_client: reqwest::Client,
    server: String,
    username: String,
    password: String,
}

impl CameraHubClient {
    pub fn new(server: &str, username: &str, password: &str) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            server: server.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.server, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = self.url(endpoint);
        tracing::debug!(url = %url, ?query, "GET");

        let response = self
            .http_client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .query(query)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(ClientError::Api(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}

/// Unwrap a list response that must contain exactly one record
pub fn single_result<T>(page: Page<T>, what: &str) -> Result<T, ClientError> {
    if page.count != 1 || page.results.len() != 1 {
        return Err(ClientError::NotFound(format!(
            "{} ({} matches)",
            what, page.count
        )));
    }
    page.results
        .into_iter()
        .next()
        .ok_or_else(|| ClientError::NotFound(what.to_string()))
}

impl Catalog for CameraHubClient {
    async fn check_credentials(&self) -> Result<bool, ClientError> {
        let response = self
            .http_client
            .get(self.url("camera"))
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(response.status() == reqwest::StatusCode::OK)
    }

    async fn find_negative(&self, frame: &FrameRef) -> Result<String, ClientError> {
        let page: Page<NegativeSummary> = self
            .get_json("negative/", &[("film", frame.film.as_str()), ("frame", frame.frame.as_str())])
            .await?;

        let negative = single_result(page, &format!("negative for film/frame {}", frame))?;
        tracing::debug!(frame = %frame, negative = %negative.slug, "Found negative");
        Ok(negative.slug)
    }

    async fn create_scan(&self, negative: &str, filename: &str) -> Result<String, ClientError> {
        let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
        let url = self.url("scan/");
        tracing::debug!(url = %url, negative = %negative, filename = %filename, "POST");

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .form(&[("negative", negative), ("filename", filename), ("date", today.as_str())])
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let created: CreatedScan = read_json(response).await?;
        Ok(created.uuid)
    }

    async fn get_scan(&self, scan_id: &str) -> Result<Value, ClientError> {
        let page: Page<Value> = self.get_json("scan/", &[("uuid", scan_id)]).await?;
        single_result(page, &format!("scan {}", scan_id))
    }
}
