use crate::error::{ClientError, ClientResult};
use crate::model::{AnalysisRequest, AnalysisResponse, HealthStatus, ServiceInfo};

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// The analysis backend as seen by the controller.
#[async_trait]
pub trait PoetryApi: Send + Sync {
    /// `POST /get-poetry`: classify `request.text` and fetch a matching poem.
    async fn get_poetry(&self, request: &AnalysisRequest) -> ClientResult<AnalysisResponse>;

    /// `GET /health`: succeeds on any 2xx.
    async fn health(&self) -> ClientResult<HealthStatus>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    /// `None` waits until the backend answers or the transport fails.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            request_timeout: None,
        }
    }
}

/// `reqwest` implementation of [`PoetryApi`].
#[derive(Debug, Clone)]
pub struct HttpPoetryClient {
    client: Client,
    api_base: String,
}

impl HttpPoetryClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let api_base = config.api_base.trim_end_matches('/').to_owned();
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(config.api_base));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Transport)?;

        Ok(Self { client, api_base })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// `GET /`: service banner with the emotion set and poem count.
    #[instrument(skip(self))]
    pub async fn service_info(&self) -> ClientResult<ServiceInfo> {
        let response = self
            .client
            .get(self.url("/"))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        response.json().await.map_err(ClientError::Decode)
    }
}

#[async_trait]
impl PoetryApi for HttpPoetryClient {
    #[instrument(skip(self, request), fields(chars = request.text.chars().count()))]
    async fn get_poetry(&self, request: &AnalysisRequest) -> ClientResult<AnalysisResponse> {
        let response = self
            .client
            .post(self.url("/get-poetry"))
            .json(request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "get-poetry returned non-success status");
            return Err(ClientError::Status(status));
        }

        let body: AnalysisResponse = response.json().await.map_err(ClientError::Decode)?;
        tracing::debug!(
            emotion = %body.emotion,
            confidence = body.confidence,
            poems = body.poetry.len(),
            "analysis received"
        );
        Ok(body)
    }

    #[instrument(skip(self))]
    async fn health(&self) -> ClientResult<HealthStatus> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        // Any 2xx counts as healthy, whatever the body looks like.
        Ok(response.json().await.unwrap_or_else(|e| {
            tracing::debug!(error = %e, "health body is not the expected json");
            HealthStatus::default()
        }))
    }
}
