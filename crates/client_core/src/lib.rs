use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    error::ApiErrorBody,
    protocol::{
        Endpoint, GenerateRequest, GenerateResponse, GenerationResult, PredictRequest,
        PredictResponse, PredictionResult,
    },
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod session;

pub use config::{load_settings, ClientSettings};
pub use session::{
    display_entries, Flow, FlowPhase, FormSession, RequestOutcome, StaleResponsePolicy,
    SubmitTicket,
};

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid endpoint url: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("backend rejected request: {0}")]
    Rejected(String),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("request was never sent: {0}")]
    Dispatch(String),
}

#[async_trait]
pub trait TweetApi: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerationResult, RequestError>;
    async fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, RequestError>;
}

/// Makes `join` append endpoint paths instead of replacing the last segment.
pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[derive(Debug, Clone)]
pub struct HttpTweetApi {
    http: Client,
    base_url: Url,
}

impl HttpTweetApi {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url: with_trailing_slash(base_url),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, RequestError> {
        Self::with_timeout(settings.api_base_url.clone(), settings.request_timeout)
    }

    pub fn with_timeout(base_url: Url, timeout: Option<Duration>) -> Result<Self, RequestError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: with_trailing_slash(base_url),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, RequestError> {
        Ok(self.base_url.join(endpoint.path())?)
    }

    async fn post_json<B, R>(&self, endpoint: Endpoint, body: &B) -> Result<R, RequestError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint)?;
        debug!(endpoint = endpoint.path(), %url, "posting request");
        let res = self.http.post(url).json(body).send().await?;
        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            let message = ApiErrorBody::message_from(&text);
            warn!(
                endpoint = endpoint.path(),
                status = status.as_u16(),
                %message,
                "backend returned failure status"
            );
            return Err(RequestError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = serde_json::from_str(&text)?;
        if value.get("success").and_then(Value::as_bool) == Some(false) {
            let message = ApiErrorBody::message_from(&text);
            warn!(endpoint = endpoint.path(), %message, "backend flagged request as failed");
            return Err(RequestError::Rejected(message));
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl TweetApi for HttpTweetApi {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerationResult, RequestError> {
        let body: GenerateResponse = self.post_json(Endpoint::Generate, request).await?;
        Ok(body.into())
    }

    async fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, RequestError> {
        let body: PredictResponse = self.post_json(Endpoint::Predict, request).await?;
        Ok(body.into())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
