use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::outcome::{ClientError, RemoteOutcome};

/// Status and raw body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_slice(&self.body).map_err(ClientError::Decode)
    }
}

/// HTTP seam the controllers talk through
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body and return whatever status came back
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, ClientError>;

    async fn get(&self, url: &str) -> Result<HttpResponse, ClientError>;
}

/// Plain reqwest transport. No timeout and no retry: a hung request stays
/// pending until the server or the OS gives up.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, ClientError> {
        let response = self.client.post(url).json(body).send().await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }

    async fn get(&self, url: &str) -> Result<HttpResponse, ClientError> {
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}

/// JSON-over-HTTP client for the predict and crawl services
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn reqwest() -> Self {
        Self::new(Arc::new(ReqwestTransport::new()))
    }

    /// POST `request` as JSON and decode a 2xx body as `R`.
    ///
    /// The status is checked before the body is touched, so a non-2xx reply
    /// is reported as [`RemoteOutcome::Status`] even when its body is not JSON.
    pub async fn post<Q, R>(&self, url: &str, request: &Q) -> RemoteOutcome<R>
    where
        Q: Serialize + Sync,
        R: DeserializeOwned,
    {
        let body = match serde_json::to_value(request) {
            Ok(body) => body,
            Err(e) => return RemoteOutcome::DecodeFailure(ClientError::Encode(e)),
        };

        tracing::debug!(%url, "POST");

        let response = match self.transport.post_json(url, &body).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%url, error = %e, "request failed before a response");
                return RemoteOutcome::NetworkFailure(e);
            }
        };

        if !response.is_success() {
            tracing::debug!(%url, status = response.status, "non-success status");
            return RemoteOutcome::Status(response.status);
        }

        match response.json::<R>() {
            Ok(value) => RemoteOutcome::Ok(value),
            Err(e) => {
                tracing::warn!(%url, error = %e, "response body did not decode");
                RemoteOutcome::DecodeFailure(e)
            }
        }
    }

    /// Check a service health endpoint (`{"status": "ok"}`)
    pub async fn health(&self, url: &str) -> Result<bool, ClientError> {
        let response = self.transport.get(url).await?;

        if !response.is_success() {
            return Ok(false);
        }

        let json: serde_json::Value = response.json()?;
        Ok(json["status"].as_str() == Some("ok"))
    }
}
