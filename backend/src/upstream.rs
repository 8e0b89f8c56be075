use idcard_shared::{
    HealthStatus, RequestFailure, ValidationRequest, ValidationResult, ValidationTransport,
    VersionInfo,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// `reqwest` client for the remote validation service.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RequestFailure> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RequestFailure::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| RequestFailure::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestFailure> {
        let response = self
            .client
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(network)?;
        Self::read_json(response).await
    }
}

impl ValidationTransport for UpstreamClient {
    async fn validate(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationResult, RequestFailure> {
        let response = self
            .client
            .post(self.endpoint("validate-id"))
            .json(request)
            .send()
            .await
            .map_err(network)?;
        Self::read_json(response).await
    }

    async fn health(&self) -> Result<HealthStatus, RequestFailure> {
        self.get_json("health").await
    }

    async fn version(&self) -> Result<VersionInfo, RequestFailure> {
        self.get_json("version").await
    }
}

fn network(err: reqwest::Error) -> RequestFailure {
    if err.is_timeout() {
        RequestFailure::Network(format!("validation service timed out: {}", err))
    } else {
        RequestFailure::Network(err.to_string())
    }
}
