use gloo_net::http::{Request, Response};
use idcard_shared::{
    HealthStatus, RequestFailure, ValidationRequest, ValidationResult, ValidationTransport,
    VersionInfo,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Failure body the gateway sends with every non-2xx answer.
#[derive(Deserialize)]
struct GatewayErrorBody {
    error: String,
}

/// Talks to the gateway, which relays to the validation service.
#[derive(Clone, Copy)]
pub struct ApiClient {
    base: &'static str,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self { base: "/api" }
    }
}

impl ApiClient {
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestFailure> {
        let response = Request::get(&self.url(path))
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }
}

impl ValidationTransport for ApiClient {
    async fn validate(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationResult, RequestFailure> {
        let response = Request::post(&self.url("validate-id"))
            .json(request)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn health(&self) -> Result<HealthStatus, RequestFailure> {
        self.get_json("health").await
    }

    async fn version(&self) -> Result<VersionInfo, RequestFailure> {
        self.get_json("version").await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RequestFailure> {
    if !response.ok() {
        let status = response.status();
        let body = error_detail(response.text().await.unwrap_or_default());
        return Err(RequestFailure::Status { status, body });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| RequestFailure::Decode(e.to_string()))
}

/// Unwraps the gateway's `{"error": ...}` envelope. Bodies in any other shape
/// are kept as they are.
fn error_detail(body: String) -> String {
    match serde_json::from_str::<GatewayErrorBody>(&body) {
        Ok(envelope) => envelope.error,
        Err(_) => body,
    }
}

fn network(err: gloo_net::Error) -> RequestFailure {
    RequestFailure::Network(err.to_string())
}
