use crate::upstream::UpstreamClient;
use actix_files::Files;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use idcard_shared::{RequestFailure, ValidationRequest, ValidationTransport};
use log::{error, info, warn};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("No image supplied")]
    MissingImage,
    #[error(transparent)]
    Upstream(#[from] RequestFailure),
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingImage => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(RequestFailure::Status { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.detail(),
        })
    }
}

impl GatewayError {
    // A relayed status keeps the service's own body; the status code already
    // travels on the response.
    fn detail(&self) -> String {
        match self {
            GatewayError::Upstream(RequestFailure::Status { body, .. }) => body.clone(),
            other => other.to_string(),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    cfg.service(web::resource("/api/validate-id").route(web::post().to(validate_id)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(Files::new("/", frontend_dir).index_file("index.html"));
}

async fn validate_id(
    upstream: web::Data<UpstreamClient>,
    payload: web::Json<ValidationRequest>,
) -> Result<HttpResponse, GatewayError> {
    let request = payload.into_inner();
    let request_id = Uuid::new_v4();

    if request.image_base64.trim().is_empty() {
        warn!("[{}] Rejected validation for user {}: empty image", request_id, request.user_id);
        return Err(GatewayError::MissingImage);
    }

    info!(
        "[{}] Relaying validation for user {} ({} base64 chars)",
        request_id,
        request.user_id,
        request.image_base64.len()
    );

    match upstream.validate(&request).await {
        Ok(result) => {
            info!(
                "[{}] Verdict {} / {}",
                request_id,
                result.status,
                result.label.as_deref().unwrap_or("N/A")
            );
            Ok(HttpResponse::Ok().json(result))
        }
        Err(e) => {
            error!("[{}] Validation relay failed: {}", request_id, e);
            Err(e.into())
        }
    }
}

async fn health(upstream: web::Data<UpstreamClient>) -> Result<HttpResponse, GatewayError> {
    let status = upstream.health().await.map_err(|e| {
        error!("Health check against {} failed: {}", upstream.base_url(), e);
        e
    })?;
    Ok(HttpResponse::Ok().json(status))
}

async fn version(upstream: web::Data<UpstreamClient>) -> Result<HttpResponse, GatewayError> {
    let info = upstream.version().await.map_err(|e| {
        error!("Version lookup against {} failed: {}", upstream.base_url(), e);
        e
    })?;
    Ok(HttpResponse::Ok().json(info))
}
