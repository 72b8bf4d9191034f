use actix_multipart::form::MultipartFormConfig;
use actix_web::{
    web,
    http::StatusCode,
    ResponseError,
    HttpResponse,
    error::{JsonPayloadError, QueryPayloadError},
};
use serde_json::json;

use crate::errors::AppError;

const JSON_LIMIT_BYTES: usize = 256 * 1024;
// room for the text fields that ride along with the file
const MULTIPART_FIELD_SLACK_BYTES: usize = 64 * 1024;

/// Body extractor errors render as JSON like every other failure.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT_BYTES)
            .error_handler(|err, _req| JsonError::from(err).into()),
    )
    .app_data(
        web::QueryConfig::default().error_handler(|err, _req| JsonError::from(err).into()),
    );
}

/// Multipart bodies are capped by the configured upload size, not a fixed constant.
pub fn multipart_config(max_upload_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(max_upload_bytes.saturating_add(MULTIPART_FIELD_SLACK_BYTES))
        .error_handler(|err, _req| {
            tracing::warn!("Rejected multipart body: {}", err);
            AppError::from(err).into()
        })
}

#[derive(Debug)]
pub struct JsonError {
    message: String,
    status: StatusCode
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status).json(json!({ "error": self.message }))
    }
}

impl From<JsonPayloadError> for JsonError {
    fn from(err: JsonPayloadError) -> Self {
        let status = match &err {
            JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        JsonError {
            message: format!("JSON payload error: {}", err),
            status,
        }
    }
}

impl From<QueryPayloadError> for JsonError {
    fn from(err: QueryPayloadError) -> Self {
        JsonError {
            message: format!("Query error: {}", err),
            status: StatusCode::BAD_REQUEST,
        }
    }
}
