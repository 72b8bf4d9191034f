use actix_web::{http::header, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

/// Serves files written by the local backend.
#[instrument(skip(state))]
pub async fn serve_image(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let (section, file_name) = path.into_inner();
    let location = state
        .local_images
        .resolve(&section, &file_name)
        .map_err(|_| AppError::NotFound("Image not found".to_string()))?;

    let bytes = match tokio::fs::read(&location).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound("Image not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let content_type = infer::get(&bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream");

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((header::CACHE_CONTROL, "public, max-age=86400"))
        .body(bytes))
}
