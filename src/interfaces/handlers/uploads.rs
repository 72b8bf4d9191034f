use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::image::{DeleteImageQuery, ImageUploadForm, UploadResponse, ValidateUrlRequest},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(_claims, state, form))]
pub async fn upload_image(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    form: MultipartForm<ImageUploadForm>,
) -> Result<impl Responder, AppError> {
    let image = state.upload_handler.upload(form.into_inner()).await?;
    Ok(HttpResponse::Created().json(UploadResponse {
        success: true,
        image,
    }))
}

#[instrument(skip(_claims, state))]
pub async fn delete_image(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<DeleteImageQuery>,
) -> Result<impl Responder, AppError> {
    let query = query.into_inner();
    state
        .upload_handler
        .remove(&query.url, query.storage_id.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Image deleted",
    })))
}

#[instrument(skip(_claims, state, data))]
pub async fn validate_image_url(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<ValidateUrlRequest>,
) -> Result<impl Responder, AppError> {
    let url = data.into_inner().url;
    if url.trim().is_empty() {
        return Err(AppError::InvalidInput("url is required".to_string()));
    }
    let result = state.upload_handler.validate_url(url).await;
    Ok(HttpResponse::Ok().json(result))
}
