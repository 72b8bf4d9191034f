use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::contact_message::{
        BulkDeleteRequest, BulkStatusRequest, MessageListQuery, ReplyRequest, UpdateStatusRequest,
    },
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(_claims, state, query))]
pub async fn list_messages(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<MessageListQuery>,
) -> Result<impl Responder, AppError> {
    let messages = state.contact_handler.list_messages(query.status).await?;
    Ok(HttpResponse::Ok().json(messages))
}

#[instrument(skip(_claims, state))]
pub async fn message_stats(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let stats = state.contact_handler.message_stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Opening a message marks it read.
#[instrument(skip(_claims, state))]
pub async fn open_message(
    _claims: AdminClaims,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let message = state.contact_handler.open_message(&message_id).await?;
    Ok(HttpResponse::Ok().json(message))
}

#[instrument(skip(_claims, state))]
pub async fn delete_message(
    _claims: AdminClaims,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = state.contact_handler.delete_message(&message_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "id": id,
    })))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_status(
    _claims: AdminClaims,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateStatusRequest>,
) -> Result<impl Responder, AppError> {
    let status = data.into_inner().status;
    let id = state.contact_handler.update_status(&message_id, status).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "id": id,
        "status": status,
    })))
}

#[instrument(skip(_claims, state))]
pub async fn mark_read(
    _claims: AdminClaims,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = state.contact_handler.mark_read(&message_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true, "id": id })))
}

#[instrument(skip(_claims, state))]
pub async fn mark_unread(
    _claims: AdminClaims,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = state.contact_handler.mark_unread(&message_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true, "id": id })))
}

#[instrument(skip(_claims, state, data))]
pub async fn bulk_update_status(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<BulkStatusRequest>,
) -> Result<impl Responder, AppError> {
    let result = state.contact_handler.bulk_update_status(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[instrument(skip(_claims, state, data))]
pub async fn bulk_delete(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<BulkDeleteRequest>,
) -> Result<impl Responder, AppError> {
    let result = state.contact_handler.bulk_delete(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[instrument(skip(_claims, state, data))]
pub async fn reply(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<ReplyRequest>,
) -> Result<impl Responder, AppError> {
    let result = state.contact_handler.reply(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}
