use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, use_cases::extractors::AdminClaims, AppState};

#[instrument(skip(_claims, state))]
pub async fn dashboard_summary(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let summary = state
        .dashboard_handler
        .summary(&state.contact_handler.contact_repo)
        .await?;
    Ok(HttpResponse::Ok().json(summary))
}
