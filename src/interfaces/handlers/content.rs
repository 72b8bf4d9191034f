use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        experience::{ExperienceInput, ExperienceKind},
        project::{ProjectInput, ProjectListQuery},
        setting::UpsertSettingRequest,
        skill::SkillInput,
        social_link::{NewSocialLink, UpdateSocialLink},
    },
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

// ───── Projects ─────────────────────────────────────────────────────

#[instrument(skip(state, query))]
pub async fn list_projects(
    state: web::Data<AppState>,
    query: web::Query<ProjectListQuery>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_projects(query.featured).await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(_claims, state, query))]
pub async fn admin_list_projects(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<ProjectListQuery>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_projects(query.featured).await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(_claims, state))]
pub async fn get_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project(&project_id).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_project(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<ProjectInput>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.create_project(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(project))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ProjectInput>,
) -> Result<impl Responder, AppError> {
    let project = state
        .project_handler
        .update_project(&project_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(_claims, state))]
pub async fn delete_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete_project(&project_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ───── Skills ───────────────────────────────────────────────────────

#[instrument(skip(state))]
pub async fn list_skills(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let skills = state.skill_handler.list_skills().await?;
    Ok(HttpResponse::Ok().json(skills))
}

#[instrument(skip(_claims, state))]
pub async fn admin_list_skills(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let skills = state.skill_handler.list_skills().await?;
    Ok(HttpResponse::Ok().json(skills))
}

#[instrument(skip(_claims, state))]
pub async fn get_skill(
    _claims: AdminClaims,
    skill_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.get_skill(&skill_id).await?;
    Ok(HttpResponse::Ok().json(skill))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_skill(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<SkillInput>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.create_skill(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(skill))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_skill(
    _claims: AdminClaims,
    skill_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<SkillInput>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.update_skill(&skill_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(skill))
}

#[instrument(skip(_claims, state))]
pub async fn delete_skill(
    _claims: AdminClaims,
    skill_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.skill_handler.delete_skill(&skill_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ───── Experience ───────────────────────────────────────────────────

#[instrument(skip(state))]
pub async fn list_experience(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let entries = state.experience_handler.list_experience(None).await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[instrument(skip(state))]
pub async fn list_work_experience(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let entries = state
        .experience_handler
        .list_experience(Some(ExperienceKind::Work))
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[instrument(skip(state))]
pub async fn list_education(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let entries = state
        .experience_handler
        .list_experience(Some(ExperienceKind::Education))
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[instrument(skip(_claims, state))]
pub async fn admin_list_experience(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let entries = state.experience_handler.list_experience(None).await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[instrument(skip(_claims, state))]
pub async fn get_experience(
    _claims: AdminClaims,
    experience_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let entry = state.experience_handler.get_experience(&experience_id).await?;
    Ok(HttpResponse::Ok().json(entry))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_experience(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<ExperienceInput>,
) -> Result<impl Responder, AppError> {
    let entry = state.experience_handler.create_experience(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(entry))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_experience(
    _claims: AdminClaims,
    experience_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ExperienceInput>,
) -> Result<impl Responder, AppError> {
    let entry = state
        .experience_handler
        .update_experience(&experience_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(entry))
}

#[instrument(skip(_claims, state))]
pub async fn delete_experience(
    _claims: AdminClaims,
    experience_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.experience_handler.delete_experience(&experience_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ───── Settings ─────────────────────────────────────────────────────

#[instrument(skip(state))]
pub async fn get_setting(
    key: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let setting = state.setting_handler.get_setting(&key).await?;
    Ok(HttpResponse::Ok().json(setting))
}

#[instrument(skip(_claims, state))]
pub async fn list_settings(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let settings = state.setting_handler.list_settings().await?;
    Ok(HttpResponse::Ok().json(settings))
}

#[instrument(skip(_claims, state, data))]
pub async fn upsert_setting(
    _claims: AdminClaims,
    key: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpsertSettingRequest>,
) -> Result<impl Responder, AppError> {
    let setting = state
        .setting_handler
        .upsert_setting(&key, data.into_inner().value)
        .await?;
    Ok(HttpResponse::Ok().json(setting))
}

// ───── Social links ─────────────────────────────────────────────────

#[instrument(skip(state))]
pub async fn list_social_links(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let links = state.social_handler.list_social_links().await?;
    Ok(HttpResponse::Ok().json(links))
}

#[instrument(skip(_claims, state))]
pub async fn admin_list_social_links(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let links = state.social_handler.list_social_links().await?;
    Ok(HttpResponse::Ok().json(links))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_social_link(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewSocialLink>,
) -> Result<impl Responder, AppError> {
    let link = state.social_handler.create_social_link(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(link))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_social_link(
    _claims: AdminClaims,
    link_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateSocialLink>,
) -> Result<impl Responder, AppError> {
    let link = state
        .social_handler
        .update_social_link(&link_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(link))
}

#[instrument(skip(_claims, state))]
pub async fn delete_social_link(
    _claims: AdminClaims,
    link_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.social_handler.delete_social_link(&link_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
