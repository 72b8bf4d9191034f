use validator::Validate;

use crate::{
    entities::experience::{Experience, ExperienceInput, ExperienceKind},
    errors::AppError,
    repositories::experience::ExperienceRepository,
    utils::valid_uuid::valid_uuid,
};

/// Work history and education share one table, split by `kind`.
pub struct ExperienceHandler<R>
where
    R: ExperienceRepository,
{
    pub experience_repo: R,
}

impl<R> ExperienceHandler<R>
where
    R: ExperienceRepository,
{
    pub fn new(experience_repo: R) -> Self {
        ExperienceHandler { experience_repo }
    }

    pub async fn list_experience(&self, kind: Option<ExperienceKind>) -> Result<Vec<Experience>, AppError> {
        self.experience_repo.list_experience(kind).await
    }

    pub async fn get_experience(&self, id: &str) -> Result<Experience, AppError> {
        let id = valid_uuid(id)?;
        self.experience_repo
            .get_experience(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Experience entry not found".to_string()))
    }

    pub async fn create_experience(&self, input: ExperienceInput) -> Result<Experience, AppError> {
        input.validate()?;
        self.experience_repo.create_experience(&input).await
    }

    pub async fn update_experience(&self, id: &str, input: ExperienceInput) -> Result<Experience, AppError> {
        input.validate()?;
        let id = valid_uuid(id)?;
        self.experience_repo
            .update_experience(&id, &input)
            .await?
            .ok_or_else(|| AppError::NotFound("Experience entry not found".to_string()))
    }

    pub async fn delete_experience(&self, id: &str) -> Result<(), AppError> {
        let id = valid_uuid(id)?;
        match self.experience_repo.delete_experience(&id).await? {
            true => Ok(()),
            false => Err(AppError::NotFound("Experience entry not found".to_string())),
        }
    }
}
