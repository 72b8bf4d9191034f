use validator::Validate;

use crate::{
    entities::skill::{Skill, SkillInput},
    errors::AppError,
    repositories::skill::SkillRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct SkillHandler<R>
where
    R: SkillRepository,
{
    pub skill_repo: R,
}

impl<R> SkillHandler<R>
where
    R: SkillRepository,
{
    pub fn new(skill_repo: R) -> Self {
        SkillHandler { skill_repo }
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        self.skill_repo.list_skills().await
    }

    pub async fn get_skill(&self, id: &str) -> Result<Skill, AppError> {
        let id = valid_uuid(id)?;
        self.skill_repo
            .get_skill(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))
    }

    pub async fn create_skill(&self, input: SkillInput) -> Result<Skill, AppError> {
        input.validate()?;
        self.skill_repo.create_skill(&input).await
    }

    pub async fn update_skill(&self, id: &str, input: SkillInput) -> Result<Skill, AppError> {
        input.validate()?;
        let id = valid_uuid(id)?;
        self.skill_repo
            .update_skill(&id, &input)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))
    }

    pub async fn delete_skill(&self, id: &str) -> Result<(), AppError> {
        let id = valid_uuid(id)?;
        match self.skill_repo.delete_skill(&id).await? {
            true => Ok(()),
            false => Err(AppError::NotFound("Skill not found".to_string())),
        }
    }
}
