use validator::Validate;

use crate::{
    entities::project::{ProjectInput, ProjectResponse},
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    /// Ordered by `order`, then creation time.
    pub async fn list_projects(&self, featured_only: bool) -> Result<Vec<ProjectResponse>, AppError> {
        let projects = self.project_repo.list_projects(featured_only).await?;
        Ok(projects.into_iter().map(ProjectResponse::from).collect())
    }

    pub async fn get_project(&self, id: &str) -> Result<ProjectResponse, AppError> {
        let id = valid_uuid(id)?;
        self.project_repo
            .get_project(&id)
            .await?
            .map(ProjectResponse::from)
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    pub async fn create_project(&self, input: ProjectInput) -> Result<ProjectResponse, AppError> {
        input.validate()?;
        let project = self.project_repo.create_project(&input).await?;
        tracing::info!(project_id = %project.id, "Project created");
        Ok(project.into())
    }

    pub async fn update_project(&self, id: &str, input: ProjectInput) -> Result<ProjectResponse, AppError> {
        input.validate()?;
        let id = valid_uuid(id)?;
        self.project_repo
            .update_project(&id, &input)
            .await?
            .map(ProjectResponse::from)
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let id = valid_uuid(id)?;
        if !self.project_repo.delete_project(&id).await? {
            return Err(AppError::NotFound("Project not found".to_string()));
        }
        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::project::Project, repositories::project::MockProjectRepository};
    use chrono::Utc;
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn project(title: &str, long: Option<&str>) -> Project {
        Project {
            id: Uuid::new_v4(),
            title: title.into(),
            description: "desc".into(),
            long_description: long.map(str::to_string),
            tech_stack: vec!["rust".into()],
            live_url: None,
            code_url: None,
            image_url: None,
            featured: true,
            order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn input(title: &str) -> ProjectInput {
        ProjectInput {
            title: title.into(),
            description: "A thing".into(),
            long_description: None,
            tech_stack: vec![],
            live_url: Some("https://example.com".into()),
            code_url: None,
            image_url: Some("/images/projects/shot.png".into()),
            featured: false,
            order: 1,
        }
    }

    #[tokio::test]
    async fn featured_filter_is_passed_through_and_markdown_rendered() {
        let mut repo = MockProjectRepository::new();
        repo.expect_list_projects()
            .with(eq(true))
            .times(1)
            .returning(|_| Ok(vec![project("Site", Some("# Heading"))]));

        let handler = ProjectHandler::new(repo);
        let projects = handler.list_projects(true).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert!(projects[0].long_description_html.as_deref().unwrap().contains("<h1>"));
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_repository() {
        let mut repo = MockProjectRepository::new();
        repo.expect_create_project().never();

        let handler = ProjectHandler::new(repo);
        let mut bad = input("  ");
        bad.live_url = Some("javascript:alert(1)".into());
        let err = handler.create_project(bad).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(ref f) if f.len() == 2));
    }

    #[tokio::test]
    async fn updating_missing_project_is_not_found() {
        let mut repo = MockProjectRepository::new();
        repo.expect_update_project().returning(|_, _| Ok(None));
        repo.expect_delete_project().returning(|_| Ok(false));

        let handler = ProjectHandler::new(repo);
        let id = Uuid::new_v4().to_string();
        assert!(matches!(handler.update_project(&id, input("X")).await, Err(AppError::NotFound(_))));
        assert!(matches!(handler.delete_project(&id).await, Err(AppError::NotFound(_))));
    }
}
