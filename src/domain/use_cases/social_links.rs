use validator::Validate;

use crate::{
    entities::{
        social_link::{NewSocialLink, SocialLink, UpdateSocialLink},
        validation::web_url,
    },
    errors::{AppError, FieldError},
    repositories::social_link::SocialLinkRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct SocialLinkHandler<R>
where
    R: SocialLinkRepository,
{
    pub social_repo: R,
}

impl<R> SocialLinkHandler<R>
where
    R: SocialLinkRepository,
{
    pub fn new(social_repo: R) -> Self {
        SocialLinkHandler { social_repo }
    }

    pub async fn list_social_links(&self) -> Result<Vec<SocialLink>, AppError> {
        self.social_repo.list_social_links().await
    }

    pub async fn create_social_link(&self, input: NewSocialLink) -> Result<SocialLink, AppError> {
        input.validate()?;
        self.social_repo.create_social_link(&input).await
    }

    pub async fn update_social_link(&self, id: &str, patch: UpdateSocialLink) -> Result<SocialLink, AppError> {
        patch.validate()?;
        if let Some(icon) = patch.icon_url.value_ref() {
            if web_url(icon).is_err() {
                return Err(AppError::ValidationError(vec![FieldError {
                    field: "icon_url".into(),
                    message: "Must be an http(s) URL or a site path".into(),
                }]));
            }
        }
        if patch.is_empty() {
            return Err(AppError::InvalidInput("No fields to update".to_string()));
        }

        let id = valid_uuid(id)?;
        self.social_repo
            .update_social_link(&id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound("Social link not found".to_string()))
    }

    pub async fn delete_social_link(&self, id: &str) -> Result<(), AppError> {
        let id = valid_uuid(id)?;
        match self.social_repo.delete_social_link(&id).await? {
            true => Ok(()),
            false => Err(AppError::NotFound("Social link not found".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::option_fields::OptionField, repositories::social_link::MockSocialLinkRepository};
    use uuid::Uuid;

    #[tokio::test]
    async fn empty_patch_is_rejected() {
        let mut repo = MockSocialLinkRepository::new();
        repo.expect_update_social_link().never();

        let handler = SocialLinkHandler::new(repo);
        let err = handler
            .update_social_link(&Uuid::new_v4().to_string(), UpdateSocialLink::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn icon_value_is_validated_but_null_is_allowed() {
        let mut repo = MockSocialLinkRepository::new();
        repo.expect_update_social_link()
            .withf(|_, patch| patch.icon_url == OptionField::SetToNull)
            .times(1)
            .returning(|_, _| Ok(None));

        let handler = SocialLinkHandler::new(repo);
        let id = Uuid::new_v4().to_string();

        let bad = UpdateSocialLink {
            icon_url: OptionField::SetToValue("ftp://x".into()),
            ..UpdateSocialLink::default()
        };
        assert!(matches!(
            handler.update_social_link(&id, bad).await,
            Err(AppError::ValidationError(_))
        ));

        let clear = UpdateSocialLink {
            icon_url: OptionField::SetToNull,
            ..UpdateSocialLink::default()
        };
        assert!(matches!(
            handler.update_social_link(&id, clear).await,
            Err(AppError::NotFound(_))
        ));
    }
}
