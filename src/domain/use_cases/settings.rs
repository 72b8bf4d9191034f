use crate::{
    entities::setting::{Setting, SettingValueResponse},
    errors::AppError,
    repositories::setting::SettingRepository,
};

const MAX_KEY_LEN: usize = 100;

fn valid_key(key: &str) -> Result<&str, AppError> {
    let key = key.trim();
    let well_formed = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if well_formed {
        Ok(key)
    } else {
        Err(AppError::InvalidInput(format!("Invalid setting key: {}", key)))
    }
}

pub struct SettingHandler<R>
where
    R: SettingRepository,
{
    pub setting_repo: R,
}

impl<R> SettingHandler<R>
where
    R: SettingRepository,
{
    pub fn new(setting_repo: R) -> Self {
        SettingHandler { setting_repo }
    }

    /// A missing key is not an error; the value is simply `null`.
    pub async fn get_setting(&self, key: &str) -> Result<SettingValueResponse, AppError> {
        let key = valid_key(key)?;
        let value = self
            .setting_repo
            .get_setting(key)
            .await?
            .map(|s| s.value)
            .unwrap_or(serde_json::Value::Null);

        Ok(SettingValueResponse {
            key: key.to_string(),
            value,
        })
    }

    pub async fn list_settings(&self) -> Result<Vec<Setting>, AppError> {
        self.setting_repo.list_settings().await
    }

    pub async fn upsert_setting(&self, key: &str, value: serde_json::Value) -> Result<Setting, AppError> {
        let key = valid_key(key)?;
        let setting = self.setting_repo.upsert_setting(key, &value).await?;
        tracing::info!(key = %setting.key, "Setting saved");
        Ok(setting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::setting::MockSettingRepository;
    use serde_json::json;

    #[tokio::test]
    async fn absent_key_yields_null_value() {
        let mut repo = MockSettingRepository::new();
        repo.expect_get_setting().returning(|_| Ok(None));

        let handler = SettingHandler::new(repo);
        let response = handler.get_setting("hero_title").await.unwrap();
        assert_eq!(
            response,
            SettingValueResponse {
                key: "hero_title".into(),
                value: serde_json::Value::Null
            }
        );
    }

    #[tokio::test]
    async fn malformed_keys_are_rejected() {
        let mut repo = MockSettingRepository::new();
        repo.expect_upsert_setting().never();

        let handler = SettingHandler::new(repo);
        let err = handler.upsert_setting("bad key!", json!(1)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
