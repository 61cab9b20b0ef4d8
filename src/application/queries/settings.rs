use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::{
    application::{
        capability::ensure_capability,
        commands::settings::{HERO_CATEGORIES_KEY, HERO_VIDEO_KEY},
        dto::{AuthenticatedUser, HeroCategoryDto, HeroVideoDto, SettingDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::settings::{SettingKey, SettingsRepository},
};

pub struct SettingsQueryService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsQueryService {
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_setting(&self, key: &str) -> ApplicationResult<SettingDto> {
        let key = SettingKey::new(key)?;
        self.repo
            .get(&key)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("setting '{key}' not found")))
    }

    pub async fn list_settings(&self, actor: &AuthenticatedUser) -> ApplicationResult<Vec<SettingDto>> {
        ensure_capability(actor, "settings", "manage")?;
        let settings = self.repo.list().await?;
        Ok(settings.into_iter().map(Into::into).collect())
    }

    /// `None` until an editor configures the video.
    pub async fn hero_video(&self) -> ApplicationResult<Option<HeroVideoDto>> {
        self.read_json(HERO_VIDEO_KEY).await
    }

    pub async fn hero_categories(&self) -> ApplicationResult<Vec<HeroCategoryDto>> {
        Ok(self.read_json(HERO_CATEGORIES_KEY).await?.unwrap_or_default())
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> ApplicationResult<Option<T>> {
        let key = SettingKey::new(key)?;
        let Some(setting) = self.repo.get(&key).await? else {
            return Ok(None);
        };
        serde_json::from_value(setting.value.to_json())
            .map(Some)
            .map_err(|e| ApplicationError::infrastructure(format!("setting '{key}' is malformed: {e}")))
    }
}
