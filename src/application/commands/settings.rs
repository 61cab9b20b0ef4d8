use std::sync::Arc;

use serde_json::Value;

use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, HeroCategoryDto, HeroVideoDto, SettingDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::settings::{Setting, SettingKey, SettingType, SettingValue, SettingsRepository},
};

pub const HERO_VIDEO_KEY: &str = "hero.video";
pub const HERO_CATEGORIES_KEY: &str = "hero.categories";

pub struct SetSettingCommand {
    pub key: String,
    pub value: Value,
    pub kind: SettingType,
}

pub struct SettingsCommandService {
    repo: Arc<dyn SettingsRepository>,
    clock: Arc<dyn Clock>,
}

impl SettingsCommandService {
    pub fn new(repo: Arc<dyn SettingsRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn set_setting(
        &self,
        actor: &AuthenticatedUser,
        command: SetSettingCommand,
    ) -> ApplicationResult<SettingDto> {
        ensure_capability(actor, "settings", "manage")?;
        let key = SettingKey::new(command.key)?;
        let value = SettingValue::from_json(command.kind, command.value)?;
        self.store(key, value).await
    }

    pub async fn delete_setting(&self, actor: &AuthenticatedUser, key: &str) -> ApplicationResult<()> {
        ensure_capability(actor, "settings", "manage")?;
        let key = SettingKey::new(key)?;
        if self.repo.delete(&key).await? {
            Ok(())
        } else {
            Err(ApplicationError::not_found(format!("setting '{key}' not found")))
        }
    }

    pub async fn set_hero_video(
        &self,
        actor: &AuthenticatedUser,
        video: HeroVideoDto,
    ) -> ApplicationResult<HeroVideoDto> {
        ensure_capability(actor, "settings", "manage")?;
        if video.url.trim().is_empty() {
            return Err(ApplicationError::validation("video url is required"));
        }
        self.store_json(HERO_VIDEO_KEY, &video).await?;
        Ok(video)
    }

    pub async fn set_hero_categories(
        &self,
        actor: &AuthenticatedUser,
        categories: Vec<HeroCategoryDto>,
    ) -> ApplicationResult<Vec<HeroCategoryDto>> {
        ensure_capability(actor, "settings", "manage")?;
        if categories
            .iter()
            .any(|c| c.name.trim().is_empty() || c.href.trim().is_empty())
        {
            return Err(ApplicationError::validation(
                "every hero category needs a name and a link",
            ));
        }
        self.store_json(HERO_CATEGORIES_KEY, &categories).await?;
        Ok(categories)
    }

    async fn store_json<T: serde::Serialize>(&self, key: &str, value: &T) -> ApplicationResult<()> {
        let json = serde_json::to_value(value)
            .map_err(|e| ApplicationError::infrastructure(e.to_string()))?;
        self.store(SettingKey::new(key)?, SettingValue::Json(json))
            .await
            .map(|_| ())
    }

    async fn store(&self, key: SettingKey, value: SettingValue) -> ApplicationResult<SettingDto> {
        let setting = Setting {
            key,
            value,
            updated_at: self.clock.now(),
        };
        let stored = self.repo.upsert(setting).await?;
        Ok(stored.into())
    }
}
