use crate::domain::errors::DomainResult;
use crate::domain::settings::entity::{Setting, SettingKey};
use async_trait::async_trait;

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get(&self, key: &SettingKey) -> DomainResult<Option<Setting>>;
    /// Inserts or replaces the value and type stored under the key.
    async fn upsert(&self, setting: Setting) -> DomainResult<Setting>;
    /// Returns whether a row was removed.
    async fn delete(&self, key: &SettingKey) -> DomainResult<bool>;
    /// Ordered by key.
    async fn list(&self) -> DomainResult<Vec<Setting>>;
}
