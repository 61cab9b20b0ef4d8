use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::settings::{Setting, SettingKey, SettingType, SettingValue, SettingsRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresSettingsRepository {
    pool: PgPool,
}

impl PostgresSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SettingRow {
    key: String,
    value: String,
    #[sqlx(rename = "type")]
    kind: String,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SettingRow> for Setting {
    type Error = DomainError;

    fn try_from(row: SettingRow) -> Result<Self, Self::Error> {
        let kind = row.kind.parse::<SettingType>()?;
        Ok(Setting {
            key: SettingKey::new(row.key)?,
            value: SettingValue::decode(kind, &row.value)?,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    async fn get(&self, key: &SettingKey) -> DomainResult<Option<Setting>> {
        let row = sqlx::query_as::<_, SettingRow>(
            "SELECT key, value, type, updated_at FROM settings WHERE key = $1",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Setting::try_from).transpose()
    }

    async fn upsert(&self, setting: Setting) -> DomainResult<Setting> {
        let row = sqlx::query_as::<_, SettingRow>(
            "INSERT INTO settings (key, value, type, updated_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (key) DO UPDATE
             SET value = EXCLUDED.value, type = EXCLUDED.type, updated_at = EXCLUDED.updated_at
             RETURNING key, value, type, updated_at",
        )
        .bind(setting.key.as_str())
        .bind(setting.value.encode())
        .bind(setting.value.kind().as_str())
        .bind(setting.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Setting::try_from(row)
    }

    async fn delete(&self, key: &SettingKey) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> DomainResult<Vec<Setting>> {
        let rows = sqlx::query_as::<_, SettingRow>(
            "SELECT key, value, type, updated_at FROM settings ORDER BY key ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Setting::try_from).collect()
    }
}
