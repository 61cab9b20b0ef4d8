use crate::domain::settings::{Setting, SettingType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingDto {
    pub key: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub kind: SettingType,
    pub updated_at: DateTime<Utc>,
}

impl From<Setting> for SettingDto {
    fn from(setting: Setting) -> Self {
        Self {
            key: setting.key.to_string(),
            kind: setting.value.kind(),
            value: setting.value.to_json(),
            updated_at: setting.updated_at,
        }
    }
}
