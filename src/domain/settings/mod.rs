pub mod entity;
pub mod repository;

pub use entity::{Setting, SettingKey, SettingType, SettingValue};
pub use repository::SettingsRepository;
