//! Homepage hero blocks. Both are stored as `JSON` settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HeroVideoDto {
    pub url: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_am: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub subtitle_am: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroCategoryDto {
    pub name: String,
    #[serde(default)]
    pub name_am: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub href: String,
}
