use crate::domain::issue::Issue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content::ContentDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDto {
    pub id: i64,
    pub month: u32,
    pub year: i32,
    pub title: Option<String>,
    pub title_am: Option<String>,
    pub description: Option<String>,
    pub description_am: Option<String>,
    pub cover_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Issue> for IssueDto {
    fn from(issue: Issue) -> Self {
        Self {
            id: issue.id.into(),
            month: issue.period.month(),
            year: issue.period.year(),
            title: issue.title,
            title_am: issue.title_am,
            description: issue.description,
            description_am: issue.description_am,
            cover_image: issue.cover_image,
            published: issue.published,
            created_at: issue.created_at,
            updated_at: issue.updated_at,
        }
    }
}

/// An issue together with the articles and poems assigned to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueDetailDto {
    #[serde(flatten)]
    pub issue: IssueDto,
    pub articles: Vec<ContentDto>,
    pub poems: Vec<ContentDto>,
}
