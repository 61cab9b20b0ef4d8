use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssueId(pub i64);

impl IssueId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("issue id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<IssueId> for i64 {
    fn from(value: IssueId) -> Self {
        value.0
    }
}

/// Calendar month an issue belongs to. At most one issue exists per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IssuePeriod {
    year: i32,
    month: u32,
}

impl IssuePeriod {
    pub fn new(month: u32, year: i32) -> DomainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::Validation(
                "month must be between 1 and 12".into(),
            ));
        }
        if !(1900..=9999).contains(&year) {
            return Err(DomainError::Validation(
                "year must be between 1900 and 9999".into(),
            ));
        }
        Ok(Self { year, month })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

#[derive(Debug, Clone)]
pub struct Issue {
    pub id: IssueId,
    pub period: IssuePeriod,
    pub title: Option<String>,
    pub title_am: Option<String>,
    pub description: Option<String>,
    pub description_am: Option<String>,
    pub cover_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewIssue {
    pub period: IssuePeriod,
    pub title: Option<String>,
    pub title_am: Option<String>,
    pub description: Option<String>,
    pub description_am: Option<String>,
    pub cover_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl NewIssue {
    pub fn ensure_titled(&self) -> DomainResult<()> {
        if self.title.is_none() && self.title_am.is_none() {
            return Err(DomainError::Validation(
                "an issue needs a title in at least one language".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct IssueUpdate {
    pub id: IssueId,
    pub period: Option<IssuePeriod>,
    pub title: Option<Option<String>>,
    pub title_am: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub description_am: Option<Option<String>>,
    pub cover_image: Option<Option<String>>,
    pub published: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl IssueUpdate {
    pub fn new(id: IssueId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            period: None,
            title: None,
            title_am: None,
            description: None,
            description_am: None,
            cover_image: None,
            published: None,
            updated_at,
        }
    }

    /// Applies the update to an in-memory copy; used to validate the result
    /// before it is persisted.
    pub fn apply_to(&self, issue: &Issue) -> Issue {
        let mut next = issue.clone();
        if let Some(period) = self.period {
            next.period = period;
        }
        if let Some(title) = &self.title {
            next.title.clone_from(title);
        }
        if let Some(title_am) = &self.title_am {
            next.title_am.clone_from(title_am);
        }
        if let Some(description) = &self.description {
            next.description.clone_from(description);
        }
        if let Some(description_am) = &self.description_am {
            next.description_am.clone_from(description_am);
        }
        if let Some(cover_image) = &self.cover_image {
            next.cover_image.clone_from(cover_image);
        }
        if let Some(published) = self.published {
            next.published = published;
        }
        next.updated_at = self.updated_at;
        next
    }
}
