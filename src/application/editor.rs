//! Form logic of the admin content editor.
//!
//! The editor works in one of three language modes. The mode decides which
//! fields are required and which are submitted: switching an English draft to
//! Amharic keeps the English fields in the form but they are not sent.

use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::{
        content::{BilingualText, Category, Language, LanguageMode, Tags},
        errors::non_blank,
    },
};
use serde::Deserialize;

/// Tags arrive either as the raw comma-separated input or as a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    Joined(String),
    List(Vec<String>),
}

impl From<TagsInput> for Tags {
    fn from(value: TagsInput) -> Self {
        match value {
            TagsInput::Joined(joined) => Tags::parse(&joined),
            TagsInput::List(list) => list.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorRef {
    Id(i64),
    /// Byline typed into the editor; resolved with find-or-create.
    Name(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDraft {
    #[serde(default)]
    pub language_mode: Option<LanguageMode>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_am: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub excerpt_am: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_am: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<TagsInput>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub issue_id: Option<i64>,
}

/// A validated draft, reduced to the fields of its language mode.
#[derive(Debug, Clone)]
pub struct ContentSubmission {
    pub mode: LanguageMode,
    pub text: BilingualText,
    pub category: Category,
    pub tags: Tags,
    pub cover_image: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub author: Option<AuthorRef>,
    pub issue_id: Option<i64>,
}

impl ContentDraft {
    fn text(&self) -> BilingualText {
        BilingualText::new(
            self.title.clone(),
            self.title_am.clone(),
            self.excerpt.clone(),
            self.excerpt_am.clone(),
            self.content.clone(),
            self.content_am.clone(),
        )
    }

    /// The explicit mode, or the one implied by which languages were filled
    /// in.
    pub fn language_mode(&self) -> LanguageMode {
        self.language_mode
            .unwrap_or_else(|| infer_mode(&self.text()))
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        missing_fields(self.language_mode(), &self.text())
    }

    pub fn validate(self) -> ApplicationResult<ContentSubmission> {
        let mode = self.language_mode();
        let text = mode.retain(self.text());
        ensure_complete(mode, &text)?;

        let category = match non_blank(self.category) {
            Some(raw) => raw.parse::<Category>()?,
            None => return Err(ApplicationError::validation("category is required")),
        };

        let author = match (self.author_id, non_blank(self.author_name)) {
            (Some(id), _) => Some(AuthorRef::Id(id)),
            (None, Some(name)) => Some(AuthorRef::Name(name)),
            (None, None) => None,
        };

        Ok(ContentSubmission {
            mode,
            text,
            category,
            tags: self.tags.map(Tags::from).unwrap_or_default(),
            cover_image: non_blank(self.cover_image),
            featured: self.featured,
            published: self.published,
            author,
            issue_id: self.issue_id,
        })
    }
}

/// Text changes of an update. Absent fields keep their stored value and blank
/// ones clear it. With a language mode the merged text is reduced to that
/// mode and must be complete for it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPatch {
    #[serde(default)]
    pub language_mode: Option<LanguageMode>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_am: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub excerpt_am: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_am: Option<String>,
}

impl TextPatch {
    pub fn is_empty(&self) -> bool {
        self.language_mode.is_none()
            && self.title.is_none()
            && self.title_am.is_none()
            && self.excerpt.is_none()
            && self.excerpt_am.is_none()
            && self.content.is_none()
            && self.content_am.is_none()
    }

    pub fn apply(self, current: &BilingualText) -> ApplicationResult<BilingualText> {
        let merge = |next: Option<String>, old: &Option<String>| next.or_else(|| old.clone());
        let merged = BilingualText::new(
            merge(self.title, &current.title),
            merge(self.title_am, &current.title_am),
            merge(self.excerpt, &current.excerpt),
            merge(self.excerpt_am, &current.excerpt_am),
            merge(self.content, &current.content),
            merge(self.content_am, &current.content_am),
        );
        match self.language_mode {
            Some(mode) => {
                let reduced = mode.retain(merged);
                ensure_complete(mode, &reduced)?;
                Ok(reduced)
            }
            None => Ok(merged),
        }
    }
}

fn infer_mode(text: &BilingualText) -> LanguageMode {
    let english = text.title.is_some() || text.content.is_some();
    let amharic = text.title_am.is_some() || text.content_am.is_some();
    match (english, amharic) {
        (true, true) => LanguageMode::Bilingual,
        (false, true) => LanguageMode::Amharic,
        _ => LanguageMode::English,
    }
}

fn missing_fields(mode: LanguageMode, text: &BilingualText) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if mode.includes(Language::English) {
        if text.title.is_none() {
            missing.push("title");
        }
        if text.content.is_none() {
            missing.push("content");
        }
    }
    if mode.includes(Language::Amharic) {
        if text.title_am.is_none() {
            missing.push("titleAm");
        }
        if text.content_am.is_none() {
            missing.push("contentAm");
        }
    }
    missing
}

fn ensure_complete(mode: LanguageMode, text: &BilingualText) -> ApplicationResult<()> {
    let missing = missing_fields(mode, text);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApplicationError::validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}
