//! Bilingual (English/Amharic) text handling.
//!
//! Every article and poem carries parallel English and Amharic copies of its
//! title, excerpt and body. [`BilingualText::display_mode`] decides how a
//! reader sees the item, and [`BilingualText::resolve`] picks the fields to
//! render for that mode.

use crate::domain::errors::{DomainError, DomainResult, non_blank};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "am")]
    Amharic,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Amharic => "am",
        }
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "am" | "amharic" => Ok(Language::Amharic),
            other => Err(DomainError::Validation(format!("unknown language '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    EnglishOnly,
    AmharicOnly,
    Bilingual,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BilingualText {
    pub title: Option<String>,
    pub title_am: Option<String>,
    pub excerpt: Option<String>,
    pub excerpt_am: Option<String>,
    pub content: Option<String>,
    pub content_am: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedView<'a> {
    pub language: Language,
    pub title: &'a str,
    pub excerpt: Option<&'a str>,
    pub content: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent<'a> {
    pub mode: DisplayMode,
    pub sections: Vec<LocalizedView<'a>>,
}

impl BilingualText {
    /// Normalises every field: surrounding whitespace is trimmed and blank
    /// values become `None`.
    pub fn new(
        title: Option<String>,
        title_am: Option<String>,
        excerpt: Option<String>,
        excerpt_am: Option<String>,
        content: Option<String>,
        content_am: Option<String>,
    ) -> Self {
        Self {
            title: non_blank(title),
            title_am: non_blank(title_am),
            excerpt: non_blank(excerpt),
            excerpt_am: non_blank(excerpt_am),
            content: non_blank(content),
            content_am: non_blank(content_am),
        }
    }

    pub fn has_english(&self) -> bool {
        self.title.is_some() && self.content.is_some()
    }

    pub fn has_amharic(&self) -> bool {
        self.title_am.is_some() && self.content_am.is_some()
    }

    /// Identical English and Amharic bodies count as one language: an English
    /// text duplicated into the Amharic fields reads as Amharic-only. A shared
    /// title over distinct bodies falls back to English-only.
    pub fn display_mode(&self) -> DisplayMode {
        let english = self.has_english();
        let amharic = self.has_amharic();

        if english && amharic && self.content != self.content_am && self.title != self.title_am {
            DisplayMode::Bilingual
        } else if amharic && (self.content == self.content_am || !english) {
            DisplayMode::AmharicOnly
        } else {
            DisplayMode::EnglishOnly
        }
    }

    pub fn resolve(&self) -> ResolvedContent<'_> {
        let mode = self.display_mode();
        let sections = match mode {
            DisplayMode::Bilingual => vec![self.english_view(), self.amharic_view()],
            DisplayMode::EnglishOnly => vec![self.english_view()],
            DisplayMode::AmharicOnly => vec![self.amharic_view()],
        };
        ResolvedContent { mode, sections }
    }

    /// Title used for slugs, listings and e-mail subjects.
    pub fn primary_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.title_am.as_deref())
    }

    pub fn ensure_publishable(&self) -> DomainResult<()> {
        if self.has_english() || self.has_amharic() {
            Ok(())
        } else {
            Err(DomainError::Validation(
                "published content needs a title and body in at least one language".into(),
            ))
        }
    }

    pub fn ensure_not_empty(&self) -> DomainResult<()> {
        if self.primary_title().is_none() {
            return Err(DomainError::Validation(
                "either title or titleAm is required".into(),
            ));
        }
        if self.content.is_none() && self.content_am.is_none() {
            return Err(DomainError::Validation(
                "either content or contentAm is required".into(),
            ));
        }
        Ok(())
    }

    fn english_view(&self) -> LocalizedView<'_> {
        LocalizedView {
            language: Language::English,
            title: pick(self.title.as_deref(), self.title_am.as_deref()),
            excerpt: self.excerpt.as_deref(),
            content: pick(self.content.as_deref(), self.content_am.as_deref()),
        }
    }

    fn amharic_view(&self) -> LocalizedView<'_> {
        LocalizedView {
            language: Language::Amharic,
            title: pick(self.title_am.as_deref(), self.title.as_deref()),
            excerpt: self.excerpt_am.as_deref().or(self.excerpt.as_deref()),
            content: pick(self.content_am.as_deref(), self.content.as_deref()),
        }
    }
}

fn pick<'a>(preferred: Option<&'a str>, fallback: Option<&'a str>) -> &'a str {
    preferred.or(fallback).unwrap_or_default()
}

/// Editor tri-state: which language(s) the author is writing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMode {
    #[default]
    English,
    Amharic,
    Bilingual,
}

impl LanguageMode {
    pub fn from_display_mode(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::EnglishOnly => LanguageMode::English,
            DisplayMode::AmharicOnly => LanguageMode::Amharic,
            DisplayMode::Bilingual => LanguageMode::Bilingual,
        }
    }

    pub fn includes(&self, language: Language) -> bool {
        matches!(
            (self, language),
            (LanguageMode::Bilingual, _)
                | (LanguageMode::English, Language::English)
                | (LanguageMode::Amharic, Language::Amharic)
        )
    }

    /// Drops the fields of any language this mode does not cover.
    pub fn retain(&self, text: BilingualText) -> BilingualText {
        let english = self.includes(Language::English);
        let amharic = self.includes(Language::Amharic);
        BilingualText {
            title: text.title.filter(|_| english),
            excerpt: text.excerpt.filter(|_| english),
            content: text.content.filter(|_| english),
            title_am: text.title_am.filter(|_| amharic),
            excerpt_am: text.excerpt_am.filter(|_| amharic),
            content_am: text.content_am.filter(|_| amharic),
        }
    }
}

impl FromStr for LanguageMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(LanguageMode::English),
            "amharic" | "am" => Ok(LanguageMode::Amharic),
            "bilingual" | "both" => Ok(LanguageMode::Bilingual),
            other => Err(DomainError::Validation(format!(
                "unknown language mode '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(title: &str, title_am: &str, content: &str, content_am: &str) -> BilingualText {
        BilingualText::new(
            Some(title.into()),
            Some(title_am.into()),
            None,
            None,
            Some(content.into()),
            Some(content_am.into()),
        )
    }

    #[test]
    fn identical_pairs_are_amharic_only() {
        let t = text("A", "A", "B", "B");
        assert_eq!(t.display_mode(), DisplayMode::AmharicOnly);
    }

    #[test]
    fn distinct_pairs_are_bilingual() {
        let t = text("Grace", "ጸጋ", "Grace abounds.", "ጸጋ በዛ።");
        assert_eq!(t.display_mode(), DisplayMode::Bilingual);
        let resolved = t.resolve();
        assert_eq!(resolved.sections.len(), 2);
        assert_eq!(resolved.sections[0].language, Language::English);
        assert_eq!(resolved.sections[1].title, "ጸጋ");
    }

    #[test]
    fn english_fields_only_is_english_only() {
        let t = BilingualText::new(
            Some("Hope".into()),
            None,
            Some("short".into()),
            None,
            Some("body".into()),
            None,
        );
        assert_eq!(t.display_mode(), DisplayMode::EnglishOnly);
        let resolved = t.resolve();
        assert_eq!(resolved.sections.len(), 1);
        assert_eq!(resolved.sections[0].excerpt, Some("short"));
    }

    #[test]
    fn amharic_fields_only_is_amharic_only() {
        let t = BilingualText::new(
            None,
            Some("ተስፋ".into()),
            None,
            None,
            None,
            Some("ሰውነት".into()),
        );
        assert_eq!(t.display_mode(), DisplayMode::AmharicOnly);
    }

    #[test]
    fn shared_title_with_distinct_bodies_falls_back_to_english() {
        let t = text("Psalm 23", "Psalm 23", "The Lord is my shepherd", "እግዚአብሔር እረኛዬ ነው");
        assert_eq!(t.display_mode(), DisplayMode::EnglishOnly);
    }

    #[test]
    fn blank_strings_count_as_absent() {
        let t = text("Title", "   ", "Body", "");
        assert!(t.title_am.is_none());
        assert!(!t.has_amharic());
        assert_eq!(t.display_mode(), DisplayMode::EnglishOnly);
    }

    #[test]
    fn publishable_requires_a_complete_language_pair() {
        let t = BilingualText::new(Some("T".into()), None, None, None, None, Some("x".into()));
        assert!(t.ensure_publishable().is_err());
        assert!(t.ensure_not_empty().is_ok());
    }

    #[test]
    fn retain_drops_unselected_language() {
        let t = text("Grace", "ጸጋ", "Grace abounds.", "ጸጋ በዛ።");
        let english = LanguageMode::English.retain(t.clone());
        assert!(english.title_am.is_none() && english.content_am.is_none());
        assert_eq!(english.title.as_deref(), Some("Grace"));

        let both = LanguageMode::Bilingual.retain(t.clone());
        assert_eq!(both, t);
    }
}
