pub mod category;
pub mod entity;
pub mod language;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use category::Category;
pub use entity::{ContentItem, ContentStats, ContentUpdate, NewContent, PublishStateUpdate};
pub use language::{BilingualText, DisplayMode, Language, LanguageMode, LocalizedView, ResolvedContent};
pub use repository::{ContentFilter, ContentReadRepository, ContentWriteRepository, StatusFilter};
pub use services::{ContentSlugService, SlugGenerator};
pub use value_objects::{ContentId, ContentKind, Counter, Slug, Tags};
