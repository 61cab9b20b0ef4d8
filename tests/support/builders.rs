// tests/support/builders.rs
use serde_json::{Value, json};

pub fn english_article(title: &str) -> Value {
    json!({
        "title": title,
        "excerpt": format!("About {title}"),
        "content": format!("The full text of {title}."),
        "category": "faith",
        "tags": "hope, prayer",
    })
}

pub fn amharic_poem(title_am: &str) -> Value {
    json!({
        "languageMode": "amharic",
        "titleAm": title_am,
        "contentAm": "ጸጋው ይብዛልን",
        "category": "devotional",
    })
}

pub fn bilingual_article(title: &str, title_am: &str) -> Value {
    json!({
        "languageMode": "bilingual",
        "title": title,
        "titleAm": title_am,
        "content": "English body",
        "contentAm": "የአማርኛ ጽሑፍ",
        "category": "family",
    })
}

/// Returns a copy of `draft` with `published` set.
pub fn published(mut draft: Value) -> Value {
    draft["published"] = Value::Bool(true);
    draft
}
