use crate::domain::errors::DomainError;

const CNT_USER_NAME: &str = "users_name_key";
const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_ARTICLE_SLUG: &str = "articles_slug_key";
const CNT_POEM_SLUG: &str = "poems_slug_key";
const CNT_ARTICLE_AUTHOR: &str = "articles_author_id_fkey";
const CNT_POEM_AUTHOR: &str = "poems_author_id_fkey";
const CNT_ARTICLE_ISSUE: &str = "articles_issue_id_fkey";
const CNT_POEM_ISSUE: &str = "poems_issue_id_fkey";
const CNT_ARTICLE_PUBLISHED_CHECK: &str = "articles_published_chk";
const CNT_POEM_PUBLISHED_CHECK: &str = "poems_published_chk";
const CNT_ISSUE_PERIOD: &str = "issues_period_key";
const CNT_COMMENT_PARENT: &str = "comments_parent_id_fkey";
const CNT_SUBSCRIPTION_EMAIL: &str = "newsletter_subscriptions_email_key";

pub(crate) const SQLSTATE_FOREIGN_KEY: &str = "23503";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_USER_NAME => {
                        DomainError::Conflict("a user with this name already exists".into())
                    }
                    CNT_USER_EMAIL => {
                        DomainError::Conflict("a user with this email already exists".into())
                    }
                    CNT_ARTICLE_SLUG | CNT_POEM_SLUG => {
                        DomainError::Conflict("slug already exists".into())
                    }
                    CNT_ARTICLE_AUTHOR | CNT_POEM_AUTHOR => {
                        DomainError::NotFound("author not found".into())
                    }
                    CNT_ARTICLE_ISSUE | CNT_POEM_ISSUE => {
                        DomainError::NotFound("issue not found".into())
                    }
                    CNT_ARTICLE_PUBLISHED_CHECK | CNT_POEM_PUBLISHED_CHECK => {
                        DomainError::Validation(
                            "published content needs a title and body in at least one language"
                                .into(),
                        )
                    }
                    CNT_ISSUE_PERIOD => {
                        DomainError::Conflict("an issue for this month already exists".into())
                    }
                    CNT_COMMENT_PARENT => {
                        DomainError::NotFound("parent comment not found".into())
                    }
                    CNT_SUBSCRIPTION_EMAIL => {
                        DomainError::Conflict("this email is already subscribed".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    SQLSTATE_FOREIGN_KEY => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// True for a foreign-key violation, regardless of constraint.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(SQLSTATE_FOREIGN_KEY))
}

/// Escapes `%`, `_` and `\` so user input matches literally inside ILIKE.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
