// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_comment;
mod postgres_content;
mod postgres_inbox;
mod postgres_issue;
mod postgres_newsletter;
mod postgres_settings;
mod postgres_user;

pub use error::map_sqlx;
pub use postgres_comment::PostgresCommentRepository;
pub use postgres_content::{PostgresContentReadRepository, PostgresContentWriteRepository};
pub use postgres_inbox::{PostgresContactRepository, PostgresSubmissionRepository};
pub use postgres_issue::PostgresIssueRepository;
pub use postgres_newsletter::PostgresSubscriptionRepository;
pub use postgres_settings::PostgresSettingsRepository;
pub use postgres_user::PostgresUserRepository;
