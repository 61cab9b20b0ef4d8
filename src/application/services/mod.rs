// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{
            comments::CommentCommandService, content::ContentCommandService,
            inbox::InboxCommandService, issues::IssueCommandService,
            newsletter::NewsletterCommandService, settings::SettingsCommandService,
            users::UserCommandService,
        },
        dto::AuthenticatedUser,
        notifications::NotificationService,
        ports::{
            mailer::Mailer,
            security::{PasswordHasher, TokenManager},
            time::Clock,
            util::SlugGenerator,
        },
        queries::{
            comments::CommentQueryService, content::ContentQueryService,
            inbox::InboxQueryService, issues::IssueQueryService,
            newsletter::NewsletterQueryService, settings::SettingsQueryService,
            users::UserQueryService,
        },
    },
    domain::{
        comment::CommentRepository,
        content::{ContentReadRepository, ContentSlugService, ContentWriteRepository},
        inbox::{ContactRepository, SubmissionRepository},
        issue::IssueRepository,
        newsletter::SubscriptionRepository,
        settings::SettingsRepository,
        user::UserRepository,
    },
};

/// Everything the services are built from. Adapters are chosen by the
/// caller: PostgreSQL in the binary, in-memory doubles in tests.
pub struct ApplicationDependencies {
    pub user_repo: Arc<dyn UserRepository>,
    pub content_write_repo: Arc<dyn ContentWriteRepository>,
    pub content_read_repo: Arc<dyn ContentReadRepository>,
    pub issue_repo: Arc<dyn IssueRepository>,
    pub comment_repo: Arc<dyn CommentRepository>,
    pub subscription_repo: Arc<dyn SubscriptionRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub contact_repo: Arc<dyn ContactRepository>,
    pub submission_repo: Arc<dyn SubmissionRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_manager: Arc<dyn TokenManager>,
    pub mailer: Arc<dyn Mailer>,
    pub clock: Arc<dyn Clock>,
    pub slugger: Arc<dyn SlugGenerator>,
    /// Public site address used in e-mail links.
    pub site_url: String,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub content_commands: Arc<ContentCommandService>,
    pub content_queries: Arc<ContentQueryService>,
    pub issue_commands: Arc<IssueCommandService>,
    pub issue_queries: Arc<IssueQueryService>,
    pub comment_commands: Arc<CommentCommandService>,
    pub comment_queries: Arc<CommentQueryService>,
    pub newsletter_commands: Arc<NewsletterCommandService>,
    pub newsletter_queries: Arc<NewsletterQueryService>,
    pub settings_commands: Arc<SettingsCommandService>,
    pub settings_queries: Arc<SettingsQueryService>,
    pub inbox_commands: Arc<InboxCommandService>,
    pub inbox_queries: Arc<InboxQueryService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(deps: ApplicationDependencies) -> Self {
        let ApplicationDependencies {
            user_repo,
            content_write_repo,
            content_read_repo,
            issue_repo,
            comment_repo,
            subscription_repo,
            settings_repo,
            contact_repo,
            submission_repo,
            password_hasher,
            token_manager,
            mailer,
            clock,
            slugger,
            site_url,
        } = deps;

        let notifications = Arc::new(NotificationService::new(
            mailer,
            Arc::clone(&subscription_repo),
            site_url,
        ));
        let slug_service = Arc::new(ContentSlugService::new(
            Arc::clone(&content_read_repo),
            slugger,
        ));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&user_repo),
            Arc::clone(&content_read_repo),
            password_hasher,
            Arc::clone(&token_manager),
            Arc::clone(&clock),
        ));
        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&user_repo),
            Arc::clone(&clock),
        ));

        let content_commands = Arc::new(ContentCommandService::new(
            content_write_repo,
            Arc::clone(&content_read_repo),
            Arc::clone(&user_repo),
            Arc::clone(&issue_repo),
            slug_service,
            Arc::clone(&notifications),
            Arc::clone(&clock),
        ));
        let content_queries = Arc::new(ContentQueryService::new(
            Arc::clone(&content_read_repo),
            Arc::clone(&user_repo),
        ));

        let issue_commands = Arc::new(IssueCommandService::new(
            Arc::clone(&issue_repo),
            Arc::clone(&clock),
        ));
        let issue_queries = Arc::new(IssueQueryService::new(
            issue_repo,
            Arc::clone(&content_read_repo),
            Arc::clone(&content_queries),
        ));

        let comment_commands = Arc::new(CommentCommandService::new(
            Arc::clone(&comment_repo),
            Arc::clone(&content_read_repo),
            Arc::clone(&clock),
        ));
        let comment_queries = Arc::new(CommentQueryService::new(comment_repo));

        let newsletter_commands = Arc::new(NewsletterCommandService::new(
            Arc::clone(&subscription_repo),
            content_read_repo,
            notifications,
            Arc::clone(&clock),
        ));
        let newsletter_queries = Arc::new(NewsletterQueryService::new(subscription_repo));

        let settings_commands = Arc::new(SettingsCommandService::new(
            Arc::clone(&settings_repo),
            Arc::clone(&clock),
        ));
        let settings_queries = Arc::new(SettingsQueryService::new(settings_repo));

        let inbox_commands = Arc::new(InboxCommandService::new(
            Arc::clone(&contact_repo),
            Arc::clone(&submission_repo),
            clock,
        ));
        let inbox_queries = Arc::new(InboxQueryService::new(contact_repo, submission_repo));

        Self {
            user_commands,
            user_queries,
            content_commands,
            content_queries,
            issue_commands,
            issue_queries,
            comment_commands,
            comment_queries,
            newsletter_commands,
            newsletter_queries,
            settings_commands,
            settings_queries,
            inbox_commands,
            inbox_queries,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    /// Verifies a raw bearer token.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
