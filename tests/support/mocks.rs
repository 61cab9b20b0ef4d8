// tests/support/mocks.rs
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use magazine_cms::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::{
        mailer::{Mailer, OutgoingEmail},
        security::{PasswordHasher, TokenManager},
        time::Clock,
        util::SlugGenerator,
    },
};
use magazine_cms::domain::{
    comment::{Comment, CommentFilter, CommentId, CommentRepository, CommentStatus, NewComment},
    content::{
        ContentFilter, ContentId, ContentItem, ContentKind, ContentReadRepository, ContentStats,
        ContentUpdate, ContentWriteRepository, Counter, NewContent, Slug,
    },
    errors::{DomainError, DomainResult},
    inbox::{
        ContactMessage, ContactRepository, MessageId, NewContactMessage, NewSubmission,
        Submission, SubmissionRepository, SubmissionStatus,
    },
    issue::{Issue, IssueId, IssueRepository, IssueUpdate, NewIssue},
    newsletter::{NewSubscription, Subscription, SubscriptionId, SubscriptionRepository},
    settings::{Setting, SettingKey, SettingsRepository},
    user::{Email, NewUser, Role, User, UserId, UserName, UserRepository, UserUpdate},
};
use std::{
    collections::HashMap,
    sync::Mutex,
    sync::atomic::{AtomicI64, Ordering},
};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const EDITOR_TOKEN: &str = "editor-token";
pub const AUTHOR_TOKEN: &str = "author-token";

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn next(counter: &AtomicI64) -> i64 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

pub struct DummyClock;
impl Clock for DummyClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}

pub struct DummySlug;
impl SlugGenerator for DummySlug {
    fn slugify(&self, input: &str) -> String {
        input
            .to_lowercase()
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

pub struct DummyPasswordHasher;
#[async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("hashed:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

/// Accepts the three fixed tokens for the seeded admin (1), editor (2) and
/// author (3).
pub struct DummyTokenManager;
#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        Ok(AuthTokenDto {
            token: format!("issued-{}", subject.user_id.0),
            issued_at: fixed_now(),
            expires_at: fixed_now() + chrono::Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let (id, name, role) = match token {
            ADMIN_TOKEN => (1, "Admin", Role::Admin),
            EDITOR_TOKEN => (2, "Editor", Role::Editor),
            AUTHOR_TOKEN => (3, "Author", Role::Author),
            _ => return Err(ApplicationError::unauthorized("invalid token")),
        };
        Ok(AuthenticatedUser {
            id: UserId::new(id)?,
            name: name.into(),
            role,
            capabilities: role.default_capabilities(),
            issued_at: fixed_now(),
            expires_at: fixed_now() + chrono::Duration::hours(1),
        })
    }
}

#[derive(Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl CapturingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, email: OutgoingEmail) -> ApplicationResult<()> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepo {
    fn store(&self, new_user: NewUser) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.name == new_user.name) {
            return Err(DomainError::Conflict("name taken".into()));
        }
        if new_user.email.is_some() && users.iter().any(|u| u.email == new_user.email) {
            return Err(DomainError::Conflict("email taken".into()));
        }
        let user = User {
            id: UserId::new(next(&self.next_id))?,
            name: new_user.name,
            email: new_user.email,
            role: new_user.role,
            bio: new_user.bio,
            password_hash: new_user.password_hash,
            created_at: new_user.created_at,
            updated_at: new_user.created_at,
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        self.store(new_user)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_ref() == Some(email))
            .cloned())
    }

    async fn find_or_create_by_name(&self, new_user: NewUser) -> DomainResult<User> {
        if let Some(existing) = self.find_by_name(&new_user.name).await? {
            return Ok(existing);
        }
        self.store(new_user)
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == update.id)
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(bio) = update.bio {
            user.bio = bio;
        }
        if let Some(hash) = update.password_hash {
            user.password_hash = Some(hash);
        }
        user.updated_at = update.updated_at;
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> DomainResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(DomainError::NotFound("user not found".into()));
        }
        Ok(())
    }

    async fn list(&self, search: Option<&str>) -> DomainResult<Vec<User>> {
        let term = search.map(str::to_lowercase);
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| match &term {
                Some(term) => {
                    u.name.as_str().to_lowercase().contains(term)
                        || u.email.as_ref().is_some_and(|e| e.as_str().contains(term))
                }
                None => true,
            })
            .cloned()
            .collect();
        users.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(users)
    }

    async fn find_by_name(&self, name: &UserName) -> DomainResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| &u.name == name).cloned())
    }
}

/// Serves as both the read and the write side, like the two PostgreSQL
/// repositories sharing one database.
#[derive(Default)]
pub struct InMemoryContentRepo {
    items: Mutex<Vec<ContentItem>>,
    next_id: AtomicI64,
}

fn text_matches(item: &ContentItem, term: &str) -> bool {
    let term = term.to_lowercase();
    let text = &item.text;
    [
        &text.title,
        &text.title_am,
        &text.excerpt,
        &text.excerpt_am,
        &text.content,
        &text.content_am,
    ]
    .into_iter()
    .flatten()
    .any(|value| value.to_lowercase().contains(&term))
        || item.tags.to_joined().to_lowercase().contains(&term)
}

fn filter_matches(item: &ContentItem, filter: &ContentFilter) -> bool {
    filter.status.matches(item.published)
        && filter.category.is_none_or(|c| c == item.category)
        && filter.featured.is_none_or(|f| f == item.featured)
        && filter.issue_id.is_none_or(|id| Some(id) == item.issue_id)
        && filter.author_id.is_none_or(|id| id == item.author_id)
        && filter
            .published_since
            .is_none_or(|since| item.published_at.is_some_and(|at| at >= since))
        && filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .is_none_or(|term| text_matches(item, term))
}

impl InMemoryContentRepo {
    fn matching(&self, kind: ContentKind, filter: &ContentFilter) -> Vec<ContentItem> {
        let mut items: Vec<ContentItem> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.kind == kind && filter_matches(item, filter))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            b.published_at
                .is_some()
                .cmp(&a.published_at.is_some())
                .then(b.published_at.cmp(&a.published_at))
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.0.cmp(&a.id.0))
        });
        items
    }
}

#[async_trait]
impl ContentWriteRepository for InMemoryContentRepo {
    async fn insert(&self, content: NewContent) -> DomainResult<ContentItem> {
        let mut items = self.items.lock().unwrap();
        if items
            .iter()
            .any(|i| i.kind == content.kind && i.slug == content.slug)
        {
            return Err(DomainError::Conflict("slug already exists".into()));
        }
        let item = ContentItem {
            id: ContentId::new(next(&self.next_id))?,
            kind: content.kind,
            slug: content.slug,
            text: content.text,
            category: content.category,
            tags: content.tags,
            cover_image: content.cover_image,
            published: content.published,
            featured: content.featured,
            published_at: content.published_at,
            stats: ContentStats::default(),
            author_id: content.author_id,
            issue_id: content.issue_id,
            created_at: content.created_at,
            updated_at: content.updated_at,
        };
        items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, update: ContentUpdate) -> DomainResult<ContentItem> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.kind == update.kind && i.id == update.id)
            .ok_or_else(|| DomainError::NotFound(format!("{} not found", update.kind)))?;
        if item.updated_at != update.original_updated_at {
            return Err(DomainError::Conflict(format!(
                "{} update conflict, please retry",
                update.kind
            )));
        }
        if let Some(text) = update.text {
            item.text = text;
        }
        if let Some(slug) = update.slug {
            item.slug = slug;
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(tags) = update.tags {
            item.tags = tags;
        }
        if let Some(cover_image) = update.cover_image {
            item.cover_image = cover_image;
        }
        if let Some(featured) = update.featured {
            item.featured = featured;
        }
        if let Some(state) = update.publish_state {
            item.published = state.published;
            item.published_at = state.published_at;
        }
        if let Some(author_id) = update.author_id {
            item.author_id = author_id;
        }
        if let Some(issue_id) = update.issue_id {
            item.issue_id = issue_id;
        }
        item.updated_at = update.updated_at;
        Ok(item.clone())
    }

    async fn delete(&self, kind: ContentKind, id: ContentId) -> DomainResult<()> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| !(i.kind == kind && i.id == id));
        if items.len() == before {
            return Err(DomainError::NotFound(format!("{kind} not found")));
        }
        Ok(())
    }

    async fn increment(&self, kind: ContentKind, id: ContentId, counter: Counter) -> DomainResult<i64> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.kind == kind && i.id == id && i.published)
            .ok_or_else(|| DomainError::NotFound(format!("{kind} not found")))?;
        let value = match counter {
            Counter::Views => &mut item.stats.views,
            Counter::Likes => &mut item.stats.likes,
            Counter::Shares => &mut item.stats.shares,
        };
        *value += 1;
        Ok(*value)
    }
}

#[async_trait]
impl ContentReadRepository for InMemoryContentRepo {
    async fn find_by_id(&self, kind: ContentKind, id: ContentId) -> DomainResult<Option<ContentItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.kind == kind && i.id == id)
            .cloned())
    }

    async fn find_by_slug(&self, kind: ContentKind, slug: &Slug) -> DomainResult<Option<ContentItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.kind == kind && &i.slug == slug)
            .cloned())
    }

    async fn list(&self, kind: ContentKind, filter: &ContentFilter) -> DomainResult<Vec<ContentItem>> {
        Ok(self
            .matching(kind, filter)
            .into_iter()
            .skip(filter.skip as usize)
            .take(filter.limit.clamp(1, 100) as usize)
            .collect())
    }

    async fn count(&self, kind: ContentKind, filter: &ContentFilter) -> DomainResult<u64> {
        Ok(self.matching(kind, filter).len() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryIssueRepo {
    issues: Mutex<Vec<Issue>>,
    next_id: AtomicI64,
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepo {
    async fn insert(&self, issue: NewIssue) -> DomainResult<Issue> {
        let mut issues = self.issues.lock().unwrap();
        if issues.iter().any(|i| i.period == issue.period) {
            return Err(DomainError::Conflict("an issue for this month already exists".into()));
        }
        let created = Issue {
            id: IssueId::new(next(&self.next_id))?,
            period: issue.period,
            title: issue.title,
            title_am: issue.title_am,
            description: issue.description,
            description_am: issue.description_am,
            cover_image: issue.cover_image,
            published: issue.published,
            created_at: issue.created_at,
            updated_at: issue.created_at,
        };
        issues.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: IssueUpdate) -> DomainResult<Issue> {
        let mut issues = self.issues.lock().unwrap();
        let issue = issues
            .iter_mut()
            .find(|i| i.id == update.id)
            .ok_or_else(|| DomainError::NotFound("issue not found".into()))?;
        *issue = update.apply_to(issue);
        Ok(issue.clone())
    }

    async fn delete(&self, id: IssueId) -> DomainResult<()> {
        let mut issues = self.issues.lock().unwrap();
        let before = issues.len();
        issues.retain(|i| i.id != id);
        if issues.len() == before {
            return Err(DomainError::NotFound("issue not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: IssueId) -> DomainResult<Option<Issue>> {
        Ok(self.issues.lock().unwrap().iter().find(|i| i.id == id).cloned())
    }

    async fn list(&self, published_only: bool) -> DomainResult<Vec<Issue>> {
        let mut issues: Vec<Issue> = self
            .issues
            .lock()
            .unwrap()
            .iter()
            .filter(|i| !published_only || i.published)
            .cloned()
            .collect();
        issues.sort_by(|a, b| b.period.cmp(&a.period));
        Ok(issues)
    }
}

#[derive(Default)]
pub struct InMemoryCommentRepo {
    comments: Mutex<Vec<Comment>>,
    next_id: AtomicI64,
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepo {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        let created = Comment {
            id: CommentId::new(next(&self.next_id))?,
            target: comment.target,
            parent_id: comment.parent_id,
            author_name: comment.author_name,
            author_email: comment.author_email,
            body: comment.body,
            status: comment.status,
            created_at: comment.created_at,
        };
        self.comments.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>> {
        Ok(self.comments.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self, filter: CommentFilter) -> DomainResult<Vec<Comment>> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| filter.target.is_none_or(|t| t == c.target))
            .filter(|c| filter.status.is_none_or(|s| s == c.status))
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: CommentId, status: CommentStatus) -> DomainResult<Comment> {
        let mut comments = self.comments.lock().unwrap();
        let comment = comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::NotFound("comment not found".into()))?;
        comment.status = status;
        Ok(comment.clone())
    }

    async fn delete(&self, id: CommentId) -> DomainResult<()> {
        let mut comments = self.comments.lock().unwrap();
        let before = comments.len();
        comments.retain(|c| c.id != id);
        if comments.len() == before {
            return Err(DomainError::NotFound("comment not found".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySubscriptionRepo {
    subscriptions: Mutex<Vec<Subscription>>,
    next_id: AtomicI64,
}

impl InMemorySubscriptionRepo {
    pub fn all(&self) -> Vec<Subscription> {
        self.subscriptions.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepo {
    async fn insert(&self, subscription: NewSubscription) -> DomainResult<Subscription> {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        if subscriptions.iter().any(|s| s.email == subscription.email) {
            return Err(DomainError::Conflict("this email is already subscribed".into()));
        }
        let created = Subscription {
            id: SubscriptionId::new(next(&self.next_id))?,
            email: subscription.email,
            name: subscription.name,
            active: true,
            unsubscribe_token: subscription.unsubscribe_token,
            subscribed_at: subscription.subscribed_at,
            unsubscribed_at: None,
        };
        subscriptions.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Subscription>> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.email == email)
            .cloned())
    }

    async fn reactivate(
        &self,
        id: SubscriptionId,
        name: Option<String>,
        at: DateTime<Utc>,
    ) -> DomainResult<Subscription> {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        let subscription = subscriptions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| DomainError::NotFound("subscription not found".into()))?;
        subscription.active = true;
        subscription.name = name;
        subscription.subscribed_at = at;
        subscription.unsubscribed_at = None;
        Ok(subscription.clone())
    }

    async fn deactivate_by_token(
        &self,
        token: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<Subscription>> {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        Ok(subscriptions
            .iter_mut()
            .find(|s| s.unsubscribe_token == token)
            .map(|s| {
                s.active = false;
                s.unsubscribed_at.get_or_insert(at);
                s.clone()
            }))
    }

    async fn list(&self, active_only: bool) -> DomainResult<Vec<Subscription>> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| !active_only || s.active)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemorySettingsRepo {
    settings: Mutex<HashMap<String, Setting>>,
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepo {
    async fn get(&self, key: &SettingKey) -> DomainResult<Option<Setting>> {
        Ok(self.settings.lock().unwrap().get(key.as_str()).cloned())
    }

    async fn upsert(&self, setting: Setting) -> DomainResult<Setting> {
        self.settings
            .lock()
            .unwrap()
            .insert(setting.key.as_str().to_string(), setting.clone());
        Ok(setting)
    }

    async fn delete(&self, key: &SettingKey) -> DomainResult<bool> {
        Ok(self.settings.lock().unwrap().remove(key.as_str()).is_some())
    }

    async fn list(&self) -> DomainResult<Vec<Setting>> {
        let mut settings: Vec<Setting> = self.settings.lock().unwrap().values().cloned().collect();
        settings.sort_by(|a, b| a.key.as_str().cmp(b.key.as_str()));
        Ok(settings)
    }
}

#[derive(Default)]
pub struct InMemoryContactRepo {
    messages: Mutex<Vec<ContactMessage>>,
    next_id: AtomicI64,
}

#[async_trait]
impl ContactRepository for InMemoryContactRepo {
    async fn insert(&self, message: NewContactMessage) -> DomainResult<ContactMessage> {
        let created = ContactMessage {
            id: MessageId::new(next(&self.next_id))?,
            name: message.name,
            email: message.email,
            subject: message.subject,
            message: message.message,
            read: false,
            created_at: message.created_at,
        };
        self.messages.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list(&self) -> DomainResult<Vec<ContactMessage>> {
        let mut messages = self.messages.lock().unwrap().clone();
        messages.reverse();
        Ok(messages)
    }

    async fn mark_read(&self, id: MessageId) -> DomainResult<ContactMessage> {
        let mut messages = self.messages.lock().unwrap();
        let message = messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DomainError::NotFound("message not found".into()))?;
        message.read = true;
        Ok(message.clone())
    }
}

#[derive(Default)]
pub struct InMemorySubmissionRepo {
    submissions: Mutex<Vec<Submission>>,
    next_id: AtomicI64,
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepo {
    async fn insert(&self, submission: NewSubmission) -> DomainResult<Submission> {
        let created = Submission {
            id: MessageId::new(next(&self.next_id))?,
            name: submission.name,
            email: submission.email,
            kind: submission.kind,
            title: submission.title,
            content: submission.content,
            language: submission.language,
            status: SubmissionStatus::Pending,
            created_at: submission.created_at,
        };
        self.submissions.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list(&self, status: Option<SubmissionStatus>) -> DomainResult<Vec<Submission>> {
        let mut submissions: Vec<Submission> = self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| status.is_none_or(|status| status == s.status))
            .cloned()
            .collect();
        submissions.reverse();
        Ok(submissions)
    }

    async fn update_status(
        &self,
        id: MessageId,
        status: SubmissionStatus,
    ) -> DomainResult<Submission> {
        let mut submissions = self.submissions.lock().unwrap();
        let submission = submissions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| DomainError::NotFound("submission not found".into()))?;
        submission.status = status;
        Ok(submission.clone())
    }
}
