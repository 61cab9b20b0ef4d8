pub mod auth;
pub mod comments;
pub mod content;
pub mod hero;
pub mod inbox;
pub mod issues;
pub mod newsletter;
pub mod patch;
pub mod search;
pub mod settings;
pub mod users;

pub use auth::{AuthTokenDto, AuthenticatedUser, LoginResponseDto, TokenSubject};
pub use comments::{CommentDto, CommentThreadDto};
pub use content::{
    AuthorSummaryDto, CategoryDto, ContentDto, ContentPageDto, CounterDto, LocalizedViewDto,
};
pub use hero::{HeroCategoryDto, HeroVideoDto};
pub use inbox::{ContactMessageDto, SubmissionDto};
pub use issues::{IssueDetailDto, IssueDto};
pub use newsletter::{DigestReportDto, SubscriptionDto};
pub use search::SearchResultsDto;
pub use settings::SettingDto;
pub use users::{CapabilityView, UserDto, UserProfileDto};
