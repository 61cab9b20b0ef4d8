pub mod entity;
pub mod repository;

pub use entity::{Issue, IssueId, IssuePeriod, IssueUpdate, NewIssue};
pub use repository::IssueRepository;
