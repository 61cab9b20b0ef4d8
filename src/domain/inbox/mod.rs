pub mod entity;
pub mod repository;

pub use entity::{
    ContactMessage, MessageId, NewContactMessage, NewSubmission, Submission, SubmissionStatus,
};
pub use repository::{ContactRepository, SubmissionRepository};
