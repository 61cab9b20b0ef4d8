pub mod entity;
pub mod repository;
pub mod thread;

pub use entity::{Comment, CommentId, CommentStatus, CommentTarget, NewComment};
pub use repository::{CommentFilter, CommentRepository};
pub use thread::{CommentNode, build_thread};
