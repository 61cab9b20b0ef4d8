mod author;
mod create;
mod delete;
mod engagement;
mod publish;
mod service;
mod update;

pub use create::CreateContentCommand;
pub use engagement::RecordEngagementCommand;
pub use publish::{SetFeaturedCommand, SetPublishStateCommand};
pub use service::ContentCommandService;
pub use update::UpdateContentCommand;
