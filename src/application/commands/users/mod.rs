mod create;
mod delete;
mod login;
mod password;
mod resolve_author;
mod service;
mod update;

pub use create::CreateUserCommand;
pub use login::LoginCommand;
pub use resolve_author::ResolveAuthorCommand;
pub use service::UserCommandService;
pub use update::UpdateUserCommand;
