mod get;
mod list;
mod search;
mod service;

pub use get::GetContentQuery;
pub use list::ListContentQuery;
pub use search::SearchQuery;
pub use service::ContentQueryService;
