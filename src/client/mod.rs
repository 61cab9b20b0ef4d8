//! Typed consumer of the HTTP API, plus the fetch-resource wrapper the
//! public pages use to load data.
pub mod api;
pub mod error;
pub mod resource;

pub use api::{ApiClient, ContentQuery};
pub use error::{ClientError, ClientResult};
pub use resource::{FetchState, Resource};
