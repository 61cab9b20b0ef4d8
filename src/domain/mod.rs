pub mod comment;
pub mod content;
pub mod errors;
pub mod inbox;
pub mod issue;
pub mod newsletter;
pub mod settings;
pub mod user;
