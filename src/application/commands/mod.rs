pub mod comments;
pub mod content;
pub mod inbox;
pub mod issues;
pub mod newsletter;
pub mod settings;
pub mod users;
