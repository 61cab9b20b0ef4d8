pub mod database;
pub mod mail;
pub mod rate_limit;
pub mod repositories;
pub mod security;
pub mod time;
pub mod util;
