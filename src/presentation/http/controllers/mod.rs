// src/presentation/http/controllers/mod.rs
pub mod auth;
pub mod categories;
pub mod comments;
pub mod contact;
pub mod content;
pub mod hero;
pub mod issues;
pub mod newsletter;
pub mod search;
pub mod settings;
pub mod submissions;
pub mod users;
