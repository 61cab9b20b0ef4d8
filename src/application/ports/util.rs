// src/application/ports/util.rs
pub use crate::domain::content::SlugGenerator;
