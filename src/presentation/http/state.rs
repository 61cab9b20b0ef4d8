// src/presentation/http/state.rs
use crate::application::{ports::rate_limit::RateLimiter, services::ApplicationServices};
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    /// Guards the public form endpoints.
    pub rate_limiter: Arc<dyn RateLimiter>,
}
