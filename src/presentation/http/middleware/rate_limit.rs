// src/presentation/http/middleware/rate_limit.rs
use crate::application::{error::ApplicationError, ports::rate_limit::RateLimitDecision};
use crate::presentation::http::{error::HttpError, extractors::ClientIp, state::HttpState};
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};
use tracing::warn;

/// Counts one request against the form limiter. Each form has its own
/// budget per client.
pub fn check_form_limit(state: &HttpState, ip: &ClientIp, form: &str) -> Result<(), HttpError> {
    let key = format!("{form}:{ip}");
    match state.rate_limiter.check(&key) {
        RateLimitDecision::Allowed { .. } => Ok(()),
        RateLimitDecision::Limited { retry_after_secs } => {
            warn!(client = %ip, form, retry_after_secs, "form rate limit exceeded");
            Err(HttpError::from_error(ApplicationError::rate_limited(
                retry_after_secs,
            )))
        }
    }
}

/// Global per-IP token bucket in front of the whole router.
pub fn governor_layer(
    per_second: u64,
    burst: u32,
) -> Option<GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>> {
    let mut builder = GovernorConfigBuilder::default();
    builder.per_millisecond((1000 / per_second.max(1)).max(1));
    builder.burst_size(burst.max(1));
    let config = builder.key_extractor(SmartIpKeyExtractor).finish()?;

    Some(GovernorLayer::new(config))
}
