/// Rate Limiting System
use crate::{
    config::RateLimitConfig,
    error::{RecordsError, RecordsResult},
};
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovernorLimiter,
};
use std::{num::NonZeroU32, sync::Arc};

/// Rate limiter for record writes
///
/// One in-process quota shared by all POST endpoints. The demo service has
/// no authenticated tiers, so there is a single bucket.
#[derive(Clone)]
pub struct RateLimiter {
    enabled: bool,
    writes: Arc<GovernorLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let quota = Quota::per_second(
            NonZeroU32::new(config.writes_per_second).unwrap_or(NonZeroU32::new(50).unwrap()),
        )
        .allow_burst(NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::new(100).unwrap()));

        Self {
            enabled: config.enabled,
            writes: Arc::new(GovernorLimiter::direct(quota)),
        }
    }

    /// Check the write quota
    pub fn check_write(&self) -> RecordsResult<()> {
        if !self.enabled {
            return Ok(());
        }
        match self.writes.check() {
            Ok(_) => Ok(()),
            Err(_) => Err(RecordsError::RateLimitExceeded),
        }
    }
}

/// Rate limiting middleware: POST requests draw from the write quota,
/// everything else passes through.
pub async fn rate_limit_middleware(
    State(ctx): State<crate::context::AppContext>,
    request: Request,
    next: Next,
) -> Result<Response, RecordsError> {
    if request.method() == Method::POST {
        ctx.rate_limiter.check_write()?;
    }

    Ok(next.run(request).await)
}
