//! Per-client request limiting for everything under `/api`
//!
//! Clients are keyed by the socket peer address. Forwarding headers are not
//! consulted, so a caller cannot pick its own bucket.
//!
//! Each client gets a GCRA bucket from `governor`: a burst of `max_requests`,
//! refilled one request every `window_seconds / max_requests`.

use crate::error::AppError;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures_util::future::LocalBoxFuture;
use governor::{
    clock::{Clock, DefaultClock},
    middleware::NoOpMiddleware,
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroU32;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_seconds: 900, // 15 minutes
        }
    }
}

impl RateLimitConfig {
    /// Burst of `max_requests`, replenished evenly across the window
    pub fn quota(&self) -> Quota {
        let burst = NonZeroU32::new(self.max_requests).unwrap_or(NonZeroU32::MIN);
        let period = Duration::from_secs(self.window_seconds) / burst.get();

        Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst)
    }
}

/// Keyed limiter over client addresses
pub struct ClientRateLimiter<C: Clock = DefaultClock> {
    limiter: RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, C, NoOpMiddleware<C::Instant>>,
    clock: C,
}

impl ClientRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_clock(config, DefaultClock::default())
    }
}

impl<C: Clock> ClientRateLimiter<C> {
    pub fn with_clock(config: &RateLimitConfig, clock: C) -> Self {
        Self {
            limiter: RateLimiter::dashmap_with_clock(config.quota(), &clock),
            clock,
        }
    }

    /// Admit one request from `client`, or return how long until it may retry
    pub fn check(&self, client: IpAddr) -> Result<(), Duration> {
        self.limiter
            .check_key(&client)
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }

    /// Forget clients whose buckets have fully refilled
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

/// Address the limiter keys on; requests without a peer share one bucket
fn client_key(req: &ServiceRequest) -> IpAddr {
    req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Middleware factory applying a shared [`ClientRateLimiter`]
#[derive(Clone)]
pub struct RateLimitMiddleware {
    limiter: Arc<ClientRateLimiter>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<ClientRateLimiter>) -> Self {
        Self { limiter }
    }

    /// Create with a fresh limiter
    pub fn with_config(config: RateLimitConfig) -> Self {
        Self::new(Arc::new(ClientRateLimiter::new(&config)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Arc<ClientRateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = client_key(&req);

        if let Err(retry_after) = self.limiter.check(client) {
            tracing::warn!(client = %client, path = %req.path(), "Rate limit exceeded");
            let retry_after_secs = retry_after.as_secs().max(1);
            return Box::pin(async move {
                Err::<ServiceResponse<B>, Error>(AppError::TooManyRequests { retry_after_secs }.into())
            });
        }

        let service = self.service.clone();
        Box::pin(async move { service.call(req).await })
    }
}
