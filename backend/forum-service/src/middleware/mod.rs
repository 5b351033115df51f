/// HTTP middleware for forum-service
///
/// - `rate_limit`: per-client request limiter keyed on the peer address
pub mod rate_limit;

pub use rate_limit::{ClientRateLimiter, RateLimitConfig, RateLimitMiddleware};
