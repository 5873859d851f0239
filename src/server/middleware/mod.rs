//! HTTP middleware implementations
//!
//! This module provides middleware for request processing:
//! - Advisory rate limiting
//! - Request ID tracking

mod rate_limiter;
mod request_id;

// Re-export all middleware
pub use rate_limiter::{RateLimiter, client_ip};
pub use request_id::{RequestIdMiddleware, RequestIdMiddlewareService};
