//! HTTP module
//!
//! The request pipeline shared by every endpoint.
//!
//! # Features
//!
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Authentication**: Bearer token from the auth module on every call
//! - **Classification**: Status codes mapped onto the closed error type

mod client;
mod rate_limit;

pub use client::{ApiRequest, RequestExecutor};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
