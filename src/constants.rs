//! Shared constants used across the application.

use std::time::Duration;

/// User agent sent on outbound requests to the content store and the
/// comment endpoint.
pub const USER_AGENT: &str = concat!("headless-blog/", env!("CARGO_PKG_VERSION"));

/// Timeout applied to every outbound HTTP request.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
