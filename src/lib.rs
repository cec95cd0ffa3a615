//! Headless Blog library.
//!
//! A service that renders posts from a headless content store as server-side
//! HTML pages, with reader comments forwarded to an external moderation
//! endpoint and shown only once approved.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod comments;
pub mod components;
pub mod config;
pub mod constants;
pub mod content;
pub mod richtext;
pub mod web;
