//! Maud-based page templates for the web UI.
//!
//! This module contains full page implementations using maud templates.
//! Each page module exports a render function that produces the complete HTML.

pub mod home;
pub mod post;

// Re-export page rendering functions for convenience
pub use home::{render_home_page, HomePageParams};
pub use post::{render_not_found_page, render_post_page, PostPageParams};
