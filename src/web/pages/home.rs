//! Home page rendering using maud templates.

use maud::{html, Markup};

use crate::components::{BaseLayout, EmptyState, PostGrid};
use crate::config::Config;
use crate::content::PostSummary;

/// Parameters for rendering the home page.
#[derive(Debug, Clone)]
pub struct HomePageParams<'a> {
    /// Post summaries, newest first.
    pub summaries: &'a [PostSummary],
    /// Runtime config, needed to resolve cover image refs.
    pub config: &'a Config,
}

impl<'a> HomePageParams<'a> {
    /// Create new home page params.
    #[must_use]
    pub const fn new(summaries: &'a [PostSummary], config: &'a Config) -> Self {
        Self { summaries, config }
    }
}

/// Render the home page: a banner and the post grid.
#[must_use]
pub fn render_home_page(params: &HomePageParams<'_>) -> Markup {
    let content = html! {
        section class="hero" {
            h1 {
                span class="hero-underline" { "Headless Blog" }
                " is a place to write, read, and connect"
            }
            p {
                "Read the latest posts below, and leave a comment on anything "
                "that catches your eye."
            }
        }

        @if params.summaries.is_empty() {
            (EmptyState::no_posts())
        } @else {
            (PostGrid::new(params.summaries, params.config))
        }
    };

    BaseLayout::new("Home").render(content)
}
