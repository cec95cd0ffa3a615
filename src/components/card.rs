//! Card components for the post index.

use maud::{html, Markup, Render};

use crate::components::byline::format_published;
use crate::config::Config;
use crate::content::PostSummary;

/// A post card for the index page.
///
/// The whole card links to the post's page; the cover image renders only
/// when its asset ref resolves to a CDN URL.
#[derive(Debug, Clone)]
pub struct PostCard<'a> {
    pub summary: &'a PostSummary,
    pub config: &'a Config,
}

impl<'a> PostCard<'a> {
    /// Create a new post card.
    #[must_use]
    pub const fn new(summary: &'a PostSummary, config: &'a Config) -> Self {
        Self { summary, config }
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let summary = self.summary;
        let cover_url = summary
            .main_image
            .as_ref()
            .and_then(|image| image.url(self.config));

        html! {
            article class="post-card" {
                a href=(format!("/post/{}", summary.slug)) {
                    @if let Some(url) = cover_url {
                        img class="post-card-cover" src=(url) alt=(summary.title) loading="lazy";
                    }
                    h3 { (summary.title) }
                    @if let Some(description) = &summary.description {
                        p class="post-card-description" { (description) }
                    }
                    p class="meta" {
                        span class="author" { "by " (summary.author.name) }
                        " "
                        span class="published" { (format_published(&summary.created_at)) }
                    }
                }
            }
        }
    }
}

/// A grid container for displaying multiple post cards.
#[derive(Debug, Clone)]
pub struct PostGrid<'a> {
    pub summaries: &'a [PostSummary],
    pub config: &'a Config,
}

impl<'a> PostGrid<'a> {
    /// Create a new post grid.
    #[must_use]
    pub const fn new(summaries: &'a [PostSummary], config: &'a Config) -> Self {
        Self { summaries, config }
    }
}

impl Render for PostGrid<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="post-grid" {
                @for summary in self.summaries {
                    (PostCard::new(summary, self.config))
                }
            }
        }
    }
}

/// An empty state component for when there is nothing to list.
#[derive(Debug, Clone)]
pub struct EmptyState<'a> {
    pub message: &'a str,
}

impl<'a> EmptyState<'a> {
    /// Create a new empty state.
    #[must_use]
    pub const fn new(message: &'a str) -> Self {
        Self { message }
    }

    /// Create a default "no posts" empty state.
    #[must_use]
    pub const fn no_posts() -> Self {
        Self {
            message: "No posts yet.",
        }
    }

    /// Create a "no comments" empty state.
    #[must_use]
    pub const fn no_comments() -> Self {
        Self {
            message: "No comments yet.",
        }
    }
}

impl Render for EmptyState<'_> {
    fn render(&self) -> Markup {
        html! {
            p { (self.message) }
        }
    }
}
