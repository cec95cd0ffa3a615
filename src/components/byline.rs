//! Author byline component and publication date formatting.

use chrono::{DateTime, Utc};
use maud::{html, Markup, Render};

use crate::config::Config;
use crate::content::Author;

/// Human-readable publication timestamp, e.g. `January 15, 2024 at 12:00 PM`.
#[must_use]
pub fn format_published(when: &DateTime<Utc>) -> String {
    when.format("%B %-d, %Y at %-I:%M %p").to_string()
}

/// The "Blog post by ... published at ..." line under a post title.
///
/// Shows the author's avatar when their image resolves to a CDN URL and
/// skips it otherwise.
#[derive(Debug, Clone)]
pub struct Byline<'a> {
    pub author: &'a Author,
    pub published: &'a DateTime<Utc>,
    pub config: &'a Config,
}

impl<'a> Byline<'a> {
    #[must_use]
    pub const fn new(author: &'a Author, published: &'a DateTime<Utc>, config: &'a Config) -> Self {
        Self {
            author,
            published,
            config,
        }
    }
}

impl Render for Byline<'_> {
    fn render(&self) -> Markup {
        let avatar_url = self
            .author
            .image
            .as_ref()
            .and_then(|image| image.url(self.config));

        html! {
            div class="byline" {
                @if let Some(url) = avatar_url {
                    img class="byline-avatar" src=(url) alt=(self.author.name);
                }
                p {
                    "Blog post by "
                    span class="byline-author" { (self.author.name) }
                    " published at " (format_published(self.published))
                }
            }
        }
    }
}
