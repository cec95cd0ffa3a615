//! Base layout components for the web UI.
//!
//! This module provides the main page layout structure including
//! the HTML skeleton, site header, and footer.

use maud::{html, Markup, DOCTYPE};

/// Site name used in the title tag, header logo, and footer.
const SITE_NAME: &str = "Headless Blog";

/// Base page layout builder.
///
/// Provides a fluent interface for constructing the page shell around
/// rendered content.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "Hello World" } };
/// let page = BaseLayout::new("My Page")
///     .with_description("A page about greetings")
///     .render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    description: Option<&'a str>,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title.
    #[must_use]
    pub const fn new(title: &'a str) -> Self {
        Self {
            title,
            description: None,
        }
    }

    /// Set the meta description for the page.
    #[must_use]
    pub const fn with_description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content will be placed inside the `<main class="container">` element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    @if let Some(description) = self.description {
                        meta name="description" content=(description);
                    }
                    title { (self.title) " - " (SITE_NAME) }
                    link rel="stylesheet" href="/static/css/style.css";
                    link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>📝</text></svg>";
                }
                body {
                    (Self::render_header())
                    main class="container" {
                        (content)
                    }
                    (Self::render_footer())
                }
            }
        }
    }

    /// Render the site header.
    fn render_header() -> Markup {
        html! {
            header class="container" {
                nav {
                    ul {
                        li {
                            a href="/" {
                                strong class="site-logo" { (SITE_NAME) }
                            }
                        }
                    }
                    ul class="nav-links" {
                        li { span { "About" } }
                        li { span { "Contact" } }
                        li { span class="nav-pill" { "Follow" } }
                    }
                    ul class="nav-account" {
                        li { span { "Sign In" } }
                        li { span class="nav-pill nav-pill-outline" { "Get Started" } }
                    }
                }
            }
        }
    }

    /// Render the page footer.
    fn render_footer() -> Markup {
        html! {
            footer class="container" {
                small {
                    (SITE_NAME)
                    " | served straight from the content store"
                }
            }
        }
    }
}
