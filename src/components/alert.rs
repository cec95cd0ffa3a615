//! Alert and message components for displaying notices to readers.

use maud::{html, Markup, Render};

/// Alert variant types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Success,
    Error,
    Warning,
    Info,
}

impl AlertVariant {
    /// Get the CSS class for the alert article element.
    #[must_use]
    pub const fn article_class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Get the CSS class for the message div element.
    #[must_use]
    pub const fn message_class(&self) -> &'static str {
        match self {
            Self::Success => "success-message",
            Self::Error => "error-message",
            Self::Warning => "warning-message",
            Self::Info => "info-message",
        }
    }
}

/// An alert message component.
///
/// Renders as a styled article element with success/error/warning/info styling.
///
/// # Example
///
/// ```ignore
/// use crate::components::alert::Alert;
///
/// let alert = Alert::success("Your comment is on its way.")
///     .with_title("Thanks!");
/// ```
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub variant: AlertVariant,
    pub title: Option<&'a str>,
    pub message: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new alert with the given variant and message.
    #[must_use]
    pub const fn new(variant: AlertVariant, message: &'a str) -> Self {
        Self {
            variant,
            title: None,
            message,
        }
    }

    /// Create a success alert.
    #[must_use]
    pub const fn success(message: &'a str) -> Self {
        Self::new(AlertVariant::Success, message)
    }

    /// Create an error alert.
    #[must_use]
    pub const fn error(message: &'a str) -> Self {
        Self::new(AlertVariant::Error, message)
    }

    /// Create a warning alert.
    #[must_use]
    pub const fn warning(message: &'a str) -> Self {
        Self::new(AlertVariant::Warning, message)
    }

    /// Create an info alert.
    #[must_use]
    pub const fn info(message: &'a str) -> Self {
        Self::new(AlertVariant::Info, message)
    }

    /// Add a title to the alert.
    #[must_use]
    pub const fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }
}

impl Render for Alert<'_> {
    fn render(&self) -> Markup {
        let class = self.variant.article_class();

        html! {
            article class=(class) {
                @if let Some(title) = self.title {
                    strong { (title) }
                    " "
                }
                (self.message)
            }
        }
    }
}

/// A simple inline message component.
///
/// For lighter-weight messages that don't need the full article styling,
/// such as per-field validation errors under a form.
#[derive(Debug, Clone)]
pub struct Message<'a> {
    pub variant: AlertVariant,
    pub text: &'a str,
}

impl<'a> Message<'a> {
    /// Create a new message.
    #[must_use]
    pub const fn new(variant: AlertVariant, text: &'a str) -> Self {
        Self { variant, text }
    }

    /// Create a success message.
    #[must_use]
    pub const fn success(text: &'a str) -> Self {
        Self::new(AlertVariant::Success, text)
    }

    /// Create an error message.
    #[must_use]
    pub const fn error(text: &'a str) -> Self {
        Self::new(AlertVariant::Error, text)
    }

    /// Create a warning message.
    #[must_use]
    pub const fn warning(text: &'a str) -> Self {
        Self::new(AlertVariant::Warning, text)
    }

    /// Create an info message.
    #[must_use]
    pub const fn info(text: &'a str) -> Self {
        Self::new(AlertVariant::Info, text)
    }
}

impl Render for Message<'_> {
    fn render(&self) -> Markup {
        let class = self.variant.message_class();

        html! {
            div class=(class) {
                (self.text)
            }
        }
    }
}
