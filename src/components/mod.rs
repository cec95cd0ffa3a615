//! Maud HTML template components for the web UI.
//!
//! This module provides reusable maud components for generating HTML.
//! Components are organized into submodules by functionality:
//!
//! - `layout`: Base page layout, header, and footer
//! - `alert`: Alert messages and inline notices
//! - `byline`: Author byline and publication date formatting
//! - `card`: Post cards and grids for the index page
//! - `form`: Form elements and input components
//!
//! # Example
//!
//! ```ignore
//! use maud::{html, Markup};
//! use crate::components::{Alert, BaseLayout, Input};
//!
//! fn my_page() -> Markup {
//!     let content = html! {
//!         h1 { "Hello World" }
//!         (Alert::success("Page loaded!"))
//!         (Input::text("name").placeholder("John Appleseed"))
//!     };
//!     BaseLayout::new("My Page").render(content)
//! }
//! ```

pub mod alert;
pub mod byline;
pub mod card;
pub mod form;
pub mod layout;

// Re-export layout components
pub use layout::BaseLayout;

// Re-export alert components
pub use alert::{Alert, AlertVariant, Message};

// Re-export byline components
pub use byline::{format_published, Byline};

// Re-export card components
pub use card::{EmptyState, PostCard, PostGrid};

// Re-export form components
pub use form::{Form, HiddenInput, Input, Label, TextArea};

/// Re-export maud for convenience
pub use maud::{html, Markup, PreEscaped, DOCTYPE};
