//! Comment submission: form values, server-side validation, and the
//! gateway that forwards accepted submissions to the moderation endpoint.
//!
//! Submitted comments never reach the content store directly; they go to
//! an external endpoint that holds them until a moderator approves them.
//! The post page only ever renders comments the store returns as approved.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;
use crate::constants::{HTTP_TIMEOUT, USER_AGENT};

pub const NAME_REQUIRED: &str = "The name field is required";
pub const EMAIL_REQUIRED: &str = "The email field is required";
pub const EMAIL_INVALID: &str = "Enter a valid email address";
pub const COMMENT_REQUIRED: &str = "The comment field is required";

// One non-space run, an @, a domain with at least one dot. Deliverability
// is the moderation endpoint's problem; this only catches typos the
// browser's email field would catch.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Raw fields posted by the comment form.
///
/// `_id` is the hidden post id field; the rest are what the reader typed.
/// Every field defaults to empty so a partial post still deserializes and
/// gets validated instead of rejected outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommentFormValues {
    #[serde(default, rename = "_id")]
    pub post_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub comment: String,
}

/// Per-field validation messages, `None` where the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub comment: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.comment.is_none()
    }

    /// Messages in display order, for the error list under the form.
    pub fn messages(&self) -> impl Iterator<Item = &'static str> {
        [self.name, self.comment, self.email].into_iter().flatten()
    }
}

/// Check a submission: name, email, and comment are required, and the
/// email must at least look like an address.
#[must_use]
pub fn validate(values: &CommentFormValues) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if values.name.trim().is_empty() {
        errors.name = Some(NAME_REQUIRED);
    }

    let email = values.email.trim();
    if email.is_empty() {
        errors.email = Some(EMAIL_REQUIRED);
    } else if !EMAIL_SHAPE.is_match(email) {
        errors.email = Some(EMAIL_INVALID);
    }

    if values.comment.trim().is_empty() {
        errors.comment = Some(COMMENT_REQUIRED);
    }

    errors
}

/// What the comment area of a post page shows.
///
/// `Composing` renders the form, prefilled with `values` and annotated
/// with `errors`; `Submitted` replaces it with the thank-you notice.
#[derive(Debug, Clone)]
pub enum FormState {
    Composing {
        values: CommentFormValues,
        errors: FieldErrors,
    },
    Submitted,
}

impl FormState {
    /// An untouched form with no values and no errors.
    #[must_use]
    pub fn blank() -> Self {
        Self::Composing {
            values: CommentFormValues::default(),
            errors: FieldErrors::default(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::blank()
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("comment endpoint request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("comment endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

/// Forwards validated submissions to the external moderation endpoint.
#[derive(Debug, Clone)]
pub struct CommentGateway {
    client: reqwest::Client,
    endpoint_url: String,
}

impl CommentGateway {
    pub fn new(config: &Config) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint_url: config.comment_endpoint_url.clone(),
        })
    }

    /// POST the submission as JSON. Any non-2xx response is an error; the
    /// caller decides what the reader sees.
    pub async fn submit(&self, values: &CommentFormValues) -> Result<(), SubmitError> {
        let payload = serde_json::json!({
            "_id": values.post_id,
            "name": values.name,
            "email": values.email,
            "comment": values.comment,
        });

        let response = self
            .client
            .post(&self.endpoint_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status));
        }
        Ok(())
    }
}
