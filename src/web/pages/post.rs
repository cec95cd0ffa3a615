//! Post page templates using maud.
//!
//! This module provides maud-based templates for the post pages:
//! - Post detail page with rich-text body, byline, comment form, and
//!   approved comments
//! - Not-found page for slugs with no matching post

use maud::{html, Markup, Render};

use crate::comments::{CommentFormValues, FieldErrors, FormState};
use crate::components::{
    Alert, BaseLayout, Byline, EmptyState, Form, HiddenInput, Input, Label, Message, TextArea,
};
use crate::config::Config;
use crate::content::{Comment, Post};
use crate::richtext::render_blocks;

/// Parameters for rendering a post page.
#[derive(Debug, Clone)]
pub struct PostPageParams<'a> {
    /// The post to render.
    pub post: &'a Post,
    /// State of the comment area: the form (fresh or re-presented with
    /// errors) or the thank-you notice.
    pub form: &'a FormState,
    /// Runtime config, needed to resolve image asset refs.
    pub config: &'a Config,
}

impl<'a> PostPageParams<'a> {
    /// Create new post page params.
    #[must_use]
    pub const fn new(post: &'a Post, form: &'a FormState, config: &'a Config) -> Self {
        Self { post, form, config }
    }
}

/// Render the full post page.
///
/// Sections in order: cover banner, the article itself (title,
/// description, byline, body), the comment form or thank-you notice,
/// and the approved comments.
#[must_use]
pub fn render_post_page(params: &PostPageParams<'_>) -> Markup {
    let post = params.post;
    let banner_url = post
        .main_image
        .as_ref()
        .and_then(|image| image.url(params.config));

    let content = html! {
        @if let Some(url) = &banner_url {
            img class="post-banner" src=(url) alt=(post.title);
        }

        article class="post" {
            h1 { (post.title) }
            @if let Some(description) = &post.description {
                h2 class="post-description" { (description) }
            }
            (Byline::new(&post.author, &post.created_at, params.config))
            div class="post-body" {
                (render_blocks(&post.body))
            }
            hr class="post-rule";
        }

        (CommentFormArea {
            state: params.form,
            post_id: &post.id,
            slug: &post.slug,
        })

        (CommentsSection {
            comments: &post.comments,
        })
    };

    let mut layout = BaseLayout::new(&post.title);
    if let Some(description) = post.description.as_deref() {
        layout = layout.with_description(description);
    }
    layout.render(content)
}

/// Render the not-found page for a slug with no post behind it.
#[must_use]
pub fn render_not_found_page() -> Markup {
    let content = html! {
        h1 { "Post not found" }
        (Alert::warning("There is no post at this address. It may have been removed."))
        p {
            a href="/" { "Back to all posts" }
        }
    };

    BaseLayout::new("Post not found").render(content)
}

/// The comment area below the article: either the submission form or,
/// after a successful submission, the thank-you notice.
struct CommentFormArea<'a> {
    state: &'a FormState,
    post_id: &'a str,
    slug: &'a str,
}

impl Render for CommentFormArea<'_> {
    fn render(&self) -> Markup {
        match self.state {
            FormState::Submitted => html! {
                section class="comment-thanks" {
                    (Alert::success("once it has been approved, it will apear below!")
                        .with_title("thank you for submit!!"))
                }
            },
            FormState::Composing { values, errors } => {
                render_comment_form(self.post_id, self.slug, values, errors)
            }
        }
    }
}

fn render_comment_form(
    post_id: &str,
    slug: &str,
    values: &CommentFormValues,
    errors: &FieldErrors,
) -> Markup {
    let action = format!("/post/{slug}/comment");

    let form_content = html! {
        h3 class="form-eyebrow" { "Enjoyed this Article?" }
        h4 class="form-heading" { "Leave comment blow!" }
        hr;

        (HiddenInput::new("_id", post_id))

        (Label::new("comment-name", "Name").class("field-label"))
        (Input::text("name")
            .id("comment-name")
            .placeholder("name")
            .value_opt(non_empty(&values.name)))

        (Label::new("comment-email", "Email").class("field-label"))
        (Input::email("email")
            .id("comment-email")
            .placeholder("Email")
            .value_opt(non_empty(&values.email)))

        (Label::new("comment-text", "comments").class("field-label"))
        (TextArea::new("comment")
            .id("comment-text")
            .placeholder("comment")
            .rows(8)
            .value_opt(non_empty(&values.comment)))

        div class="form-errors" {
            @for message in errors.messages() {
                @let line = format!("- {message}");
                (Message::error(&line))
            }
        }

        input type="submit" value="submit" class="submit-button";
    };

    html! {
        section class="comment-form" {
            (Form::post(&action, form_content).class("comment-form-inner"))
        }
    }
}

/// The approved comments rendered at the bottom of the page.
///
/// The loader query only returns approved comments, but approval is
/// checked again here so an unmoderated comment can never render no
/// matter how it arrived.
struct CommentsSection<'a> {
    comments: &'a [Comment],
}

impl Render for CommentsSection<'_> {
    fn render(&self) -> Markup {
        let approved: Vec<&Comment> = self.comments.iter().filter(|c| c.approved).collect();

        html! {
            section class="comments" {
                h3 { "Comments" }
                hr;
                @if approved.is_empty() {
                    (EmptyState::no_comments())
                } @else {
                    @for comment in &approved {
                        p {
                            span class="comment-author" { (comment.name) ":" }
                            " "
                            (comment.comment)
                        }
                    }
                }
            }
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
