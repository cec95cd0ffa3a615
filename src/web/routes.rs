use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Form;
use axum::Router;

use super::pages::{
    render_home_page, render_not_found_page, render_post_page, HomePageParams, PostPageParams,
};
use super::snapshots::PostLookup;
use super::AppState;
use crate::comments::{self, CommentFormValues, FieldErrors, FormState};

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/post/:slug", get(post_page))
        .route("/post/:slug/comment", post(submit_comment))
        .route("/healthz", get(health))
        .route("/favicon.ico", get(favicon))
}

// ========== HTML Routes ==========

async fn home(State(state): State<AppState>) -> Response {
    let summaries = state.snapshots.get_summaries();
    let html = render_home_page(&HomePageParams::new(&summaries, &state.config));
    Html(html.into_string()).into_response()
}

async fn post_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let post = match state.snapshots.get_post(&slug) {
        PostLookup::Found(post) => post,
        PostLookup::Gone | PostLookup::Unknown => return not_found(),
    };

    let form = FormState::blank();
    let html = render_post_page(&PostPageParams::new(&post, &form, &state.config));
    Html(html.into_string()).into_response()
}

async fn submit_comment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Form(values): Form<CommentFormValues>,
) -> Response {
    let post = match state.snapshots.get_post(&slug) {
        PostLookup::Found(post) => post,
        PostLookup::Gone | PostLookup::Unknown => return not_found(),
    };

    let errors = comments::validate(&values);
    if !errors.is_empty() {
        let form = FormState::Composing { values, errors };
        let html = render_post_page(&PostPageParams::new(&post, &form, &state.config));
        return Html(html.into_string()).into_response();
    }

    // The hidden _id field is client-controlled; the slug in the path decides
    // which post the comment belongs to.
    let mut values = values;
    values.post_id = post.id.clone();

    let form = match state.comments.submit(&values).await {
        Ok(()) => {
            tracing::info!("comment on '{slug}' forwarded for moderation");
            FormState::Submitted
        }
        Err(e) => {
            tracing::error!("failed to forward comment on '{slug}': {e}");
            FormState::Composing {
                values,
                errors: FieldErrors::default(),
            }
        }
    };

    let html = render_post_page(&PostPageParams::new(&post, &form, &state.config));
    Html(html.into_string()).into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(render_not_found_page().into_string()),
    )
        .into_response()
}

// ========== Utility Routes ==========

async fn health() -> &'static str {
    "OK"
}

async fn favicon() -> Response {
    // Return a simple SVG favicon (memo emoji)
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><text y=".9em" font-size="90">📝</text></svg>"#;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/svg+xml")],
        svg,
    )
        .into_response()
}
