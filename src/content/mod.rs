//! HTTP client for the headless content store.
//!
//! All reads go through the store's query endpoint:
//! `GET {api_base}/data/query/{dataset}?query=...`, with caller data bound
//! as named query parameters (`$slug`) rather than spliced into the query
//! text. Responses arrive wrapped in a `{"result": ...}` envelope.

pub mod model;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;
use crate::constants::{HTTP_TIMEOUT, USER_AGENT};

pub use model::{Author, Comment, ImageRef, Post, PostSummary, SlugEntry};

/// Enumerates every post's slug.
pub const POST_SLUGS_QUERY: &str = r#"*[_type == "post"]{ "slug": slug.current }"#;

/// Loads one post by slug with joined author and approved comments.
///
/// The comment subquery filters on `approved == true` so unmoderated
/// comments never leave the store.
pub const POST_BY_SLUG_QUERY: &str = r#"*[_type == "post" && slug.current == $slug][0]{
  _id,
  _createdAt,
  title,
  "slug": slug.current,
  description,
  mainImage,
  body,
  author->{ name, image },
  "comments": *[_type == "comment" && post._ref == ^._id && approved == true]
}"#;

/// Lists post metadata, newest first, for the index page.
pub const POST_SUMMARIES_QUERY: &str = r#"*[_type == "post"] | order(_createdAt desc){
  _id,
  _createdAt,
  title,
  "slug": slug.current,
  description,
  mainImage,
  author->{ name, image }
}"#;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("content store returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("could not decode content store response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: T,
}

/// Read-only client for the content store's query API.
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: reqwest::Client,
    api_base: String,
    dataset: String,
}

impl ContentClient {
    pub fn new(config: &Config) -> Result<Self, ContentError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_base: config.content_api_base(),
            dataset: config.dataset.clone(),
        })
    }

    /// Fetch the slugs of every published post.
    ///
    /// Posts saved without a slug are skipped with a warning; they have no
    /// address to serve.
    pub async fn fetch_post_slugs(&self) -> Result<Vec<String>, ContentError> {
        let entries: Vec<SlugEntry> = self.query(POST_SLUGS_QUERY, &[]).await?;

        let mut slugs = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry.slug {
                Some(slug) => slugs.push(slug),
                None => tracing::warn!("skipping post with no slug"),
            }
        }
        Ok(slugs)
    }

    /// Fetch one post by slug, `None` when no post matches.
    ///
    /// The slug travels as the bound `$slug` parameter, JSON-encoded per
    /// the query API, so slug text can never alter the query itself.
    pub async fn fetch_post_by_slug(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        let bound = serde_json::to_string(slug)?;
        self.query(POST_BY_SLUG_QUERY, &[("$slug", bound)]).await
    }

    /// Fetch metadata for all posts, newest first.
    pub async fn fetch_post_summaries(&self) -> Result<Vec<PostSummary>, ContentError> {
        self.query(POST_SUMMARIES_QUERY, &[]).await
    }

    async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, String)],
    ) -> Result<T, ContentError> {
        let url = format!("{}/data/query/{}", self.api_base, self.dataset);

        let mut request = self.client.get(&url).query(&[("query", groq)]);
        for (name, value) in params {
            request = request.query(&[(name, value)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status { status, url });
        }

        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.result)
    }
}
