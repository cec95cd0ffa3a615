//! Typed documents returned by the content store.
//!
//! Field names follow the store's wire format (`_id`, `_createdAt`,
//! `mainImage`); projections in the query constants flatten references
//! so these structs never deal in raw document refs, with the exception
//! of image assets, whose ref string encodes the CDN location.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::Config;
use crate::richtext::Block;

/// A fully loaded post: metadata, rich-text body, joined author, and the
/// approved comments attached to it.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "mainImage")]
    pub main_image: Option<ImageRef>,
    #[serde(default)]
    pub body: Vec<Block>,
    pub author: Author,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Author fields joined into a post via its reference.
#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// A reader comment attached to a post.
///
/// The store holds more fields (notably the commenter's email address);
/// only what the site renders is modeled here, so nothing else can leak
/// into markup.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub comment: String,
    #[serde(default)]
    pub approved: bool,
}

/// Post metadata without body or comments, for index listings.
#[derive(Debug, Clone, Deserialize)]
pub struct PostSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "mainImage")]
    pub main_image: Option<ImageRef>,
    pub author: Author,
}

/// One row of the slug enumeration query.
///
/// Posts saved without a slug project to `null`; callers drop those
/// entries rather than serving an unreachable path.
#[derive(Debug, Clone, Deserialize)]
pub struct SlugEntry {
    #[serde(default)]
    pub slug: Option<String>,
}

/// An image field as stored: a pointer at an uploaded asset.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRef {
    pub asset: AssetRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
}

impl ImageRef {
    /// Derive the public CDN URL for this asset.
    ///
    /// Asset refs look like `image-<id>-<width>x<height>-<ext>` and map to
    /// `https://<cdn>/images/<project>/<dataset>/<id>-<width>x<height>.<ext>`.
    /// Returns `None` for refs that do not follow that shape; callers skip
    /// the image rather than emit a broken URL.
    #[must_use]
    pub fn cdn_url(&self, project_id: &str, dataset: &str, cdn_host: &str) -> Option<String> {
        let rest = self.asset.reference.strip_prefix("image-")?;
        let (rest, ext) = rest.rsplit_once('-')?;
        let (id, dimensions) = rest.rsplit_once('-')?;
        if id.is_empty() || ext.is_empty() || !dimensions.contains('x') {
            return None;
        }
        Some(format!(
            "https://{cdn_host}/images/{project_id}/{dataset}/{id}-{dimensions}.{ext}"
        ))
    }

    /// [`Self::cdn_url`] with project, dataset, and CDN host taken from config.
    #[must_use]
    pub fn url(&self, config: &Config) -> Option<String> {
        self.cdn_url(&config.project_id, &config.dataset, &config.cdn_host)
    }
}
