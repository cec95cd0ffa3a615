//! Snapshot cache backing the post and index pages.
//!
//! The set of serveable paths is fixed at startup: [`SnapshotCache::warm`]
//! enumerates every post slug and loads a snapshot for each. Requests are
//! always answered from the cache, so no reader ever waits on the content
//! store. When a snapshot is older than the revalidation interval it is
//! served as-is and a single background refresh is started for it; the
//! `refreshing` flag keeps concurrent requests from piling on.
//!
//! A refresh that fails keeps the previous snapshot (and retries on the
//! next request). A refresh that finds the post deleted upstream marks the
//! slug gone, which serves 404 until a later refresh finds it republished.
//! Slugs never enumerated at startup stay unknown until restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::content::{ContentClient, ContentError, Post, PostSummary};

/// One cached post snapshot.
#[derive(Debug, Clone)]
struct SnapshotEntry {
    /// `None` marks a slug whose post was deleted upstream.
    post: Option<Arc<Post>>,
    fetched_at: Instant,
    refreshing: Arc<AtomicBool>,
}

impl SnapshotEntry {
    fn new(post: Option<Post>) -> Self {
        Self {
            post: post.map(Arc::new),
            fetched_at: Instant::now(),
            refreshing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if this entry is still within the revalidation interval.
    fn is_valid(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }

    /// Try to become the one task refreshing this entry.
    fn claim_refresh(&self) -> bool {
        self.refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// The cached index listing.
#[derive(Debug, Clone)]
struct SummariesEntry {
    summaries: Arc<Vec<PostSummary>>,
    fetched_at: Instant,
    refreshing: Arc<AtomicBool>,
}

impl SummariesEntry {
    fn new(summaries: Vec<PostSummary>) -> Self {
        Self {
            summaries: Arc::new(summaries),
            fetched_at: Instant::now(),
            refreshing: Arc::new(AtomicBool::new(false)),
        }
    }

    fn is_valid(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }

    fn claim_refresh(&self) -> bool {
        self.refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Result of a post lookup.
#[derive(Debug)]
pub enum PostLookup {
    /// The slug has a post; may be up to one interval-plus-refresh stale.
    Found(Arc<Post>),
    /// The slug was served once but its post is gone from the store.
    Gone,
    /// The slug was never part of the enumerated path set.
    Unknown,
}

/// In-memory snapshot cache with stale-while-revalidate refresh.
pub struct SnapshotCache {
    client: ContentClient,
    ttl: Duration,
    posts: RwLock<HashMap<String, SnapshotEntry>>,
    summaries: RwLock<Option<SummariesEntry>>,
}

impl SnapshotCache {
    /// Create an empty cache that refreshes entries older than `ttl`.
    #[must_use]
    pub fn new(client: ContentClient, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            posts: RwLock::new(HashMap::new()),
            summaries: RwLock::new(None),
        }
    }

    /// Enumerate all post slugs and load a snapshot for each, plus the
    /// index listing. Returns the number of post paths.
    ///
    /// Any fetch error propagates; the caller treats a failed warm-up as
    /// fatal rather than serving an empty site.
    pub async fn warm(&self) -> Result<usize, ContentError> {
        let slugs = self.client.fetch_post_slugs().await?;

        let mut entries = HashMap::with_capacity(slugs.len());
        for slug in slugs {
            let post = self.client.fetch_post_by_slug(&slug).await?;
            if post.is_none() {
                tracing::warn!("post '{slug}' vanished between enumeration and load");
            }
            entries.insert(slug, SnapshotEntry::new(post));
        }

        let summaries = self.client.fetch_post_summaries().await?;

        let count = entries.len();
        *self.posts.write().unwrap() = entries;
        *self.summaries.write().unwrap() = Some(SummariesEntry::new(summaries));
        Ok(count)
    }

    /// Look up the snapshot for a slug, kicking off a background refresh
    /// when the entry has gone stale.
    ///
    /// Never blocks on the content store; a stale snapshot is served
    /// while the refresh runs.
    pub fn get_post(self: &Arc<Self>, slug: &str) -> PostLookup {
        let (lookup, needs_refresh) = {
            let posts = self.posts.read().unwrap();
            let Some(entry) = posts.get(slug) else {
                return PostLookup::Unknown;
            };

            let needs_refresh = !entry.is_valid(self.ttl) && entry.claim_refresh();
            let lookup = match &entry.post {
                Some(post) => PostLookup::Found(Arc::clone(post)),
                None => PostLookup::Gone,
            };
            (lookup, needs_refresh)
        };

        if needs_refresh {
            let cache = Arc::clone(self);
            let slug = slug.to_string();
            tokio::spawn(async move { cache.revalidate_post(slug).await });
        }

        lookup
    }

    /// The index listing, refreshed in the background once stale.
    pub fn get_summaries(self: &Arc<Self>) -> Arc<Vec<PostSummary>> {
        let (summaries, needs_refresh) = {
            let guard = self.summaries.read().unwrap();
            let Some(entry) = guard.as_ref() else {
                return Arc::new(Vec::new());
            };

            let needs_refresh = !entry.is_valid(self.ttl) && entry.claim_refresh();
            (Arc::clone(&entry.summaries), needs_refresh)
        };

        if needs_refresh {
            let cache = Arc::clone(self);
            tokio::spawn(async move { cache.revalidate_summaries().await });
        }

        summaries
    }

    async fn revalidate_post(self: Arc<Self>, slug: String) {
        let result = self.client.fetch_post_by_slug(&slug).await;

        let mut posts = self.posts.write().unwrap();
        let Some(entry) = posts.get_mut(&slug) else {
            return;
        };

        match result {
            Ok(Some(post)) => {
                entry.post = Some(Arc::new(post));
                entry.fetched_at = Instant::now();
                tracing::debug!("refreshed snapshot for '{slug}'");
            }
            Ok(None) => {
                entry.post = None;
                entry.fetched_at = Instant::now();
                tracing::info!("post '{slug}' removed from content store, path now serves 404");
            }
            Err(e) => {
                // fetched_at stays old so the next request retries
                tracing::warn!("failed to refresh post '{slug}': {e}; keeping previous snapshot");
            }
        }
        entry.refreshing.store(false, Ordering::Release);
    }

    async fn revalidate_summaries(self: Arc<Self>) {
        let result = self.client.fetch_post_summaries().await;

        let mut guard = self.summaries.write().unwrap();
        let Some(entry) = guard.as_mut() else {
            return;
        };

        match result {
            Ok(summaries) => {
                entry.summaries = Arc::new(summaries);
                entry.fetched_at = Instant::now();
                tracing::debug!("refreshed index listing");
            }
            Err(e) => {
                tracing::warn!("failed to refresh index listing: {e}; keeping previous listing");
            }
        }
        entry.refreshing.store(false, Ordering::Release);
    }

    #[cfg(test)]
    fn insert_for_testing(&self, slug: &str, post: Option<Post>, age: Duration) {
        let mut entry = SnapshotEntry::new(post);
        entry.fetched_at = Instant::now() - age;
        self.posts.write().unwrap().insert(slug.to_string(), entry);
    }
}
