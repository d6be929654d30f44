//! Sequences view intents through store transitions and gateway calls.
//!
//! # Design
//! Every operation follows the same shape: `begin_*` on the store, one
//! gateway call, then `complete_*` or `fail_*` depending on the outcome.
//! Failures are converted into a store message and a `SyncError` return
//! value; nothing is retried and nothing panics. Create input is validated
//! before the store or the gateway is touched.
//!
//! Methods take `&self`, so a controller can sit behind an `Arc` and serve
//! concurrent intents from several threads. Only the most recently started
//! delete is tracked in `delete_loading`; removal from `items` is correct for
//! every delete regardless.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::Config;
use crate::error::SyncError;
use crate::gateway::{HttpGateway, PostsGateway};
use crate::notify::{LogNotifier, Notice, Notifier};
use crate::store::PostStore;
use crate::transport::UreqTransport;
use crate::types::{NewPost, Post, PostId};

pub const CREATED_MESSAGE: &str = "Post created successfully!";
pub const CREATE_FAILED_MESSAGE: &str = "Error creating post";
pub const DELETED_MESSAGE: &str = "Post deleted successfully";
pub const DELETE_FAILED_MESSAGE: &str = "Error deleting post";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The initial fetch ran and loaded this many posts.
    Fetched(usize),
    /// A fetch already ran or is running; nothing was requested.
    Skipped,
}

pub struct SyncController<G, N = LogNotifier> {
    gateway: G,
    store: PostStore,
    notifier: N,
    fetch_started: AtomicBool,
}

impl SyncController<HttpGateway<UreqTransport>> {
    pub fn from_config(config: &Config, store: PostStore) -> Self {
        Self::new(HttpGateway::from_config(config), store)
    }
}

impl<G: PostsGateway> SyncController<G> {
    pub fn new(gateway: G, store: PostStore) -> Self {
        Self::with_notifier(gateway, store, LogNotifier)
    }
}

impl<G: PostsGateway, N: Notifier> SyncController<G, N> {
    pub fn with_notifier(gateway: G, store: PostStore, notifier: N) -> Self {
        Self {
            gateway,
            store,
            notifier,
            fetch_started: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    /// Run the initial list fetch, once per session.
    ///
    /// Safe to call on every mount: once a fetch has started or settled this
    /// returns `Skipped` without contacting the backend.
    pub fn ensure_fetched(&self) -> Result<FetchOutcome, SyncError> {
        if self.store.read(|s| s.fetched || s.loading) {
            return Ok(FetchOutcome::Skipped);
        }
        if self.fetch_started.swap(true, Ordering::AcqRel) {
            return Ok(FetchOutcome::Skipped);
        }

        log::debug!("fetching posts");
        self.store.begin_fetch();
        match self.gateway.list_posts() {
            Ok(posts) => {
                let count = posts.len();
                log::info!("fetched {count} posts");
                self.store.complete_fetch(posts);
                Ok(FetchOutcome::Fetched(count))
            }
            Err(err) => {
                log::warn!("fetching posts failed: {err}");
                self.store
                    .fail_fetch(failure_message(&err, "Failed to fetch posts"));
                Err(err.into())
            }
        }
    }

    /// Create a post. On success the view should clear its form; on failure
    /// it keeps the inputs so nothing has to be retyped.
    pub fn submit_create(&self, name: &str, description: &str) -> Result<Post, SyncError> {
        let input = NewPost::new(name, description);
        if let Err(err) = input.validate() {
            log::debug!("rejected create: {err}");
            self.notifier.notify(Notice::error(err.to_string()));
            return Err(err.into());
        }

        log::debug!("creating post {:?}", input.name);
        self.store.begin_create();
        match self.gateway.create_post(&input) {
            Ok(post) => {
                log::info!("created post {}", post.id);
                self.store.complete_create(post.clone());
                self.notifier.notify(Notice::success(CREATED_MESSAGE));
                Ok(post)
            }
            Err(err) => {
                log::warn!("creating post failed: {err}");
                self.store
                    .fail_create(failure_message(&err, "Failed to create post"));
                self.notifier.notify(Notice::error(CREATE_FAILED_MESSAGE));
                Err(err.into())
            }
        }
    }

    pub fn submit_delete(&self, id: PostId) -> Result<PostId, SyncError> {
        log::debug!("deleting post {id}");
        self.store.begin_delete(id);
        match self.gateway.delete_post(id) {
            Ok(deleted) => {
                log::info!("deleted post {deleted}");
                self.store.complete_delete(deleted);
                self.notifier.notify(Notice::success(DELETED_MESSAGE));
                Ok(deleted)
            }
            Err(err) => {
                log::warn!("deleting post {id} failed: {err}");
                self.store
                    .fail_delete(failure_message(&err, "Failed to delete post"));
                self.notifier.notify(Notice::error(DELETE_FAILED_MESSAGE));
                Err(err.into())
            }
        }
    }
}

fn failure_message(err: &impl std::fmt::Display, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
