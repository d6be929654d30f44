//! The single in-memory holder of post collection state.
//!
//! # Design
//! `PostStore` is a cheap, cloneable handle to shared state. It is created
//! explicitly and handed to whoever needs it; there is no global instance.
//!
//! State changes only through the crate-private transition methods, which the
//! `SyncController` calls as operations begin and settle. Each transition runs
//! to completion under one lock, so readers never observe a half-applied
//! change. Subscribers are called after the lock is released with the
//! snapshot that transition produced; snapshots from concurrent operations
//! may reach a subscriber in either order.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::types::{Post, PostId};

/// Everything the view renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostCollectionState {
    /// Newest first, unique by id.
    pub items: Vec<Post>,
    /// True while the initial fetch is in flight.
    pub loading: bool,
    pub error: Option<String>,
    pub create_loading: bool,
    /// Id of the most recently started delete, while one is pending.
    pub delete_loading: Option<PostId>,
    /// True once the initial fetch has settled, successfully or not.
    pub fetched: bool,
}

impl PostCollectionState {
    pub fn contains(&self, id: PostId) -> bool {
        self.items.iter().any(|p| p.id == id)
    }
}

pub type SubscriptionId = u64;

type Subscriber = Arc<dyn Fn(&PostCollectionState) + Send + Sync>;

#[derive(Clone, Default)]
pub struct PostStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    state: Mutex<PostCollectionState>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
}

impl fmt::Debug for PostStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostStore")
            .field("state", &*self.state())
            .finish_non_exhaustive()
    }
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> PostCollectionState {
        self.state().clone()
    }

    /// Borrow the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&PostCollectionState) -> R) -> R {
        f(&self.state())
    }

    /// Register a callback invoked after every transition.
    ///
    /// Callbacks run on the thread that applied the transition and may read
    /// the store.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&PostCollectionState) + Send + Sync + 'static,
    {
        let id = self.inner.next_subscription.fetch_add(1, Ordering::Relaxed);
        self.subscribers().push((id, Arc::new(callback)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    pub(crate) fn begin_fetch(&self) {
        self.apply(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    /// Replaces the items. Later duplicates of an id are dropped.
    pub(crate) fn complete_fetch(&self, posts: Vec<Post>) {
        let mut seen = HashSet::with_capacity(posts.len());
        let items: Vec<Post> = posts.into_iter().filter(|p| seen.insert(p.id)).collect();
        self.apply(move |s| {
            s.items = items;
            s.loading = false;
            s.fetched = true;
        });
    }

    pub(crate) fn fail_fetch(&self, message: String) {
        self.apply(move |s| {
            s.loading = false;
            s.fetched = true;
            s.error = Some(message);
        });
    }

    pub(crate) fn begin_create(&self) {
        self.apply(|s| {
            s.create_loading = true;
            s.error = None;
        });
    }

    /// Prepends `post`, replacing any entry that already carries its id.
    pub(crate) fn complete_create(&self, post: Post) {
        self.apply(move |s| {
            s.items.retain(|p| p.id != post.id);
            s.items.insert(0, post);
            s.create_loading = false;
        });
    }

    pub(crate) fn fail_create(&self, message: String) {
        self.apply(move |s| {
            s.create_loading = false;
            s.error = Some(message);
        });
    }

    pub(crate) fn begin_delete(&self, id: PostId) {
        self.apply(move |s| {
            s.delete_loading = Some(id);
            s.error = None;
        });
    }

    /// Removing an id that is not present leaves the items untouched.
    pub(crate) fn complete_delete(&self, id: PostId) {
        self.apply(move |s| {
            s.items.retain(|p| p.id != id);
            s.delete_loading = None;
        });
    }

    pub(crate) fn fail_delete(&self, message: String) {
        self.apply(move |s| {
            s.delete_loading = None;
            s.error = Some(message);
        });
    }

    fn apply(&self, transition: impl FnOnce(&mut PostCollectionState)) {
        let snapshot = {
            let mut state = self.state();
            transition(&mut state);
            state.clone()
        };
        let subscribers: Vec<Subscriber> = self
            .subscribers()
            .iter()
            .map(|(_, s)| Arc::clone(s))
            .collect();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }

    fn state(&self) -> MutexGuard<'_, PostCollectionState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Subscriber)>> {
        self.inner.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use super::*;

    fn post(n: u128) -> Post {
        Post {
            id: Uuid::from_u128(n),
            name: format!("Post {n}"),
            description: "d".to_string(),
        }
    }

    fn ids(store: &PostStore) -> Vec<PostId> {
        store.read(|s| s.items.iter().map(|p| p.id).collect())
    }

    #[test]
    fn starts_empty_and_idle() {
        assert_eq!(PostStore::new().snapshot(), PostCollectionState::default());
    }

    #[test]
    fn fetch_lifecycle() {
        let store = PostStore::new();
        store.fail_create("stale".into());

        store.begin_fetch();
        let s = store.snapshot();
        assert!(s.loading);
        assert!(!s.fetched);
        assert_eq!(s.error, None);

        store.complete_fetch(vec![post(1), post(2), post(1)]);
        let s = store.snapshot();
        assert!(!s.loading);
        assert!(s.fetched);
        assert_eq!(ids(&store), vec![Uuid::from_u128(1), Uuid::from_u128(2)]);
    }

    #[test]
    fn failed_fetch_settles_with_error() {
        let store = PostStore::new();
        store.begin_fetch();
        store.fail_fetch("network down".into());
        let s = store.snapshot();
        assert!(!s.loading);
        assert!(s.fetched);
        assert!(s.items.is_empty());
        assert_eq!(s.error.as_deref(), Some("network down"));
    }

    #[test]
    fn create_prepends_and_stays_unique() {
        let store = PostStore::new();
        store.complete_fetch(vec![post(1)]);

        store.begin_create();
        assert!(store.snapshot().create_loading);
        store.complete_create(post(2));
        store.complete_create(post(1));

        let s = store.snapshot();
        assert!(!s.create_loading);
        assert_eq!(ids(&store), vec![Uuid::from_u128(1), Uuid::from_u128(2)]);
    }

    #[test]
    fn failed_create_keeps_items() {
        let store = PostStore::new();
        store.complete_fetch(vec![post(1)]);
        store.begin_create();
        store.fail_create("HTTP 500".into());
        let s = store.snapshot();
        assert!(!s.create_loading);
        assert_eq!(s.items.len(), 1);
        assert_eq!(s.error.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn delete_removes_only_that_id() {
        let store = PostStore::new();
        store.complete_fetch(vec![post(1), post(2), post(3)]);

        store.begin_delete(Uuid::from_u128(2));
        assert_eq!(store.snapshot().delete_loading, Some(Uuid::from_u128(2)));
        store.complete_delete(Uuid::from_u128(2));

        assert_eq!(store.snapshot().delete_loading, None);
        assert_eq!(ids(&store), vec![Uuid::from_u128(1), Uuid::from_u128(3)]);
    }

    #[test]
    fn deleting_missing_id_is_a_no_op_on_items() {
        let store = PostStore::new();
        store.complete_fetch(vec![post(1)]);
        store.complete_delete(Uuid::from_u128(9));
        assert_eq!(ids(&store), vec![Uuid::from_u128(1)]);
    }

    #[test]
    fn begin_clears_previous_error() {
        let store = PostStore::new();
        store.fail_delete("gone".into());
        store.begin_delete(Uuid::from_u128(1));
        assert_eq!(store.snapshot().error, None);
    }

    #[test]
    fn subscribers_see_each_transition() {
        let store = PostStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = store.subscribe(move |s| sink.lock().unwrap().push(s.loading));

        store.begin_fetch();
        store.complete_fetch(Vec::new());
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.begin_create();

        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn subscribers_may_read_the_store() {
        let store = PostStore::new();
        let reader = store.clone();
        let count = Arc::new(AtomicU64::new(0));
        let sink = Arc::clone(&count);
        store.subscribe(move |_| {
            let n = reader.read(|s| s.items.len());
            sink.store(n as u64, Ordering::SeqCst);
        });

        store.complete_create(post(1));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
