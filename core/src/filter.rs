//! Name filtering and the list states a view chooses between.

use crate::store::PostCollectionState;
use crate::types::Post;

/// Posts whose name contains `query`, ignoring case. Whitespace in the query
/// is significant; only the empty query matches everything.
pub fn filter_posts<'a>(items: &'a [Post], query: &str) -> Vec<&'a Post> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&query))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<'a> {
    /// Initial fetch in flight.
    Loading,
    /// Initial fetch failed and nothing is loaded.
    Failed(&'a str),
    /// There are no posts at all.
    NoPosts,
    /// Posts exist but none match the query.
    NoResults,
    Posts(Vec<&'a Post>),
}

impl<'a> ListView<'a> {
    pub fn from_state(state: &'a PostCollectionState, query: &str) -> Self {
        if state.loading {
            return ListView::Loading;
        }
        if state.items.is_empty() {
            return match state.error.as_deref() {
                Some(message) => ListView::Failed(message),
                None => ListView::NoPosts,
            };
        }
        let matches = filter_posts(&state.items, query);
        if matches.is_empty() {
            ListView::NoResults
        } else {
            ListView::Posts(matches)
        }
    }
}
