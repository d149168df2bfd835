#![forbid(unsafe_code)]

//! The application state context.
//!
//! [`AppState`] holds the small set of well-known shared cells the rest of
//! the application reads and watches: the signed-in viewer and the loaded
//! post list. It is constructed once at application start and passed by
//! reference to whatever needs it — there are no module-level mutable
//! globals.
//!
//! The cells are passive containers: data loading, persistence, and
//! authentication live in external collaborators, which mutate state only
//! through the cells' replace operations.

use inklet_model::{Post, User};
use inklet_reactive::Store;
use tracing::debug;

/// Shared application state: the viewer cell and the posts cell.
///
/// Cloning an `AppState` clones handles to the **same** cells.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The currently signed-in viewer; `None` when signed out.
    pub user: Store<Option<User>>,
    /// The loaded posts, in load order.
    pub posts: Store<Vec<Post>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Fresh state: no viewer, no posts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            user: Store::new(None),
            posts: Store::new(Vec::new()),
        }
    }

    /// Replace the viewer cell with a signed-in user.
    pub fn sign_in(&self, user: User) {
        debug!(email = %user.email, "user signed in");
        self.user.set(Some(user));
    }

    /// Clear the viewer cell.
    pub fn sign_out(&self) {
        debug!("user signed out");
        self.user.set(None);
    }

    /// Clone out the current viewer, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.user.get()
    }

    /// Replace the whole post list, e.g. after a reload.
    pub fn replace_posts(&self, posts: Vec<Post>) {
        debug!(count = posts.len(), "posts replaced");
        self.posts.set(posts);
    }

    /// Append one post to the list.
    pub fn push_post(&self, post: Post) {
        debug!(id = post.id, "post appended");
        self.posts.update(|current| {
            let mut next = current.clone();
            next.push(post);
            next
        });
    }

    /// Empty the post list.
    pub fn clear_posts(&self) {
        debug!("posts cleared");
        self.posts.set(Vec::new());
    }

    /// Number of loaded posts.
    #[must_use]
    pub fn post_count(&self) -> usize {
        self.posts.with(Vec::len)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
