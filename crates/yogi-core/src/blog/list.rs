// ── Blog listing controller ──
//
// Two orthogonal pieces of state published on one `watch` channel:
// the list itself (loading / loaded / error) and the search overlay
// (idle / searching / results). Search input is debounced; each scheduled
// search takes a sequence number and its response is applied only while
// that number is still the latest issued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use strum::Display;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use yogi_api::{ApiClient, Blog, SEARCH_PAGE_LIMIT};

use crate::api::SiteApi;
use crate::error::CoreError;

/// Shown in place of the list when the initial fetch fails.
pub const LIST_ERROR_MESSAGE: &str = "Failed to load blog posts. Please try again.";

/// Shown next to the search box when a search request fails.
pub const SEARCH_ERROR_MESSAGE: &str = "Search failed. Please try again.";

// ── State ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Display)]
pub enum ListState {
    #[strum(to_string = "loading")]
    Loading,
    #[strum(to_string = "loaded")]
    Loaded(Arc<Vec<Blog>>),
    #[strum(to_string = "error")]
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum SearchState {
    #[strum(to_string = "idle")]
    Idle,
    #[strum(to_string = "searching")]
    Searching { term: String },
    #[strum(to_string = "results")]
    Results { term: String, matches: Arc<Vec<Blog>> },
}

/// Everything the listing page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogListView {
    pub list: ListState,
    pub search: SearchState,
    pub search_error: Option<String>,
    /// The backend reported more posts than the first page holds.
    pub truncated: bool,
}

impl Default for BlogListView {
    fn default() -> Self {
        Self {
            list: ListState::Loading,
            search: SearchState::Idle,
            search_error: None,
            truncated: false,
        }
    }
}

impl BlogListView {
    /// Search matches while results are showing, otherwise the loaded list.
    pub fn displayed(&self) -> &[Blog] {
        match (&self.search, &self.list) {
            (SearchState::Results { matches, .. }, _) => matches.as_slice(),
            (_, ListState::Loaded(blogs)) => blogs.as_slice(),
            _ => &[],
        }
    }

    pub fn featured(&self) -> Vec<&Blog> {
        self.displayed()
            .iter()
            .filter(|b| b.is_featured())
            .collect()
    }

    pub fn regular(&self) -> Vec<&Blog> {
        self.displayed()
            .iter()
            .filter(|b| !b.is_featured())
            .collect()
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.search, SearchState::Searching { .. })
    }
}

// ── Controller ───────────────────────────────────────────────────

/// Drives the blog listing page.
///
/// Cheaply cloneable. Must be used inside a tokio runtime: search input
/// schedules its debounce on a spawned task.
pub struct BlogListController<A: SiteApi = ApiClient> {
    inner: Arc<ListInner<A>>,
}

impl<A: SiteApi> Clone for BlogListController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ListInner<A> {
    api: Arc<A>,
    debounce: Duration,
    view: watch::Sender<BlogListView>,
    load_seq: AtomicU64,
    search_seq: AtomicU64,
    /// Token for the debounce currently waiting to fire.
    pending: Mutex<Option<CancellationToken>>,
    /// Cancelled on shutdown; late responses are dropped after that.
    detached: CancellationToken,
}

impl<A: SiteApi> BlogListController<A> {
    pub fn new(api: Arc<A>, debounce: Duration) -> Self {
        let (view, _) = watch::channel(BlogListView::default());
        Self {
            inner: Arc::new(ListInner {
                api,
                debounce,
                view,
                load_seq: AtomicU64::new(0),
                search_seq: AtomicU64::new(0),
                pending: Mutex::new(None),
                detached: CancellationToken::new(),
            }),
        }
    }

    /// Subscribe to view changes.
    pub fn subscribe(&self) -> watch::Receiver<BlogListView> {
        self.inner.view.subscribe()
    }

    /// Current view snapshot.
    pub fn view(&self) -> BlogListView {
        self.inner.view.borrow().clone()
    }

    /// Fetch the first page of posts (mount).
    pub async fn load(&self) -> Result<(), CoreError> {
        let seq = self.inner.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.view.send_modify(|v| v.list = ListState::Loading);

        let result = self.inner.api.fetch_blogs().await;

        if !self.inner.is_current_load(seq) {
            debug!(seq, "discarding stale blog list response");
            return Ok(());
        }

        match result {
            Ok(page) => {
                let truncated = page.is_truncated();
                info!(count = page.data.len(), truncated, "blog list loaded");
                self.inner.view.send_modify(|v| {
                    v.list = ListState::Loaded(Arc::new(page.data));
                    v.truncated = truncated;
                });
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "blog list fetch failed");
                self.inner
                    .view
                    .send_modify(|v| v.list = ListState::Error(LIST_ERROR_MESSAGE.into()));
                Err(e.into())
            }
        }
    }

    /// Manual retry after an error.
    pub async fn reload(&self) -> Result<(), CoreError> {
        self.load().await
    }

    /// Feed the current contents of the search box.
    ///
    /// Blank input returns to `Idle` immediately. Anything else restarts
    /// the debounce; only the last input inside the window is searched.
    pub fn set_search_input(&self, input: &str) {
        let term = input.trim().to_owned();
        let seq = self.inner.search_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.cancel_pending();

        if term.is_empty() {
            self.inner.view.send_modify(|v| {
                v.search = SearchState::Idle;
                v.search_error = None;
            });
            return;
        }

        if self.inner.detached.is_cancelled() {
            return;
        }

        // A failure belongs to the term that produced it.
        self.inner.view.send_if_modified(|v| v.search_error.take().is_some());

        let token = self.inner.detached.child_token();
        *self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.clone());

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => return,
                () = tokio::time::sleep(inner.debounce) => {}
            }
            inner.run_search(seq, term).await;
        });
    }

    /// Empty the search box, restoring the loaded list.
    pub fn clear_search(&self) {
        self.set_search_input("");
    }

    /// Detach from the view (unmount). Pending debounces are cancelled and
    /// responses still in flight are ignored.
    pub fn shutdown(&self) {
        self.inner.detached.cancel();
        self.inner.cancel_pending();
        debug!("blog list controller detached");
    }
}

impl<A: SiteApi> ListInner<A> {
    fn is_current_load(&self, seq: u64) -> bool {
        !self.detached.is_cancelled() && self.load_seq.load(Ordering::SeqCst) == seq
    }

    fn is_current_search(&self, seq: u64) -> bool {
        !self.detached.is_cancelled() && self.search_seq.load(Ordering::SeqCst) == seq
    }

    fn cancel_pending(&self) {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(token) = pending {
            token.cancel();
        }
    }

    async fn run_search(&self, seq: u64, term: String) {
        if !self.is_current_search(seq) {
            return;
        }

        debug!(seq, term = %term, "search debounce fired");
        self.view.send_modify(|v| {
            v.search = SearchState::Searching { term: term.clone() };
            v.search_error = None;
        });

        let result = self.api.search_blogs(&term, 1, SEARCH_PAGE_LIMIT).await;

        if !self.is_current_search(seq) {
            debug!(seq, term = %term, "discarding stale search response");
            return;
        }

        match result {
            Ok(page) => {
                debug!(seq, matches = page.data.len(), "search results applied");
                self.view.send_modify(|v| {
                    v.search = SearchState::Results {
                        term,
                        matches: Arc::new(page.data),
                    };
                });
            }
            Err(e) => {
                warn!(error = %e, term = %term, "blog search failed");
                self.view.send_modify(|v| {
                    v.search = SearchState::Idle;
                    v.search_error = Some(SEARCH_ERROR_MESSAGE.into());
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yogi_api::BlogPage;

    fn blog(id: i64, featured: u8) -> Blog {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Post {id}"),
            "slug": format!("post-{id}"),
            "is_featured": featured
        }))
        .expect("blog")
    }

    #[test]
    fn displayed_prefers_results_then_loaded() {
        let loaded = Arc::new(vec![blog(1, 1), blog(2, 0)]);
        let mut view = BlogListView {
            list: ListState::Loaded(loaded.clone()),
            ..BlogListView::default()
        };
        assert_eq!(view.displayed(), loaded.as_slice());

        view.search = SearchState::Searching { term: "x".into() };
        assert_eq!(view.displayed(), loaded.as_slice());

        view.search = SearchState::Results {
            term: "x".into(),
            matches: Arc::new(vec![blog(3, 0)]),
        };
        assert_eq!(view.displayed().len(), 1);
        assert_eq!(view.displayed()[0].id, 3);
    }

    #[test]
    fn partitions_featured_and_regular() {
        let view = BlogListView {
            list: ListState::Loaded(Arc::new(vec![blog(1, 1), blog(2, 0), blog(3, 1)])),
            ..BlogListView::default()
        };
        let featured: Vec<i64> = view.featured().iter().map(|b| b.id).collect();
        let regular: Vec<i64> = view.regular().iter().map(|b| b.id).collect();
        assert_eq!(featured, vec![1, 3]);
        assert_eq!(regular, vec![2]);
    }

    #[test]
    fn nothing_displayed_while_loading_or_failed() {
        let mut view = BlogListView::default();
        assert!(view.displayed().is_empty());
        view.list = ListState::Error(LIST_ERROR_MESSAGE.into());
        assert!(view.displayed().is_empty());
        assert_eq!(view.list.to_string(), "error");
    }

    #[test]
    fn truncation_flag_comes_from_pagination() {
        let page: BlogPage = serde_json::from_value(serde_json::json!({
            "data": [],
            "pagination": { "total": 3 }
        }))
        .expect("page");
        assert!(page.is_truncated());
    }
}
