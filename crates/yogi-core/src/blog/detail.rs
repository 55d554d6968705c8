// ── Single-post controller ──

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use strum::Display;
use tokio::sync::watch;
use tracing::{debug, warn};

use yogi_api::{ApiClient, Blog};

use crate::api::SiteApi;
use crate::error::CoreError;

pub const DETAIL_ERROR_MESSAGE: &str = "Failed to load blog post. Please try again.";
pub const NOT_FOUND_MESSAGE: &str = "Blog post not found.";

#[derive(Debug, Clone, PartialEq, Display)]
pub enum DetailState {
    #[strum(to_string = "idle")]
    Idle,
    #[strum(to_string = "loading")]
    Loading,
    #[strum(to_string = "loaded")]
    Loaded(Arc<Blog>),
    #[strum(to_string = "error")]
    Error(String),
}

/// Drives the post page: load by slug, retry, like.
pub struct BlogDetailController<A: SiteApi = ApiClient> {
    inner: Arc<DetailInner<A>>,
}

impl<A: SiteApi> Clone for BlogDetailController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct DetailInner<A> {
    api: Arc<A>,
    state: watch::Sender<DetailState>,
    slug: Mutex<Option<String>>,
    seq: AtomicU64,
}

impl<A: SiteApi> BlogDetailController<A> {
    pub fn new(api: Arc<A>) -> Self {
        let (state, _) = watch::channel(DetailState::Idle);
        Self {
            inner: Arc::new(DetailInner {
                api,
                state,
                slug: Mutex::new(None),
                seq: AtomicU64::new(0),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> DetailState {
        self.inner.state.borrow().clone()
    }

    /// Load the post with the given slug.
    pub async fn load(&self, slug: &str) -> Result<Arc<Blog>, CoreError> {
        *self
            .inner
            .slug
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(slug.to_owned());
        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.send_replace(DetailState::Loading);

        let result = self.inner.api.fetch_blog_by_slug(slug).await;
        let current = self.inner.seq.load(Ordering::SeqCst) == seq;

        match result {
            Ok(blog) => {
                let blog = Arc::new(blog);
                if current {
                    self.inner
                        .state
                        .send_replace(DetailState::Loaded(Arc::clone(&blog)));
                } else {
                    debug!(slug, "discarding stale blog detail response");
                }
                Ok(blog)
            }
            Err(e) => {
                warn!(slug, error = %e, "blog detail fetch failed");
                if current {
                    let message = if e.is_not_found() {
                        NOT_FOUND_MESSAGE
                    } else {
                        DETAIL_ERROR_MESSAGE
                    };
                    self.inner
                        .state
                        .send_replace(DetailState::Error(message.into()));
                }
                Err(e.into())
            }
        }
    }

    /// Repeat the last load.
    pub async fn retry(&self) -> Result<Arc<Blog>, CoreError> {
        let slug = self
            .inner
            .slug
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| CoreError::ValidationFailed {
                message: "no blog post has been requested yet".into(),
            })?;
        self.load(&slug).await
    }

    /// Like the loaded post. Returns the new like count.
    ///
    /// Uses the count from the response when the backend reports one,
    /// otherwise increments locally.
    pub async fn like(&self) -> Result<u64, CoreError> {
        let DetailState::Loaded(blog) = self.state() else {
            return Err(CoreError::ValidationFailed {
                message: "no blog post is loaded".into(),
            });
        };

        let resp = self.inner.api.like_blog(blog.id).await?;
        let likes = resp
            .get("likes_count")
            .or_else(|| resp.pointer("/data/likes_count"))
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(blog.likes_count + 1);

        self.inner.state.send_modify(|state| {
            if let DetailState::Loaded(current) = state {
                if current.id == blog.id {
                    let mut updated = Blog::clone(current);
                    updated.likes_count = likes;
                    *current = Arc::new(updated);
                }
            }
        });
        debug!(id = blog.id, likes, "blog liked");
        Ok(likes)
    }
}
