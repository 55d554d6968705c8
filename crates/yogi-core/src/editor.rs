// ── Admin blog editor ──
//
// Create / update / delete behind the admin session. Only one submission
// may be in flight at a time: a second one is rejected immediately rather
// than queued, which is the "disable the submit button" policy expressed
// without a UI.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use yogi_api::{ApiClient, Blog, BlogDraft};

use crate::api::SiteApi;
use crate::error::CoreError;
use crate::session::AdminSession;

pub struct BlogEditor<A: SiteApi = ApiClient> {
    api: Arc<A>,
    session: AdminSession,
    in_flight: Arc<AtomicBool>,
}

impl<A: SiteApi> Clone for BlogEditor<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            session: self.session.clone(),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

/// Releases the in-flight flag when the submission finishes.
struct SubmitGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl<A: SiteApi> BlogEditor<A> {
    /// Open the editor. Fails with `AdminRequired` when not logged in.
    pub fn mount(api: Arc<A>, session: AdminSession) -> Result<Self, CoreError> {
        session.require_admin()?;
        Ok(Self {
            api,
            session,
            in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    /// `true` while a create / update / delete is awaiting the backend.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Fetch a post by id to prefill the edit form.
    pub async fn load_for_edit(&self, id: i64) -> Result<Blog, CoreError> {
        self.session.require_admin()?;
        Ok(self.api.fetch_blog_by_id(id).await?)
    }

    pub async fn create(&self, draft: BlogDraft) -> Result<serde_json::Value, CoreError> {
        self.session.require_admin()?;
        validate(&draft)?;
        let _guard = self.begin_submit()?;
        let title = draft.title.clone();

        match self.api.create_blog(draft).await {
            Ok(record) => {
                info!(title = %title, "blog post created");
                Ok(record)
            }
            Err(e) => {
                warn!(title = %title, error = %e, "blog create failed");
                Err(e.into())
            }
        }
    }

    pub async fn update(&self, id: i64, draft: BlogDraft) -> Result<serde_json::Value, CoreError> {
        self.session.require_admin()?;
        validate(&draft)?;
        let _guard = self.begin_submit()?;

        match self.api.update_blog(id, draft).await {
            Ok(record) => {
                info!(id, "blog post updated");
                Ok(record)
            }
            Err(e) => {
                warn!(id, error = %e, "blog update failed");
                Err(e.into())
            }
        }
    }

    pub async fn delete(&self, id: i64) -> Result<serde_json::Value, CoreError> {
        self.session.require_admin()?;
        let _guard = self.begin_submit()?;

        match self.api.delete_blog(id).await {
            Ok(record) => {
                info!(id, "blog post deleted");
                Ok(record)
            }
            Err(e) => {
                warn!(id, error = %e, "blog delete failed");
                Err(e.into())
            }
        }
    }

    fn begin_submit(&self) -> Result<SubmitGuard, CoreError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("rejecting submission while another is in flight");
            return Err(CoreError::SubmissionInFlight);
        }
        Ok(SubmitGuard {
            flag: Arc::clone(&self.in_flight),
        })
    }
}

fn validate(draft: &BlogDraft) -> Result<(), CoreError> {
    let missing = draft.missing_required();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::ValidationFailed {
            message: format!("missing required fields: {}", missing.join(", ")),
        })
    }
}
