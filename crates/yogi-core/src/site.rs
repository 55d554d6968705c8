// ── Site facade ──
//
// One handle bundling the backend client, the admin session and the
// client configuration. Front ends build it once and ask it for
// controllers.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use yogi_api::{ApiClient, ContactForm, ContactResponse, Project, Service};

use crate::analytics::AnalyticsController;
use crate::api::SiteApi;
use crate::blog::{BlogDetailController, BlogListController};
use crate::config::{ClientConfig, DEFAULT_SEARCH_DEBOUNCE};
use crate::contact::submit_contact;
use crate::editor::BlogEditor;
use crate::error::CoreError;
use crate::session::AdminSession;

pub struct Site<A: SiteApi = ApiClient> {
    api: Arc<A>,
    session: AdminSession,
    search_debounce: Duration,
}

impl<A: SiteApi> Clone for Site<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            session: self.session.clone(),
            search_debounce: self.search_debounce,
        }
    }
}

impl Site<ApiClient> {
    /// Build the HTTP client from `config`. No request is made.
    pub fn connect(config: &ClientConfig, session: AdminSession) -> Result<Self, CoreError> {
        let api = config.build_client()?;
        debug!(api_url = %config.api_url, "site client ready");
        Ok(Self {
            api: Arc::new(api),
            session,
            search_debounce: config.search_debounce,
        })
    }
}

impl<A: SiteApi> Site<A> {
    /// Wrap an existing backend implementation.
    pub fn with_api(api: Arc<A>, session: AdminSession) -> Self {
        Self {
            api,
            session,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    pub fn blog_list(&self) -> BlogListController<A> {
        BlogListController::new(Arc::clone(&self.api), self.search_debounce)
    }

    pub fn blog_detail(&self) -> BlogDetailController<A> {
        BlogDetailController::new(Arc::clone(&self.api))
    }

    /// Fails with [`CoreError::AdminRequired`] unless logged in.
    pub fn blog_editor(&self) -> Result<BlogEditor<A>, CoreError> {
        BlogEditor::mount(Arc::clone(&self.api), self.session.clone())
    }

    pub fn analytics(&self) -> AnalyticsController<A> {
        AnalyticsController::new(Arc::clone(&self.api))
    }

    pub async fn services(&self) -> Result<Vec<Service>, CoreError> {
        Ok(self.api.fetch_services().await?)
    }

    pub async fn service_projects(&self, service_id: i64) -> Result<Vec<Project>, CoreError> {
        Ok(self.api.fetch_service_projects(service_id).await?)
    }

    pub async fn submit_contact(&self, form: &ContactForm) -> Result<ContactResponse, CoreError> {
        submit_contact(self.api.as_ref(), form).await
    }
}
