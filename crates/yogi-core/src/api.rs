// ── Backend seam ──
//
// Controllers are generic over `SiteApi` so they can run against the real
// HTTP client or an in-process fake. Every future is `Send` because the
// debounced search spawns its request onto the runtime.

use std::future::Future;

use yogi_api::{
    ApiClient, Blog, BlogDraft, BlogPage, ContactForm, ContactResponse, Error, Project, Service,
};

/// The backend operations the controllers depend on.
pub trait SiteApi: Send + Sync + 'static {
    fn fetch_services(&self) -> impl Future<Output = Result<Vec<Service>, Error>> + Send;

    fn fetch_service_projects(
        &self,
        service_id: i64,
    ) -> impl Future<Output = Result<Vec<Project>, Error>> + Send;

    fn fetch_blogs(&self) -> impl Future<Output = Result<BlogPage, Error>> + Send;

    fn fetch_blog_by_slug(&self, slug: &str) -> impl Future<Output = Result<Blog, Error>> + Send;

    fn fetch_blog_by_id(&self, id: i64) -> impl Future<Output = Result<Blog, Error>> + Send;

    fn search_blogs(
        &self,
        term: &str,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<BlogPage, Error>> + Send;

    fn create_blog(
        &self,
        draft: BlogDraft,
    ) -> impl Future<Output = Result<serde_json::Value, Error>> + Send;

    fn update_blog(
        &self,
        id: i64,
        draft: BlogDraft,
    ) -> impl Future<Output = Result<serde_json::Value, Error>> + Send;

    fn delete_blog(&self, id: i64) -> impl Future<Output = Result<serde_json::Value, Error>> + Send;

    fn like_blog(&self, id: i64) -> impl Future<Output = Result<serde_json::Value, Error>> + Send;

    fn submit_contact_form(
        &self,
        form: &ContactForm,
    ) -> impl Future<Output = Result<ContactResponse, Error>> + Send;
}

impl SiteApi for ApiClient {
    async fn fetch_services(&self) -> Result<Vec<Service>, Error> {
        ApiClient::fetch_services(self).await
    }

    async fn fetch_service_projects(&self, service_id: i64) -> Result<Vec<Project>, Error> {
        ApiClient::fetch_service_projects(self, service_id).await
    }

    async fn fetch_blogs(&self) -> Result<BlogPage, Error> {
        ApiClient::fetch_blogs(self).await
    }

    async fn fetch_blog_by_slug(&self, slug: &str) -> Result<Blog, Error> {
        ApiClient::fetch_blog_by_slug(self, slug).await
    }

    async fn fetch_blog_by_id(&self, id: i64) -> Result<Blog, Error> {
        ApiClient::fetch_blog_by_id(self, id).await
    }

    async fn search_blogs(&self, term: &str, page: u32, limit: u32) -> Result<BlogPage, Error> {
        ApiClient::search_blogs(self, term, page, limit).await
    }

    async fn create_blog(&self, draft: BlogDraft) -> Result<serde_json::Value, Error> {
        ApiClient::create_blog(self, draft).await
    }

    async fn update_blog(&self, id: i64, draft: BlogDraft) -> Result<serde_json::Value, Error> {
        ApiClient::update_blog(self, id, draft).await
    }

    async fn delete_blog(&self, id: i64) -> Result<serde_json::Value, Error> {
        ApiClient::delete_blog(self, id).await
    }

    async fn like_blog(&self, id: i64) -> Result<serde_json::Value, Error> {
        ApiClient::like_blog(self, id).await
    }

    async fn submit_contact_form(&self, form: &ContactForm) -> Result<ContactResponse, Error> {
        ApiClient::submit_contact_form(self, form).await
    }
}
