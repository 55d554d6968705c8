// Async HTTP client for the site backend.
//
// Base URL comes from configuration; every path below is joined onto it
// segment by segment so slugs are percent-encoded.
// Success bodies are decoded as-is. Failures carry the server's message
// when it sends one, else `HTTP error! status: <code>`. Nothing retries.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::draft::BlogDraft;
use crate::error::Error;
use crate::models::{Blog, BlogPage, ContactForm, ContactResponse, Project, Service};
use crate::transport::TransportConfig;

/// Default page size for `search_blogs`.
pub const SEARCH_PAGE_LIMIT: u32 = 10;

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the services / projects / blog / contact endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport settings.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and make sure its path ends with `/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw.trim())?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        url.set_query(None);
        Ok(url)
    }

    /// The backend origin this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments (each percent-encoded) to the base URL.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `normalize_base_url` rejected cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");
        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");
        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("POST {url}");
        let resp = self.http.post(url).send().await?;
        self.handle_response(resp).await
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        form: reqwest::multipart::Form,
    ) -> Result<T, Error> {
        debug!("POST {url} (multipart)");
        let resp = self.http.post(url).multipart(form).send().await?;
        self.handle_response(resp).await
    }

    async fn put_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        form: reqwest::multipart::Form,
    ) -> Result<T, Error> {
        debug!("PUT {url} (multipart)");
        let resp = self.http.put(url).multipart(form).send().await?;
        self.handle_response(resp).await
    }

    async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("DELETE {url}");
        let resp = self.http.delete(url).send().await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            let raw = resp.text().await.unwrap_or_default();
            Err(parse_error(status.as_u16(), &raw))
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Services & projects ──────────────────────────────────────────

    pub async fn fetch_services(&self) -> Result<Vec<Service>, Error> {
        self.get(self.url(&["api", "services"])).await
    }

    pub async fn fetch_service_projects(&self, service_id: i64) -> Result<Vec<Project>, Error> {
        let id = service_id.to_string();
        self.get(self.url(&["api", "services", &id, "projects"]))
            .await
    }

    // ── Blog reads ───────────────────────────────────────────────────

    /// First page of posts. No page parameter is sent.
    pub async fn fetch_blogs(&self) -> Result<BlogPage, Error> {
        self.get(self.url(&["api", "v2", "blogs"])).await
    }

    pub async fn fetch_blog_by_slug(&self, slug: &str) -> Result<Blog, Error> {
        self.get(self.url(&["api", "v2", "blogs", slug])).await
    }

    pub async fn fetch_blog_by_id(&self, id: i64) -> Result<Blog, Error> {
        let id = id.to_string();
        self.get(self.url(&["api", "v2", "blogs", "id", &id])).await
    }

    /// Full-text search. Callers suppress blank terms.
    pub async fn search_blogs(&self, term: &str, page: u32, limit: u32) -> Result<BlogPage, Error> {
        self.get_with_params(
            self.url(&["api", "v2", "blogs", "search"]),
            &[
                ("q", term.to_owned()),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    // ── Blog writes ──────────────────────────────────────────────────

    pub async fn create_blog(&self, draft: BlogDraft) -> Result<serde_json::Value, Error> {
        let form = draft.into_form()?;
        self.post_multipart(self.url(&["api", "v2", "blogs"]), form)
            .await
    }

    pub async fn update_blog(&self, id: i64, draft: BlogDraft) -> Result<serde_json::Value, Error> {
        let form = draft.into_form()?;
        let id = id.to_string();
        self.put_multipart(self.url(&["api", "v2", "blogs", &id]), form)
            .await
    }

    pub async fn delete_blog(&self, id: i64) -> Result<serde_json::Value, Error> {
        let id = id.to_string();
        self.delete(self.url(&["api", "v2", "blogs", &id])).await
    }

    pub async fn like_blog(&self, id: i64) -> Result<serde_json::Value, Error> {
        let id = id.to_string();
        self.post_empty(self.url(&["api", "v2", "blogs", &id, "like"]))
            .await
    }

    // ── Contact ──────────────────────────────────────────────────────

    pub async fn submit_contact_form(&self, form: &ContactForm) -> Result<ContactResponse, Error> {
        self.post(self.url(&["api", "contact", "submit"]), form)
            .await
    }
}

/// Map a non-2xx body to an [`Error::Http`], preferring the server's text.
fn parse_error(status: u16, raw: &str) -> Error {
    let server_message = serde_json::from_str::<ErrorResponse>(raw)
        .ok()
        .and_then(|e| e.message.or(e.error))
        .filter(|m| !m.trim().is_empty());

    match server_message {
        Some(message) => Error::Http { status, message },
        None => Error::from_status(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            ApiClient::from_reqwest("https://api.example.com/backend", reqwest::Client::new())
                .expect("client");
        assert_eq!(client.base_url().as_str(), "https://api.example.com/backend/");
        assert_eq!(
            client.url(&["api", "services"]).as_str(),
            "https://api.example.com/backend/api/services"
        );
    }

    #[test]
    fn slugs_are_percent_encoded() {
        let client =
            ApiClient::from_reqwest("http://localhost:5000", reqwest::Client::new()).expect("client");
        let url = client.url(&["api", "v2", "blogs", "a b/c"]);
        assert_eq!(url.path(), "/api/v2/blogs/a%20b%2Fc");
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(ApiClient::from_reqwest("mailto:dev@example.com", reqwest::Client::new()).is_err());
        assert!(ApiClient::from_reqwest("not a url", reqwest::Client::new()).is_err());
    }

    #[test]
    fn error_prefers_server_message() {
        let err = parse_error(400, r#"{"message":"Title is required"}"#);
        assert_eq!(err.to_string(), "Title is required");
        let err = parse_error(500, r#"{"error":"boom"}"#);
        assert_eq!(err.to_string(), "boom");
        let err = parse_error(503, "<html>down</html>");
        assert_eq!(err.to_string(), "HTTP error! status: 503");
        let err = parse_error(404, r#"{"message":""}"#);
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }
}
