//! In-process backend for controller tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;
use yogi_api::{
    Blog, BlogDraft, BlogPage, ContactForm, ContactResponse, Error, Project, Service,
};
use yogi_core::SiteApi;

pub fn blog(id: i64, title: &str, featured: bool) -> Blog {
    serde_json::from_value(json!({
        "id": id,
        "title": title,
        "slug": title.to_lowercase().replace(' ', "-"),
        "content": format!("{title} body"),
        "author_name": "Yogineers",
        "likes_count": 3,
        "is_featured": u8::from(featured)
    }))
    .expect("valid blog fixture")
}

#[derive(Default)]
pub struct FakeSite {
    pub blogs: Vec<Blog>,
    fail_list: bool,
    fail_search: AtomicBool,
    submit_delay: Duration,
    search_results: Mutex<HashMap<String, Vec<Blog>>>,
    search_delays: Mutex<HashMap<String, Duration>>,
    search_calls: Mutex<Vec<(String, Instant)>>,
    submits: AtomicUsize,
}

impl FakeSite {
    pub fn with_blogs(blogs: Vec<Blog>) -> Self {
        Self {
            blogs,
            ..Self::default()
        }
    }

    pub fn failing_list() -> Self {
        Self {
            fail_list: true,
            ..Self::default()
        }
    }

    pub fn failing_search(blogs: Vec<Blog>) -> Self {
        let site = Self::with_blogs(blogs);
        site.set_fail_search(true);
        site
    }

    pub fn with_submit_delay(delay: Duration) -> Self {
        Self {
            submit_delay: delay,
            ..Self::default()
        }
    }

    pub fn set_fail_search(&self, fail: bool) {
        self.fail_search.store(fail, Ordering::SeqCst);
    }

    pub fn search_result(&self, term: &str, matches: Vec<Blog>) {
        self.search_results
            .lock()
            .expect("lock")
            .insert(term.to_owned(), matches);
    }

    pub fn search_delay(&self, term: &str, delay: Duration) {
        self.search_delays
            .lock()
            .expect("lock")
            .insert(term.to_owned(), delay);
    }

    pub fn search_calls(&self) -> Vec<(String, Instant)> {
        self.search_calls.lock().expect("lock").clone()
    }

    pub fn submits(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }

    async fn submit(&self) -> Result<serde_json::Value, Error> {
        tokio::time::sleep(self.submit_delay).await;
        let n = self.submits.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(json!({ "success": true, "id": n }))
    }
}

impl SiteApi for FakeSite {
    async fn fetch_services(&self) -> Result<Vec<Service>, Error> {
        Ok(Vec::new())
    }

    async fn fetch_service_projects(&self, _service_id: i64) -> Result<Vec<Project>, Error> {
        Ok(Vec::new())
    }

    async fn fetch_blogs(&self) -> Result<BlogPage, Error> {
        if self.fail_list {
            return Err(Error::from_status(500));
        }
        Ok(BlogPage {
            data: self.blogs.clone(),
            pagination: None,
        })
    }

    async fn fetch_blog_by_slug(&self, slug: &str) -> Result<Blog, Error> {
        self.blogs
            .iter()
            .find(|b| b.slug == slug)
            .cloned()
            .ok_or_else(|| Error::from_status(404))
    }

    async fn fetch_blog_by_id(&self, id: i64) -> Result<Blog, Error> {
        self.blogs
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| Error::from_status(404))
    }

    async fn search_blogs(&self, term: &str, _page: u32, _limit: u32) -> Result<BlogPage, Error> {
        self.search_calls
            .lock()
            .expect("lock")
            .push((term.to_owned(), Instant::now()));
        let delay = self
            .search_delays
            .lock()
            .expect("lock")
            .get(term)
            .copied()
            .unwrap_or_default();
        tokio::time::sleep(delay).await;

        if self.fail_search.load(Ordering::SeqCst) {
            return Err(Error::from_status(500));
        }
        let data = self
            .search_results
            .lock()
            .expect("lock")
            .get(term)
            .cloned()
            .unwrap_or_default();
        Ok(BlogPage {
            data,
            pagination: None,
        })
    }

    async fn create_blog(&self, _draft: BlogDraft) -> Result<serde_json::Value, Error> {
        self.submit().await
    }

    async fn update_blog(&self, _id: i64, _draft: BlogDraft) -> Result<serde_json::Value, Error> {
        self.submit().await
    }

    async fn delete_blog(&self, _id: i64) -> Result<serde_json::Value, Error> {
        self.submit().await
    }

    async fn like_blog(&self, _id: i64) -> Result<serde_json::Value, Error> {
        Ok(json!({ "success": true }))
    }

    async fn submit_contact_form(&self, _form: &ContactForm) -> Result<ContactResponse, Error> {
        Ok(ContactResponse {
            success: true,
            message: Some("Thanks!".into()),
        })
    }
}
