#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use yogi_api::{ApiClient, BlogDraft, ContactForm, Error, ImageFile};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn blog_json(id: i64, slug: &str, featured: u8) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Post {id}"),
        "subtitle": null,
        "slug": slug,
        "content": "<p>Body</p>",
        "excerpt": "Body",
        "author_name": "Asha",
        "featured_image": "/uploads/cover.png",
        "banner_image": null,
        "images": "[\"/uploads/a.png\"]",
        "reading_time": 3,
        "word_count": 640,
        "status": "published",
        "published_at": "2024-06-01T08:00:00.000Z",
        "views_count": 12,
        "likes_count": 4,
        "category": "Engineering",
        "tags": ["rust", "web"],
        "is_featured": featured
    })
}

// ── Services & projects ─────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_services() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Web Development", "description": "Sites", "icon": "web.svg", "link": "/services/web" },
            { "id": 2, "name": "Mobile Apps", "description": "Apps", "icon": "mobile.svg", "link": "/services/mobile" }
        ])))
        .mount(&server)
        .await;

    let services = client.fetch_services().await.unwrap();

    assert_eq!(services.len(), 2);
    assert_eq!(services[0].name, "Web Development");
    assert_eq!(services[0].icon_ref.as_deref(), Some("web.svg"));
    assert_eq!(services[1].link.as_deref(), Some("/services/mobile"));
}

#[tokio::test]
async fn test_fetch_service_projects() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/services/3/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 10,
            "service_id": 3,
            "name": "Clinic Portal",
            "video": "/uploads/demo.mp4",
            "photos": "[\"/uploads/1.png\",\"/uploads/2.png\"]",
            "thumbnail": null,
            "description": "Appointments",
            "created_at": "2024-02-10 12:00:00"
        }])))
        .mount(&server)
        .await;

    let projects = client.fetch_service_projects(3).await.unwrap();

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].service_id, 3);
    assert_eq!(projects[0].photo_list().len(), 2);
    assert!(projects[0].has_video());
    assert!(!projects[0].has_thumbnail());
}

#[tokio::test]
async fn test_projects_with_odd_timestamps_still_decode() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/services/4/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "service_id": 4, "name": "Dated", "created_at": "2024-05-01" },
            { "id": 2, "service_id": 4, "name": "Garbled", "created_at": "sometime in May" },
            { "id": 3, "service_id": 4, "name": "Null", "created_at": null }
        ])))
        .mount(&server)
        .await;

    let projects = client.fetch_service_projects(4).await.unwrap();

    assert_eq!(projects.len(), 3);
    assert_eq!(
        projects[0].created_at.map(|d| d.to_rfc3339()),
        Some("2024-05-01T00:00:00+00:00".to_owned())
    );
    assert_eq!(projects[1].created_at, None);
    assert_eq!(projects[2].created_at, None);
}

// ── Blog reads ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_null_counters_and_text_decode_as_defaults() {
    let (server, client) = setup().await;

    let mut sparse = blog_json(5, "sparse", 0);
    sparse["likes_count"] = json!(null);
    sparse["views_count"] = json!(null);
    sparse["content"] = json!(null);
    sparse["author_name"] = json!(null);

    Mock::given(method("GET"))
        .and(path("/api/v2/blogs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [blog_json(1, "hello", 1), sparse]
        })))
        .mount(&server)
        .await;

    let page = client.fetch_blogs().await.unwrap();

    assert_eq!(page.data.len(), 2);
    let sparse = &page.data[1];
    assert_eq!(sparse.likes_count, 0);
    assert_eq!(sparse.views_count, 0);
    assert_eq!(sparse.content, "");
    assert_eq!(sparse.author_name, "");
}

#[tokio::test]
async fn test_fetch_blogs_first_page() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/blogs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [blog_json(1, "hello", 1), blog_json(2, "world", 0)],
            "pagination": { "page": 1, "limit": 10, "total": 2, "totalPages": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.fetch_blogs().await.unwrap();

    assert_eq!(page.data.len(), 2);
    assert!(page.data[0].is_featured());
    assert_eq!(page.data[0].images, vec!["/uploads/a.png"]);
    assert_eq!(page.data[1].tags, vec!["rust", "web"]);
    assert!(!page.is_truncated());
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_slug_and_id_resolve_to_same_record() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/blogs/id/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(blog_json(42, "rust-at-yogineers", 0)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/blogs/rust-at-yogineers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(blog_json(42, "rust-at-yogineers", 0)))
        .mount(&server)
        .await;

    let by_id = client.fetch_blog_by_id(42).await.unwrap();
    let by_slug = client.fetch_blog_by_slug(&by_id.slug).await.unwrap();

    assert_eq!(by_slug, by_id);
}

#[tokio::test]
async fn test_blog_not_found_carries_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/blogs/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Blog not found" })))
        .mount(&server)
        .await;

    let err = client.fetch_blog_by_slug("missing").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Blog not found");
}

#[tokio::test]
async fn test_search_blogs_sends_term_and_paging() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/blogs/search"))
        .and(query_param("q", "react native"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [blog_json(5, "react-native-tips", 0)],
            "pagination": { "page": 1, "limit": 10, "total": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client
        .search_blogs("react native", 1, yogi_api::SEARCH_PAGE_LIMIT)
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].slug, "react-native-tips");
}

// ── Blog writes ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_blog_sends_multipart() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/blogs"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("Shipping Rust"))
        .and(body_string_contains("filename=\"cover.png\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 99, "slug": "shipping-rust" })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = BlogDraft {
        title: "Shipping Rust".into(),
        content: "Body".into(),
        author_name: "Asha".into(),
        featured_image: Some(ImageFile {
            file_name: "cover.png".into(),
            bytes: vec![1, 2, 3],
            mime: Some("image/png".into()),
        }),
        ..BlogDraft::default()
    };
    let record = client.create_blog(draft).await.unwrap();

    assert_eq!(record["id"], 99);
}

#[tokio::test]
async fn test_update_blog_surfaces_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v2/blogs/7"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "message": "Slug already taken" })))
        .mount(&server)
        .await;

    let draft = BlogDraft {
        title: "T".into(),
        content: "C".into(),
        author_name: "A".into(),
        ..BlogDraft::default()
    };
    let err = client.update_blog(7, draft).await.unwrap_err();

    match err {
        Error::Http { status, ref message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Slug already taken");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_and_like() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/blogs/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/blogs/7/like"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "likes_count": 5 })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.delete_blog(7).await.unwrap()["success"], true);
    assert_eq!(client.like_blog(7).await.unwrap()["likes_count"], 5);
}

// ── Contact ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_submit_contact_form() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/contact/submit"))
        .and(body_json(json!({
            "name": "Ravi",
            "email": "ravi@example.com",
            "subject": "Quote",
            "message": "Need an app"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Thanks, we'll be in touch"
        })))
        .mount(&server)
        .await;

    let resp = client
        .submit_contact_form(&ContactForm {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            subject: "Quote".into(),
            message: "Need an app".into(),
        })
        .await
        .unwrap();

    assert!(resp.success);
    assert_eq!(resp.message.as_deref(), Some("Thanks, we'll be in touch"));
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_non_2xx_without_body_uses_generic_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.fetch_services().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn test_invalid_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<!doctype html>"))
        .mount(&server)
        .await;

    let err = client.fetch_services().await.unwrap_err();

    match err {
        Error::Deserialization { ref body, .. } => assert_eq!(body, "<!doctype html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
