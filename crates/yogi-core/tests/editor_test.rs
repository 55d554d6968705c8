#![allow(clippy::unwrap_used)]
// Admin editor and post detail against the in-process backend.

mod common;

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tokio::time::sleep;
use yogi_core::{
    AdminSession, BlogDetailController, BlogDraft, BlogEditor, CoreError, DetailState,
    NOT_FOUND_MESSAGE, Site,
};

use common::{FakeSite, blog};

fn admin() -> AdminSession {
    let session = AdminSession::in_memory();
    session
        .login(&SecretString::from("1221".to_owned()))
        .unwrap();
    session
}

fn draft(title: &str) -> BlogDraft {
    BlogDraft {
        title: title.into(),
        content: "Body".into(),
        author_name: "Yogineers".into(),
        ..BlogDraft::default()
    }
}

// ── Editor ──────────────────────────────────────────────────────────

#[tokio::test]
async fn editor_requires_admin() {
    let fake = Arc::new(FakeSite::default());
    let result = BlogEditor::mount(fake, AdminSession::in_memory());
    assert!(matches!(result, Err(CoreError::AdminRequired)));
}

#[tokio::test]
async fn editor_rejects_missing_required_fields() {
    let fake = Arc::new(FakeSite::default());
    let editor = BlogEditor::mount(fake.clone(), admin()).unwrap();

    let err = editor
        .create(BlogDraft {
            title: "Only a title".into(),
            ..BlogDraft::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::ValidationFailed { .. }));
    assert!(err.to_string().contains("content"));
    assert_eq!(fake.submits(), 0);
}

#[tokio::test(start_paused = true)]
async fn second_submit_is_rejected_while_first_in_flight() {
    let fake = Arc::new(FakeSite::with_submit_delay(Duration::from_millis(200)));
    let editor = BlogEditor::mount(fake.clone(), admin()).unwrap();

    let first = {
        let editor = editor.clone();
        tokio::spawn(async move { editor.create(draft("First")).await })
    };
    sleep(Duration::from_millis(10)).await;

    assert!(editor.is_submitting());
    let second = editor.update(7, draft("Second")).await;
    assert!(matches!(second, Err(CoreError::SubmissionInFlight)));

    first.await.unwrap().unwrap();
    assert!(!editor.is_submitting());

    editor.delete(7).await.unwrap();
    assert_eq!(fake.submits(), 2);
}

#[tokio::test]
async fn logout_locks_an_open_editor() {
    let fake = Arc::new(FakeSite::default());
    let session = admin();
    let editor = BlogEditor::mount(fake, session.clone()).unwrap();

    session.logout().unwrap();

    let err = editor.delete(1).await.unwrap_err();
    assert!(matches!(err, CoreError::AdminRequired));
}

#[tokio::test]
async fn site_hands_out_editor_only_to_admins() {
    let fake = Arc::new(FakeSite::with_blogs(vec![blog(4, "Edit Me", false)]));
    let site = Site::with_api(fake, AdminSession::in_memory());
    assert!(matches!(site.blog_editor(), Err(CoreError::AdminRequired)));

    site.session()
        .login(&SecretString::from("1221".to_owned()))
        .unwrap();
    let editor = site.blog_editor().unwrap();
    let loaded = editor.load_for_edit(4).await.unwrap();
    assert_eq!(loaded.title, "Edit Me");
}

// ── Detail ──────────────────────────────────────────────────────────

#[tokio::test]
async fn detail_loads_by_slug_and_likes() {
    let fake = Arc::new(FakeSite::with_blogs(vec![blog(9, "Edge Cases", false)]));
    let detail = BlogDetailController::new(fake);

    let post = detail.load("edge-cases").await.unwrap();
    assert_eq!(post.id, 9);

    let likes = detail.like().await.unwrap();
    assert_eq!(likes, 4);
    match detail.state() {
        DetailState::Loaded(blog) => assert_eq!(blog.likes_count, 4),
        other => panic!("expected loaded, got {other:?}"),
    }
}

#[tokio::test]
async fn detail_reports_missing_post_and_retries() {
    let fake = Arc::new(FakeSite::with_blogs(vec![blog(9, "Edge Cases", false)]));
    let detail = BlogDetailController::new(fake);

    let err = detail.load("nope").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(detail.state(), DetailState::Error(NOT_FOUND_MESSAGE.into()));

    assert!(detail.retry().await.is_err());
    assert!(matches!(detail.like().await, Err(CoreError::ValidationFailed { .. })));
}

#[tokio::test]
async fn retry_without_prior_load_fails() {
    let detail = BlogDetailController::new(Arc::new(FakeSite::default()));
    assert!(detail.retry().await.is_err());
    assert_eq!(detail.state(), DetailState::Idle);
}
