//! View-state controllers between `yogi-api` and front ends (the `yogi` CLI).
//!
//! - **[`Site`]**: facade bundling the backend client and the admin
//!   session; hands out controllers.
//!
//! - **[`BlogListController`]**: listing page state published on a `watch`
//!   channel, debounced search with stale-response protection, and the
//!   featured/regular partition.
//!
//! - **[`BlogDetailController`]** and **[`BlogEditor`]**: single post view
//!   and admin create/update/delete.
//!
//! - **[`analytics`]**: services x projects fan-out with per-service failure
//!   isolation and derived dashboard statistics.
//!
//! - **[`AdminSession`]**: persisted admin flag gating the editor. Not a
//!   security boundary.
//!
//! Controllers are generic over [`SiteApi`] so tests can substitute an
//! in-process backend.

pub mod analytics;
pub mod api;
pub mod blog;
pub mod config;
pub mod contact;
pub mod editor;
pub mod error;
pub mod session;
pub mod site;

// ── Primary re-exports ──────────────────────────────────────────────
pub use analytics::{
    ANALYTICS_ERROR_MESSAGE, AggregatedProjectStats, AnalyticsController, AnalyticsState,
    MediaBreakdown, PALETTE, ProjectAnalytics, RECENT_LIMIT, RecentProject, ServiceProjectCount,
    TaggedProject, compute_project_stats, load_project_analytics, service_color,
};
pub use api::SiteApi;
pub use blog::{
    BlogDetailController, BlogListController, BlogListView, DETAIL_ERROR_MESSAGE, DetailState,
    LIST_ERROR_MESSAGE, ListState, NOT_FOUND_MESSAGE, SEARCH_ERROR_MESSAGE, SearchState,
};
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_SEARCH_DEBOUNCE, TlsVerification};
pub use contact::{submit_contact, validate_contact};
pub use editor::BlogEditor;
pub use error::{CoreError, INVALID_PASSWORD_MESSAGE};
pub use session::{ADMIN_PASSWORD, AdminSession, MemorySessionStore, SessionStore};
pub use site::Site;

// Wire types consumers need without depending on yogi-api directly.
pub use yogi_api::{
    Blog, BlogDraft, BlogPage, BlogStatus, ContactForm, ContactResponse, ImageFile, Pagination,
    Project, SEARCH_PAGE_LIMIT, Service,
};
