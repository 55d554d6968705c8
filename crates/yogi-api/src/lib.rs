// yogi-api: Async Rust client for the Yogineers site backend

pub mod client;
pub mod draft;
pub mod error;
pub mod models;
pub mod photos;
pub mod serde_helpers;
pub mod transport;

pub use client::{ApiClient, SEARCH_PAGE_LIMIT};
pub use draft::{BlogDraft, BlogStatus, ImageFile};
pub use error::Error;
pub use models::{Blog, BlogPage, ContactForm, ContactResponse, Pagination, Project, Service};
pub use photos::{PhotoDecodeError, decode_photos};
pub use transport::{TlsMode, TransportConfig};
