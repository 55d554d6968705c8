//! Blog view controllers: the listing page (with debounced search) and the
//! single-post page.

mod detail;
mod list;

pub use detail::{BlogDetailController, DETAIL_ERROR_MESSAGE, DetailState, NOT_FOUND_MESSAGE};
pub use list::{
    BlogListController, BlogListView, LIST_ERROR_MESSAGE, ListState, SEARCH_ERROR_MESSAGE,
    SearchState,
};
