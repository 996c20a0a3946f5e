use crate::state::PageStore;
use pagecraft_page::Page;
use pagecraft_sync::{FetchError, PageFetcher};
use std::sync::Arc;

/// [`PageFetcher`] over the shared store. Preview surfaces poll through
/// this — the store is the persisted resource both sides agree on, and
/// this fetcher is their only read path into it.
#[derive(Clone)]
pub struct StoreFetcher {
    store: Arc<PageStore>,
}

impl StoreFetcher {
    pub fn new(store: Arc<PageStore>) -> Self {
        Self { store }
    }
}

impl PageFetcher for StoreFetcher {
    async fn fetch_page_by_slug(&self, slug: &str) -> Result<Page, FetchError> {
        self.store
            .get_by_slug(slug)
            .ok_or_else(|| FetchError::NotFound(slug.to_string()))
    }
}
