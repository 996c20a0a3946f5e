use chrono::Utc;
use pagecraft_blocks::{BlockRegistry, ValidationIssue};
use pagecraft_common::get_page_seed;
use pagecraft_engine::PageDocument;
use pagecraft_page::{is_valid_slug, Block, Page, PageStatus, StatusError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("page not found")]
    NotFound,

    #[error("slug already in use: {0}")]
    SlugTaken(String),

    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),

    #[error("content validation failed")]
    Validation(Vec<BlockValidation>),

    #[error("status error: {0}")]
    Status(#[from] StatusError),
}

/// Validation issues for one block, keyed by its stable id so the editor
/// can surface them inline on the right block.
#[derive(Debug, Clone, Serialize)]
pub struct BlockValidation {
    pub block_id: String,
    pub kind: String,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPage {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Vec<Block>,
}

/// Full save payload from the authoring surface. Only fields present are
/// applied; `content` replaces the whole sequence — the writer saves the
/// page as it observes it, last write wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdatePage {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub content: Option<Vec<Block>>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub og_image: Option<String>,
    pub status: Option<PageStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageFilter {
    pub status: Option<PageStatus>,
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// In-memory page store: the single source of truth both surfaces
/// observe. The authoring surface is the only writer; preview surfaces
/// read through [`crate::StoreFetcher`]. No compare-and-swap token
/// guards concurrent writers — last write wins by design.
pub struct PageStore {
    registry: Arc<BlockRegistry>,
    pages: RwLock<HashMap<String, Page>>,
}

impl PageStore {
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        Self {
            registry,
            pages: RwLock::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.registry
    }

    pub fn create(&self, new: NewPage) -> Result<Page, StoreError> {
        if !is_valid_slug(&new.slug) {
            return Err(StoreError::InvalidSlug(new.slug));
        }
        self.validate_content(&new.content)?;

        let mut pages = self.pages.write().unwrap();
        if pages.values().any(|p| p.slug == new.slug) {
            return Err(StoreError::SlugTaken(new.slug));
        }

        let id = format!("page-{}", get_page_seed(&new.slug));
        let mut page = Page::new(id.clone(), new.slug, new.title, Utc::now());
        page.description = new.description;
        page.content = new.content;

        info!(page_id = %page.id, slug = %page.slug, "page created");
        pages.insert(id, page.clone());
        Ok(page)
    }

    pub fn get_by_id(&self, id: &str) -> Option<Page> {
        self.pages.read().unwrap().get(id).cloned()
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<Page> {
        self.pages
            .read()
            .unwrap()
            .values()
            .find(|p| p.slug == slug)
            .cloned()
    }

    /// Filtered listing, newest first.
    pub fn list(&self, filter: &PageFilter) -> Vec<Page> {
        let pages = self.pages.read().unwrap();

        let mut matches: Vec<Page> = pages
            .values()
            .filter(|p| filter.status.map_or(true, |s| p.status == s))
            .filter(|p| match &filter.search {
                Some(term) => {
                    let term = term.to_lowercase();
                    p.title.to_lowercase().contains(&term)
                        || p.slug.contains(&term)
                        || p.description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(&term))
                }
                None => true,
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        let offset = filter.offset.unwrap_or(0).min(matches.len());
        let mut matches = matches.split_off(offset);
        if let Some(limit) = filter.limit {
            matches.truncate(limit);
        }
        matches
    }

    /// Apply a save. Content is validated against the registry before
    /// anything lands: one invalid block rejects the save with its
    /// field-local issues and the stored page is untouched.
    pub fn update(&self, id: &str, update: UpdatePage) -> Result<Page, StoreError> {
        if let Some(content) = &update.content {
            self.validate_content(content)?;
        }

        let mut pages = self.pages.write().unwrap();

        if let Some(slug) = &update.slug {
            if !is_valid_slug(slug) {
                return Err(StoreError::InvalidSlug(slug.clone()));
            }
            if pages.values().any(|p| p.slug == *slug && p.id != id) {
                return Err(StoreError::SlugTaken(slug.clone()));
            }
        }

        let page = pages.get_mut(id).ok_or(StoreError::NotFound)?;
        let now = Utc::now();

        if let Some(status) = update.status {
            page.set_status(status, now)?;
        }
        if let Some(title) = update.title {
            page.title = title;
        }
        if let Some(slug) = update.slug {
            page.slug = slug;
        }
        if let Some(description) = update.description {
            page.description = Some(description);
        }
        if let Some(content) = update.content {
            page.content = content;
        }
        if let Some(meta_title) = update.meta_title {
            page.meta_title = Some(meta_title);
        }
        if let Some(meta_description) = update.meta_description {
            page.meta_description = Some(meta_description);
        }
        if let Some(og_image) = update.og_image {
            page.og_image = Some(og_image);
        }

        page.touch(now);
        Ok(page.clone())
    }

    pub fn publish(&self, id: &str) -> Result<Page, StoreError> {
        let mut pages = self.pages.write().unwrap();
        let page = pages.get_mut(id).ok_or(StoreError::NotFound)?;
        page.publish(Utc::now())?;
        info!(page_id = %page.id, slug = %page.slug, "page published");
        Ok(page.clone())
    }

    pub fn archive(&self, id: &str) -> Result<Page, StoreError> {
        let mut pages = self.pages.write().unwrap();
        let page = pages.get_mut(id).ok_or(StoreError::NotFound)?;
        page.archive(Utc::now())?;
        info!(page_id = %page.id, slug = %page.slug, "page archived");
        Ok(page.clone())
    }

    /// Duplicate a page as a fresh draft under a new title and slug.
    pub fn clone_page(&self, id: &str, title: &str, slug: &str) -> Result<Page, StoreError> {
        let original = self.get_by_id(id).ok_or(StoreError::NotFound)?;

        let copy = PageDocument::new(original)
            .clone_as_draft(
                format!("page-{}", get_page_seed(slug)),
                slug,
                title,
                Utc::now(),
            )
            .map_err(|_| StoreError::InvalidSlug(slug.to_string()))?;

        let mut pages = self.pages.write().unwrap();
        if pages.values().any(|p| p.slug == copy.slug) {
            return Err(StoreError::SlugTaken(copy.slug));
        }
        pages.insert(copy.id.clone(), copy.clone());
        Ok(copy)
    }

    fn validate_content(&self, content: &[Block]) -> Result<(), StoreError> {
        let failures: Vec<BlockValidation> = content
            .iter()
            .filter_map(|block| {
                let issues = self.registry.validate_block(block);
                (!issues.is_empty()).then(|| BlockValidation {
                    block_id: block.id.clone(),
                    kind: block.kind.as_str().to_string(),
                    issues,
                })
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(failures))
        }
    }
}
