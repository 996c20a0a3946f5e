use crate::content;
use crate::errors::EngineError;
use crate::history::ContentHistory;
use chrono::{DateTime, Utc};
use pagecraft_blocks::{BlockRegistry, VNode, Viewport};
use pagecraft_common::IdGenerator;
use pagecraft_page::{is_valid_slug, Block, BlockKind, Page};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content edits an authoring surface can apply to a document.
///
/// Index-pair reordering is the whole contract with drag handling: the
/// gesture recognizer lives outside the engine and only its before/after
/// indices arrive here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum EditOp {
    InsertBlock { kind: BlockKind, at_index: usize },
    RemoveBlock { id: String },
    ReorderBlock { from_index: usize, to_index: usize },
    UpdateBlockConfig { id: String, config: Value },
}

/// Metadata fields an operator can change alongside content. Only the
/// fields present are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct MetadataPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub og_image: Option<String>,
}

/// Editable page wrapper: applies operations in call order, keeps a
/// local version counter, tracks dirtiness against the persisted copy,
/// and records undo history.
#[derive(Debug)]
pub struct PageDocument {
    pub page: Page,

    /// Increments on each applied edit; local to this document instance,
    /// unlike `page.updated_at` which travels with the persisted page.
    pub version: u64,

    dirty: bool,
    ids: IdGenerator,
    history: ContentHistory,
}

impl PageDocument {
    pub fn new(page: Page) -> Self {
        let mut ids = IdGenerator::new(&page.slug);
        ids.resume_after(page.content.iter().map(|b| b.id.as_str()));

        Self {
            page,
            version: 0,
            dirty: false,
            ids,
            history: ContentHistory::new(),
        }
    }

    /// Apply one content edit. Edits that resolve to no change (removing
    /// an absent id, reordering in place) leave the version marker and
    /// history untouched.
    pub fn apply(&mut self, op: EditOp, registry: &BlockRegistry, now: DateTime<Utc>) {
        let before = self.page.content.clone();

        let next = match op {
            EditOp::InsertBlock { kind, at_index } => {
                content::insert_block(&before, registry, &kind, at_index, &mut self.ids)
            }
            EditOp::RemoveBlock { id } => content::remove_block(&before, &id),
            EditOp::ReorderBlock {
                from_index,
                to_index,
            } => content::reorder_block(&before, from_index, to_index),
            EditOp::UpdateBlockConfig { id, config } => {
                content::update_block_config(&before, &id, config)
            }
        };

        if next == before {
            return;
        }

        self.history.record(before);
        self.commit_content(next, now);
    }

    pub fn undo(&mut self, now: DateTime<Utc>) -> bool {
        let current = self.page.content.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.commit_content(previous, now);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self, now: DateTime<Utc>) -> bool {
        let current = self.page.content.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.commit_content(next, now);
                true
            }
            None => false,
        }
    }

    /// Apply a metadata patch. A slug change is validated before it
    /// lands; everything else is passthrough.
    pub fn set_metadata(
        &mut self,
        patch: MetadataPatch,
        now: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        if let Some(slug) = &patch.slug {
            if !is_valid_slug(slug) {
                return Err(EngineError::InvalidSlug(slug.clone()));
            }
        }

        if let Some(slug) = patch.slug {
            self.page.slug = slug;
        }
        if let Some(title) = patch.title {
            self.page.title = title;
        }
        if let Some(description) = patch.description {
            self.page.description = Some(description);
        }
        if let Some(meta_title) = patch.meta_title {
            self.page.meta_title = Some(meta_title);
        }
        if let Some(meta_description) = patch.meta_description {
            self.page.meta_description = Some(meta_description);
        }
        if let Some(og_image) = patch.og_image {
            self.page.og_image = Some(og_image);
        }

        self.bump(now);
        Ok(())
    }

    pub fn publish(&mut self, now: DateTime<Utc>) -> Result<(), EngineError> {
        self.page.publish(now)?;
        self.version += 1;
        self.dirty = true;
        Ok(())
    }

    pub fn archive(&mut self, now: DateTime<Utc>) -> Result<(), EngineError> {
        self.page.archive(now)?;
        self.version += 1;
        self.dirty = true;
        Ok(())
    }

    /// Render the whole page at a viewport, in content order.
    pub fn render(&self, registry: &BlockRegistry, viewport: Viewport, editable: bool) -> Vec<VNode> {
        content::render_all(&self.page.content, registry, viewport, editable)
    }

    /// A draft copy under a new identity: content and metadata carry
    /// over, lifecycle state does not.
    pub fn clone_as_draft(
        &self,
        id: impl Into<String>,
        slug: impl Into<String>,
        title: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Page, EngineError> {
        let slug = slug.into();
        if !is_valid_slug(&slug) {
            return Err(EngineError::InvalidSlug(slug));
        }

        let mut copy = Page::new(id, slug, title, now);
        copy.description = self.page.description.clone();
        copy.content = self.page.content.clone();
        copy.meta_title = self.page.meta_title.clone();
        copy.meta_description = self.page.meta_description.clone();
        copy.og_image = self.page.og_image.clone();
        Ok(copy)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called once the page has been handed to the save collaborator.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn commit_content(&mut self, next: Vec<Block>, now: DateTime<Utc>) {
        self.page.content = next;
        self.bump(now);
    }

    fn bump(&mut self, now: DateTime<Utc>) {
        self.page.touch(now);
        self.version += 1;
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_page::PageStatus;
    use serde_json::json;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn doc() -> PageDocument {
        PageDocument::new(Page::new("p1", "promo", "Promo", at(100)))
    }

    #[test]
    fn test_apply_bumps_version_and_marker() {
        let registry = BlockRegistry::with_builtin_blocks();
        let mut doc = doc();
        let marker = doc.page.updated_at;

        doc.apply(
            EditOp::InsertBlock {
                kind: BlockKind::Hero,
                at_index: 0,
            },
            &registry,
            at(200),
        );

        assert_eq!(doc.version, 1);
        assert!(doc.page.updated_at > marker);
        assert!(doc.is_dirty());
        assert_eq!(doc.page.content.len(), 1);
    }

    #[test]
    fn test_noop_edit_does_not_bump() {
        let registry = BlockRegistry::with_builtin_blocks();
        let mut doc = doc();

        doc.apply(
            EditOp::RemoveBlock {
                id: "ghost".to_string(),
            },
            &registry,
            at(200),
        );

        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_undo_restores_previous_content() {
        let registry = BlockRegistry::with_builtin_blocks();
        let mut doc = doc();

        doc.apply(
            EditOp::InsertBlock {
                kind: BlockKind::Hero,
                at_index: 0,
            },
            &registry,
            at(200),
        );
        let hero_id = doc.page.content[0].id.clone();

        doc.apply(
            EditOp::UpdateBlockConfig {
                id: hero_id,
                config: json!({ "title": "Changed" }),
            },
            &registry,
            at(300),
        );
        assert_eq!(doc.page.content[0].config["title"], "Changed");

        assert!(doc.undo(at(400)));
        assert_ne!(doc.page.content[0].config["title"], "Changed");

        assert!(doc.redo(at(500)));
        assert_eq!(doc.page.content[0].config["title"], "Changed");
    }

    #[test]
    fn test_metadata_patch_validates_slug() {
        let mut doc = doc();

        let err = doc
            .set_metadata(
                MetadataPatch {
                    slug: Some("Bad Slug!".to_string()),
                    ..Default::default()
                },
                at(200),
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidSlug(_)));

        doc.set_metadata(
            MetadataPatch {
                title: Some("Summer Promo".to_string()),
                slug: Some("summer-promo".to_string()),
                ..Default::default()
            },
            at(300),
        )
        .unwrap();
        assert_eq!(doc.page.slug, "summer-promo");
        assert_eq!(doc.version, 1);
    }

    #[test]
    fn test_clone_as_draft_resets_lifecycle() {
        let registry = BlockRegistry::with_builtin_blocks();
        let mut doc = doc();
        doc.apply(
            EditOp::InsertBlock {
                kind: BlockKind::Hero,
                at_index: 0,
            },
            &registry,
            at(200),
        );
        doc.publish(at(300)).unwrap();

        let copy = doc
            .clone_as_draft("p2", "promo-copy", "Promo Copy", at(400))
            .unwrap();
        assert_eq!(copy.status, PageStatus::Draft);
        assert!(copy.published_at.is_none());
        assert_eq!(copy.content, doc.page.content);
        assert_eq!(copy.slug, "promo-copy");
    }

    #[test]
    fn test_fresh_ids_skip_persisted_ones() {
        let registry = BlockRegistry::with_builtin_blocks();
        let mut page = Page::new("p1", "promo", "Promo", at(100));
        let seed = IdGenerator::new("promo").seed().to_string();
        page.content.push(Block::new(
            format!("hero-{seed}-3"),
            BlockKind::Hero,
            json!({}),
        ));

        let mut doc = PageDocument::new(page);
        doc.apply(
            EditOp::InsertBlock {
                kind: BlockKind::Faq,
                at_index: 1,
            },
            &registry,
            at(200),
        );

        let ids: Vec<_> = doc.page.content.iter().map(|b| b.id.clone()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids[1].ends_with("-4"), "expected counter past persisted ids, got {}", ids[1]);
    }
}
