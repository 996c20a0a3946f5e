use crate::editor::{EditorTree, ValidationIssue};
use crate::responsive::Viewport;
use crate::vdom::VNode;
use pagecraft_page::{Block, BlockKind};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("duplicate block kind registered: {0}")]
    DuplicateKind(String),
}

/// One entry in the block palette.
///
/// `render` and `edit` must be pure in their inputs: the authoring
/// surface and a read-only preview surface call the identical code path
/// and must see identical trees.
pub trait BlockSpec: Send + Sync {
    fn kind(&self) -> BlockKind;

    /// Config a freshly inserted block of this kind starts with.
    fn default_config(&self) -> Value;

    fn render(&self, config: &Value, viewport: Viewport, editable: bool) -> VNode;

    fn edit(&self, config: &Value) -> EditorTree;

    fn validate(&self, _config: &Value) -> Vec<ValidationIssue> {
        Vec::new()
    }
}

/// Registry mapping block kind tags to their specs.
///
/// Built once at startup and threaded through the engine and surfaces as
/// an explicit dependency; tests supply a minimal registry the same way.
pub struct BlockRegistry {
    specs: HashMap<String, Arc<dyn BlockSpec>>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            specs: HashMap::new(),
        }
    }

    /// Registry pre-loaded with the full built-in palette.
    pub fn with_builtin_blocks() -> Self {
        let mut registry = Self::new();
        for spec in crate::blocks::builtin_specs() {
            registry
                .register(spec)
                .expect("builtin block kinds are distinct");
        }
        registry
    }

    /// Duplicate kinds fail here, at load time, not per request.
    pub fn register(&mut self, spec: Arc<dyn BlockSpec>) -> Result<(), RegistryError> {
        let tag = spec.kind().as_str().to_string();
        if self.specs.contains_key(&tag) {
            return Err(RegistryError::DuplicateKind(tag));
        }
        self.specs.insert(tag, spec);
        Ok(())
    }

    pub fn get(&self, kind: &BlockKind) -> Option<&Arc<dyn BlockSpec>> {
        self.specs.get(kind.as_str())
    }

    pub fn contains(&self, kind: &BlockKind) -> bool {
        self.specs.contains_key(kind.as_str())
    }

    pub fn default_config(&self, kind: &BlockKind) -> Option<Value> {
        self.get(kind).map(|spec| spec.default_config())
    }

    /// Kinds in palette order (registration order is not meaningful).
    pub fn kinds(&self) -> Vec<BlockKind> {
        let mut tags: Vec<&String> = self.specs.keys().collect();
        tags.sort();
        tags.iter().map(|t| BlockKind::from(t.as_str())).collect()
    }

    /// Render one block. An unregistered kind degrades to a placeholder
    /// node so a single broken block never takes down the page.
    pub fn render_block(&self, block: &Block, viewport: Viewport, editable: bool) -> VNode {
        let Some(spec) = self.get(&block.kind) else {
            warn!(kind = %block.kind, block_id = %block.id, "rendering placeholder for unsupported block kind");
            return unsupported_placeholder(&block.kind)
                .with_attr("data-block-id", block.id.clone());
        };

        let node = spec
            .render(&block.config, viewport, editable)
            .with_attr("data-block-id", block.id.clone())
            .with_attr("data-block-kind", block.kind.as_str());

        if editable {
            node.with_attr("data-block-editable", "true")
        } else {
            node
        }
    }

    pub fn edit_block(&self, block: &Block) -> Option<EditorTree> {
        self.get(&block.kind).map(|spec| spec.edit(&block.config))
    }

    /// Field-local issues for one block's config. Unregistered kinds
    /// report nothing: there is no schema to check against, and the
    /// render path already degrades gracefully.
    pub fn validate_block(&self, block: &Block) -> Vec<ValidationIssue> {
        match self.get(&block.kind) {
            Some(spec) => spec.validate(&block.config),
            None => Vec::new(),
        }
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::with_builtin_blocks()
    }
}

fn unsupported_placeholder(kind: &BlockKind) -> VNode {
    VNode::element("div")
        .with_class("block-unsupported")
        .with_child(VNode::text(format!("Unsupported block type: {kind}")))
}

/// Deserialize a raw config into its typed schema. Missing fields take
/// the schema's defaults; a config that does not deserialize at all falls
/// back to the full default rather than failing the render.
pub fn hydrate<T: DeserializeOwned + Default>(config: &Value) -> T {
    serde_json::from_value(config.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NullSpec(BlockKind);

    impl BlockSpec for NullSpec {
        fn kind(&self) -> BlockKind {
            self.0.clone()
        }
        fn default_config(&self) -> Value {
            json!({})
        }
        fn render(&self, _config: &Value, _viewport: Viewport, _editable: bool) -> VNode {
            VNode::element("div")
        }
        fn edit(&self, _config: &Value) -> EditorTree {
            EditorTree::default()
        }
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = BlockRegistry::new();
        registry.register(Arc::new(NullSpec(BlockKind::Hero))).unwrap();

        let err = registry
            .register(Arc::new(NullSpec(BlockKind::Hero)))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateKind("hero".to_string()));
    }

    #[test]
    fn test_builtin_palette_is_complete() {
        let registry = BlockRegistry::with_builtin_blocks();
        for kind in BlockKind::BUILTIN {
            assert!(registry.contains(&kind), "missing builtin: {kind}");
        }
    }

    #[test]
    fn test_unknown_kind_renders_placeholder() {
        let registry = BlockRegistry::new();
        let block = Block::new("x-1", BlockKind::from("countdown"), json!({}));

        let node = registry.render_block(&block, Viewport::Desktop, false);
        assert_eq!(node.attr("class"), Some("block-unsupported"));
        assert_eq!(node.attr("data-block-id"), Some("x-1"));
        assert!(node.text_content().contains("countdown"));
    }

    #[test]
    fn test_editable_marker() {
        let mut registry = BlockRegistry::new();
        registry.register(Arc::new(NullSpec(BlockKind::Hero))).unwrap();
        let block = Block::new("h-1", BlockKind::Hero, json!({}));

        let editable = registry.render_block(&block, Viewport::Desktop, true);
        assert_eq!(editable.attr("data-block-editable"), Some("true"));

        let public = registry.render_block(&block, Viewport::Desktop, false);
        assert_eq!(public.attr("data-block-editable"), None);
    }

    #[test]
    fn test_hydrate_falls_back_to_default() {
        #[derive(serde::Deserialize, Default, PartialEq, Debug)]
        #[serde(default)]
        struct Cfg {
            title: String,
            columns: u8,
        }

        // Partial config keeps provided fields
        let partial: Cfg = hydrate(&json!({ "title": "Hi" }));
        assert_eq!(partial.title, "Hi");
        assert_eq!(partial.columns, 0);

        // Structurally invalid config falls back wholesale
        let broken: Cfg = hydrate(&json!({ "columns": "three" }));
        assert_eq!(broken, Cfg::default());
    }
}
