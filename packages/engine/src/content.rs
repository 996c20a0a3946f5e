//! Copy-on-write operations over a page's block sequence.
//!
//! Every operation takes the current sequence by reference and returns a
//! fresh `Vec<Block>` — callers diff, snapshot, or discard results
//! without the source ever mutating under them. Operations that target a
//! missing block id are silent no-ops: callers are expected to only act
//! on blocks they currently observe, and a stale id simply means the
//! observation lost a race with another edit.

use pagecraft_blocks::{BlockRegistry, VNode, Viewport};
use pagecraft_common::IdGenerator;
use pagecraft_page::{Block, BlockKind};
use serde_json::Value;
use tracing::warn;

/// Insert a freshly-created block of `kind` at `at_index` (clamped to
/// `[0, len]`). The block starts from the registry's default config for
/// that kind; inserting a kind the registry does not know is a logged
/// no-op, since there is no factory to build its config.
pub fn insert_block(
    content: &[Block],
    registry: &BlockRegistry,
    kind: &BlockKind,
    at_index: usize,
    ids: &mut IdGenerator,
) -> Vec<Block> {
    let Some(config) = registry.default_config(kind) else {
        warn!(kind = %kind, "insert ignored: kind is not registered");
        return content.to_vec();
    };

    let block = Block::new(ids.new_id(kind.as_str()), kind.clone(), config);
    let at_index = at_index.min(content.len());

    let mut next = content.to_vec();
    next.insert(at_index, block);
    next
}

/// Remove the block with `id`. Idempotent: removing an absent id returns
/// the sequence unchanged.
pub fn remove_block(content: &[Block], id: &str) -> Vec<Block> {
    content.iter().filter(|b| b.id != id).cloned().collect()
}

/// Move exactly one block from `from_index` to `to_index`, preserving
/// every other relative order. Indices clamp to the valid range; a
/// self-move is a no-op.
pub fn reorder_block(content: &[Block], from_index: usize, to_index: usize) -> Vec<Block> {
    let mut next = content.to_vec();
    if next.is_empty() {
        return next;
    }

    let from_index = from_index.min(next.len() - 1);
    let to_index = to_index.min(next.len() - 1);
    if from_index == to_index {
        return next;
    }

    let block = next.remove(from_index);
    next.insert(to_index, block);
    next
}

/// Replace the config of the block with `id` wholesale — no field-level
/// merge. Silent no-op when the id is absent.
pub fn update_block_config(content: &[Block], id: &str, config: Value) -> Vec<Block> {
    content
        .iter()
        .map(|b| {
            if b.id == id {
                Block::new(b.id.clone(), b.kind.clone(), config.clone())
            } else {
                b.clone()
            }
        })
        .collect()
}

/// Render the sequence in order. Unregistered kinds come back as
/// placeholder nodes; one broken block never fails the page.
pub fn render_all(
    content: &[Block],
    registry: &BlockRegistry,
    viewport: Viewport,
    editable: bool,
) -> Vec<VNode> {
    content
        .iter()
        .map(|b| registry.render_block(b, viewport, editable))
        .collect()
}
