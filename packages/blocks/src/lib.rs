//! # Pagecraft Blocks
//!
//! The block palette: registry, per-kind config schemas, renderers,
//! editor descriptors, the responsive resolver, and the counter
//! animation primitive.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ page: { id, type, config } block sequence   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ blocks: registry dispatch                   │
//! │  - hydrate raw config → typed schema        │
//! │  - render(config, viewport) → VNode         │
//! │  - edit(config) → EditorTree                │
//! │  - validate(config) → field issues          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ engine: ordered render of the whole page    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Purity Contract
//!
//! **INVARIANT: rendering is fully deterministic.**
//!
//! For any config + viewport, `render()` MUST produce identical output on
//! every invocation:
//!
//! - Same config → same VNode structure, byte-for-byte when serialized
//!   (attribute/style maps are ordered)
//! - No time, randomness, or environment dependence — the copyright year
//!   and counter values come from config and injected capabilities
//! - Unknown kinds degrade to a placeholder node, never an error
//!
//! This is what lets the authoring surface and a separately-running
//! preview surface render the same persisted page and agree on the
//! result, with no shared process.

pub mod animation;
pub mod blocks;
pub mod editor;
pub mod registry;
pub mod responsive;
pub mod vdom;

pub use animation::{Counter, CounterFrame, FrameClock, ManualClock, StaticVisibility, VisibilitySource, VISIBILITY_THRESHOLD};
pub use editor::{Control, EditorField, EditorTree, ValidationIssue};
pub use registry::{hydrate, BlockRegistry, BlockSpec, RegistryError};
pub use responsive::{resolve, ResolvedGrid, Viewport, MAX_COLUMNS};
pub use vdom::VNode;
