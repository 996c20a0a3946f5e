//! # Pagecraft Workspace
//!
//! The serving layer tying the core together: an in-memory page store
//! (single writer, many polling readers), the HTTP routes for the
//! authoring, preview, and public surfaces, the store-backed fetcher the
//! sync client polls through, and reference implementations of the
//! external collaborator seams (asset uploads, form submissions).

pub mod collaborators;
pub mod fetcher;
pub mod server;
pub mod state;

pub use collaborators::{
    AssetError, AssetStore, AssetUrl, FormSink, LocalAssetStore, MemoryFormSink,
    SubmissionReceipt, SubmitError,
};
pub use fetcher::StoreFetcher;
pub use server::{router, AppState};
pub use state::{BlockValidation, NewPage, PageFilter, PageStore, StoreError, UpdatePage};
