//! # Pagecraft Sync
//!
//! Live-preview synchronization client.
//!
//! A preview surface runs in a separate browsing context from the
//! editor: no shared memory, only the persisted page resource. This
//! crate polls that resource by slug, detects change through the
//! `updated_at` version marker, and hands the full fetched page to the
//! surface on change — never a partial diff.
//!
//! This is a deliberate polling design, not a push channel. The
//! staleness a preview can exhibit is bounded by the polling interval
//! plus one fetch round-trip; anything fresher needs a different
//! transport and a different contract.

pub mod client;

pub use client::{AutoSync, FetchError, PageFetcher};
