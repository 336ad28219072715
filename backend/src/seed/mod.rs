//! Idempotent database seeding.
//!
//! Three strictly ordered phases, each safe to re-run against a non-empty
//! store: fixed accounts, deterministic per-account fixture posts, and a
//! configurable batch of randomized posts per account. Duplicate rows are
//! dropped individually rather than failing the batch, so re-running the
//! seed never produces duplicate fixed data.

mod engine;
mod lorem;

pub use engine::{SeedEngine, SeedSummary};
