//! Accounts and posts backend: REST CRUD over PostgreSQL, idempotent
//! seeding, and a sequential end-to-end test harness.
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - [`domain`] holds transport-agnostic entities, services, and the
//!   repository ports they depend on.
//! - [`inbound`] adapts HTTP requests onto the domain services.
//! - [`outbound`] implements the repository ports against PostgreSQL.
//! - [`seed`] populates the store with fixed and randomized example data.
//! - [`harness`] provides the `suite`/`case` primitives used by the `e2e`
//!   binary.

pub mod doc;
pub mod domain;
pub mod harness;
pub mod inbound;
pub mod outbound;
pub mod seed;

#[cfg(test)]
pub(crate) mod test_support;

pub use doc::ApiDoc;
