//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling. Repository
//! adapters only translate between Diesel rows and domain types; Diesel row
//! structs (`models`) and table definitions (`schema`) never leak out of this
//! module. All driver failures are mapped to [`crate::domain::ports::StoreError`].

mod diesel_account_repository;
mod diesel_post_repository;
mod models;
mod pool;
mod schema;
mod store_error;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
