//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the domain services and remain testable without a live database.

use std::sync::Arc;

use crate::domain::ports::{AccountRepository, PostRepository};
use crate::domain::{AccountsService, PostsService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account CRUD service.
    pub accounts: AccountsService,
    /// Post CRUD service.
    pub posts: PostsService,
}

impl HttpState {
    /// Construct state from repository implementations.
    pub fn new(
        account_repository: Arc<dyn AccountRepository>,
        post_repository: Arc<dyn PostRepository>,
    ) -> Self {
        Self {
            accounts: AccountsService::new(account_repository),
            posts: PostsService::new(post_repository),
        }
    }
}
