//! Repository ports and the storage error taxonomy.
//!
//! The domain depends only on these traits; concrete adapters live in
//! `outbound::persistence`. Row absence is conveyed through `Option` values
//! and affected-row counts rather than an error variant, so `NotFound`
//! decisions stay with the services.

use async_trait::async_trait;

use crate::domain::{
    Account, AccountDetail, AccountPatch, Error, NewAccount, NewPost, Post, PostDetail, PostPatch,
};

/// Failures raised by storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The storage backend could not be reached.
    #[error("storage connection failed: {message}")]
    Connection {
        /// Diagnostic detail from the driver.
        message: String,
    },
    /// A uniqueness or foreign-key constraint rejected the statement.
    #[error("storage constraint violated: {message}")]
    Conflict {
        /// Diagnostic detail from the driver.
        message: String,
    },
    /// The query failed for any other reason.
    #[error("storage query failed: {message}")]
    Query {
        /// Diagnostic detail from the driver.
        message: String,
    },
}

impl StoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a constraint-violation error with the given message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// True when the error reports a constraint violation.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<StoreError> for Error {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Connection { message } => Self::service_unavailable(message),
            StoreError::Conflict { message } => Self::conflict(message),
            StoreError::Query { message } => Self::internal(message),
        }
    }
}

/// Persistence port for accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a single account and return the persisted row.
    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Insert a batch, silently dropping rows that violate a constraint.
    ///
    /// Attempts the batch in one statement first; on a constraint violation
    /// it retries row by row, discarding only the conflicting rows. Returns
    /// the number of rows actually inserted.
    async fn insert_many_skipping_duplicates(
        &self,
        accounts: Vec<NewAccount>,
    ) -> Result<usize, StoreError>;

    /// Fetch all accounts without relational expansion.
    async fn list(&self) -> Result<Vec<Account>, StoreError>;

    /// Fetch all accounts, each expanded with its owned posts.
    async fn list_with_posts(&self) -> Result<Vec<AccountDetail>, StoreError>;

    /// Fetch one account expanded with its owned posts.
    async fn find_with_posts(&self, id: i32) -> Result<Option<AccountDetail>, StoreError>;

    /// Apply a partial update; `None` when the id has no matching row.
    async fn update(&self, id: i32, patch: AccountPatch) -> Result<Option<Account>, StoreError>;

    /// Delete one account; `false` when the id had no matching row.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;

    /// Delete every account, returning the number of removed rows.
    async fn delete_all(&self) -> Result<usize, StoreError>;
}

/// Persistence port for posts.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a single post and return the persisted row.
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Insert a batch, silently dropping rows that violate a constraint.
    ///
    /// Same batch-then-per-row fallback semantics as
    /// [`AccountRepository::insert_many_skipping_duplicates`].
    async fn insert_many_skipping_duplicates(
        &self,
        posts: Vec<NewPost>,
    ) -> Result<usize, StoreError>;

    /// Fetch all posts, each expanded with its owning account.
    async fn list_with_authors(&self) -> Result<Vec<PostDetail>, StoreError>;

    /// Fetch one post expanded with its owning account.
    async fn find_with_author(&self, id: i32) -> Result<Option<PostDetail>, StoreError>;

    /// Apply a partial update; `None` when the id has no matching row.
    async fn update(&self, id: i32, patch: PostPatch) -> Result<Option<Post>, StoreError>;

    /// Delete one post; `false` when the id had no matching row.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;

    /// Delete every post, returning the number of removed rows.
    async fn delete_all(&self) -> Result<usize, StoreError>;
}
