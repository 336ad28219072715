//! Thin CRUD service over the post repository port.

use std::sync::Arc;

use crate::domain::ports::PostRepository;
use crate::domain::{Error, NewPost, Post, PostDetail, PostPatch};

/// Uniform CRUD contract for posts.
///
/// Mirrors [`crate::domain::AccountsService`]: no caching, storage failures
/// surface as typed [`Error`] values. The owner reference is fixed at
/// creation; [`PostPatch`] has no way to repoint it.
#[derive(Clone)]
pub struct PostsService {
    repository: Arc<dyn PostRepository>,
}

impl PostsService {
    /// Create a service backed by the given repository.
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }

    /// Create a post and return the persisted entity including its assigned
    /// identifier. A missing owner account surfaces as a conflict.
    pub async fn create(&self, input: NewPost) -> Result<Post, Error> {
        Ok(self.repository.insert(input).await?)
    }

    /// List all posts, each expanded with its owning account.
    pub async fn list(&self) -> Result<Vec<PostDetail>, Error> {
        Ok(self.repository.list_with_authors().await?)
    }

    /// Fetch one post with its owning account.
    pub async fn get_by_id(&self, id: i32) -> Result<PostDetail, Error> {
        self.repository
            .find_with_author(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("post {id} does not exist")))
    }

    /// Apply a partial update: only supplied fields change, omitted fields
    /// retain their prior value.
    pub async fn update(&self, id: i32, patch: PostPatch) -> Result<Post, Error> {
        self.repository
            .update(id, patch)
            .await?
            .ok_or_else(|| Error::not_found(format!("post {id} does not exist")))
    }

    /// Delete a post. Removal is destructive and immediate.
    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(Error::not_found(format!("post {id} does not exist")))
        }
    }
}
