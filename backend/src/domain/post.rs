//! Post data model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Account;

/// Content authored by exactly one account.
///
/// The owner reference is set at creation time and is never repointed by an
/// update. `content` is nullable; `published` defaults to `false` when the
/// caller omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// System-assigned identifier.
    pub id: i32,
    /// Post title.
    pub title: String,
    /// Optional body text.
    pub content: Option<String>,
    /// Whether the post is visible to readers.
    pub published: bool,
    /// Identifier of the owning account.
    pub author_id: i32,
}

/// A post expanded one level with its owning account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    /// The post itself.
    #[serde(flatten)]
    pub post: Post,
    /// The account that owns the post.
    pub author: Account,
}

/// Fields required to create a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Optional body text.
    pub content: Option<String>,
    /// Visibility flag; callers that omit it get `false`.
    pub published: bool,
    /// Owning account; must exist when the post is created.
    pub author_id: i32,
}

/// Partial update for a post. `None` leaves the field unchanged; the owner
/// reference is deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement body text.
    pub content: Option<String>,
    /// Replacement visibility flag.
    pub published: Option<bool>,
}

impl PostPatch {
    /// True when no field is supplied, i.e. the update is a no-op merge.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.published.is_none()
    }
}
