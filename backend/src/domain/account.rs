//! Account data model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Post;

/// A registered account that owns zero or more posts.
///
/// The identifier is assigned by the store on creation and never changes.
/// Email addresses are globally unique; the storage layer enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// System-assigned identifier.
    pub id: i32,
    /// Globally unique email address.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}

impl Account {
    /// Label used when referring to the account in generated content: the
    /// display name when present, otherwise the email address.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// An account expanded one level with its owned posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetail {
    /// The account itself.
    #[serde(flatten)]
    pub account: Account,
    /// Posts owned by this account.
    pub posts: Vec<Post>,
}

/// Fields required to create an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Email address; must be unique across all accounts.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// Partial update for an account. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPatch {
    /// Replacement email address.
    pub email: Option<String>,
    /// Replacement display name.
    pub name: Option<String>,
}

impl AccountPatch {
    /// True when no field is supplied, i.e. the update is a no-op merge.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none()
    }
}
