//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations in `migrations/` exactly; they
//! drive Diesel's compile-time query validation.

diesel::table! {
    /// Registered accounts.
    ///
    /// `id` is a serial primary key assigned by the store; `email` carries a
    /// unique index.
    accounts (id) {
        /// Primary key.
        id -> Int4,
        /// Globally unique email address.
        email -> Varchar,
        /// Optional display name.
        name -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Posts authored by accounts.
    ///
    /// `author_id` references `accounts(id)`; the constraint blocks orphan
    /// posts at creation and account deletion while posts remain.
    posts (id) {
        /// Primary key.
        id -> Int4,
        /// Post title.
        title -> Varchar,
        /// Optional body text.
        content -> Nullable<Text>,
        /// Visibility flag, defaults to false.
        published -> Bool,
        /// Owning account.
        author_id -> Int4,
    }
}

diesel::joinable!(posts -> accounts (author_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, posts);
