//! Transport-agnostic domain model, errors, and resource services.

mod account;
mod accounts_service;
mod error;
mod post;
mod posts_service;

pub mod ports;

pub use account::{Account, AccountDetail, AccountPatch, NewAccount};
pub use accounts_service::AccountsService;
pub use error::{Error, ErrorCode};
pub use post::{NewPost, Post, PostDetail, PostPatch};
pub use posts_service::PostsService;
