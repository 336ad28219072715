//! OpenAPI documentation configuration.
//!
//! Aggregates every REST endpoint and wire schema into one document for
//! external tooling.

use utoipa::OpenApi;

use crate::domain::{Account, AccountDetail, Error, ErrorCode, Post, PostDetail};
use crate::inbound::http::accounts::{CreateAccountBody, DeleteConfirmation, UpdateAccountBody};
use crate::inbound::http::posts::{CreatePostBody, UpdatePostBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Accounts and posts API",
        description = "CRUD over accounts and their authored posts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::create_account,
        crate::inbound::http::accounts::list_accounts,
        crate::inbound::http::accounts::get_account,
        crate::inbound::http::accounts::update_account,
        crate::inbound::http::accounts::delete_account,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
    ),
    components(schemas(
        Account,
        AccountDetail,
        Post,
        PostDetail,
        CreateAccountBody,
        UpdateAccountBody,
        CreatePostBody,
        UpdatePostBody,
        DeleteConfirmation,
        Error,
        ErrorCode,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for route in ["/users", "/users/{id}", "/posts", "/posts/{id}"] {
            assert!(paths.contains_key(route), "missing path {route}");
        }
    }
}
