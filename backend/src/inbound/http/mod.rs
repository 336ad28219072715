//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod error;
pub mod posts;
pub mod state;

pub use error::ApiResult;
pub use state::HttpState;

use actix_web::web;

/// Register every resource route on the given service config.
///
/// Used by both the server binary and the handler tests so the route table
/// cannot drift between them. Malformed JSON bodies are answered with the
/// same error envelope the handlers produce.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(accounts::create_account)
        .service(accounts::list_accounts)
        .service(accounts::get_account)
        .service(accounts::update_account)
        .service(accounts::delete_account)
        .service(posts::create_post)
        .service(posts::list_posts)
        .service(posts::get_post)
        .service(posts::update_post)
        .service(posts::delete_post);
}
