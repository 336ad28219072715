//! Accounts API handlers.
//!
//! ```text
//! POST   /users
//! GET    /users
//! GET    /users/{id}
//! PATCH  /users/{id}
//! DELETE /users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Account, AccountDetail, AccountPatch, Error, NewAccount};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountBody {
    /// Email address; must be globally unique.
    pub email: String,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl From<CreateAccountBody> for NewAccount {
    fn from(body: CreateAccountBody) -> Self {
        Self {
            email: body.email,
            name: body.name,
        }
    }
}

/// Request body for `PATCH /users/{id}`; omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountBody {
    /// Replacement email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Replacement display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl From<UpdateAccountBody> for AccountPatch {
    fn from(body: UpdateAccountBody) -> Self {
        Self {
            email: body.email,
            name: body.name,
        }
    }
}

/// Confirmation body returned by delete endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteConfirmation {
    /// Always `true`; the row no longer exists.
    pub deleted: bool,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateAccountBody,
    responses(
        (status = 201, description = "Account created", body = Account),
        (status = 400, description = "Malformed request", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "createAccount"
)]
#[post("/users")]
pub async fn create_account(
    state: web::Data<HttpState>,
    payload: web::Json<CreateAccountBody>,
) -> ApiResult<HttpResponse> {
    let account = state.accounts.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(account))
}

/// List all accounts, each expanded with its owned posts.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Accounts", body = [AccountDetail])
    ),
    tags = ["accounts"],
    operation_id = "listAccounts"
)]
#[get("/users")]
pub async fn list_accounts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<AccountDetail>>> {
    Ok(web::Json(state.accounts.list().await?))
}

/// Fetch one account with its owned posts.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account", body = AccountDetail),
        (status = 404, description = "No such account", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "getAccount"
)]
#[get("/users/{id}")]
pub async fn get_account(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<AccountDetail>> {
    Ok(web::Json(state.accounts.get_by_id(path.into_inner()).await?))
}

/// Apply a partial update to an account.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "Account identifier")),
    request_body = UpdateAccountBody,
    responses(
        (status = 200, description = "Merged account", body = Account),
        (status = 404, description = "No such account", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "updateAccount"
)]
#[patch("/users/{id}")]
pub async fn update_account(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateAccountBody>,
) -> ApiResult<web::Json<Account>> {
    let account = state
        .accounts
        .update(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(account))
}

/// Delete an account.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account deleted", body = DeleteConfirmation),
        (status = 404, description = "No such account", body = Error),
        (status = 409, description = "Account still owns posts", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "deleteAccount"
)]
#[delete("/users/{id}")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DeleteConfirmation>> {
    state.accounts.delete(path.into_inner()).await?;
    Ok(web::Json(DeleteConfirmation { deleted: true }))
}
