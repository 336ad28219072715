//! Posts API handlers.
//!
//! ```text
//! POST   /posts
//! GET    /posts
//! GET    /posts/{id}
//! PATCH  /posts/{id}
//! DELETE /posts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewPost, Post, PostDetail, PostPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::DeleteConfirmation;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /posts`.
///
/// `published` defaults to `false` when omitted. The owning account is named
/// by `authorId` (`accountId` is accepted as an alias) and must exist.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostBody {
    /// Post title.
    pub title: String,
    /// Optional body text.
    #[serde(default)]
    pub content: Option<String>,
    /// Visibility flag.
    #[serde(default)]
    pub published: bool,
    /// Identifier of the owning account.
    #[serde(alias = "accountId")]
    pub author_id: i32,
}

impl From<CreatePostBody> for NewPost {
    fn from(body: CreatePostBody) -> Self {
        Self {
            title: body.title,
            content: body.content,
            published: body.published,
            author_id: body.author_id,
        }
    }
}

/// Request body for `PATCH /posts/{id}`; omitted fields are left unchanged.
///
/// The owner reference is immutable, so no `authorId` field exists here.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostBody {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement body text.
    #[serde(default)]
    pub content: Option<String>,
    /// Replacement visibility flag.
    #[serde(default)]
    pub published: Option<bool>,
}

impl From<UpdatePostBody> for PostPatch {
    fn from(body: UpdatePostBody) -> Self {
        Self {
            title: body.title,
            content: body.content,
            published: body.published,
        }
    }
}

/// Create a post.
#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostBody,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Malformed request", body = Error),
        (status = 409, description = "Owning account does not exist", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePostBody>,
) -> ApiResult<HttpResponse> {
    let post = state.posts.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(post))
}

/// List all posts, each expanded with its owning account.
#[utoipa::path(
    get,
    path = "/posts",
    responses(
        (status = 200, description = "Posts", body = [PostDetail])
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PostDetail>>> {
    Ok(web::Json(state.posts.list().await?))
}

/// Fetch one post with its owning account.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostDetail),
        (status = 404, description = "No such post", body = Error)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<PostDetail>> {
    Ok(web::Json(state.posts.get_by_id(path.into_inner()).await?))
}

/// Apply a partial update to a post.
#[utoipa::path(
    patch,
    path = "/posts/{id}",
    params(("id" = i32, Path, description = "Post identifier")),
    request_body = UpdatePostBody,
    responses(
        (status = 200, description = "Merged post", body = Post),
        (status = 404, description = "No such post", body = Error)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[patch("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdatePostBody>,
) -> ApiResult<web::Json<Post>> {
    let post = state
        .posts
        .update(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(post))
}

/// Delete a post.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post deleted", body = DeleteConfirmation),
        (status = 404, description = "No such post", body = Error)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DeleteConfirmation>> {
    state.posts.delete(path.into_inner()).await?;
    Ok(web::Json(DeleteConfirmation { deleted: true }))
}
