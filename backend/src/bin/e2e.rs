//! End-to-end test binary.
//!
//! Drives a running server over HTTP (`API_URL`, default
//! `http://localhost:8080`) while verifying side effects directly against
//! the database named by `DATABASE_URL`. Suites and cases run strictly in
//! order; the first failure aborts the run and the process exits non-zero.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use serde_json::{Value, json};
use tokio::runtime::Builder;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::ports::{AccountRepository, PostRepository};
use backend::domain::{NewAccount, NewPost};
use backend::harness::{HarnessError, case, ensure, suite};
use backend::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselPostRepository, PoolConfig,
};

const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Shared handles for one end-to-end run.
struct TestContext {
    http: reqwest::Client,
    base_url: String,
    accounts: Arc<dyn AccountRepository>,
    posts: Arc<dyn PostRepository>,
}

impl TestContext {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Remove every row, posts first so the owner reference never dangles.
    async fn clear(&self) -> Result<(), HarnessError> {
        self.posts.delete_all().await?;
        self.accounts.delete_all().await?;
        Ok(())
    }
}

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let Ok(database_url) = env::var("DATABASE_URL") else {
        error!("DATABASE_URL must be set");
        return ExitCode::FAILURE;
    };
    let base_url = env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());

    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "failed to build harness runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(database_url, base_url)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "end-to-end run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(database_url: String, base_url: String) -> Result<(), HarnessError> {
    let pool = DbPool::new(PoolConfig::new(database_url)).await?;
    let context = TestContext {
        http: reqwest::Client::new(),
        base_url,
        accounts: Arc::new(DieselAccountRepository::new(pool.clone())),
        posts: Arc::new(DieselPostRepository::new(pool)),
    };

    accounts_suite(&context).await?;
    posts_suite(&context).await?;
    Ok(())
}

/// Extract a row identifier from a JSON response body.
fn id_of(body: &Value) -> Result<i32, HarnessError> {
    let raw = body
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| HarnessError::new("response has no numeric id"))?;
    i32::try_from(raw).map_err(|_| HarnessError::new("response id is out of range"))
}

async fn accounts_suite(ctx: &TestContext) -> Result<(), HarnessError> {
    suite("users modifications", async {
        ctx.clear().await?;

        let mut created_id = 0;
        case("create user", async {
            let response = ctx
                .http
                .post(ctx.url("/users"))
                .json(&json!({ "email": "e2e@test.com", "name": "E2E User" }))
                .send()
                .await?;
            ensure(response.status().as_u16() == 201, "expected 201 Created")?;
            let body: Value = response.json().await?;
            created_id = id_of(&body)?;
            ensure(
                body.get("email") == Some(&json!("e2e@test.com")),
                "created email does not round-trip",
            )
        })
        .await?;

        case("update user", async {
            let response = ctx
                .http
                .patch(ctx.url(&format!("/users/{created_id}")))
                .json(&json!({ "name": "Updated Name" }))
                .send()
                .await?;
            ensure(response.status().as_u16() == 200, "expected 200 OK")?;

            let stored = ctx
                .accounts
                .find_with_posts(created_id)
                .await?
                .ok_or_else(|| HarnessError::new("updated row missing from store"))?;
            ensure(
                stored.account.name.as_deref() == Some("Updated Name"),
                "stored name was not updated",
            )
        })
        .await?;

        case("delete user", async {
            let response = ctx
                .http
                .delete(ctx.url(&format!("/users/{created_id}")))
                .send()
                .await?;
            ensure(response.status().as_u16() == 200, "expected 200 OK")?;
            let body: Value = response.json().await?;
            ensure(
                body.get("deleted") == Some(&json!(true)),
                "delete was not confirmed",
            )?;

            let stored = ctx.accounts.find_with_posts(created_id).await?;
            ensure(stored.is_none(), "deleted row still present in store")
        })
        .await
    })
    .await?;

    suite("users reads", async {
        ctx.clear().await?;
        let fixture = ctx
            .accounts
            .insert(NewAccount {
                email: "read@test.com".to_owned(),
                name: Some("Read User".to_owned()),
            })
            .await?;

        case("list users", async {
            let response = ctx.http.get(ctx.url("/users")).send().await?;
            ensure(response.status().as_u16() == 200, "expected 200 OK")?;
            let body: Value = response.json().await?;
            let rows = body
                .as_array()
                .ok_or_else(|| HarnessError::new("expected a JSON array"))?;
            ensure(rows.len() == 1, "expected exactly one account")?;
            ensure(
                rows[0].get("email") == Some(&json!("read@test.com")),
                "listed email does not match fixture",
            )?;
            ensure(
                rows[0].get("posts").is_some_and(Value::is_array),
                "listed account is missing its posts array",
            )
        })
        .await?;

        case("get user by id", async {
            let response = ctx
                .http
                .get(ctx.url(&format!("/users/{}", fixture.id)))
                .send()
                .await?;
            ensure(response.status().as_u16() == 200, "expected 200 OK")?;
            let body: Value = response.json().await?;
            ensure(
                id_of(&body)? == fixture.id,
                "fetched id does not match fixture",
            )?;
            ensure(
                body.get("name") == Some(&json!("Read User")),
                "fetched name does not match fixture",
            )
        })
        .await
    })
    .await
}

async fn posts_suite(ctx: &TestContext) -> Result<(), HarnessError> {
    suite("posts modifications", async {
        ctx.clear().await?;
        let author = ctx
            .accounts
            .insert(NewAccount {
                email: "post@test.com".to_owned(),
                name: Some("Post User".to_owned()),
            })
            .await?;

        let mut created_id = 0;
        case("create post", async {
            let response = ctx
                .http
                .post(ctx.url("/posts"))
                .json(&json!({
                    "title": "E2E Post",
                    "content": "Content",
                    "authorId": author.id,
                }))
                .send()
                .await?;
            ensure(response.status().as_u16() == 201, "expected 201 Created")?;
            let body: Value = response.json().await?;
            created_id = id_of(&body)?;
            ensure(
                body.get("published") == Some(&json!(false)),
                "published should default to false",
            )
        })
        .await?;

        case("update post", async {
            let response = ctx
                .http
                .patch(ctx.url(&format!("/posts/{created_id}")))
                .json(&json!({ "title": "Updated Post" }))
                .send()
                .await?;
            ensure(response.status().as_u16() == 200, "expected 200 OK")?;

            let stored = ctx
                .posts
                .find_with_author(created_id)
                .await?
                .ok_or_else(|| HarnessError::new("updated row missing from store"))?;
            ensure(
                stored.post.title == "Updated Post",
                "stored title was not updated",
            )?;
            ensure(
                stored.post.content.as_deref() == Some("Content"),
                "untouched content must survive the patch",
            )
        })
        .await?;

        case("delete post", async {
            let response = ctx
                .http
                .delete(ctx.url(&format!("/posts/{created_id}")))
                .send()
                .await?;
            ensure(response.status().as_u16() == 200, "expected 200 OK")?;

            let stored = ctx.posts.find_with_author(created_id).await?;
            ensure(stored.is_none(), "deleted row still present in store")
        })
        .await
    })
    .await?;

    suite("posts reads", async {
        ctx.clear().await?;
        let author = ctx
            .accounts
            .insert(NewAccount {
                email: "post@test.com".to_owned(),
                name: Some("Post User".to_owned()),
            })
            .await?;
        let base = ctx
            .posts
            .insert(NewPost {
                title: "Base Post".to_owned(),
                content: Some("Base content".to_owned()),
                published: true,
                author_id: author.id,
            })
            .await?;

        case("list posts", async {
            let response = ctx.http.get(ctx.url("/posts")).send().await?;
            ensure(response.status().as_u16() == 200, "expected 200 OK")?;
            let body: Value = response.json().await?;
            let rows = body
                .as_array()
                .ok_or_else(|| HarnessError::new("expected a JSON array"))?;
            ensure(rows.len() == 1, "expected exactly one post")?;
            ensure(
                rows[0]
                    .get("author")
                    .and_then(|a| a.get("email"))
                    == Some(&json!("post@test.com")),
                "listed post is missing its expanded author",
            )
        })
        .await?;

        case("get post by id", async {
            let response = ctx
                .http
                .get(ctx.url(&format!("/posts/{}", base.id)))
                .send()
                .await?;
            ensure(response.status().as_u16() == 200, "expected 200 OK")?;
            let body: Value = response.json().await?;
            ensure(id_of(&body)? == base.id, "fetched id does not match fixture")?;
            ensure(
                body.get("title") == Some(&json!("Base Post")),
                "fetched title does not match fixture",
            )
        })
        .await
    })
    .await
}
