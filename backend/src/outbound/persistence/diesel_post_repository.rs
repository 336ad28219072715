//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostRepository, StoreError};
use crate::domain::{Account, NewPost, Post, PostDetail, PostPatch};

use super::models::{AccountRow, NewPostRow, PostChangeset, PostRow};
use super::pool::DbPool;
use super::schema::{accounts, posts};
use super::store_error::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_insert_rows(posts_to_insert: &[NewPost]) -> Vec<NewPostRow<'_>> {
    posts_to_insert
        .iter()
        .map(|post| NewPostRow {
            title: post.title.as_str(),
            content: post.content.as_deref(),
            published: post.published,
            author_id: post.author_id,
        })
        .collect()
}

fn to_detail((post_row, account_row): (PostRow, AccountRow)) -> PostDetail {
    PostDetail {
        post: Post::from(post_row),
        author: Account::from(account_row),
    }
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(posts::table)
            .values(NewPostRow {
                title: post.title.as_str(),
                content: post.content.as_deref(),
                published: post.published,
                author_id: post.author_id,
            })
            .returning(PostRow::as_returning())
            .get_result::<PostRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Post::from(row))
    }

    async fn insert_many_skipping_duplicates(
        &self,
        posts_to_insert: Vec<NewPost>,
    ) -> Result<usize, StoreError> {
        if posts_to_insert.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = to_insert_rows(&posts_to_insert);
        let batch = diesel::insert_into(posts::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error);

        match batch {
            Ok(inserted) => Ok(inserted),
            // Fall back to per-row inserts so non-conflicting rows still land.
            Err(error) if error.is_conflict() => {
                let mut inserted = 0;
                for row in &rows {
                    match diesel::insert_into(posts::table)
                        .values(row)
                        .execute(&mut conn)
                        .await
                        .map_err(map_diesel_error)
                    {
                        Ok(_) => inserted += 1,
                        Err(row_error) if row_error.is_conflict() => {}
                        Err(row_error) => return Err(row_error),
                    }
                }
                Ok(inserted)
            }
            Err(error) => Err(error),
        }
    }

    async fn list_with_authors(&self) -> Result<Vec<PostDetail>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = posts::table
            .inner_join(accounts::table)
            .order(posts::id.asc())
            .select((PostRow::as_select(), AccountRow::as_select()))
            .load::<(PostRow, AccountRow)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(to_detail).collect())
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<PostDetail>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = posts::table
            .inner_join(accounts::table)
            .filter(posts::id.eq(id))
            .select((PostRow::as_select(), AccountRow::as_select()))
            .first::<(PostRow, AccountRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(to_detail))
    }

    async fn update(&self, id: i32, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Diesel rejects an all-None changeset, and the contract for an empty
        // patch is "return the unchanged row".
        if patch.is_empty() {
            let row = posts::table
                .find(id)
                .select(PostRow::as_select())
                .first::<PostRow>(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
            return Ok(row.map(Post::from));
        }

        let row = diesel::update(posts::table.find(id))
            .set(PostChangeset {
                title: patch.title.as_deref(),
                content: patch.content.as_deref(),
                published: patch.published,
            })
            .returning(PostRow::as_returning())
            .get_result::<PostRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Post::from))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(posts::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn delete_all(&self) -> Result<usize, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(posts::table)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
