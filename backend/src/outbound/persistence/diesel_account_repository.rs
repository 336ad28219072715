//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountRepository, StoreError};
use crate::domain::{Account, AccountDetail, AccountPatch, NewAccount, Post};

use super::models::{AccountChangeset, AccountRow, NewAccountRow, PostRow};
use super::pool::DbPool;
use super::schema::{accounts, posts};
use super::store_error::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_insert_rows(accounts: &[NewAccount]) -> Vec<NewAccountRow<'_>> {
    accounts
        .iter()
        .map(|account| NewAccountRow {
            email: account.email.as_str(),
            name: account.name.as_deref(),
        })
        .collect()
}

/// Group posts by owning account, preserving account order.
fn expand_with_posts(account_rows: Vec<AccountRow>, post_rows: Vec<PostRow>) -> Vec<AccountDetail> {
    let mut posts_by_author: HashMap<i32, Vec<Post>> = HashMap::new();
    for row in post_rows {
        posts_by_author
            .entry(row.author_id)
            .or_default()
            .push(Post::from(row));
    }

    account_rows
        .into_iter()
        .map(|row| {
            let account = Account::from(row);
            let posts = posts_by_author.remove(&account.id).unwrap_or_default();
            AccountDetail { account, posts }
        })
        .collect()
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(accounts::table)
            .values(NewAccountRow {
                email: account.email.as_str(),
                name: account.name.as_deref(),
            })
            .returning(AccountRow::as_returning())
            .get_result::<AccountRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Account::from(row))
    }

    async fn insert_many_skipping_duplicates(
        &self,
        accounts_to_insert: Vec<NewAccount>,
    ) -> Result<usize, StoreError> {
        if accounts_to_insert.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = to_insert_rows(&accounts_to_insert);
        let batch = diesel::insert_into(accounts::table)
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
                    match diesel::insert_into(accounts::table)
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

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = accounts::table
            .order(accounts::id.asc())
            .select(AccountRow::as_select())
            .load::<AccountRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn list_with_posts(&self) -> Result<Vec<AccountDetail>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let account_rows = accounts::table
            .order(accounts::id.asc())
            .select(AccountRow::as_select())
            .load::<AccountRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let post_rows = posts::table
            .order(posts::id.asc())
            .select(PostRow::as_select())
            .load::<PostRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(expand_with_posts(account_rows, post_rows))
    }

    async fn find_with_posts(&self, id: i32) -> Result<Option<AccountDetail>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let Some(account_row) = accounts::table
            .find(id)
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };

        let post_rows = posts::table
            .filter(posts::author_id.eq(id))
            .order(posts::id.asc())
            .select(PostRow::as_select())
            .load::<PostRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(AccountDetail {
            account: Account::from(account_row),
            posts: post_rows.into_iter().map(Post::from).collect(),
        }))
    }

    async fn update(&self, id: i32, patch: AccountPatch) -> Result<Option<Account>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Diesel rejects an all-None changeset, and the contract for an empty
        // patch is "return the unchanged row".
        if patch.is_empty() {
            let row = accounts::table
                .find(id)
                .select(AccountRow::as_select())
                .first::<AccountRow>(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
            return Ok(row.map(Account::from));
        }

        let row = diesel::update(accounts::table.find(id))
            .set(AccountChangeset {
                email: patch.email.as_deref(),
                name: patch.name.as_deref(),
            })
            .returning(AccountRow::as_returning())
            .get_result::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Account::from))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(accounts::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn delete_all(&self) -> Result<usize, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(accounts::table)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the pure row-grouping helper; driver error mapping is
    //! covered in `store_error`.
    use super::*;
    use rstest::rstest;

    fn account_row(id: i32, email: &str) -> AccountRow {
        AccountRow {
            id,
            email: email.to_owned(),
            name: None,
        }
    }

    fn post_row(id: i32, author_id: i32) -> PostRow {
        PostRow {
            id,
            title: format!("post {id}"),
            content: None,
            published: false,
            author_id,
        }
    }

    #[rstest]
    fn expansion_groups_posts_under_their_owner() {
        let details = expand_with_posts(
            vec![account_row(1, "admin@docker.com"), account_row(2, "user1@docker.com")],
            vec![post_row(10, 2), post_row(11, 1), post_row(12, 2)],
        );

        assert_eq!(details.len(), 2);
        assert_eq!(details[0].posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![11]);
        assert_eq!(
            details[1].posts.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![10, 12]
        );
    }

    #[rstest]
    fn expansion_yields_empty_posts_for_postless_accounts() {
        let details = expand_with_posts(vec![account_row(1, "admin@docker.com")], Vec::new());

        assert_eq!(details.len(), 1);
        assert!(details[0].posts.is_empty());
    }
}
