//! Thin CRUD service over the account repository port.

use std::sync::Arc;

use crate::domain::ports::AccountRepository;
use crate::domain::{Account, AccountDetail, AccountPatch, Error, NewAccount};

/// Uniform CRUD contract for accounts.
///
/// Every call goes straight to the repository; no state is cached here.
/// Storage failures surface as typed [`Error`] values without masking.
#[derive(Clone)]
pub struct AccountsService {
    repository: Arc<dyn AccountRepository>,
}

impl AccountsService {
    /// Create a service backed by the given repository.
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    /// Create an account and return the persisted entity including its
    /// assigned identifier. Duplicate emails surface as a conflict.
    pub async fn create(&self, input: NewAccount) -> Result<Account, Error> {
        Ok(self.repository.insert(input).await?)
    }

    /// List all accounts, each expanded with its owned posts.
    pub async fn list(&self) -> Result<Vec<AccountDetail>, Error> {
        Ok(self.repository.list_with_posts().await?)
    }

    /// Fetch one account with its owned posts.
    pub async fn get_by_id(&self, id: i32) -> Result<AccountDetail, Error> {
        self.repository
            .find_with_posts(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("account {id} does not exist")))
    }

    /// Apply a partial update: only supplied fields change, omitted fields
    /// retain their prior value.
    pub async fn update(&self, id: i32, patch: AccountPatch) -> Result<Account, Error> {
        self.repository
            .update(id, patch)
            .await?
            .ok_or_else(|| Error::not_found(format!("account {id} does not exist")))
    }

    /// Delete an account. Removal is destructive and immediate; an account
    /// that still owns posts is blocked by the foreign-key constraint.
    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(Error::not_found(format!("account {id} does not exist")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::StoreError;
    use crate::test_support::InMemoryStore;
    use rstest::rstest;

    fn service(store: &Arc<InMemoryStore>) -> AccountsService {
        AccountsService::new(Arc::clone(store) as Arc<dyn AccountRepository>)
    }

    fn new_account(email: &str, name: Option<&str>) -> NewAccount {
        NewAccount {
            email: email.to_owned(),
            name: name.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn create_returns_persisted_entity_retrievable_by_id() {
        let store = InMemoryStore::new();
        let service = service(&store);

        let created = service
            .create(new_account("e2e@test.com", Some("E2E User")))
            .await
            .expect("create should succeed");

        assert_eq!(created.email, "e2e@test.com");
        assert_eq!(created.name.as_deref(), Some("E2E User"));

        let fetched = service
            .get_by_id(created.id)
            .await
            .expect("created account should be retrievable");
        assert_eq!(fetched.account, created);
        assert!(fetched.posts.is_empty());
    }

    #[tokio::test]
    async fn create_with_duplicate_email_is_a_conflict() {
        let store = InMemoryStore::new();
        let service = service(&store);
        service
            .create(new_account("e2e@test.com", None))
            .await
            .expect("first create should succeed");

        let err = service
            .create(new_account("e2e@test.com", Some("Other")))
            .await
            .expect_err("duplicate email should be rejected");

        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let store = InMemoryStore::new();
        let service = service(&store);
        let created = service
            .create(new_account("e2e@test.com", Some("E2E User")))
            .await
            .expect("create should succeed");

        let updated = service
            .update(
                created.id,
                AccountPatch {
                    name: Some("Updated Name".to_owned()),
                    ..AccountPatch::default()
                },
            )
            .await
            .expect("update should succeed");

        assert_eq!(updated.name.as_deref(), Some("Updated Name"));
        assert_eq!(updated.email, "e2e@test.com");
    }

    #[tokio::test]
    async fn empty_patch_returns_unchanged_entity() {
        let store = InMemoryStore::new();
        let service = service(&store);
        let created = service
            .create(new_account("e2e@test.com", Some("E2E User")))
            .await
            .expect("create should succeed");

        let updated = service
            .update(created.id, AccountPatch::default())
            .await
            .expect("empty patch should succeed");

        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn update_of_missing_id_is_not_found() {
        let store = InMemoryStore::new();
        let err = service(&store)
            .update(42, AccountPatch::default())
            .await
            .expect_err("missing id should fail");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_is_terminal() {
        let store = InMemoryStore::new();
        let service = service(&store);
        let created = service
            .create(new_account("e2e@test.com", None))
            .await
            .expect("create should succeed");

        service
            .delete(created.id)
            .await
            .expect("delete should succeed");

        let get_err = service
            .get_by_id(created.id)
            .await
            .expect_err("deleted account should be gone");
        assert_eq!(get_err.code(), ErrorCode::NotFound);

        let second_delete = service
            .delete(created.id)
            .await
            .expect_err("second delete should fail");
        assert_eq!(second_delete.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(StoreError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(StoreError::query("bad statement"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn storage_failures_surface_as_typed_errors(
        #[case] failure: StoreError,
        #[case] expected: ErrorCode,
    ) {
        let store = InMemoryStore::new();
        store.fail_next(failure);

        let err = service(&store)
            .list()
            .await
            .expect_err("injected failure should propagate");
        assert_eq!(err.code(), expected);
    }
}
