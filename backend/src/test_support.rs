//! In-memory storage stub shared by unit tests.
//!
//! Mirrors the relational invariants the real store enforces: unique emails,
//! posts referencing an existing account, and account deletion blocked while
//! owned posts remain. Tests can also inject a one-shot failure to exercise
//! error mapping.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::ports::{AccountRepository, PostRepository, StoreError};
use crate::domain::{
    Account, AccountDetail, AccountPatch, NewAccount, NewPost, Post, PostDetail, PostPatch,
};

#[derive(Default)]
struct StoreState {
    accounts: Vec<Account>,
    posts: Vec<Post>,
    next_account_id: i32,
    next_post_id: i32,
    fail_next: Option<StoreError>,
}

/// Shared in-memory implementation of both repository ports.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make the next repository call fail with the given error.
    pub(crate) fn fail_next(&self, error: StoreError) {
        self.lock().fail_next = Some(error);
    }

    /// Insert an account fixture. Both repository ports expose an `insert`
    /// method on this type, so fixture setup goes through this inherent
    /// helper to keep method resolution unambiguous.
    pub(crate) fn add_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        Self::insert_account(&mut state, account)
    }

    /// Snapshot of all accounts, in insertion order.
    pub(crate) fn accounts(&self) -> Vec<Account> {
        self.lock().accounts.clone()
    }

    /// Snapshot of all posts, in insertion order.
    pub(crate) fn posts(&self) -> Vec<Post> {
        self.lock().posts.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().expect("store state lock")
    }

    fn take_failure(state: &mut StoreState) -> Result<(), StoreError> {
        match state.fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn insert_account(state: &mut StoreState, account: NewAccount) -> Result<Account, StoreError> {
        if state.accounts.iter().any(|a| a.email == account.email) {
            return Err(StoreError::conflict(format!(
                "duplicate key value violates unique constraint: email {}",
                account.email
            )));
        }
        state.next_account_id += 1;
        let persisted = Account {
            id: state.next_account_id,
            email: account.email,
            name: account.name,
        };
        state.accounts.push(persisted.clone());
        Ok(persisted)
    }

    fn insert_post(state: &mut StoreState, post: NewPost) -> Result<Post, StoreError> {
        if !state.accounts.iter().any(|a| a.id == post.author_id) {
            return Err(StoreError::conflict(format!(
                "foreign key violation: account {} does not exist",
                post.author_id
            )));
        }
        state.next_post_id += 1;
        let persisted = Post {
            id: state.next_post_id,
            title: post.title,
            content: post.content,
            published: post.published,
            author_id: post.author_id,
        };
        state.posts.push(persisted.clone());
        Ok(persisted)
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        Self::insert_account(&mut state, account)
    }

    async fn insert_many_skipping_duplicates(
        &self,
        accounts: Vec<NewAccount>,
    ) -> Result<usize, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        let mut inserted = 0;
        for account in accounts {
            match Self::insert_account(&mut state, account) {
                Ok(_) => inserted += 1,
                Err(error) if error.is_conflict() => {}
                Err(error) => return Err(error),
            }
        }
        Ok(inserted)
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        Ok(state.accounts.clone())
    }

    async fn list_with_posts(&self) -> Result<Vec<AccountDetail>, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        Ok(state
            .accounts
            .iter()
            .map(|account| AccountDetail {
                account: account.clone(),
                posts: state
                    .posts
                    .iter()
                    .filter(|p| p.author_id == account.id)
                    .cloned()
                    .collect(),
            })
            .collect())
    }

    async fn find_with_posts(&self, id: i32) -> Result<Option<AccountDetail>, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        Ok(state.accounts.iter().find(|a| a.id == id).map(|account| {
            AccountDetail {
                account: account.clone(),
                posts: state
                    .posts
                    .iter()
                    .filter(|p| p.author_id == id)
                    .cloned()
                    .collect(),
            }
        }))
    }

    async fn update(&self, id: i32, patch: AccountPatch) -> Result<Option<Account>, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        if let Some(email) = &patch.email {
            if state.accounts.iter().any(|a| a.id != id && &a.email == email) {
                return Err(StoreError::conflict(
                    "duplicate key value violates unique constraint: email",
                ));
            }
        }
        let Some(account) = state.accounts.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(email) = patch.email {
            account.email = email;
        }
        if let Some(name) = patch.name {
            account.name = Some(name);
        }
        Ok(Some(account.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        if !state.accounts.iter().any(|a| a.id == id) {
            return Ok(false);
        }
        if state.posts.iter().any(|p| p.author_id == id) {
            return Err(StoreError::conflict(format!(
                "foreign key violation: account {id} still owns posts"
            )));
        }
        state.accounts.retain(|a| a.id != id);
        Ok(true)
    }

    async fn delete_all(&self) -> Result<usize, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        if !state.posts.is_empty() {
            return Err(StoreError::conflict(
                "foreign key violation: posts still reference accounts",
            ));
        }
        let removed = state.accounts.len();
        state.accounts.clear();
        Ok(removed)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        Self::insert_post(&mut state, post)
    }

    async fn insert_many_skipping_duplicates(
        &self,
        posts: Vec<NewPost>,
    ) -> Result<usize, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        let mut inserted = 0;
        for post in posts {
            match Self::insert_post(&mut state, post) {
                Ok(_) => inserted += 1,
                Err(error) if error.is_conflict() => {}
                Err(error) => return Err(error),
            }
        }
        Ok(inserted)
    }

    async fn list_with_authors(&self) -> Result<Vec<PostDetail>, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        Ok(state
            .posts
            .iter()
            .filter_map(|post| {
                state
                    .accounts
                    .iter()
                    .find(|a| a.id == post.author_id)
                    .map(|author| PostDetail {
                        post: post.clone(),
                        author: author.clone(),
                    })
            })
            .collect())
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<PostDetail>, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        Ok(state.posts.iter().find(|p| p.id == id).and_then(|post| {
            state
                .accounts
                .iter()
                .find(|a| a.id == post.author_id)
                .map(|author| PostDetail {
                    post: post.clone(),
                    author: author.clone(),
                })
        }))
    }

    async fn update(&self, id: i32, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        let Some(post) = state.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = Some(content);
        }
        if let Some(published) = patch.published {
            post.published = published;
        }
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        Ok(state.posts.len() < before)
    }

    async fn delete_all(&self) -> Result<usize, StoreError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        let removed = state.posts.len();
        state.posts.clear();
        Ok(removed)
    }
}
