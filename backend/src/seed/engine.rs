//! Three-phase seeding engine over the repository ports.

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::domain::ports::{AccountRepository, PostRepository, StoreError};
use crate::domain::{Account, NewAccount, NewPost};

use super::lorem;

/// Fixed accounts inserted by the first phase.
const FIXED_ACCOUNTS: &[(&str, &str)] = &[
    ("admin@docker.com", "Admin"),
    ("user1@docker.com", "User One"),
    ("user2@docker.com", "User Two"),
];

/// Body text shared by every generated welcome post.
const WELCOME_CONTENT: &str = "This is an auto-generated welcome post.";

/// Row counts produced by a full seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    /// Accounts inserted by the fixed phase.
    pub accounts: usize,
    /// Welcome and draft posts inserted by the deterministic phase.
    pub fixture_posts: usize,
    /// Posts inserted by the randomized phase.
    pub random_posts: usize,
}

/// Seeding engine writing through the repository ports.
///
/// Phases run strictly in order; each posts phase re-reads the committed
/// accounts rather than reusing phase 1's result, so pre-seeded stores are
/// handled correctly.
pub struct SeedEngine {
    accounts: Arc<dyn AccountRepository>,
    posts: Arc<dyn PostRepository>,
}

impl SeedEngine {
    /// Create an engine over the given repositories.
    pub fn new(accounts: Arc<dyn AccountRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { accounts, posts }
    }

    /// Run all three phases in order and return the inserted row counts.
    pub async fn run(&self, posts_per_account: usize) -> Result<SeedSummary, StoreError> {
        let accounts = self.seed_accounts().await?;
        let fixture_posts = self.seed_posts().await?;
        let random_posts = self.seed_random_posts(posts_per_account).await?;

        Ok(SeedSummary {
            accounts,
            fixture_posts,
            random_posts,
        })
    }

    /// Phase 1: insert the fixed account set, skipping duplicate emails.
    pub async fn seed_accounts(&self) -> Result<usize, StoreError> {
        let batch: Vec<NewAccount> = FIXED_ACCOUNTS
            .iter()
            .map(|(email, name)| NewAccount {
                email: (*email).to_owned(),
                name: Some((*name).to_owned()),
            })
            .collect();

        let inserted = self.accounts.insert_many_skipping_duplicates(batch).await?;
        info!(inserted, "fixed accounts seeded");
        Ok(inserted)
    }

    /// Phase 2: one published welcome post and one unpublished draft per
    /// existing account. A store without accounts is a logged no-op.
    pub async fn seed_posts(&self) -> Result<usize, StoreError> {
        let accounts = self.accounts.list().await?;
        if accounts.is_empty() {
            warn!("no accounts exist; skipping fixture posts phase");
            return Ok(0);
        }

        let batch: Vec<NewPost> = accounts.iter().flat_map(fixture_posts_for).collect();
        let inserted = self.posts.insert_many_skipping_duplicates(batch).await?;
        info!(inserted, "fixture posts seeded");
        Ok(inserted)
    }

    /// Phase 3: `count` randomized posts per existing account. A store
    /// without accounts is a logged no-op.
    pub async fn seed_random_posts(&self, count: usize) -> Result<usize, StoreError> {
        let accounts = self.accounts.list().await?;
        if accounts.is_empty() {
            warn!("no accounts exist; skipping random posts phase");
            return Ok(0);
        }

        let mut rng = SmallRng::from_entropy();
        let batch: Vec<NewPost> = accounts
            .iter()
            .flat_map(|account| {
                (0..count)
                    .map(|_| random_post_for(account, &mut rng))
                    .collect::<Vec<_>>()
            })
            .collect();

        let inserted = self.posts.insert_many_skipping_duplicates(batch).await?;
        info!(
            inserted,
            per_account = count,
            accounts = accounts.len(),
            "random posts seeded"
        );
        Ok(inserted)
    }
}

/// The deterministic welcome/draft pair for one account.
fn fixture_posts_for(account: &Account) -> Vec<NewPost> {
    vec![
        NewPost {
            title: format!("Welcome post for {}", account.label()),
            content: Some(WELCOME_CONTENT.to_owned()),
            published: true,
            author_id: account.id,
        },
        NewPost {
            title: format!("Draft post for {}", account.label()),
            content: None,
            published: false,
            author_id: account.id,
        },
    ]
}

fn random_post_for<R: Rng>(account: &Account, rng: &mut R) -> NewPost {
    NewPost {
        title: lorem::sentence(rng),
        content: Some(lorem::paragraph(rng)),
        published: rng.gen_bool(0.5),
        author_id: account.id,
    }
}
