//! Database seeding binary.
//!
//! Runs the three seeding phases against the database named by
//! `DATABASE_URL` and exits non-zero on the first failure. The number of
//! randomized posts per account is taken from `SEED_POSTS_PER_ACCOUNT`
//! (default 5). Safe to re-run: duplicate fixed rows are skipped.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::runtime::Builder;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::ports::{AccountRepository, PostRepository};
use backend::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselPostRepository, PoolConfig,
};
use backend::seed::SeedEngine;

const DEFAULT_POSTS_PER_ACCOUNT: usize = 5;

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

    let posts_per_account = match env::var("SEED_POSTS_PER_ACCOUNT") {
        Ok(raw) => match raw.parse::<usize>() {
            Ok(count) => count,
            Err(e) => {
                error!(value = %raw, error = %e, "SEED_POSTS_PER_ACCOUNT is not a valid count");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => DEFAULT_POSTS_PER_ACCOUNT,
    };

    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "failed to build seeding runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(seed(database_url, posts_per_account)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

async fn seed(database_url: String, posts_per_account: usize) -> Result<(), ()> {
    let pool = match DbPool::new(PoolConfig::new(database_url)).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "failed to build database pool");
            return Err(());
        }
    };

    let engine = SeedEngine::new(
        Arc::new(DieselAccountRepository::new(pool.clone())) as Arc<dyn AccountRepository>,
        Arc::new(DieselPostRepository::new(pool)) as Arc<dyn PostRepository>,
    );

    match engine.run(posts_per_account).await {
        Ok(summary) => {
            info!(
                accounts = summary.accounts,
                fixture_posts = summary.fixture_posts,
                random_posts = summary.random_posts,
                "seeding complete"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "seeding failed");
            Err(())
        }
    }
}
