pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use eyre::Result;
use slotwise_core::errors::SlotwiseError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Wraps a sqlx error into the domain error type.
pub(crate) fn db_err(err: sqlx::Error) -> SlotwiseError {
    SlotwiseError::Database(err.into())
}
