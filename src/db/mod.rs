//! Database module: connection setup and data access for snippets.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database
//! - `snippets.rs`: the snippet data-access layer

pub mod models;
pub mod schema;
pub mod snippets;

pub use models::Snippet;
pub use schema::MYSQL_INIT;
pub use snippets::SnippetModel;

use sqlx::{Connection, MySqlPool, mysql::MySqlPoolOptions};

use crate::dsn::Dsn;
use crate::error::SnippetboxError;

/// Opens a pool for `dsn` and proves it usable before handing it out.
///
/// Pool construction is structural and performs no I/O of its own; the
/// explicit ping is what first contacts the server. When the probe (or the
/// schema init that follows it) fails, the pool is closed before the error
/// surfaces.
pub async fn open(dsn: &Dsn) -> Result<MySqlPool, SnippetboxError> {
    let pool = MySqlPoolOptions::new().connect_lazy_with(dsn.connect_options()?);

    if let Err(err) = ping(&pool).await {
        pool.close().await;
        return Err(err.into());
    }

    if let Err(err) = apply_schema(&pool).await {
        pool.close().await;
        return Err(err);
    }

    Ok(pool)
}

async fn ping(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    conn.ping().await
}

async fn apply_schema(pool: &MySqlPool) -> Result<(), SnippetboxError> {
    for stmt in MYSQL_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
