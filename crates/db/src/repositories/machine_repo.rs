//! Repository for the `machines` table.

use simflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::machine::{CreateMachine, Machine};

/// Provides lookups and inserts for machines.
pub struct MachineRepo;

impl MachineRepo {
    /// All machines in natural table order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Machine>, sqlx::Error> {
        sqlx::query_as::<_, Machine>("SELECT id, name FROM machines")
            .fetch_all(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM machines WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Insert a machine unless a row with the same id already exists.
    ///
    /// Returns `true` when a row was written. An existing machine keeps its
    /// stored name.
    pub async fn insert_if_absent(
        pool: &PgPool,
        input: &CreateMachine,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO machines (id, name) VALUES ($1, $2) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(input.machine_id)
        .bind(&input.name)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
