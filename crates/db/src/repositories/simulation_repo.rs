//! Repository for the `simulations` table.
//!
//! Status values go through [`SimulationStatus`]; no status string
//! literals appear in SQL.

use simflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::simulation::{CreatedSimulation, Simulation, SimulationOrder};
use crate::models::status::SimulationStatus;

/// Column list for `simulations` queries.
const COLUMNS: &str = "id, name, machine_id, status, creation_date, update_date";

/// Provides CRUD operations for simulations.
pub struct SimulationRepo;

impl SimulationRepo {
    /// List simulations, optionally filtered by exact status, sorted by
    /// `order` (ties broken by id).
    pub async fn list(
        pool: &PgPool,
        status: Option<SimulationStatus>,
        order: SimulationOrder,
    ) -> Result<Vec<Simulation>, sqlx::Error> {
        let order_column = order.column();
        match status {
            Some(status) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM simulations \
                     WHERE status = $1 \
                     ORDER BY {order_column}, id"
                );
                sqlx::query_as::<_, Simulation>(&query)
                    .bind(status)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query =
                    format!("SELECT {COLUMNS} FROM simulations ORDER BY {order_column}, id");
                sqlx::query_as::<_, Simulation>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Simulation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM simulations WHERE id = $1");
        sqlx::query_as::<_, Simulation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new simulation in `pending` status.
    ///
    /// Fails with a unique violation if the id is taken and with a foreign
    /// key violation if the machine does not exist.
    pub async fn insert_pending(
        pool: &PgPool,
        id: DbId,
        name: &str,
        machine_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO simulations (id, name, machine_id, status) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(name)
        .bind(machine_id)
        .bind(SimulationStatus::Pending)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Read back just the id and current status.
    pub async fn find_status(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CreatedSimulation>, sqlx::Error> {
        sqlx::query_as::<_, CreatedSimulation>("SELECT id, status FROM simulations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the status and bump `update_date`.
    ///
    /// Returns `false` if no simulation has this id.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: SimulationStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE simulations SET status = $2, update_date = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
