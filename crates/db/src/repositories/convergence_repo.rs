//! Repository for the append-only `convergence_data` table.

use simflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::convergence::ConvergencePoint;

/// Provides append and read access to convergence samples.
pub struct ConvergenceRepo;

impl ConvergenceRepo {
    /// Append one sample for a simulation.
    pub async fn append(
        pool: &PgPool,
        simulation_id: DbId,
        point: ConvergencePoint,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO convergence_data (simulation_id, seconds, loss) \
             VALUES ($1, $2, $3)",
        )
        .bind(simulation_id)
        .bind(point.seconds)
        .bind(point.loss)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// All samples for a simulation, ascending by elapsed seconds.
    /// Empty when the simulation has none (or does not exist).
    pub async fn list_for_simulation(
        pool: &PgPool,
        simulation_id: DbId,
    ) -> Result<Vec<ConvergencePoint>, sqlx::Error> {
        sqlx::query_as::<_, ConvergencePoint>(
            "SELECT seconds, loss FROM convergence_data \
             WHERE simulation_id = $1 \
             ORDER BY seconds, id",
        )
        .bind(simulation_id)
        .fetch_all(pool)
        .await
    }
}
