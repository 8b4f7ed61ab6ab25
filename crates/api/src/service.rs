//! Simulation service: the orchestration layer between HTTP handlers and
//! the repositories.
//!
//! Every operation is a short sequence of independent statements on the
//! pool; nothing here opens a transaction. `create` is therefore not
//! idempotent, and its final read races the background run it just
//! dispatched.

use simflow_core::error::CoreError;
use simflow_core::types::DbId;
use simflow_core::validation::{validate_id, validate_machine_reference, validate_name};
use simflow_db::models::convergence::ConvergencePoint;
use simflow_db::models::machine::Machine;
use simflow_db::models::simulation::{
    CreateSimulation, CreatedSimulation, Simulation, SimulationListQuery, SimulationOrder,
};
use simflow_db::models::status::SimulationStatus;
use simflow_db::repositories::{ConvergenceRepo, MachineRepo, SimulationRepo};
use simflow_db::DbPool;
use simflow_worker::TaskQueue;

use crate::error::{AppError, AppResult};

/// Simulation CRUD plus background-run dispatch.
#[derive(Clone)]
pub struct SimulationService {
    pool: DbPool,
    tasks: TaskQueue,
}

impl SimulationService {
    pub fn new(pool: DbPool, tasks: TaskQueue) -> Self {
        Self { pool, tasks }
    }

    /// List simulations, optionally filtered by exact status.
    ///
    /// An unknown `status` is rejected; an unknown `order_by` silently
    /// sorts by creation date.
    pub async fn list(&self, query: &SimulationListQuery) -> AppResult<Vec<Simulation>> {
        let status = query
            .status
            .as_deref()
            .map(str::parse::<SimulationStatus>)
            .transpose()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let order = SimulationOrder::from_param(query.order_by.as_deref());

        let simulations = SimulationRepo::list(&self.pool, status, order).await?;
        tracing::debug!(
            count = simulations.len(),
            status = status.map(SimulationStatus::as_str),
            order_by = order.column(),
            "Listed simulations",
        );
        Ok(simulations)
    }

    /// A single simulation, or `None` if the id is unknown.
    pub async fn detail(&self, id: DbId) -> AppResult<Option<Simulation>> {
        let simulation = SimulationRepo::find_by_id(&self.pool, id).await?;
        if simulation.is_some() {
            tracing::debug!(simulation_id = id, "Retrieved simulation");
        }
        Ok(simulation)
    }

    /// All machines in natural store order.
    pub async fn list_machines(&self) -> AppResult<Vec<Machine>> {
        let machines = MachineRepo::list(&self.pool).await?;
        tracing::debug!(count = machines.len(), "Listed machines");
        Ok(machines)
    }

    /// Register a simulation and dispatch its background run.
    ///
    /// 1. Insert the referenced machine if it does not exist yet.
    /// 2. Insert the simulation as `pending`, whatever status was posted.
    /// 3. Enqueue the run.
    /// 4. Read back the id and whatever status is committed by now.
    pub async fn create(&self, input: &CreateSimulation) -> AppResult<CreatedSimulation> {
        validate_create(input)?;

        if input
            .status
            .is_some_and(|status| status != SimulationStatus::Pending)
        {
            tracing::debug!(
                simulation_id = input.simulation_id,
                "Ignoring client-supplied status; new simulations start pending",
            );
        }

        let machine_id = input.machine.machine_id;
        if !MachineRepo::exists(&self.pool, machine_id).await? {
            let inserted = MachineRepo::insert_if_absent(&self.pool, &input.machine).await?;
            if inserted {
                tracing::info!(machine_id, "Inserted missing machine");
            }
        }

        SimulationRepo::insert_pending(&self.pool, input.simulation_id, &input.name, machine_id)
            .await?;
        tracing::info!(
            simulation_id = input.simulation_id,
            machine_id,
            "Inserted simulation",
        );

        self.tasks.dispatch(input.simulation_id)?;

        let created = SimulationRepo::find_status(&self.pool, input.simulation_id)
            .await?
            .ok_or_else(|| {
                CoreError::Internal(format!(
                    "simulation {} missing immediately after insert",
                    input.simulation_id
                ))
            })?;
        tracing::info!(
            simulation_id = created.id,
            status = %created.status,
            "Simulation created",
        );
        Ok(created)
    }

    /// Convergence samples for a simulation, ascending by seconds. Empty
    /// when there are none.
    pub async fn convergence_series(&self, id: DbId) -> AppResult<Vec<ConvergencePoint>> {
        let series = ConvergenceRepo::list_for_simulation(&self.pool, id).await?;
        tracing::debug!(simulation_id = id, count = series.len(), "Retrieved convergence data");
        Ok(series)
    }
}

fn validate_create(input: &CreateSimulation) -> Result<(), CoreError> {
    validate_id("simulation_id", input.simulation_id)?;
    validate_name("name", &input.name)?;
    validate_id("machine.machine_id", input.machine.machine_id)?;
    validate_name("machine.name", &input.machine.name)?;
    validate_machine_reference(input.machine_id, input.machine.machine_id)
}
