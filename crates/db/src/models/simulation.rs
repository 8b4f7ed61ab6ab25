//! Simulation entity models and DTOs.

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use simflow_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::machine::CreateMachine;
use super::status::SimulationStatus;

/// A row from the `simulations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Simulation {
    #[serde(rename = "simulation_id")]
    pub id: DbId,
    pub name: String,
    pub machine_id: DbId,
    pub status: SimulationStatus,
    pub creation_date: Timestamp,
    pub update_date: Timestamp,
}

/// DTO for `POST /simulation`.
///
/// The payload mirrors the [`Simulation`] shape plus a nested machine.
/// `status`, `creation_date` and `update_date` are accepted so clients can
/// post a full record back, but they are never persisted: a new simulation
/// always starts `pending` with database-assigned timestamps. `status` is
/// still checked against the closed set; the dates are skipped unparsed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSimulation {
    pub simulation_id: DbId,
    pub name: String,
    pub machine_id: Option<DbId>,
    pub status: Option<SimulationStatus>,
    pub creation_date: Option<IgnoredAny>,
    pub update_date: Option<IgnoredAny>,
    pub machine: CreateMachine,
}

/// Response body for a freshly created simulation.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CreatedSimulation {
    pub id: DbId,
    pub status: SimulationStatus,
}

/// Query parameters for `GET /simulations`.
///
/// Both are kept as raw strings: `status` is parsed strictly by the
/// service, `order_by` leniently via [`SimulationOrder::from_param`].
#[derive(Debug, Default, Deserialize)]
pub struct SimulationListQuery {
    pub status: Option<String>,
    pub order_by: Option<String>,
}

/// Sort column for simulation listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SimulationOrder {
    Name,
    #[default]
    CreationDate,
    UpdateDate,
}

impl SimulationOrder {
    /// Resolve a query parameter. Unknown or missing values fall back to
    /// [`SimulationOrder::CreationDate`] without error.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("name") => Self::Name,
            Some("update_date") => Self::UpdateDate,
            _ => Self::CreationDate,
        }
    }

    /// Column name used in `ORDER BY`. Always one of a fixed set, so it is
    /// safe to interpolate into SQL.
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreationDate => "creation_date",
            Self::UpdateDate => "update_date",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_recognizes_known_columns() {
        assert_eq!(SimulationOrder::from_param(Some("name")), SimulationOrder::Name);
        assert_eq!(
            SimulationOrder::from_param(Some("update_date")),
            SimulationOrder::UpdateDate
        );
        assert_eq!(
            SimulationOrder::from_param(Some("creation_date")),
            SimulationOrder::CreationDate
        );
    }

    #[test]
    fn unknown_order_falls_back_to_creation_date() {
        let params = [None, Some(""), Some("invalid_column"), Some("NAME"), Some("id; DROP TABLE")];
        for param in params {
            assert_eq!(SimulationOrder::from_param(param), SimulationOrder::CreationDate);
        }
    }

    #[test]
    fn create_payload_accepts_full_record_shape() {
        let payload = serde_json::json!({
            "simulation_id": 456,
            "name": "Test Simulation",
            "machine_id": 123,
            "status": "running",
            "creation_date": "2024-03-05T21:16:03.326919",
            "update_date": "2024-03-05T21:16:03.326919",
            "machine": { "machine_id": 123, "name": "Machine Name" }
        });
        let input: CreateSimulation = serde_json::from_value(payload).unwrap();
        assert_eq!(input.simulation_id, 456);
        assert_eq!(input.status, Some(SimulationStatus::Running));
        assert_eq!(input.machine.machine_id, 123);
    }

    #[test]
    fn create_payload_only_needs_id_name_and_machine() {
        let payload = serde_json::json!({
            "simulation_id": 1,
            "name": "minimal",
            "machine": { "machine_id": 7, "name": "m7" }
        });
        let input: CreateSimulation = serde_json::from_value(payload).unwrap();
        assert!(input.machine_id.is_none());
        assert!(input.status.is_none());
    }

    #[test]
    fn create_payload_rejects_unknown_status() {
        let payload = serde_json::json!({
            "simulation_id": 1,
            "name": "bad",
            "status": "exploded",
            "machine": { "machine_id": 7, "name": "m7" }
        });
        assert!(serde_json::from_value::<CreateSimulation>(payload).is_err());
    }
}
