//! Machine entity and DTO.

use serde::{Deserialize, Serialize};
use simflow_core::types::DbId;
use sqlx::FromRow;

/// A row from the `machines` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Machine {
    #[serde(rename = "machine_id")]
    pub id: DbId,
    pub name: String,
}

/// Machine record nested inside a simulation create payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMachine {
    pub machine_id: DbId,
    pub name: String,
}
