//! Input checks applied before a simulation or machine is written.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length for simulation and machine names.
pub const MAX_NAME_LEN: usize = 255;

/// Validate a display name: non-blank and within [`MAX_NAME_LEN`].
pub fn validate_name(field: &str, name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} too long: {len} chars (max {MAX_NAME_LEN})"
        )));
    }
    Ok(())
}

/// Validate a caller-supplied identifier.
pub fn validate_id(field: &str, id: DbId) -> Result<(), CoreError> {
    if id <= 0 {
        return Err(CoreError::Validation(format!(
            "{field} must be a positive integer, got {id}"
        )));
    }
    Ok(())
}

/// A simulation may repeat its machine id at the top level; when it does,
/// it must agree with the nested machine record.
pub fn validate_machine_reference(
    declared: Option<DbId>,
    machine_id: DbId,
) -> Result<(), CoreError> {
    match declared {
        Some(declared) if declared != machine_id => Err(CoreError::Validation(format!(
            "machine_id {declared} does not match machine.machine_id {machine_id}"
        ))),
        _ => Ok(()),
    }
}
