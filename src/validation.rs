//! Input validation for roster rows.
//!
//! Checks structural integrity of the roster before scheduling. Detects:
//! - Fewer than four active players (no legal game possible)
//! - Duplicate active player names
//! - Non-finite ratings (NaN, ±inf)
//!
//! Inactive rows are ignored entirely; the loader keeps active rows only.

use std::collections::HashSet;

use crate::error::RosterError;
use crate::models::RosterRow;

/// Validation result.
pub type RosterValidation = Result<(), Vec<RosterError>>;

/// Validates roster source rows.
///
/// Only active rows are checked: a name may legitimately appear on both an
/// active and a retired row. Returns `Ok(())` if all checks pass,
/// `Err(errors)` with every detected issue otherwise.
pub fn validate_roster(rows: &[RosterRow]) -> RosterValidation {
    let mut errors = Vec::new();

    let active: Vec<&RosterRow> = rows.iter().filter(|r| r.active).collect();

    if active.len() < 4 {
        errors.push(RosterError::TooFewPlayers {
            active: active.len(),
        });
    }

    let mut names = HashSet::new();
    for row in &active {
        if !names.insert(row.name.as_str()) {
            errors.push(RosterError::DuplicatePlayer {
                name: row.name.clone(),
            });
        }
        if !row.rating.is_finite() {
            errors.push(RosterError::InvalidRating {
                name: row.name.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
