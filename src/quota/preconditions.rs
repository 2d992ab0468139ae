use std::collections::HashSet;

use crate::error::{QuotaError, Result};
use crate::models::SetIngredientSelection;

/// Ids that appear more than once, each reported once, in order of first repeat.
pub fn duplicate_ids(selections: &[SetIngredientSelection]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for selection in selections {
        let id = selection.id.as_str();
        if !seen.insert(id) && reported.insert(id) {
            duplicates.push(id.to_string());
        }
    }

    duplicates
}

/// Reject a missing or empty selection list.
pub fn ensure_not_empty(
    selections: Option<&[SetIngredientSelection]>,
) -> Result<&[SetIngredientSelection]> {
    match selections {
        Some(list) if !list.is_empty() => Ok(list),
        _ => Err(QuotaError::EmptySelection),
    }
}

/// Reject a selection list that names the same ingredient twice.
pub fn ensure_unique_ids(selections: &[SetIngredientSelection]) -> Result<()> {
    let ids = duplicate_ids(selections);
    if ids.is_empty() {
        Ok(())
    } else {
        Err(QuotaError::DuplicateIngredientIds { ids })
    }
}

/// Both checks a new set must pass before its quota is evaluated.
pub fn check_new_set(
    selections: Option<&[SetIngredientSelection]>,
) -> Result<&[SetIngredientSelection]> {
    let list = ensure_not_empty(selections)?;
    ensure_unique_ids(list)?;
    Ok(list)
}
