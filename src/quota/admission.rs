use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::QuotaConfig;
use crate::error::{QuotaError, Result};
use crate::models::{IngredientRecord, SetIngredientSelection};
use crate::quota::evaluation::evaluate_detailed;
use crate::quota::preconditions::{check_new_set, ensure_unique_ids};
use crate::quota::verdict::Verdict;

/// Anything that can resolve ingredient ids to records.
pub trait IngredientSource {
    /// Fetch every record whose id is in `ids` in one round trip.
    ///
    /// Ids without a record are left out of the result rather than reported.
    fn fetch_many(&self, ids: &[&str]) -> Result<Vec<IngredientRecord>>;
}

impl<S: IngredientSource + ?Sized> IngredientSource for &S {
    fn fetch_many(&self, ids: &[&str]) -> Result<Vec<IngredientRecord>> {
        (**self).fetch_many(ids)
    }
}

/// Which write a selection list is being admitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperation {
    /// A new set: at least one selection is required.
    Create,
    /// Replacing a stored set's selections; omitting them leaves nothing to check.
    Update,
}

/// Gate a set write: preconditions, one batched fetch, then the quota check.
///
/// Returns `Ok(Verdict::Accepted)` when the write may proceed. A quota
/// violation comes back as [`QuotaError::QuotaExceeded`].
pub fn admit_set<S>(
    source: &S,
    selections: Option<&[SetIngredientSelection]>,
    operation: SetOperation,
    config: &QuotaConfig,
) -> Result<Verdict>
where
    S: IngredientSource + ?Sized,
{
    let selections = match operation {
        SetOperation::Create => check_new_set(selections)?,
        SetOperation::Update => {
            let Some(list) = selections else {
                debug!("update without ingredients, nothing to check");
                return Ok(Verdict::Accepted);
            };
            ensure_unique_ids(list)?;
            list
        }
    };

    let ids = distinct_ids(selections);
    let lookup = if ids.is_empty() {
        Vec::new()
    } else {
        source.fetch_many(&ids)?
    };

    debug!(
        requested = ids.len(),
        found = lookup.len(),
        "resolved ingredients for set"
    );

    match evaluate_detailed(Some(selections), &lookup, config.max_consumption_percent) {
        Verdict::Accepted => Ok(Verdict::Accepted),
        Verdict::Rejected(violation) => {
            info!(%violation, ?operation, "set rejected");
            Err(QuotaError::QuotaExceeded(violation))
        }
    }
}

fn distinct_ids(selections: &[SetIngredientSelection]) -> Vec<&str> {
    let mut seen = HashSet::new();
    selections
        .iter()
        .map(|s| s.id.as_str())
        .filter(|id| seen.insert(*id))
        .collect()
}
