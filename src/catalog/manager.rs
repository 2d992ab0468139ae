use std::collections::HashMap;

use tracing::warn;

use crate::error::{QuotaError, Result};
use crate::models::IngredientRecord;
use crate::quota::IngredientSource;

/// In-memory ingredient records, keyed by id, in load order.
pub struct IngredientCatalog {
    records: Vec<IngredientRecord>,
    by_id: HashMap<String, usize>,
}

impl IngredientCatalog {
    /// Build a catalog. When an id repeats, the first record is kept.
    pub fn new(records: Vec<IngredientRecord>) -> Self {
        let mut kept = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());

        for record in records {
            if by_id.contains_key(&record.id) {
                warn!(id = %record.id, "duplicate ingredient id in catalog, keeping first");
                continue;
            }
            by_id.insert(record.id.clone(), kept.len());
            kept.push(record);
        }

        Self {
            records: kept,
            by_id,
        }
    }

    /// Get a record by id.
    pub fn get(&self, id: &str) -> Option<&IngredientRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    /// Get a record by id, failing when it is unknown.
    pub fn require(&self, id: &str) -> Result<&IngredientRecord> {
        self.get(id)
            .ok_or_else(|| QuotaError::IngredientNotFound(id.to_string()))
    }

    /// Find a record by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&IngredientRecord> {
        let wanted = name.to_lowercase();
        self.records
            .iter()
            .find(|r| !r.name.is_empty() && r.name.to_lowercase() == wanted)
    }

    /// Records belonging to one category.
    pub fn by_category(&self, category_id: &str) -> Vec<&IngredientRecord> {
        self.records
            .iter()
            .filter(|r| r.category_id == category_id)
            .collect()
    }

    /// Distinct category ids, in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.category_id.as_str()) {
                seen.push(record.category_id.as_str());
            }
        }
        seen
    }

    /// Records breaking the non-negativity invariant.
    pub fn invalid_records(&self) -> Vec<&IngredientRecord> {
        self.records.iter().filter(|r| !r.is_valid()).collect()
    }

    /// Get all records.
    pub fn records(&self) -> &[IngredientRecord] {
        &self.records
    }

    /// Count of records in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl IngredientSource for IngredientCatalog {
    fn fetch_many(&self, ids: &[&str]) -> Result<Vec<IngredientRecord>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.get(id))
            .cloned()
            .collect())
    }
}
