use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::{IngredientRecord, SetSubmission};

/// Load ingredient records from a `.csv` or JSON file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<IngredientRecord>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let records = if is_csv {
        load_catalog_csv(path)?
    } else {
        load_catalog_json(path)?
    };

    debug!(path = %path.display(), count = records.len(), "loaded ingredient catalog");
    Ok(records)
}

/// Load ingredient records from a JSON array.
pub fn load_catalog_json<P: AsRef<Path>>(path: P) -> Result<Vec<IngredientRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load ingredient records from CSV with a camelCase header row
/// (`id,categoryId,name,calories,proteins,grams,unit,isAlcohol`).
pub fn load_catalog_csv<P: AsRef<Path>>(path: P) -> Result<Vec<IngredientRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records: Vec<IngredientRecord> = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Load a set document.
pub fn load_set<P: AsRef<Path>>(path: P) -> Result<SetSubmission> {
    let content = fs::read_to_string(path)?;
    let submission: SetSubmission = serde_json::from_str(&content)?;
    submission.validate()?;
    Ok(submission)
}

/// Save a set document.
pub fn save_set<P: AsRef<Path>>(path: P, submission: &SetSubmission) -> Result<()> {
    let json = serde_json::to_string_pretty(submission)?;
    fs::write(path, json)?;
    Ok(())
}
