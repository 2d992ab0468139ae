use std::path::Path;

use crate::error::Result;
use crate::quota::Assessment;

/// Write one row per line item of an assessment.
pub fn write_assessment_csv(assessment: &Assessment, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "category_id",
        "ingredient_id",
        "label",
        "is_alcohol",
        "value",
        "calories_consumed",
        "max_calories",
        "remaining",
        "over_quota",
    ])?;

    for category in &assessment.categories {
        for item in &category.items {
            wtr.write_record([
                category.category_id.clone(),
                item.ingredient_id.clone(),
                item.label.clone(),
                item.is_alcohol.to_string(),
                format!("{:.3}", item.value),
                format!("{:.1}", item.calories_consumed),
                format!("{:.1}", item.max_calories),
                format!("{:.0}", item.remaining),
                item.is_over().to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
