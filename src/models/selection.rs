use serde::{Deserialize, Serialize};

use crate::error::{QuotaError, Result};

/// One line item of a submitted set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetIngredientSelection {
    /// Id of the referenced ingredient record.
    pub id: String,

    /// Fraction (or count) of the ingredient's reference serving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Free-text note; never used by validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl SetIngredientSelection {
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value: Some(value),
            additional_info: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.additional_info = Some(note.into());
        self
    }

    /// The value when it takes part in accounting.
    ///
    /// Missing, zero and NaN values are treated as absent.
    #[inline]
    pub fn effective_value(&self) -> Option<f64> {
        self.value.filter(|v| *v != 0.0 && !v.is_nan())
    }
}

/// Where a set's selections came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetSource {
    #[default]
    Manual,
    Recipe,
}

/// Body of a set document as stored or submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<SetIngredientSelection>>,

    #[serde(default)]
    pub source: SetSource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_portions: Option<f64>,
}

impl SetSubmission {
    pub fn manual(ingredients: Vec<SetIngredientSelection>) -> Self {
        Self {
            ingredients: Some(ingredients),
            ..Default::default()
        }
    }

    pub fn selections(&self) -> Option<&[SetIngredientSelection]> {
        self.ingredients.as_deref()
    }

    /// Check document-level fields. Selection values are left to the quota check.
    pub fn validate(&self) -> Result<()> {
        let invalid = self
            .recipe_portions
            .filter(|p| !p.is_finite() || *p < 0.0);
        if let Some(portions) = invalid {
            return Err(QuotaError::InvalidInput(format!(
                "recipePortions must be a non-negative number, got {}",
                portions
            )));
        }
        Ok(())
    }
}
