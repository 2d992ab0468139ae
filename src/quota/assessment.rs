use serde::Serialize;

use crate::models::{IngredientRecord, SetIngredientSelection};
use crate::quota::accounting::{CategoryAccumulator, LineItem, fold_selections};
use crate::quota::verdict::{Verdict, Violation, ViolationReason};

/// Headroom of one accounted selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemAssessment {
    pub ingredient_id: String,
    pub label: String,
    pub is_alcohol: bool,
    pub value: f64,
    pub calories_consumed: f64,
    pub max_calories: f64,
    /// Rounded; negative means over budget.
    pub remaining: f64,
}

impl LineItemAssessment {
    fn new(category: &CategoryAccumulator<'_>, item: &LineItem<'_>, max_percent: f64) -> Self {
        Self {
            ingredient_id: item.ingredient.id.clone(),
            label: item.ingredient.label().to_string(),
            is_alcohol: item.ingredient.is_alcohol,
            value: item.value,
            calories_consumed: item.calories_consumed,
            max_calories: item.max_calories(category, max_percent),
            remaining: item.headroom(category, max_percent),
        }
    }

    pub fn is_over(&self) -> bool {
        self.remaining < 0.0
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAssessment {
    pub category_id: String,
    pub non_alcohol_total: f64,
    pub alcohol_calories_consumed: f64,
    pub items: Vec<LineItemAssessment>,
}

impl CategoryAssessment {
    /// Smallest headroom among the category's items.
    pub fn min_remaining(&self) -> Option<f64> {
        self.items.iter().map(|i| i.remaining).reduce(f64::min)
    }

    pub fn total_calories(&self) -> f64 {
        self.items.iter().map(|i| i.calories_consumed).sum()
    }

    pub fn first_violation(&self) -> Option<&LineItemAssessment> {
        self.items.iter().find(|i| i.is_over())
    }
}

/// Full per-category breakdown of a selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub max_consumption_percent: f64,
    pub categories: Vec<CategoryAssessment>,
    /// Ids ignored because the ingredient is unknown or the value is falsy.
    pub skipped: Vec<String>,
}

impl Assessment {
    /// The verdict [`evaluate_detailed`](crate::quota::evaluate_detailed) gives for the same input.
    pub fn verdict(&self) -> Verdict {
        self.categories
            .iter()
            .find_map(|category| {
                category.first_violation().map(|item| {
                    Verdict::Rejected(Violation {
                        category_id: category.category_id.clone(),
                        ingredient_id: item.ingredient_id.clone(),
                        reason: ViolationReason::for_item(item.is_alcohol),
                        remaining_calories: item.remaining,
                    })
                })
            })
            .unwrap_or(Verdict::Accepted)
    }

    pub fn is_accepted(&self) -> bool {
        self.categories.iter().all(|c| c.first_violation().is_none())
    }

    pub fn violation_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .filter(|i| i.is_over())
            .count()
    }

    pub fn category(&self, category_id: &str) -> Option<&CategoryAssessment> {
        self.categories.iter().find(|c| c.category_id == category_id)
    }
}

/// Compute every category's totals and every line item's headroom.
pub fn assess(
    selections: Option<&[SetIngredientSelection]>,
    lookup: &[IngredientRecord],
    max_consumption_percent: f64,
) -> Assessment {
    let ledger = fold_selections(selections.unwrap_or_default(), lookup);

    let categories = ledger
        .categories
        .iter()
        .map(|category| CategoryAssessment {
            category_id: category.category_id.to_string(),
            non_alcohol_total: category.non_alcohol_total,
            alcohol_calories_consumed: category.alcohol_calories_consumed,
            items: category
                .line_items
                .iter()
                .map(|item| LineItemAssessment::new(category, item, max_consumption_percent))
                .collect(),
        })
        .collect();

    Assessment {
        max_consumption_percent,
        categories,
        skipped: ledger.skipped.iter().map(|id| id.to_string()).collect(),
    }
}
