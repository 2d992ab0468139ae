use serde::Serialize;

use crate::quota::accounting::{CategoryAccumulator, LineItem};

/// Which allowance a violating line item ran out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReason {
    /// Non-alcohol items (plus any alcohol) exceed the category quota.
    CategoryQuotaExceeded,
    /// Alcohol in the category exceeds this alcohol item's allowance.
    AlcoholAllowanceExceeded,
}

impl ViolationReason {
    /// The allowance an over-budget item of this kind ran out of.
    pub fn for_item(is_alcohol: bool) -> Self {
        if is_alcohol {
            ViolationReason::AlcoholAllowanceExceeded
        } else {
            ViolationReason::CategoryQuotaExceeded
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationReason::CategoryQuotaExceeded => "category quota exceeded",
            ViolationReason::AlcoholAllowanceExceeded => "alcohol allowance exceeded",
        }
    }
}

/// The first line item found over budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub category_id: String,
    pub ingredient_id: String,
    pub reason: ViolationReason,
    /// Rounded headroom of the item; always negative.
    pub remaining_calories: f64,
}

impl Violation {
    pub(crate) fn from_line_item(
        category: &CategoryAccumulator<'_>,
        item: &LineItem<'_>,
        remaining_calories: f64,
    ) -> Self {
        Self {
            category_id: category.category_id.to_string(),
            ingredient_id: item.ingredient.id.clone(),
            reason: ViolationReason::for_item(item.ingredient.is_alcohol),
            remaining_calories,
        }
    }

    /// Calories over the allowance, as a positive number.
    pub fn overshoot(&self) -> f64 {
        -self.remaining_calories
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "category {}, ingredient {}: {} by {:.0} kcal",
            self.category_id,
            self.ingredient_id,
            self.reason.as_str(),
            self.overshoot()
        )
    }
}

/// Outcome of a quota evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    Rejected(Violation),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(violation) => Some(violation),
        }
    }
}

impl From<Verdict> for bool {
    fn from(verdict: Verdict) -> bool {
        verdict.is_accepted()
    }
}
