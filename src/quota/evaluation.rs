use tracing::debug;

use crate::models::{IngredientRecord, SetIngredientSelection};
use crate::quota::accounting::fold_selections;
use crate::quota::verdict::{Verdict, Violation};

/// Check that no category of the selection is over-consumed.
///
/// `max_consumption_percent` caps how much of a category's combined
/// reference servings one set may use (100 = exactly one full serving).
/// Selections whose id is missing from `lookup`, or whose value is missing,
/// zero or NaN, are ignored.
pub fn evaluate(
    selections: Option<&[SetIngredientSelection]>,
    lookup: &[IngredientRecord],
    max_consumption_percent: f64,
) -> bool {
    evaluate_detailed(selections, lookup, max_consumption_percent).is_accepted()
}

/// Same check as [`evaluate`], reporting the first violating line item.
///
/// Categories are visited in order of first appearance in `selections`,
/// line items in selection order.
pub fn evaluate_detailed(
    selections: Option<&[SetIngredientSelection]>,
    lookup: &[IngredientRecord],
    max_consumption_percent: f64,
) -> Verdict {
    let Some(selections) = selections else {
        return Verdict::Accepted;
    };

    let ledger = fold_selections(selections, lookup);

    for category in &ledger.categories {
        for item in &category.line_items {
            let remaining = item.headroom(category, max_consumption_percent);
            if remaining < 0.0 {
                debug!(
                    category_id = category.category_id,
                    ingredient_id = %item.ingredient.id,
                    non_alcohol_total = category.non_alcohol_total,
                    alcohol_calories = category.alcohol_calories_consumed,
                    remaining,
                    "selection over category quota"
                );
                return Verdict::Rejected(Violation::from_line_item(category, item, remaining));
            }
        }
    }

    Verdict::Accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;
    use crate::quota::constants::DEFAULT_MAX_CONSUMPTION_PERCENT;
    use crate::quota::verdict::ViolationReason;

    fn by_weight(id: &str, category: &str, calories: f64, grams: f64) -> IngredientRecord {
        IngredientRecord {
            id: id.to_string(),
            category_id: category.to_string(),
            name: String::new(),
            calories,
            proteins: 0.0,
            grams,
            unit: Unit::Grams,
            is_alcohol: false,
        }
    }

    fn alcohol(id: &str, category: &str, calories: f64, grams: f64) -> IngredientRecord {
        IngredientRecord {
            is_alcohol: true,
            ..by_weight(id, category, calories, grams)
        }
    }

    fn pieces(id: &str, category: &str, calories: f64, grams: f64) -> IngredientRecord {
        IngredientRecord {
            unit: Unit::Pieces,
            ..by_weight(id, category, calories, grams)
        }
    }

    fn sel(id: &str, value: f64) -> SetIngredientSelection {
        SetIngredientSelection::new(id, value)
    }

    fn run(selections: &[SetIngredientSelection], lookup: &[IngredientRecord], pct: f64) -> Verdict {
        evaluate_detailed(Some(selections), lookup, pct)
    }

    fn accepts(selections: &[SetIngredientSelection], lookup: &[IngredientRecord], pct: f64) -> bool {
        evaluate(Some(selections), lookup, pct)
    }

    #[test]
    fn test_none_and_empty_are_accepted() {
        let lookup = vec![by_weight("a", "c1", 100.0, 50.0)];
        assert!(evaluate(None, &lookup, DEFAULT_MAX_CONSUMPTION_PERCENT));
        assert!(accepts(&[], &lookup, DEFAULT_MAX_CONSUMPTION_PERCENT));
    }

    #[test]
    fn test_under_budget() {
        let lookup = vec![by_weight("a", "c1", 100.0, 50.0)];
        assert!(accepts(&[sel("a", 0.5)], &lookup, 100.0));
    }

    #[test]
    fn test_exactly_at_budget() {
        let lookup = vec![by_weight("a", "c1", 100.0, 50.0)];
        assert!(accepts(&[sel("a", 1.0)], &lookup, 100.0));
    }

    #[test]
    fn test_over_budget_across_items() {
        let lookup = vec![by_weight("a", "c1", 100.0, 50.0), by_weight("b", "c1", 100.0, 50.0)];
        let verdict = run(&[sel("a", 0.6), sel("b", 0.6)], &lookup, 100.0);

        let violation = verdict.violation().unwrap();
        assert_eq!(violation.category_id, "c1");
        assert_eq!(violation.ingredient_id, "a");
        assert_eq!(violation.reason, ViolationReason::CategoryQuotaExceeded);
        assert_eq!(violation.remaining_calories, -10.0);
    }

    #[test]
    fn test_separate_categories_do_not_share_budget() {
        let lookup = vec![by_weight("a", "c1", 100.0, 50.0), by_weight("b", "c2", 100.0, 50.0)];
        assert!(accepts(&[sel("a", 0.6), sel("b", 0.6)], &lookup, 100.0));
    }

    #[test]
    fn test_alcohol_eats_into_solid_budget() {
        // bread: 100 kcal per serving; wine: 100 kcal per serving
        let lookup = vec![by_weight("bread", "c1", 200.0, 50.0), alcohol("wine", "c1", 100.0, 100.0)];

        let verdict = run(&[sel("bread", 0.9), sel("wine", 0.3)], &lookup, 100.0);
        let violation = verdict.violation().unwrap();
        assert_eq!(violation.ingredient_id, "bread");
        assert_eq!(violation.remaining_calories, -20.0);

        assert!(accepts(&[sel("bread", 0.9), sel("wine", 0.05)], &lookup, 100.0));
    }

    #[test]
    fn test_alcohol_only_category() {
        // 100 kcal per serving each
        let lookup = vec![alcohol("vodka", "c1", 100.0, 100.0), alcohol("beer", "c1", 200.0, 50.0)];

        // 100 + 50 kcal of alcohol against vodka's 100 kcal allowance
        let verdict = run(&[sel("vodka", 1.0), sel("beer", 0.5)], &lookup, 100.0);
        let violation = verdict.violation().unwrap();
        assert_eq!(violation.ingredient_id, "vodka");
        assert_eq!(violation.reason, ViolationReason::AlcoholAllowanceExceeded);
        assert_eq!(violation.remaining_calories, -50.0);

        assert!(accepts(&[sel("vodka", 0.5), sel("beer", 0.4)], &lookup, 100.0));

        // a small-allowance item fails against the whole category's alcohol
        let lookup = vec![alcohol("vodka", "c1", 100.0, 100.0), alcohol("cider", "c1", 40.0, 50.0)];
        let verdict = run(&[sel("vodka", 0.5), sel("cider", 0.5)], &lookup, 100.0);
        assert_eq!(verdict.violation().unwrap().ingredient_id, "cider");
    }

    #[test]
    fn test_zero_calorie_item_next_to_alcohol() {
        let lookup = vec![by_weight("water", "c1", 0.0, 250.0), alcohol("wine", "c1", 80.0, 100.0)];
        let verdict = run(&[sel("water", 0.5), sel("wine", 0.5)], &lookup, 100.0);
        assert_eq!(verdict.violation().unwrap().ingredient_id, "water");
    }

    #[test]
    fn test_unknown_ids_and_falsy_values_skipped() {
        let lookup = vec![by_weight("a", "c1", 100.0, 50.0)];
        let missing = SetIngredientSelection {
            id: "a".to_string(),
            value: None,
            additional_info: None,
        };
        let selections = vec![sel("ghost", 50.0), sel("a", 0.0), missing, sel("a", 0.5)];
        assert!(accepts(&selections, &lookup, 100.0));
    }

    #[test]
    fn test_custom_ceiling() {
        let lookup = vec![by_weight("a", "c1", 100.0, 50.0)];
        let selections = [sel("a", 0.7)];
        assert!(accepts(&selections, &lookup, 100.0));
        assert!(!accepts(&selections, &lookup, 50.0));
        assert!(accepts(&selections, &lookup, 150.0));
    }

    #[test]
    fn test_pieces_skip_division() {
        // 90 kcal x 2 = 180 kcal per piece
        let lookup = vec![pieces("egg", "c1", 90.0, 2.0)];
        assert!(accepts(&[sel("egg", 1.0)], &lookup, 100.0));

        let verdict = run(&[sel("egg", 1.01)], &lookup, 100.0);
        assert_eq!(verdict.violation().unwrap().remaining_calories, -2.0);
    }

    #[test]
    fn test_half_calorie_boundary_rounds_up() {
        // 2 kcal per piece: 1.25 pieces leaves -0.5, 1.5 pieces leaves -1
        let lookup = vec![pieces("cracker", "c1", 2.0, 1.0)];
        assert!(accepts(&[sel("cracker", 1.25)], &lookup, 100.0));
        assert!(!accepts(&[sel("cracker", 1.3)], &lookup, 100.0));
        assert!(!accepts(&[sel("cracker", 1.5)], &lookup, 100.0));
    }

    #[test]
    fn test_idempotent() {
        let lookup = vec![by_weight("a", "c1", 100.0, 50.0), by_weight("b", "c1", 100.0, 50.0)];
        let selections = [sel("a", 0.6), sel("b", 0.6)];

        let first = run(&selections, &lookup, 100.0);
        let second = run(&selections, &lookup, 100.0);
        assert_eq!(first, second);
    }
}
