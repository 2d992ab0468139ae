use std::collections::HashMap;

use crate::models::{IngredientRecord, SetIngredientSelection};

/// Round to the nearest integer, with halves going toward positive infinity.
///
/// `-0.5` rounds to `0`, `0.5` rounds to `1`.
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// One accounted selection.
#[derive(Debug, Clone)]
pub struct LineItem<'a> {
    pub ingredient: &'a IngredientRecord,
    pub value: f64,
    pub calories_consumed: f64,
}

impl LineItem<'_> {
    /// Calorie allowance of this item once the other non-alcohol items of
    /// its category have taken their share.
    ///
    /// Alcohol items always get their full allowance.
    pub fn max_calories(&self, category: &CategoryAccumulator<'_>, max_percent: f64) -> f64 {
        let consumed_by_others = if self.ingredient.is_alcohol {
            0.0
        } else {
            category.non_alcohol_total - self.value
        };
        self.ingredient.per_unit_calories() * (max_percent / 100.0 - consumed_by_others)
    }

    /// Rounded calories left for this item; negative means over budget.
    pub fn headroom(&self, category: &CategoryAccumulator<'_>, max_percent: f64) -> f64 {
        let own = if self.ingredient.is_alcohol {
            0.0
        } else {
            self.calories_consumed
        };
        round_half_up(
            self.max_calories(category, max_percent) - category.alcohol_calories_consumed - own,
        )
    }
}

/// Running totals for one category.
#[derive(Debug, Clone)]
pub struct CategoryAccumulator<'a> {
    pub category_id: &'a str,
    /// Sum of non-alcohol `value`s, in reference servings.
    pub non_alcohol_total: f64,
    pub alcohol_calories_consumed: f64,
    pub line_items: Vec<LineItem<'a>>,
}

impl<'a> CategoryAccumulator<'a> {
    pub fn new(category_id: &'a str) -> Self {
        Self {
            category_id,
            non_alcohol_total: 0.0,
            alcohol_calories_consumed: 0.0,
            line_items: Vec::new(),
        }
    }

    /// Fold one selection of `ingredient` into the totals.
    pub fn add(&mut self, ingredient: &'a IngredientRecord, value: f64) {
        let calories_consumed = ingredient.calories_for(value);

        if ingredient.is_alcohol {
            self.alcohol_calories_consumed += calories_consumed;
        } else {
            self.non_alcohol_total += value;
        }

        self.line_items.push(LineItem {
            ingredient,
            value,
            calories_consumed,
        });
    }
}

/// Per-category accumulators of one evaluation, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct Ledger<'a> {
    pub categories: Vec<CategoryAccumulator<'a>>,
    /// Selection ids that took no part (unknown id or falsy value).
    pub skipped: Vec<&'a str>,
}

impl<'a> Ledger<'a> {
    pub fn category(&self, category_id: &str) -> Option<&CategoryAccumulator<'a>> {
        self.categories.iter().find(|c| c.category_id == category_id)
    }
}

/// Index records by id. When ids repeat, the first record wins.
pub fn index_lookup(lookup: &[IngredientRecord]) -> HashMap<&str, &IngredientRecord> {
    let mut index = HashMap::with_capacity(lookup.len());
    for record in lookup {
        index.entry(record.id.as_str()).or_insert(record);
    }
    index
}

/// Group selections into per-category accumulators.
pub fn fold_selections<'a>(
    selections: &'a [SetIngredientSelection],
    lookup: &'a [IngredientRecord],
) -> Ledger<'a> {
    let index = index_lookup(lookup);
    let mut ledger = Ledger::default();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for selection in selections {
        let (Some(ingredient), Some(value)) = (
            index.get(selection.id.as_str()).copied(),
            selection.effective_value(),
        ) else {
            ledger.skipped.push(selection.id.as_str());
            continue;
        };

        let position = *positions
            .entry(ingredient.category_id.as_str())
            .or_insert_with(|| {
                ledger
                    .categories
                    .push(CategoryAccumulator::new(&ingredient.category_id));
                ledger.categories.len() - 1
            });

        ledger.categories[position].add(ingredient, value);
    }

    ledger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;

    fn ingredient(id: &str, category: &str, calories: f64, grams: f64, alcohol: bool) -> IngredientRecord {
        IngredientRecord {
            id: id.to_string(),
            category_id: category.to_string(),
            name: String::new(),
            calories,
            proteins: 0.0,
            grams,
            unit: Unit::Grams,
            is_alcohol: alcohol,
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-0.6), -1.0);
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(2.4), 2.0);
        assert_eq!(round_half_up(-1.5), -1.0);
    }

    #[test]
    fn test_alcohol_excluded_from_total() {
        let lookup = vec![
            ingredient("bread", "c1", 200.0, 50.0, false),
            ingredient("wine", "c1", 100.0, 100.0, true),
        ];
        let selections = vec![
            SetIngredientSelection::new("bread", 0.9),
            SetIngredientSelection::new("wine", 0.3),
        ];

        let ledger = fold_selections(&selections, &lookup);
        let category = ledger.category("c1").unwrap();

        assert!((category.non_alcohol_total - 0.9).abs() < 1e-9);
        assert!((category.alcohol_calories_consumed - 30.0).abs() < 1e-9);
        assert_eq!(category.line_items.len(), 2);
    }

    #[test]
    fn test_categories_keep_first_appearance_order() {
        let lookup = vec![
            ingredient("a", "second", 100.0, 100.0, false),
            ingredient("b", "first", 100.0, 100.0, false),
        ];
        let selections = vec![
            SetIngredientSelection::new("b", 0.1),
            SetIngredientSelection::new("a", 0.1),
            SetIngredientSelection::new("b2", 0.1),
        ];

        let ledger = fold_selections(&selections, &lookup);
        let order: Vec<&str> = ledger.categories.iter().map(|c| c.category_id).collect();

        assert_eq!(order, vec!["first", "second"]);
        assert_eq!(ledger.skipped, vec!["b2"]);
    }

    #[test]
    fn test_first_record_wins_on_repeated_id() {
        let lookup = vec![
            ingredient("a", "c1", 100.0, 100.0, false),
            ingredient("a", "c2", 999.0, 100.0, false),
        ];
        let index = index_lookup(&lookup);
        assert_eq!(index["a"].category_id, "c1");
    }

    #[test]
    fn test_headroom_non_alcohol() {
        // per-unit 50 kcal, two items sharing the category: 0.4 + 0.5
        let lookup = vec![
            ingredient("a", "c1", 100.0, 50.0, false),
            ingredient("b", "c1", 100.0, 50.0, false),
        ];
        let selections = vec![
            SetIngredientSelection::new("a", 0.4),
            SetIngredientSelection::new("b", 0.5),
        ];

        let ledger = fold_selections(&selections, &lookup);
        let category = &ledger.categories[0];
        let first = &category.line_items[0];

        // 50 * (1 - 0.5) = 25 allowed, 20 used
        assert!((first.max_calories(category, 100.0) - 25.0).abs() < 1e-9);
        assert_eq!(first.headroom(category, 100.0), 5.0);
    }
}
