use serde::{Deserialize, Deserializer, Serialize};

/// How an ingredient's `grams` and `calories` combine into one reference unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Grams,
    Pieces,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Grams => "grams",
            Unit::Pieces => "pieces",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nutritional definition of a single food item.
///
/// `calories` is per 100 grams for gram-based ingredients. For piece-based
/// ingredients `calories * grams` already describes one piece.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRecord {
    #[serde(alias = "_id")]
    pub id: String,

    pub category_id: String,

    #[serde(default)]
    pub name: String,

    pub calories: f64,

    #[serde(default, deserialize_with = "blank_as_default")]
    pub proteins: f64,

    pub grams: f64,

    #[serde(default, deserialize_with = "blank_as_default")]
    pub unit: Unit,

    #[serde(default, deserialize_with = "blank_as_default")]
    pub is_alcohol: bool,
}

/// Empty CSV cells and JSON nulls read as the field's default.
fn blank_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl IngredientRecord {
    /// Calories of one full reference serving.
    #[inline]
    pub fn per_unit_calories(&self) -> f64 {
        let per_reference = self.calories * self.grams;
        match self.unit {
            Unit::Pieces => per_reference,
            Unit::Grams => per_reference / 100.0,
        }
    }

    /// Calories consumed when `value` reference servings are eaten.
    #[inline]
    pub fn calories_for(&self, value: f64) -> f64 {
        self.per_unit_calories() * value
    }

    /// Non-negative, finite nutritional figures.
    pub fn is_valid(&self) -> bool {
        [self.calories, self.proteins, self.grams]
            .into_iter()
            .all(|v| v.is_finite() && v >= 0.0)
    }

    /// Label for prompts and tables: the name, or the id when unnamed.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// One-line summary for catalog listings.
    pub fn debug_string(&self) -> String {
        format!(
            "{} [{}]: {} cal x {} {}{}",
            self.label(),
            self.category_id,
            self.calories,
            self.grams,
            self.unit,
            if self.is_alcohol { ", alcohol" } else { "" }
        )
    }
}

impl PartialEq for IngredientRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for IngredientRecord {}

impl std::hash::Hash for IngredientRecord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
