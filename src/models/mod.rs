mod ingredient;
mod selection;

pub use ingredient::{IngredientRecord, Unit};
pub use selection::{SetIngredientSelection, SetSource, SetSubmission};
