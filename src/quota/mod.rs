pub mod accounting;
pub mod admission;
pub mod assessment;
pub mod constants;
pub mod evaluation;
pub mod preconditions;
pub mod verdict;

pub use accounting::{CategoryAccumulator, Ledger, LineItem, fold_selections, round_half_up};
pub use admission::{IngredientSource, SetOperation, admit_set};
pub use assessment::{Assessment, CategoryAssessment, LineItemAssessment, assess};
pub use constants::*;
pub use evaluation::{evaluate, evaluate_detailed};
pub use preconditions::{check_new_set, duplicate_ids, ensure_not_empty, ensure_unique_ids};
pub use verdict::{Verdict, Violation, ViolationReason};
