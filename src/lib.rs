pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod quota;

pub use config::QuotaConfig;
pub use error::{QuotaError, Result};
pub use models::{IngredientRecord, SetIngredientSelection, SetSubmission, Unit};
pub use quota::{Verdict, Violation, admit_set, assess, evaluate, evaluate_detailed};
