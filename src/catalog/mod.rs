mod manager;
mod persistence;

pub use manager::IngredientCatalog;
pub use persistence::{
    load_catalog, load_catalog_csv, load_catalog_json, load_set, save_set,
};
