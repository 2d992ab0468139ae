use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::catalog::IngredientCatalog;
use crate::config::QuotaConfig;
use crate::error::{QuotaError, Result};
use crate::interface::render::display_verdict_line;
use crate::models::{IngredientRecord, SetIngredientSelection};
use crate::quota::constants::{MAX_NAME_SUGGESTIONS, NAME_MATCH_THRESHOLD};
use crate::quota::evaluate_detailed;

/// Catalog records whose label resembles `input`, best match first.
pub fn fuzzy_candidates<'a>(catalog: &'a IngredientCatalog, input: &str) -> Vec<(&'a IngredientRecord, f64)> {
    let needle = input.to_lowercase();
    let mut candidates: Vec<(&IngredientRecord, f64)> = catalog
        .records()
        .iter()
        .map(|r| (r, jaro_winkler(&r.label().to_lowercase(), &needle)))
        .filter(|(_, score)| *score > NAME_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(MAX_NAME_SUGGESTIONS);
    candidates
}

/// Ask for an ingredient by id or name. `None` once the user is done.
pub fn prompt_ingredient(catalog: &IngredientCatalog) -> Result<Option<&IngredientRecord>> {
    loop {
        let input: String = Input::new()
            .with_prompt("Ingredient name or id (press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        if let Some(record) = catalog.get(input).or_else(|| catalog.find_by_name(input)) {
            return Ok(Some(record));
        }

        let candidates = fuzzy_candidates(catalog, input);

        if candidates.is_empty() {
            println!("No matching ingredient found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let record = candidates[0].0;
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", record.label()))
                .default(true)
                .interact()?;

            if confirm {
                return Ok(Some(record));
            }
            continue;
        }

        let mut options: Vec<String> = candidates
            .iter()
            .map(|(r, _)| format!("{} ({})", r.label(), r.category_id))
            .collect();
        options.push("None of these".to_string());

        let selection = Select::new()
            .with_prompt("Which did you mean?")
            .items(&options)
            .default(0)
            .interact()?;

        if selection < candidates.len() {
            return Ok(Some(candidates[selection].0));
        }
    }
}

/// Ask how many reference servings of `record` were eaten.
pub fn prompt_value(record: &IngredientRecord) -> Result<f64> {
    let unit_hint = match record.unit {
        crate::models::Unit::Pieces => "pieces",
        crate::models::Unit::Grams => "servings",
    };

    let input: String = Input::new()
        .with_prompt(format!(
            "How many {} of '{}' ({} g, {:.0} kcal each)?",
            unit_hint,
            record.label(),
            record.grams,
            record.per_unit_calories()
        ))
        .default("1".to_string())
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| QuotaError::InvalidInput("Invalid number".to_string()))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(QuotaError::InvalidInput(
            "Value must be a positive number".to_string(),
        ));
    }

    Ok(value)
}

/// Ask for an optional note.
pub fn prompt_note() -> Result<Option<String>> {
    let note: String = Input::new()
        .with_prompt("Note (optional)")
        .allow_empty(true)
        .interact_text()?;

    let note = note.trim();
    Ok((!note.is_empty()).then(|| note.to_string()))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Build a selection list interactively, showing the quota verdict after
/// every addition.
pub fn compose_selections(
    catalog: &IngredientCatalog,
    config: &QuotaConfig,
) -> Result<Vec<SetIngredientSelection>> {
    let mut selections: Vec<SetIngredientSelection> = Vec::new();

    while let Some(record) = prompt_ingredient(catalog)? {
        if selections.iter().any(|s| s.id == record.id) {
            println!("'{}' is already in this set", record.label());
            continue;
        }

        let value = match prompt_value(record) {
            Ok(value) => value,
            Err(QuotaError::InvalidInput(msg)) => {
                println!("{}", msg);
                continue;
            }
            Err(e) => return Err(e),
        };

        let mut selection = SetIngredientSelection::new(record.id.clone(), value);
        selection.additional_info = prompt_note()?;
        selections.push(selection);

        let verdict = evaluate_detailed(
            Some(selections.as_slice()),
            catalog.records(),
            config.max_consumption_percent,
        );
        display_verdict_line(&verdict);
    }

    Ok(selections)
}
