use clap::Parser;
use std::path::Path;
use tracing::info;

use set_quota_rs::catalog::{IngredientCatalog, load_catalog, load_set, save_set};
use set_quota_rs::cli::{Cli, Command};
use set_quota_rs::config::QuotaConfig;
use set_quota_rs::error::{QuotaError, Result};
use set_quota_rs::interface::{
    compose_selections, display_assessment, display_ingredient_list, display_verdict,
    prompt_yes_no, write_assessment_csv,
};
use set_quota_rs::logging::{LoggingConfig, init_logging};
use set_quota_rs::models::SetSubmission;
use set_quota_rs::quota::{SetOperation, Verdict, admit_set, assess};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env().with_overrides(cli.log_level.clone(), cli.log_format);
    init_logging(&logging)?;

    let config = QuotaConfig::from_env()?.with_override(cli.max_consumption)?;
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Check { set, update, json } => cmd_check(&cli.catalog, &set, update, json, &config),
        Command::Report { set, csv } => cmd_report(&cli.catalog, &set, csv.as_deref(), &config),
        Command::Compose { out } => cmd_compose(&cli.catalog, &out, &config),
        Command::ValidateCatalog => cmd_validate_catalog(&cli.catalog),
    }
}

fn open_catalog(path: &Path) -> Result<IngredientCatalog> {
    if !path.exists() {
        return Err(QuotaError::InvalidInput(format!(
            "ingredient catalog not found: {}",
            path.display()
        )));
    }

    let catalog = IngredientCatalog::new(load_catalog(path)?);
    info!(records = catalog.len(), "catalog ready");
    Ok(catalog)
}

/// Run the set admission gate on a set file.
fn cmd_check(
    catalog_path: &Path,
    set_path: &Path,
    update: bool,
    json: bool,
    config: &QuotaConfig,
) -> Result<()> {
    let catalog = open_catalog(catalog_path)?;
    let submission = load_set(set_path)?;
    let operation = if update {
        SetOperation::Update
    } else {
        SetOperation::Create
    };

    let verdict = match admit_set(&catalog, submission.selections(), operation, config) {
        Ok(verdict) => verdict,
        Err(QuotaError::QuotaExceeded(violation)) => Verdict::Rejected(violation),
        Err(e) => return Err(e),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        display_verdict(&verdict);
    }

    match verdict {
        Verdict::Accepted => Ok(()),
        Verdict::Rejected(violation) => Err(QuotaError::QuotaExceeded(violation)),
    }
}

/// Print the per-category headroom report for a set file.
fn cmd_report(
    catalog_path: &Path,
    set_path: &Path,
    csv_path: Option<&Path>,
    config: &QuotaConfig,
) -> Result<()> {
    let catalog = open_catalog(catalog_path)?;
    let submission = load_set(set_path)?;

    let assessment = assess(
        submission.selections(),
        catalog.records(),
        config.max_consumption_percent,
    );
    display_assessment(&assessment)?;

    if let Some(path) = csv_path {
        write_assessment_csv(&assessment, path)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

/// Build a set interactively and save it.
fn cmd_compose(catalog_path: &Path, out_path: &Path, config: &QuotaConfig) -> Result<()> {
    let catalog = open_catalog(catalog_path)?;

    if catalog.is_empty() {
        println!("The catalog has no ingredients.");
        return Ok(());
    }

    println!("Loaded {} ingredients in {} categories", catalog.len(), catalog.categories().len());
    println!();

    let selections = compose_selections(&catalog, config)?;
    if selections.is_empty() {
        println!("No ingredients selected.");
        return Ok(());
    }

    let verdict = admit_set(&catalog, Some(selections.as_slice()), SetOperation::Create, config)
        .or_else(|e| match e {
            QuotaError::QuotaExceeded(violation) => Ok(Verdict::Rejected(violation)),
            other => Err(other),
        })?;
    display_verdict(&verdict);

    let save = prompt_yes_no(
        &format!("Save set to {}?", out_path.display()),
        verdict.is_accepted(),
    )?;
    if save {
        save_set(out_path, &SetSubmission::manual(selections))?;
        println!("Set saved.");
    }

    Ok(())
}

/// Report catalog records that break the non-negativity invariant.
fn cmd_validate_catalog(catalog_path: &Path) -> Result<()> {
    let catalog = open_catalog(catalog_path)?;
    let invalid = catalog.invalid_records();

    println!(
        "{} ingredients in {} categories",
        catalog.len(),
        catalog.categories().len()
    );
    for category_id in catalog.categories() {
        println!("  {}: {}", category_id, catalog.by_category(category_id).len());
    }

    if invalid.is_empty() {
        println!("All ingredient records are valid.");
        return Ok(());
    }

    display_ingredient_list(&invalid, "Invalid ingredient records");
    Err(QuotaError::InvalidInput(format!(
        "{} invalid ingredient records",
        invalid.len()
    )))
}
