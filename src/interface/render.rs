use std::io::{self, Write};

use crate::models::IngredientRecord;
use crate::quota::{Assessment, Verdict};

/// One-line verdict, used after each change while composing.
pub fn display_verdict_line(verdict: &Verdict) {
    match verdict {
        Verdict::Accepted => println!("  -> within quota"),
        Verdict::Rejected(violation) => println!("  -> over quota: {}", violation),
    }
}

/// Display a verdict with a short explanation.
pub fn display_verdict(verdict: &Verdict) {
    match verdict {
        Verdict::Accepted => println!("Set accepted: every category is within quota."),
        Verdict::Rejected(violation) => {
            println!("Set rejected: invalid ingredient values per category.");
            println!("  Category:   {}", violation.category_id);
            println!("  Ingredient: {}", violation.ingredient_id);
            println!("  Reason:     {}", violation.reason.as_str());
            println!("  Over by:    {:.0} kcal", violation.overshoot());
        }
    }
}

/// Display a per-category headroom table.
pub fn display_assessment(assessment: &Assessment) -> io::Result<()> {
    write_assessment(&mut io::stdout().lock(), assessment)
}

/// Write the headroom table for `assessment` to `out`.
pub fn write_assessment<W: Write>(out: &mut W, assessment: &Assessment) -> io::Result<()> {
    if assessment.categories.is_empty() {
        writeln!(out, "Nothing to assess (no known ingredients with a value).")?;
        return write_skipped(out, &assessment.skipped);
    }

    writeln!(out)?;
    writeln!(
        out,
        "=== Quota Report ({}% of reference servings) ===",
        assessment.max_consumption_percent
    )?;

    let name_width = assessment
        .categories
        .iter()
        .flat_map(|c| c.items.iter())
        .map(|i| i.label.len())
        .max()
        .unwrap_or(10)
        .max(10);

    for category in &assessment.categories {
        writeln!(out)?;
        writeln!(
            out,
            "[{}] servings used: {:.2}, alcohol: {:.0} kcal, total: {:.0} kcal",
            category.category_id,
            category.non_alcohol_total,
            category.alcohol_calories_consumed,
            category.total_calories()
        )?;

        for item in &category.items {
            let mut tags = Vec::new();
            if item.is_alcohol {
                tags.push("alcohol");
            }
            if item.is_over() {
                tags.push("OVER");
            }

            let tags_str = if tags.is_empty() {
                String::new()
            } else {
                format!("  [{}]", tags.join(", "))
            };

            writeln!(
                out,
                "  {:<width$}  x{:>5.2}  {:>6.0} kcal  allowed {:>6.0}  headroom {:>+6.0}{}",
                item.label,
                item.value,
                item.calories_consumed,
                item.max_calories,
                item.remaining,
                tags_str,
                width = name_width
            )?;
        }
    }

    write_skipped(out, &assessment.skipped)?;

    writeln!(out)?;
    writeln!(out, "--- Summary ---")?;
    writeln!(out, "Categories: {}", assessment.categories.len())?;
    writeln!(out, "Items over quota: {}", assessment.violation_count())?;
    writeln!(
        out,
        "Verdict: {}",
        if assessment.is_accepted() { "accepted" } else { "rejected" }
    )?;
    writeln!(out)
}

fn write_skipped<W: Write>(out: &mut W, skipped: &[String]) -> io::Result<()> {
    if !skipped.is_empty() {
        writeln!(out)?;
        writeln!(out, "Ignored: {}", skipped.join(", "))?;
    }
    Ok(())
}

/// Display a simple list of ingredient records.
pub fn display_ingredient_list(records: &[&IngredientRecord], title: &str) {
    if records.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, records.len());
    println!();

    for record in records {
        println!("  {}", record.debug_string());
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IngredientRecord, SetIngredientSelection, Unit};
    use crate::quota::assess;

    fn render(assessment: &Assessment) -> String {
        let mut out = Vec::new();
        write_assessment(&mut out, assessment).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_assessment_prints_only_notice() {
        let selections = vec![SetIngredientSelection::new("unknown", 1.0)];
        let assessment = assess(Some(selections.as_slice()), &[], 100.0);

        let text = render(&assessment);
        assert!(text.starts_with("Nothing to assess"));
        assert!(text.contains("Ignored: unknown"));
        assert!(!text.contains("Quota Report"));
        assert!(!text.contains("Summary"));
    }

    #[test]
    fn test_assessment_table_marks_over_items() {
        let lookup = vec![IngredientRecord {
            id: "rice".to_string(),
            category_id: "carbs".to_string(),
            name: "Rice".to_string(),
            calories: 100.0,
            proteins: 2.0,
            grams: 100.0,
            unit: Unit::Grams,
            is_alcohol: false,
        }];
        let selections = vec![SetIngredientSelection::new("rice", 1.5)];
        let assessment = assess(Some(selections.as_slice()), &lookup, 100.0);

        let text = render(&assessment);
        assert!(text.contains("=== Quota Report (100% of reference servings) ==="));
        assert!(text.contains("[OVER]"));
        assert!(text.contains("Verdict: rejected"));
    }
}
