use std::path::Path;

use anyhow::{Context, Result};

use mealplan_core::csv_import::{import_meal_rows, parse_meal_csv};
use mealplan_core::service::MealPlanner;

pub fn cmd_import_csv(planner: &MealPlanner, path: &Path, dry_run: bool, json: bool) -> Result<()> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let csv = parse_meal_csv(file)?;

    if csv.rows.is_empty() {
        if json {
            println!(
                "{}",
                serde_json::json!({ "error": "No rows found in CSV file" })
            );
        } else {
            eprintln!("No rows found in CSV file.");
        }
        return Ok(());
    }

    let summary = import_meal_rows(planner.database(), &csv, dry_run)?;

    if json {
        let mut value = serde_json::to_value(&summary)?;
        value["dry_run"] = serde_json::Value::Bool(dry_run);
        println!("{value}");
    } else if dry_run {
        println!("Dry run, no changes made.\n");
        println!("  Rows parsed:      {}", summary.rows_parsed);
        println!("  Rows skipped:     {}", summary.rows_skipped);
        println!("  Meals to create:  {}", summary.meals_created);
        println!("  Meals existing:   {}", summary.meals_existing);
        println!("  Ingredient lines: {}", summary.ingredient_lines);
    } else {
        println!("Import complete.\n");
        println!("  Rows parsed:      {}", summary.rows_parsed);
        println!("  Rows skipped:     {}", summary.rows_skipped);
        println!("  Meals created:    {}", summary.meals_created);
        println!("  Meals existing:   {}", summary.meals_existing);
        println!("  Ingredient lines: {}", summary.ingredient_lines);
    }

    Ok(())
}
