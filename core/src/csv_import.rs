use std::collections::{HashMap, HashSet};
use std::io::Read;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{debug, warn};

use crate::db::Database;
use crate::models::{IngredientEntry, MealInput};
use crate::vocab::{Category, Unit};

/// A single ingredient row from a meal spreadsheet export.
#[derive(Debug, Clone)]
pub struct MealCsvRow {
    /// 1-based line in the file, header included.
    pub line: usize,
    pub meal: String,
    pub ingredient: String,
    pub quantity: f64,
    pub unit: Unit,
    pub category: Category,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MealCsv {
    pub rows: Vec<MealCsvRow>,
    /// Rows dropped for lacking a meal or ingredient name.
    pub rows_skipped: usize,
}

/// Summary of what a CSV import would do / did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CsvImportSummary {
    pub rows_parsed: usize,
    pub rows_skipped: usize,
    pub meals_created: usize,
    pub meals_existing: usize,
    pub ingredient_lines: usize,
}

/// Parse a meal spreadsheet export from any reader.
///
/// Expected header: `Meal,Ingredient,Quantity,Unit[,Category][,Notes]`.
/// Missing or unusable quantities become 1, units and categories are
/// normalized and never rejected.
pub fn parse_meal_csv<R: Read>(reader: R) -> Result<MealCsv> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("Failed to read CSV headers")?.clone();

    let required = ["Meal", "Ingredient", "Quantity", "Unit"];
    for name in &required {
        if !headers.iter().any(|h| h.eq_ignore_ascii_case(name)) {
            bail!("Missing required column: {name}");
        }
    }

    let col =
        |name: &str| -> Option<usize> { headers.iter().position(|h| h.eq_ignore_ascii_case(name)) };

    let idx_meal = col("Meal").context("Missing 'Meal' column")?;
    let idx_ingredient = col("Ingredient").context("Missing 'Ingredient' column")?;
    let idx_quantity = col("Quantity").context("Missing 'Quantity' column")?;
    let idx_unit = col("Unit").context("Missing 'Unit' column")?;
    let idx_category = col("Category");
    let idx_notes = col("Notes");

    let mut rows = Vec::new();
    let mut rows_skipped = 0;

    for (i, result) in rdr.records().enumerate() {
        let line = i + 2;
        let record = result.with_context(|| format!("Failed to parse CSV row {line}"))?;

        let meal = field(&record, Some(idx_meal));
        let ingredient = field(&record, Some(idx_ingredient));
        if meal.is_empty() || ingredient.is_empty() {
            if record.iter().any(|v| !v.trim().is_empty()) {
                warn!(line, "skipping row without meal or ingredient name");
            }
            rows_skipped += 1;
            continue;
        }

        let raw_quantity = field(&record, Some(idx_quantity));
        let quantity = match raw_quantity.parse::<f64>() {
            Ok(q) if q.is_finite() && q > 0.0 => q,
            _ => {
                warn!(line, ingredient, quantity = raw_quantity, "unusable quantity, using 1");
                1.0
            }
        };

        let raw_unit = field(&record, Some(idx_unit));
        let unit = Unit::normalize(raw_unit);
        if !raw_unit.is_empty() && !raw_unit.eq_ignore_ascii_case(unit.as_str()) {
            debug!(line, from = raw_unit, to = unit.as_str(), "normalized unit");
        }

        let notes = field(&record, idx_notes);

        rows.push(MealCsvRow {
            line,
            meal: meal.to_string(),
            ingredient: ingredient.to_string(),
            quantity,
            unit,
            category: Category::normalize(field(&record, idx_category)),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        });
    }

    Ok(MealCsv { rows, rows_skipped })
}

/// Trimmed cell, or `""` when absent. Spreadsheet exports write blank cells as `nan`.
fn field(record: &csv::StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.eq_ignore_ascii_case("nan"))
        .unwrap_or("")
}

/// Group rows into meals by name, ignoring case, in order of first appearance.
#[must_use]
pub fn group_meals(rows: &[MealCsvRow]) -> Vec<MealInput> {
    let mut meals: Vec<MealInput> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.meal.to_lowercase()).or_insert_with(|| {
            meals.push(MealInput::named(&row.meal));
            meals.len() - 1
        });
        meals[slot].ingredients.push(IngredientEntry {
            name: row.ingredient.clone(),
            quantity: row.quantity,
            unit: row.unit.as_str().to_string(),
            category: Some(row.category),
            notes: row.notes.clone(),
        });
    }

    meals
}

/// Import parsed rows into the database, one meal at a time.
///
/// Meals already present by name are left untouched. When `dry_run` is true,
/// no data is written.
pub fn import_meal_rows(db: &Database, csv: &MealCsv, dry_run: bool) -> Result<CsvImportSummary> {
    let mut summary = CsvImportSummary {
        rows_parsed: csv.rows.len(),
        rows_skipped: csv.rows_skipped,
        ..CsvImportSummary::default()
    };

    for meal in group_meals(&csv.rows) {
        let (created, linked) = if dry_run {
            let fresh = db.find_meal_by_name(&meal.name)?.is_none();
            (fresh, if fresh { distinct_ingredients(&meal) } else { 0 })
        } else {
            let outcome = db
                .add_meal(&meal)
                .with_context(|| format!("Failed to import meal '{}'", meal.name))?;
            (outcome.created, outcome.linked)
        };

        if created {
            summary.meals_created += 1;
            summary.ingredient_lines += linked;
        } else {
            summary.meals_existing += 1;
        }
    }

    Ok(summary)
}

/// Lines a meal would get: ingredient names repeated within it (ASCII case
/// folded, like the `NOCASE` column) link once.
fn distinct_ingredients(meal: &MealInput) -> usize {
    meal.ingredients
        .iter()
        .map(|e| e.name.trim().to_ascii_lowercase())
        .collect::<HashSet<_>>()
        .len()
}
