use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use tracing::{debug, info};

use crate::error::MealPlanError;
use crate::models::{
    AddMealOutcome, Ingredient, IngredientEntry, Meal, MealDetail, MealIngredientLine, MealInput,
    MealSummary,
};
use crate::shopping::{self, ShoppingItem, ShoppingRow};
use crate::vocab::Category;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS meals (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL COLLATE NOCASE UNIQUE,
                    description TEXT,
                    recipe_link TEXT,
                    notes TEXT,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS ingredients (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL COLLATE NOCASE UNIQUE,
                    category TEXT NOT NULL DEFAULT 'NOT_SURE',
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS meal_ingredients (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    meal_id INTEGER NOT NULL REFERENCES meals(id) ON DELETE CASCADE,
                    ingredient_id INTEGER NOT NULL REFERENCES ingredients(id),
                    quantity REAL NOT NULL CHECK (quantity > 0),
                    unit TEXT NOT NULL,
                    notes TEXT,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    UNIQUE (meal_id, ingredient_id)
                );

                CREATE INDEX IF NOT EXISTS idx_meal_ingredients_meal ON meal_ingredients(meal_id);
                CREATE INDEX IF NOT EXISTS idx_meal_ingredients_ingredient ON meal_ingredients(ingredient_id);

                PRAGMA user_version = 1;",
            )?;
        }

        Ok(())
    }

    // --- Row mapping helpers ---

    fn meal_from_row(row: &rusqlite::Row) -> rusqlite::Result<Meal> {
        Ok(Meal {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            recipe_link: row.get(3)?,
            notes: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn ingredient_from_row(row: &rusqlite::Row) -> rusqlite::Result<Ingredient> {
        Ok(Ingredient {
            id: row.get(0)?,
            name: row.get(1)?,
            category: Category::normalize(&row.get::<_, String>(2)?),
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }

    // --- Meals ---

    /// Create a meal with its ingredient lines in one transaction.
    ///
    /// A meal whose name already exists (ignoring case) is left untouched and
    /// its id is returned with `created: false`.
    pub fn add_meal(&self, meal: &MealInput) -> Result<AddMealOutcome> {
        meal.validate()?;
        let name = meal.name.trim();

        let tx = self.conn.unchecked_transaction()?;
        if let Some(id) = find_meal_id(&tx, name)? {
            debug!(meal_id = id, name, "meal already exists, skipping");
            return Ok(AddMealOutcome {
                id,
                created: false,
                linked: 0,
            });
        }

        let now = Local::now().to_rfc3339();
        tx.execute(
            "INSERT INTO meals (name, description, recipe_link, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                name,
                non_blank(meal.description.as_deref()),
                non_blank(meal.recipe_link.as_deref()),
                non_blank(meal.notes.as_deref()),
                now,
                now,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let linked = insert_lines(&tx, id, &meal.ingredients, &now)?;
        tx.commit()?;

        info!(meal_id = id, name, ingredients = linked, "created meal");
        Ok(AddMealOutcome {
            id,
            created: true,
            linked,
        })
    }

    /// Replace a meal's metadata and its entire ingredient list.
    ///
    /// Returns the number of ingredient lines written.
    pub fn update_meal(&self, id: i64, meal: &MealInput) -> Result<usize> {
        meal.validate()?;
        let name = meal.name.trim();

        let tx = self.conn.unchecked_transaction()?;
        if !meal_exists(&tx, id)? {
            return Err(MealPlanError::MealNotFound(id).into());
        }
        if let Some(other) = find_meal_id(&tx, name)? {
            if other != id {
                return Err(MealPlanError::DuplicateMealName(name.to_string()).into());
            }
        }

        let now = Local::now().to_rfc3339();
        tx.execute(
            "UPDATE meals SET name = ?1, description = ?2, recipe_link = ?3, notes = ?4, updated_at = ?5
             WHERE id = ?6",
            params![
                name,
                non_blank(meal.description.as_deref()),
                non_blank(meal.recipe_link.as_deref()),
                non_blank(meal.notes.as_deref()),
                now,
                id,
            ],
        )?;
        tx.execute(
            "DELETE FROM meal_ingredients WHERE meal_id = ?1",
            params![id],
        )?;
        let linked = insert_lines(&tx, id, &meal.ingredients, &now)?;
        tx.commit()?;

        info!(meal_id = id, name, ingredients = linked, "updated meal");
        Ok(linked)
    }

    /// Delete a meal and its lines. Ingredients stay.
    pub fn delete_meal(&self, id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM meal_ingredients WHERE meal_id = ?1",
            params![id],
        )?;
        let rows = tx.execute("DELETE FROM meals WHERE id = ?1", params![id])?;
        tx.commit()?;

        if rows > 0 {
            info!(meal_id = id, "deleted meal");
        }
        Ok(rows > 0)
    }

    pub fn get_meal(&self, id: i64) -> Result<Option<Meal>> {
        self.conn
            .query_row(
                "SELECT id, name, description, recipe_link, notes, created_at, updated_at
                 FROM meals WHERE id = ?1",
                params![id],
                Self::meal_from_row,
            )
            .optional()
            .context("Failed to load meal")
    }

    pub fn find_meal_by_name(&self, name: &str) -> Result<Option<i64>> {
        find_meal_id(&self.conn, name.trim())
    }

    pub fn get_meal_detail(&self, id: i64) -> Result<Option<MealDetail>> {
        let Some(meal) = self.get_meal(id)? else {
            return Ok(None);
        };
        let ingredients = self.get_meal_ingredients(id)?;
        Ok(Some(MealDetail { meal, ingredients }))
    }

    pub fn list_meals(&self) -> Result<Vec<MealSummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, description FROM meals ORDER BY name, id")?;
        let meals = stmt
            .query_map([], |row| {
                Ok(MealSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(meals)
    }

    pub fn get_meal_ingredients(&self, meal_id: i64) -> Result<Vec<MealIngredientLine>> {
        let mut stmt = self.conn.prepare(
            "SELECT mi.id, mi.meal_id, mi.ingredient_id, i.name, i.category,
                    mi.quantity, mi.unit, mi.notes
             FROM meal_ingredients mi
             JOIN ingredients i ON mi.ingredient_id = i.id
             WHERE mi.meal_id = ?1
             ORDER BY i.name, mi.id",
        )?;
        let lines = stmt
            .query_map(params![meal_id], |row| {
                Ok(MealIngredientLine {
                    id: row.get(0)?,
                    meal_id: row.get(1)?,
                    ingredient_id: row.get(2)?,
                    ingredient_name: row.get(3)?,
                    category: Category::normalize(&row.get::<_, String>(4)?),
                    quantity: row.get(5)?,
                    unit: row.get(6)?,
                    notes: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines)
    }

    // --- Ingredients ---

    /// Look up an ingredient by name ignoring case, creating it when absent.
    ///
    /// `category` only applies on creation; an existing ingredient keeps its own.
    pub fn get_or_create_ingredient(
        &self,
        name: &str,
        category: Option<Category>,
    ) -> Result<Ingredient> {
        let now = Local::now().to_rfc3339();
        let id = resolve_ingredient(&self.conn, name.trim(), category, &now)?;
        self.conn
            .query_row(
                "SELECT id, name, category, created_at, updated_at FROM ingredients WHERE id = ?1",
                params![id],
                Self::ingredient_from_row,
            )
            .context("Ingredient not found")
    }

    pub fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, category, created_at, updated_at FROM ingredients ORDER BY name, id",
        )?;
        let ingredients = stmt
            .query_map([], Self::ingredient_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ingredients)
    }

    /// Delete every ingredient no meal line references. Returns how many went.
    pub fn cleanup_unused_ingredients(&self) -> Result<usize> {
        let removed = self.conn.execute(
            "DELETE FROM ingredients
             WHERE id NOT IN (SELECT DISTINCT ingredient_id FROM meal_ingredients)",
            [],
        )?;
        if removed > 0 {
            info!(removed, "removed unused ingredients");
        }
        Ok(removed)
    }

    // --- Shopping list ---

    /// Every line of the given meals joined with its ingredient, in line order.
    pub fn shopping_rows(&self, meal_ids: &BTreeSet<i64>) -> Result<Vec<ShoppingRow>> {
        if meal_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; meal_ids.len()].join(", ");
        let sql = format!(
            "SELECT i.name, mi.quantity, mi.unit, i.category
             FROM meal_ingredients mi
             JOIN ingredients i ON mi.ingredient_id = i.id
             WHERE mi.meal_id IN ({placeholders})
             ORDER BY mi.id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(meal_ids.iter()), |row| {
                Ok(ShoppingRow {
                    name: row.get(0)?,
                    quantity: row.get(1)?,
                    unit: row.get(2)?,
                    category: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Aggregated shopping list for a set of meals. Ids may repeat or come in
    /// any order; unknown ids contribute nothing.
    pub fn generate_shopping_list(&self, meal_ids: &[i64]) -> Result<Vec<ShoppingItem>> {
        let ids: BTreeSet<i64> = meal_ids.iter().copied().collect();
        let rows = self.shopping_rows(&ids)?;
        Ok(shopping::aggregate(rows))
    }
}

// --- Statement helpers shared by plain connections and transactions ---

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn find_meal_id(conn: &Connection, name: &str) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT id FROM meals WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )
    .optional()
    .context("Failed to look up meal by name")
}

fn meal_exists(conn: &Connection, id: i64) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM meals WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn resolve_ingredient(
    conn: &Connection,
    name: &str,
    category: Option<Category>,
    now: &str,
) -> Result<i64> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM ingredients WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }

    let category = category.unwrap_or_default();
    conn.execute(
        "INSERT INTO ingredients (name, category, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
        params![name, category.key(), now, now],
    )?;
    let id = conn.last_insert_rowid();
    debug!(ingredient_id = id, name, category = category.key(), "created ingredient");
    Ok(id)
}

/// Link entries to a meal, skipping any ingredient the meal already has.
/// Returns the number of lines written.
fn insert_lines(
    conn: &Connection,
    meal_id: i64,
    entries: &[IngredientEntry],
    now: &str,
) -> Result<usize> {
    let mut linked = 0;
    for entry in entries {
        let name = entry.name.trim();
        let ingredient_id = resolve_ingredient(conn, name, entry.category, now)?;

        let already_linked: Option<i64> = conn
            .query_row(
                "SELECT id FROM meal_ingredients WHERE meal_id = ?1 AND ingredient_id = ?2",
                params![meal_id, ingredient_id],
                |row| row.get(0),
            )
            .optional()?;
        if already_linked.is_some() {
            debug!(meal_id, ingredient = name, "ingredient already linked, skipping");
            continue;
        }

        conn.execute(
            "INSERT INTO meal_ingredients (meal_id, ingredient_id, quantity, unit, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                meal_id,
                ingredient_id,
                entry.quantity,
                entry.unit.trim(),
                non_blank(entry.notes.as_deref()),
                now,
                now,
            ],
        )?;
        linked += 1;
    }
    Ok(linked)
}
