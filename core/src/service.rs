use std::io::{Read, Write};
use std::path::Path;

use anyhow::Result;

use crate::csv_import::{self, CsvImportSummary};
use crate::db::Database;
use crate::models::{
    AddMealOutcome, Ingredient, Meal, MealDetail, MealIngredientLine, MealInput, MealSummary,
};
use crate::shopping::{self, ShoppingItem};
use crate::vocab::{self, CategoryInfo, UnitInfo};

/// Everything the planner does, over one owned database handle.
pub struct MealPlanner {
    db: Database,
}

impl MealPlanner {
    pub fn new(db_path: &Path) -> Result<Self> {
        let db = Database::open(db_path)?;
        Ok(Self { db })
    }

    pub fn new_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self { db })
    }

    #[must_use]
    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }

    // --- Meals ---

    pub fn add_meal(&self, meal: &MealInput) -> Result<AddMealOutcome> {
        self.db.add_meal(meal)
    }

    pub fn update_meal(&self, id: i64, meal: &MealInput) -> Result<usize> {
        self.db.update_meal(id, meal)
    }

    pub fn delete_meal(&self, id: i64) -> Result<bool> {
        self.db.delete_meal(id)
    }

    pub fn list_meals(&self) -> Result<Vec<MealSummary>> {
        self.db.list_meals()
    }

    pub fn get_meal(&self, id: i64) -> Result<Option<Meal>> {
        self.db.get_meal(id)
    }

    pub fn get_meal_detail(&self, id: i64) -> Result<Option<MealDetail>> {
        self.db.get_meal_detail(id)
    }

    pub fn get_meal_ingredients(&self, id: i64) -> Result<Vec<MealIngredientLine>> {
        self.db.get_meal_ingredients(id)
    }

    // --- Ingredients ---

    pub fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.db.list_ingredients()
    }

    pub fn cleanup_unused_ingredients(&self) -> Result<usize> {
        self.db.cleanup_unused_ingredients()
    }

    // --- Shopping list ---

    pub fn generate_shopping_list(&self, meal_ids: &[i64]) -> Result<Vec<ShoppingItem>> {
        self.db.generate_shopping_list(meal_ids)
    }

    pub fn shopping_list_text(&self, meal_ids: &[i64]) -> Result<String> {
        let items = self.generate_shopping_list(meal_ids)?;
        Ok(shopping::render_text(&items))
    }

    pub fn export_shopping_list_csv<W: Write>(&self, meal_ids: &[i64], writer: W) -> Result<()> {
        let items = self.generate_shopping_list(meal_ids)?;
        shopping::write_csv(&items, writer)
    }

    // --- Vocabularies ---

    #[must_use]
    pub fn units(&self) -> Vec<UnitInfo> {
        vocab::unit_options()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<CategoryInfo> {
        vocab::category_options()
    }

    // --- Import ---

    pub fn import_meals_csv<R: Read>(&self, reader: R, dry_run: bool) -> Result<CsvImportSummary> {
        let csv = csv_import::parse_meal_csv(reader)?;
        csv_import::import_meal_rows(&self.db, &csv, dry_run)
    }
}
