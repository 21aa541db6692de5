use anyhow::{Context, Result};

use mealplan_core::models::{IngredientEntry, MealIngredientLine, MealInput};
use mealplan_core::service::MealPlanner;

use super::helpers::{exit_not_found, print_line_table, print_meal_table};

/// Parse repeated `-i name,quantity,unit[,category]` arguments.
pub(crate) fn parse_entries(specs: &[String]) -> Result<Vec<IngredientEntry>> {
    specs
        .iter()
        .map(|s| IngredientEntry::parse(s).with_context(|| format!("Invalid ingredient '{s}'")))
        .collect()
}

pub(crate) fn cmd_meal_add(
    planner: &MealPlanner,
    meal: MealInput,
    ingredients: &[String],
    json: bool,
) -> Result<()> {
    let meal = meal.with_ingredients(parse_entries(ingredients)?);
    let outcome = planner.add_meal(&meal)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.created {
        let id = outcome.id;
        let count = outcome.linked;
        println!("Added meal: {} (id: {id}, {count} ingredients)", meal.name.trim());
    } else {
        let id = outcome.id;
        println!(
            "Meal '{}' already exists (id: {id}), nothing changed",
            meal.name.trim()
        );
    }

    Ok(())
}

pub(crate) fn cmd_meal_list(planner: &MealPlanner, json: bool) -> Result<()> {
    let meals = planner.list_meals()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&meals)?);
    } else if meals.is_empty() {
        eprintln!("No meals yet. Add one with `mealplan meal add <name>`");
    } else {
        print_meal_table(&meals);
    }

    Ok(())
}

pub(crate) fn cmd_meal_show(planner: &MealPlanner, id: i64, json: bool) -> Result<()> {
    let Some(detail) = planner.get_meal_detail(id)? else {
        exit_not_found(&format!("Meal {id} not found"), json);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    let meal = &detail.meal;
    println!("{} (id: {})", meal.name, meal.id);
    if let Some(description) = &meal.description {
        println!("  {description}");
    }
    if let Some(link) = &meal.recipe_link {
        println!("  Recipe: {link}");
    }
    if let Some(notes) = &meal.notes {
        println!("  Notes: {notes}");
    }
    println!();
    if detail.ingredients.is_empty() {
        println!("No ingredients.");
    } else {
        print_line_table(&detail.ingredients);
    }

    Ok(())
}

/// Field overrides for `meal edit`. `None` keeps the stored value.
pub(crate) struct MealEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub recipe_link: Option<String>,
    pub notes: Option<String>,
    pub ingredients: Vec<String>,
    pub clear_ingredients: bool,
}

pub(crate) fn cmd_meal_edit(
    planner: &MealPlanner,
    id: i64,
    edit: MealEdit,
    json: bool,
) -> Result<()> {
    let Some(current) = planner.get_meal_detail(id)? else {
        exit_not_found(&format!("Meal {id} not found"), json);
    };

    let ingredients = if edit.clear_ingredients {
        Vec::new()
    } else if edit.ingredients.is_empty() {
        current.ingredients.iter().map(line_to_entry).collect()
    } else {
        parse_entries(&edit.ingredients)?
    };

    let meal = MealInput {
        name: edit.name.unwrap_or(current.meal.name),
        description: edit.description.or(current.meal.description),
        recipe_link: edit.recipe_link.or(current.meal.recipe_link),
        notes: edit.notes.or(current.meal.notes),
        ingredients,
    };
    let count = planner.update_meal(id, &meal)?;

    if json {
        let detail = planner.get_meal_detail(id)?;
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        println!("Updated meal {id}: {} ({count} ingredients)", meal.name.trim());
    }

    Ok(())
}

fn line_to_entry(line: &MealIngredientLine) -> IngredientEntry {
    IngredientEntry {
        name: line.ingredient_name.clone(),
        quantity: line.quantity,
        unit: line.unit.clone(),
        category: Some(line.category),
        notes: line.notes.clone(),
    }
}

pub(crate) fn cmd_meal_delete(planner: &MealPlanner, id: i64, json: bool) -> Result<()> {
    if !planner.delete_meal(id)? {
        exit_not_found(&format!("Meal {id} not found"), json);
    }

    if json {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!("Deleted meal {id}");
    }
    Ok(())
}
