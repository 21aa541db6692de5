use anyhow::Result;

use mealplan_core::service::MealPlanner;

use super::helpers::print_ingredient_table;

pub(crate) fn cmd_ingredient_list(planner: &MealPlanner, json: bool) -> Result<()> {
    let ingredients = planner.list_ingredients()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ingredients)?);
    } else if ingredients.is_empty() {
        eprintln!("No ingredients found");
    } else {
        print_ingredient_table(&ingredients);
    }

    Ok(())
}

pub(crate) fn cmd_ingredient_cleanup(planner: &MealPlanner, json: bool) -> Result<()> {
    let removed = planner.cleanup_unused_ingredients()?;

    if json {
        println!("{}", serde_json::json!({ "removed": removed }));
    } else if removed == 0 {
        println!("No unused ingredients.");
    } else {
        println!("Removed {removed} unused ingredient(s).");
    }

    Ok(())
}
