use anyhow::Result;
use std::io;

use mealplan_core::service::MealPlanner;
use mealplan_core::shopping;

use super::helpers::print_shopping_table;

fn missing_meal_ids(planner: &MealPlanner, meal_ids: &[i64]) -> Result<Vec<i64>> {
    let mut missing = Vec::new();
    for &id in meal_ids {
        if planner.get_meal(id)?.is_none() && !missing.contains(&id) {
            missing.push(id);
        }
    }
    Ok(missing)
}

pub(crate) fn cmd_shop(planner: &MealPlanner, meal_ids: &[i64], csv: bool, json: bool) -> Result<()> {
    let missing = missing_meal_ids(planner, meal_ids)?;
    if !missing.is_empty() {
        let ids = missing
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        eprintln!("Warning: no meal with id {ids}, skipping");
    }

    let items = planner.generate_shopping_list(meal_ids)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if csv {
        shopping::write_csv(&items, io::stdout().lock())?;
    } else if items.is_empty() {
        eprintln!("Shopping list is empty");
    } else {
        print_shopping_table(&items);
    }

    Ok(())
}
