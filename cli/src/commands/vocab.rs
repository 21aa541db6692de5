use anyhow::Result;
use tabled::{Table, Tabled, settings::Style};

use mealplan_core::service::MealPlanner;

pub(crate) fn cmd_units(planner: &MealPlanner, json: bool) -> Result<()> {
    let units = planner.units();

    if json {
        println!("{}", serde_json::to_string_pretty(&units)?);
        return Ok(());
    }

    #[derive(Tabled)]
    struct UnitRow {
        #[tabled(rename = "Unit")]
        value: &'static str,
        #[tabled(rename = "Label")]
        label: &'static str,
    }

    let rows: Vec<UnitRow> = units
        .iter()
        .map(|u| UnitRow {
            value: u.value,
            label: u.label,
        })
        .collect();
    println!("{}", Table::new(&rows).with(Style::rounded()));
    Ok(())
}

pub(crate) fn cmd_categories(planner: &MealPlanner, json: bool) -> Result<()> {
    let categories = planner.categories();

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    #[derive(Tabled)]
    struct CategoryRow {
        #[tabled(rename = "Rank")]
        rank: u8,
        #[tabled(rename = "Category")]
        name: &'static str,
        #[tabled(rename = "Key")]
        key: &'static str,
    }

    let rows: Vec<CategoryRow> = categories
        .iter()
        .map(|c| CategoryRow {
            rank: c.rank,
            name: c.name,
            key: c.key,
        })
        .collect();
    println!("{}", Table::new(&rows).with(Style::rounded()));
    Ok(())
}
