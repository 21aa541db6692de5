use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::models::{format_quantity, format_quantity_rounded};
use crate::vocab::Category;

/// A meal line as read for aggregation: ingredient name, the line's quantity
/// and unit, and the ingredient's stored category string.
#[derive(Debug, Clone)]
pub struct ShoppingRow {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Category,
}

impl ShoppingItem {
    /// `eggs - 6 piece (Fridge)`
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{} - {} {} ({})",
            self.name,
            format_quantity(self.quantity),
            self.unit,
            self.category.display_name()
        )
    }
}

/// Merge rows into one entry per (name, unit, category) and sort them for
/// walking the shop: category rank first, then name ignoring case.
///
/// Units are never converted, so `200 g` and `1 cup` of flour stay separate.
/// Quantities are summed in row order.
#[must_use]
pub fn aggregate<I>(rows: I) -> Vec<ShoppingItem>
where
    I: IntoIterator<Item = ShoppingRow>,
{
    let mut totals: HashMap<(String, String, String), f64> = HashMap::new();
    for row in rows {
        *totals
            .entry((row.name, row.unit, row.category))
            .or_insert(0.0) += row.quantity;
    }

    let mut items: Vec<ShoppingItem> = totals
        .into_iter()
        .map(|((name, unit, category), quantity)| ShoppingItem {
            name,
            quantity,
            unit,
            category: Category::normalize(&category),
        })
        .collect();
    items.sort_by(compare_items);
    items
}

fn compare_items(a: &ShoppingItem, b: &ShoppingItem) -> Ordering {
    a.category
        .rank()
        .cmp(&b.category.rank())
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.unit.cmp(&b.unit))
}

/// Plain-text list, one [`ShoppingItem::to_line`] per line.
#[must_use]
pub fn render_text(items: &[ShoppingItem]) -> String {
    items
        .iter()
        .map(ShoppingItem::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the list as CSV with an `Ingredient,Quantity,Unit,Category` header.
/// Quantities are rounded to two decimals.
pub fn write_csv<W: Write>(items: &[ShoppingItem], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Ingredient", "Quantity", "Unit", "Category"])?;
    for item in items {
        wtr.write_record([
            item.name.as_str(),
            format_quantity_rounded(item.quantity).as_str(),
            item.unit.as_str(),
            item.category.display_name(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
