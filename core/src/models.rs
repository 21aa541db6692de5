use serde::{Deserialize, Serialize};

use crate::error::MealPlanError;
use crate::vocab::Category;

#[derive(Debug, Clone, Serialize)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub recipe_link: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Row shape for meal pickers.
#[derive(Debug, Clone, Serialize)]
pub struct MealSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub created_at: String,
    pub updated_at: String,
}

/// One ingredient requirement of a meal, joined with the ingredient it names.
#[derive(Debug, Clone, Serialize)]
pub struct MealIngredientLine {
    pub id: i64,
    pub meal_id: i64,
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub category: Category,
    pub quantity: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealDetail {
    #[serde(flatten)]
    pub meal: Meal,
    pub ingredients: Vec<MealIngredientLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddMealOutcome {
    pub id: i64,
    /// False when a meal with the same name already existed and nothing was written.
    pub created: bool,
    /// Ingredient lines written. Repeated ingredients in the list count once.
    pub linked: usize,
}

/// A meal as submitted for creation or full replacement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recipe_link: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientEntry>,
}

impl MealInput {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ingredients(mut self, ingredients: Vec<IngredientEntry>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn validate(&self) -> Result<(), MealPlanError> {
        if self.name.trim().is_empty() {
            return Err(MealPlanError::EmptyMealName);
        }
        for entry in &self.ingredients {
            entry.validate()?;
        }
        Ok(())
    }
}

/// One submitted ingredient line: `(name, quantity, unit)` or
/// `(name, quantity, unit, category)`, plus optional per-line notes.
///
/// Deserializes from either a JSON array of three or four fields or an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawIngredientEntry")]
pub struct IngredientEntry {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl IngredientEntry {
    pub fn new(
        name: &str,
        quantity: f64,
        unit: &str,
        category: Option<&str>,
    ) -> Result<Self, MealPlanError> {
        let entry = Self {
            name: name.trim().to_string(),
            quantity,
            unit: unit.trim().to_string(),
            category: category
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(Category::normalize),
            notes: None,
        };
        entry.validate()?;
        Ok(entry)
    }

    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.filter(|n| !n.trim().is_empty());
        self
    }

    /// Build an entry from 3 or 4 positional fields. Any other arity is rejected.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, MealPlanError> {
        let (name, quantity, unit, category) = match fields {
            [name, quantity, unit] => (name.as_ref(), quantity.as_ref(), unit.as_ref(), None),
            [name, quantity, unit, category] => (
                name.as_ref(),
                quantity.as_ref(),
                unit.as_ref(),
                Some(category.as_ref()),
            ),
            _ => {
                return Err(MealPlanError::InvalidIngredient(format!(
                    "expected 3 or 4 fields (name, quantity, unit[, category]), got {}",
                    fields.len()
                )));
            }
        };
        let quantity: f64 = quantity.trim().parse().map_err(|_| {
            MealPlanError::InvalidIngredient(format!("quantity '{quantity}' is not a number"))
        })?;
        Self::new(name, quantity, unit, category)
    }

    /// Parse the comma-separated form `name,quantity,unit[,category]`.
    pub fn parse(spec: &str) -> Result<Self, MealPlanError> {
        let fields: Vec<&str> = spec.split(',').collect();
        Self::from_fields(&fields)
    }

    pub fn validate(&self) -> Result<(), MealPlanError> {
        if self.name.trim().is_empty() {
            return Err(MealPlanError::InvalidIngredient(
                "ingredient name must not be empty".to_string(),
            ));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(MealPlanError::InvalidIngredient(format!(
                "quantity for '{}' must be greater than 0",
                self.name.trim()
            )));
        }
        if self.unit.trim().is_empty() {
            return Err(MealPlanError::InvalidIngredient(format!(
                "unit for '{}' must not be empty",
                self.name.trim()
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIngredientEntry {
    Fields(Vec<serde_json::Value>),
    Record {
        name: String,
        quantity: f64,
        unit: String,
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        notes: Option<String>,
    },
}

impl TryFrom<RawIngredientEntry> for IngredientEntry {
    type Error = MealPlanError;

    fn try_from(raw: RawIngredientEntry) -> Result<Self, Self::Error> {
        match raw {
            RawIngredientEntry::Fields(values) => {
                let fields: Vec<String> = values
                    .iter()
                    .map(|v| match v {
                        serde_json::Value::String(s) => s.clone(),
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect();
                Self::from_fields(&fields)
            }
            RawIngredientEntry::Record {
                name,
                quantity,
                unit,
                category,
                notes,
            } => Ok(Self::new(&name, quantity, &unit, category.as_deref())?.with_notes(notes)),
        }
    }
}

/// Render a quantity without a trailing `.0` when it is whole.
#[must_use]
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{quantity:.0}")
    } else {
        quantity.to_string()
    }
}

/// Like [`format_quantity`], rounded to two decimals for tables and CSV.
#[must_use]
pub fn format_quantity_rounded(quantity: f64) -> String {
    format_quantity((quantity * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_three_fields() {
        let entry = IngredientEntry::from_fields(&["Eggs", "4", "piece"]).unwrap();
        assert_eq!(entry.name, "Eggs");
        assert!((entry.quantity - 4.0).abs() < f64::EPSILON);
        assert_eq!(entry.unit, "piece");
        assert_eq!(entry.category, None);
    }

    #[test]
    fn test_entry_four_fields_normalizes_category() {
        let entry = IngredientEntry::from_fields(&["Milk", "1", "l", "fridge"]).unwrap();
        assert_eq!(entry.category, Some(Category::Fridge));

        let entry = IngredientEntry::from_fields(&["Saffron", "1", "pinch", "no idea"]).unwrap();
        assert_eq!(entry.category, Some(Category::NotSure));
    }

    #[test]
    fn test_entry_wrong_arity_rejected() {
        let err = IngredientEntry::from_fields(&["Eggs", "4"]).unwrap_err();
        assert!(matches!(err, MealPlanError::InvalidIngredient(_)));
        assert!(IngredientEntry::from_fields(&["a", "1", "g", "fridge", "extra"]).is_err());
        assert!(IngredientEntry::from_fields::<&str>(&[]).is_err());
    }

    #[test]
    fn test_entry_bad_quantity_rejected() {
        assert!(IngredientEntry::from_fields(&["Eggs", "four", "piece"]).is_err());
        assert!(IngredientEntry::from_fields(&["Eggs", "0", "piece"]).is_err());
        assert!(IngredientEntry::from_fields(&["Eggs", "-2", "piece"]).is_err());
        assert!(IngredientEntry::new("Eggs", f64::NAN, "piece", None).is_err());
    }

    #[test]
    fn test_entry_blank_name_or_unit_rejected() {
        assert!(IngredientEntry::new("  ", 1.0, "g", None).is_err());
        assert!(IngredientEntry::new("Flour", 1.0, " ", None).is_err());
    }

    #[test]
    fn test_entry_parse_comma_form_trims() {
        let entry = IngredientEntry::parse(" flour , 200 , g , dry food").unwrap();
        assert_eq!(entry.name, "flour");
        assert_eq!(entry.unit, "g");
        assert_eq!(entry.category, Some(Category::DryFood));
    }

    #[test]
    fn test_entry_deserialize_array_forms() {
        let entry: IngredientEntry = serde_json::from_str(r#"["eggs", 4, "piece"]"#).unwrap();
        assert_eq!(entry.name, "eggs");
        assert!((entry.quantity - 4.0).abs() < f64::EPSILON);

        let entry: IngredientEntry =
            serde_json::from_str(r#"["lettuce", "1", "head", "vegetables"]"#).unwrap();
        assert_eq!(entry.category, Some(Category::Vegetables));

        let result: Result<IngredientEntry, _> = serde_json::from_str(r#"["eggs", 4]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_entry_deserialize_object_form() {
        let entry: IngredientEntry = serde_json::from_str(
            r#"{"name": "garlic", "quantity": 2, "unit": "clove", "notes": "crushed"}"#,
        )
        .unwrap();
        assert_eq!(entry.name, "garlic");
        assert_eq!(entry.notes.as_deref(), Some("crushed"));
        assert_eq!(entry.category, None);
    }

    #[test]
    fn test_meal_input_validation() {
        assert_eq!(
            MealInput::named("  ").validate(),
            Err(MealPlanError::EmptyMealName)
        );
        assert!(MealInput::named("Pasta").validate().is_ok());

        let bad = MealInput::named("Pasta").with_ingredients(vec![IngredientEntry {
            name: "pasta".to_string(),
            quantity: 0.0,
            unit: "g".to_string(),
            category: None,
            notes: None,
        }]);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(6.0), "6");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.25), "0.25");
    }

    #[test]
    fn test_format_quantity_rounded() {
        assert_eq!(format_quantity_rounded(0.1 + 0.2), "0.3");
        assert_eq!(format_quantity_rounded(1.005_01), "1.01");
        assert_eq!(format_quantity_rounded(2.0 / 3.0), "0.67");
        assert_eq!(format_quantity_rounded(6.0), "6");
        assert_eq!(format_quantity_rounded(0.001), "0");
    }
}
