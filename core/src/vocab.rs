use std::fmt;

use serde::{Deserialize, Serialize};

/// Measurement labels a meal line may carry.
///
/// Units are opaque: nothing converts between them, and two lines only merge on
/// a shopping list when their labels match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "ml")]
    Millilitre,
    #[serde(rename = "l")]
    Litre,
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "tbsp")]
    Tablespoon,
    #[serde(rename = "cup")]
    Cup,
    #[serde(rename = "piece")]
    Piece,
    #[serde(rename = "pieces")]
    Pieces,
    #[serde(rename = "clove")]
    Clove,
    #[serde(rename = "cloves")]
    Cloves,
    #[serde(rename = "cm")]
    Centimetre,
    #[serde(rename = "pinch")]
    Pinch,
    #[serde(rename = "dash")]
    Dash,
    #[serde(rename = "can")]
    Can,
    #[serde(rename = "jar")]
    Jar,
    #[serde(rename = "bottle")]
    Bottle,
    #[serde(rename = "packet")]
    Packet,
    #[serde(rename = "bag")]
    Bag,
    #[serde(rename = "head")]
    Head,
    #[serde(rename = "bunch")]
    Bunch,
    #[serde(rename = "stalk")]
    Stalk,
    #[serde(rename = "leaf")]
    Leaf,
    #[serde(rename = "leaves")]
    Leaves,
}

impl Unit {
    /// Every unit, in the order pickers should offer them.
    pub const ALL: [Unit; 24] = [
        Unit::Gram,
        Unit::Kilogram,
        Unit::Millilitre,
        Unit::Litre,
        Unit::Teaspoon,
        Unit::Tablespoon,
        Unit::Cup,
        Unit::Piece,
        Unit::Pieces,
        Unit::Clove,
        Unit::Cloves,
        Unit::Centimetre,
        Unit::Pinch,
        Unit::Dash,
        Unit::Can,
        Unit::Jar,
        Unit::Bottle,
        Unit::Packet,
        Unit::Bag,
        Unit::Head,
        Unit::Bunch,
        Unit::Stalk,
        Unit::Leaf,
        Unit::Leaves,
    ];

    /// The label stored on meal lines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Millilitre => "ml",
            Unit::Litre => "l",
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
            Unit::Cup => "cup",
            Unit::Piece => "piece",
            Unit::Pieces => "pieces",
            Unit::Clove => "clove",
            Unit::Cloves => "cloves",
            Unit::Centimetre => "cm",
            Unit::Pinch => "pinch",
            Unit::Dash => "dash",
            Unit::Can => "can",
            Unit::Jar => "jar",
            Unit::Bottle => "bottle",
            Unit::Packet => "packet",
            Unit::Bag => "bag",
            Unit::Head => "head",
            Unit::Bunch => "bunch",
            Unit::Stalk => "stalk",
            Unit::Leaf => "leaf",
            Unit::Leaves => "leaves",
        }
    }

    #[must_use]
    pub fn display_label(self) -> &'static str {
        match self {
            Unit::Gram => "Gram (g)",
            Unit::Kilogram => "Kilogram (kg)",
            Unit::Millilitre => "Millilitre (ml)",
            Unit::Litre => "Litre (l)",
            Unit::Teaspoon => "Teaspoon (tsp)",
            Unit::Tablespoon => "Tablespoon (tbsp)",
            Unit::Cup => "Cup",
            Unit::Piece => "Piece",
            Unit::Pieces => "Pieces",
            Unit::Clove => "Clove",
            Unit::Cloves => "Cloves",
            Unit::Centimetre => "Centimetre (cm)",
            Unit::Pinch => "Pinch",
            Unit::Dash => "Dash",
            Unit::Can => "Can",
            Unit::Jar => "Jar",
            Unit::Bottle => "Bottle",
            Unit::Packet => "Packet",
            Unit::Bag => "Bag",
            Unit::Head => "Head",
            Unit::Bunch => "Bunch",
            Unit::Stalk => "Stalk",
            Unit::Leaf => "Leaf",
            Unit::Leaves => "Leaves",
        }
    }

    /// Exact label lookup; `"g"` matches, `"grams"` does not.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Unit> {
        Unit::ALL.into_iter().find(|u| u.as_str() == label)
    }

    /// Map a free-form unit (as typed in a spreadsheet) to a unit.
    ///
    /// Blank or unrecognized input becomes [`Unit::Piece`].
    #[must_use]
    pub fn normalize(input: &str) -> Unit {
        let lower = input.trim().to_lowercase();
        match lower.as_str() {
            "g" | "gram" | "grams" => Unit::Gram,
            "kg" | "kilogram" | "kilograms" => Unit::Kilogram,
            "ml" | "millilitre" | "millilitres" | "milliliter" | "milliliters" => {
                Unit::Millilitre
            }
            "l" | "litre" | "litres" | "litre(s)" | "liter" | "liters" => Unit::Litre,
            "tsp" | "teaspoon" | "teaspoons" => Unit::Teaspoon,
            "tbsp" | "tablespoon" | "tablespoons" => Unit::Tablespoon,
            "cup" | "cups" => Unit::Cup,
            "clove" | "cloves" | "cloves of garlic" => Unit::Clove,
            "cm" | "centimetre" | "centimetres" => Unit::Centimetre,
            "pinch" | "pinches" => Unit::Pinch,
            "dash" | "dashes" => Unit::Dash,
            "can" | "cans" => Unit::Can,
            "jar" | "jars" => Unit::Jar,
            "bottle" | "bottles" => Unit::Bottle,
            "packet" | "packets" | "punnet" => Unit::Packet,
            "bag" | "bags" => Unit::Bag,
            "head" | "heads" => Unit::Head,
            "bunch" | "bunches" | "sprigs" => Unit::Bunch,
            "stalk" | "stalks" | "sticks" => Unit::Stalk,
            "leaf" => Unit::Leaf,
            "leaves" => Unit::Leaves,
            // item(s), piece(s), sheets, rashers, bulb, "nan" and anything else
            _ => Unit::Piece,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shopping-aisle grouping used to order a shopping list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Vegetables,
    Bakery,
    Fridge,
    DryFood,
    Asian,
    Cans,
    Spices,
    Treats,
    #[default]
    NotSure,
    Baking,
    Frozen,
    OrganicStore,
    MeatFridge,
    Alcohol,
    Other,
}

impl Category {
    /// Every category in aisle order.
    pub const ALL: [Category; 15] = [
        Category::Vegetables,
        Category::Bakery,
        Category::Fridge,
        Category::DryFood,
        Category::Asian,
        Category::Cans,
        Category::Spices,
        Category::Treats,
        Category::NotSure,
        Category::Baking,
        Category::Frozen,
        Category::OrganicStore,
        Category::MeatFridge,
        Category::Alcohol,
        Category::Other,
    ];

    /// Shopping order; lower ranks are walked past first.
    ///
    /// Rank 13 is unassigned.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Category::Vegetables => 1,
            Category::Bakery => 2,
            Category::Fridge => 3,
            Category::DryFood => 4,
            Category::Asian => 5,
            Category::Cans => 6,
            Category::Spices => 7,
            Category::Treats => 8,
            Category::NotSure => 9,
            Category::Baking => 10,
            Category::Frozen => 11,
            Category::OrganicStore => 12,
            Category::MeatFridge => 14,
            Category::Alcohol => 15,
            Category::Other => 16,
        }
    }

    /// Storage key, e.g. `DRY_FOOD`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Category::Vegetables => "VEGETABLES",
            Category::Bakery => "BAKERY",
            Category::Fridge => "FRIDGE",
            Category::DryFood => "DRY_FOOD",
            Category::Asian => "ASIAN",
            Category::Cans => "CANS",
            Category::Spices => "SPICES",
            Category::Treats => "TREATS",
            Category::NotSure => "NOT_SURE",
            Category::Baking => "BAKING",
            Category::Frozen => "FROZEN",
            Category::OrganicStore => "ORGANIC_STORE",
            Category::MeatFridge => "MEAT_FRIDGE",
            Category::Alcohol => "ALCOHOL",
            Category::Other => "OTHER",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Vegetables => "Vegetables",
            Category::Bakery => "Bakery",
            Category::Fridge => "Fridge",
            Category::DryFood => "Dry Food",
            Category::Asian => "Asian",
            Category::Cans => "Cans",
            Category::Spices => "Spices",
            Category::Treats => "Treats",
            Category::NotSure => "Not Sure",
            Category::Baking => "Baking",
            Category::Frozen => "Frozen",
            Category::OrganicStore => "Organic Store",
            Category::MeatFridge => "Meat Fridge",
            Category::Alcohol => "Alcohol",
            Category::Other => "Other",
        }
    }

    /// Map a free-form category to a category. Never fails: blank or
    /// unrecognized input is [`Category::NotSure`].
    ///
    /// Case is ignored and spaces, hyphens and underscores are interchangeable,
    /// so `"dry food"`, `"Dry-Food"` and `"DRY_FOOD"` all match.
    #[must_use]
    pub fn normalize(input: &str) -> Category {
        let folded = input
            .trim()
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        match folded.as_str() {
            "vegetables" | "vegetable" | "veg" => Category::Vegetables,
            "bakery" => Category::Bakery,
            "fridge" => Category::Fridge,
            "dry food" | "dry foods" => Category::DryFood,
            "asian" => Category::Asian,
            "cans" | "can" | "canned" => Category::Cans,
            "spices" | "spice" => Category::Spices,
            "treats" | "treat" => Category::Treats,
            "baking" => Category::Baking,
            "frozen" => Category::Frozen,
            "organic store" | "organic" => Category::OrganicStore,
            "meat fridge" | "meat" => Category::MeatFridge,
            "alcohol" => Category::Alcohol,
            "other" => Category::Other,
            // "not sure" and everything unrecognized
            _ => Category::NotSure,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Flat description of a unit for pickers and API clients.
#[derive(Debug, Clone, Serialize)]
pub struct UnitInfo {
    pub value: &'static str,
    pub label: &'static str,
}

/// Flat description of a category for pickers and API clients.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub rank: u8,
}

#[must_use]
pub fn unit_options() -> Vec<UnitInfo> {
    Unit::ALL
        .iter()
        .map(|u| UnitInfo {
            value: u.as_str(),
            label: u.display_label(),
        })
        .collect()
}

#[must_use]
pub fn category_options() -> Vec<CategoryInfo> {
    Category::ALL
        .iter()
        .map(|c| CategoryInfo {
            key: c.key(),
            name: c.display_name(),
            rank: c.rank(),
        })
        .collect()
}
