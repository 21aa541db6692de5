mod helpers;
mod import;
mod ingredient;
mod meal;
mod shop;
mod vocab;

pub(crate) use import::cmd_import_csv;
pub(crate) use ingredient::{cmd_ingredient_cleanup, cmd_ingredient_list};
pub(crate) use meal::{
    MealEdit, cmd_meal_add, cmd_meal_delete, cmd_meal_edit, cmd_meal_list, cmd_meal_show,
};
pub(crate) use shop::cmd_shop;
pub(crate) use vocab::{cmd_categories, cmd_units};
