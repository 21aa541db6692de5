/// Failures a caller is expected to tell apart from storage errors.
///
/// These travel inside `anyhow::Error`; use `downcast_ref::<MealPlanError>()`
/// to recover the kind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MealPlanError {
    #[error("meal name must not be empty")]
    EmptyMealName,

    #[error("invalid ingredient entry: {0}")]
    InvalidIngredient(String),

    #[error("meal not found: {0}")]
    MealNotFound(i64),

    #[error("another meal is already named '{0}'")]
    DuplicateMealName(String),
}
