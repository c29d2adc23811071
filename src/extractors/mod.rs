use crate::error::ExtractError;
use log::warn;

mod health;
mod meal_plan;
mod recipe;
pub mod sections;
mod validation;

pub use self::health::HealthAnalysisExtractor;
pub use self::meal_plan::MealPlanExtractor;
pub use self::recipe::RecipeExtractor;
pub use self::validation::FoodValidationExtractor;

/// Turns a raw model response into one typed record.
///
/// Implementors only write `try_extract`; `extract` is the boundary callers
/// use, and it never fails: any internal error is logged and replaced by the
/// record's all-default value.
pub trait Extractor {
    type Output: Default;

    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    fn try_extract(&self, raw: &str) -> Result<Self::Output, ExtractError>;

    fn extract(&self, raw: &str) -> Self::Output {
        match self.try_extract(raw) {
            Ok(output) => output,
            Err(e) => {
                warn!("{} failed, falling back to defaults: {}", self.name(), e);
                Self::Output::default()
            }
        }
    }
}
