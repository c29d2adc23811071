//! Parse recipes, meal plans and health analyses out of language-model text.
//!
//! The extractors are pure, best-effort functions over a `&str`: they never
//! return an error and never panic, and any section they cannot find is left
//! at its default. Prompt builders produce the messages that ask a model for
//! text in the shape the extractors read, and the optional provider/builder
//! layer runs a whole task against a completion service.
//!
//! ```
//! let recipe = nourish_ai::parse_recipe("# Toast\n## Ingredients\n- bread");
//! assert_eq!(recipe.title, "Toast");
//! assert_eq!(recipe.ingredients, vec!["bread"]);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod model;
pub mod prompts;
pub mod providers;

pub use builder::{Nourish, RequestBuilder, Task};
pub use config::NourishConfig;
pub use error::{ExtractError, NourishError};
pub use extractors::sections::{extract_list_items, find_section, locate_section};
pub use extractors::{
    Extractor, FoodValidationExtractor, HealthAnalysisExtractor, MealPlanExtractor,
    RecipeExtractor,
};
pub use model::{
    FoodValidation, MealType, ParseMode, ParsedHealthAnalysis, ParsedMeal, ParsedMealPlan,
    ParsedMealPlanDay, ParsedRecipe, ParsedResponse,
};
pub use prompts::{ChatMessage, DietType, ImageInput, ScanKind, WeightGoal};
pub use providers::{CompletionProvider, RetryingProvider, ToolkitProvider};

/// Extract a recipe; missing parts fall back to defaults.
pub fn parse_recipe(raw: &str) -> ParsedRecipe {
    RecipeExtractor.extract(raw)
}

/// Extract a meal plan; no `Day N` headings means no days.
pub fn parse_meal_plan(raw: &str) -> ParsedMealPlan {
    MealPlanExtractor.extract(raw)
}

/// Extract findings and recommendations from a health analysis.
pub fn parse_health_analysis(raw: &str) -> ParsedHealthAnalysis {
    HealthAnalysisExtractor.extract(raw)
}

/// Read the verdict of the food-image validation prompt.
pub fn parse_food_validation(raw: &str) -> FoodValidation {
    FoodValidationExtractor.extract(raw)
}

/// Route a raw response to the extractor for `mode`.
pub fn parse_response(mode: ParseMode, raw: &str) -> ParsedResponse {
    match mode {
        ParseMode::Recipe => ParsedResponse::Recipe(parse_recipe(raw)),
        ParseMode::MealPlan => ParsedResponse::MealPlan(parse_meal_plan(raw)),
        ParseMode::HealthAnalysis => ParsedResponse::HealthAnalysis(parse_health_analysis(raw)),
        ParseMode::FoodValidation => ParsedResponse::FoodValidation(parse_food_validation(raw)),
    }
}
