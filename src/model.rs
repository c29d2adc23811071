use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Title used when a response carries no recognizable recipe title.
pub const DEFAULT_RECIPE_TITLE: &str = "Recipe";

/// A recipe recovered from a model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Nutrient name (lower-cased) to amount
    pub nutritional_info: BTreeMap<String, u32>,
    pub health_benefits: Vec<String>,
}

impl Default for ParsedRecipe {
    fn default() -> Self {
        Self {
            title: DEFAULT_RECIPE_TITLE.to_string(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            nutritional_info: BTreeMap::new(),
            health_benefits: Vec::new(),
        }
    }
}

/// A multi-day meal plan recovered from a model response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMealPlan {
    pub days: Vec<ParsedMealPlanDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMealPlanDay {
    /// Label such as "Day 1"
    pub day: String,
    pub meals: Vec<ParsedMeal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMeal {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub title: String,
    pub description: String,
}

/// The four meal slots of a plan day, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Fixed iteration order used when scanning a day block.
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    /// Capitalized heading label, also the fallback meal title.
    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Findings and advice recovered from a health-analysis response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedHealthAnalysis {
    pub findings: String,
    pub recommendations: Vec<String>,
    pub diet_recommendations: Vec<String>,
}

/// Verdict of the food-image validation task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodValidation {
    pub is_food: bool,
    pub explanation: String,
}

/// Which extractor a raw response should be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ParseMode {
    Recipe,
    MealPlan,
    HealthAnalysis,
    FoodValidation,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Recipe => "recipe",
            ParseMode::MealPlan => "meal-plan",
            ParseMode::HealthAnalysis => "health-analysis",
            ParseMode::FoodValidation => "food-validation",
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "recipe" => Ok(ParseMode::Recipe),
            "meal-plan" | "mealplan" => Ok(ParseMode::MealPlan),
            "health-analysis" | "health" => Ok(ParseMode::HealthAnalysis),
            "food-validation" | "validation" => Ok(ParseMode::FoodValidation),
            other => Err(format!("Unknown parse mode: {}", other)),
        }
    }
}

/// One parsed record, serialized as the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParsedResponse {
    Recipe(ParsedRecipe),
    MealPlan(ParsedMealPlan),
    HealthAnalysis(ParsedHealthAnalysis),
    FoodValidation(FoodValidation),
}

impl ParsedResponse {
    pub fn mode(&self) -> ParseMode {
        match self {
            ParsedResponse::Recipe(_) => ParseMode::Recipe,
            ParsedResponse::MealPlan(_) => ParseMode::MealPlan,
            ParsedResponse::HealthAnalysis(_) => ParseMode::HealthAnalysis,
            ParsedResponse::FoodValidation(_) => ParseMode::FoodValidation,
        }
    }
}
