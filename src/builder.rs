use log::info;

use crate::config::NourishConfig;
use crate::prompts::{
    food_validation_prompt, health_analysis_prompt, health_report_prompt, meal_plan_prompt,
    recipe_from_image_prompt, recipe_from_ingredients_prompt, ChatMessage, DietType, ImageInput,
    ScanKind, WeightGoal,
};
use crate::providers::{CompletionProvider, RetryingProvider};
use crate::{parse_response, NourishError, ParseMode, ParsedResponse};

/// One generation task and its inputs
#[derive(Debug, Clone)]
pub enum Task {
    /// Ask whether an image shows food
    ValidateFood(ImageInput),
    /// Recipe for the dish in an image
    RecipeFromImage(ImageInput),
    /// Recipe built around a free-text ingredient list
    RecipeFromIngredients(String),
    /// Seven-day meal plan
    MealPlan {
        goal: WeightGoal,
        diet: DietType,
        restrictions: String,
    },
    /// Analysis of a medical image
    HealthImage { image: ImageInput, scan: ScanKind },
    /// Analysis of a written health report
    HealthReport(String),
}

impl Task {
    /// Chat messages for this task
    pub fn messages(&self) -> Vec<ChatMessage> {
        match self {
            Task::ValidateFood(image) => food_validation_prompt(image),
            Task::RecipeFromImage(image) => recipe_from_image_prompt(image),
            Task::RecipeFromIngredients(ingredients) => recipe_from_ingredients_prompt(ingredients),
            Task::MealPlan {
                goal,
                diet,
                restrictions,
            } => meal_plan_prompt(*goal, *diet, restrictions),
            Task::HealthImage { image, scan } => health_analysis_prompt(image, *scan),
            Task::HealthReport(report) => health_report_prompt(report),
        }
    }

    /// Extractor that reads this task's response
    pub fn mode(&self) -> ParseMode {
        match self {
            Task::ValidateFood(_) => ParseMode::FoodValidation,
            Task::RecipeFromImage(_) | Task::RecipeFromIngredients(_) => ParseMode::Recipe,
            Task::MealPlan { .. } => ParseMode::MealPlan,
            Task::HealthImage { .. } | Task::HealthReport(_) => ParseMode::HealthAnalysis,
        }
    }

    fn validate(&self) -> Result<(), NourishError> {
        match self {
            Task::ValidateFood(image)
            | Task::RecipeFromImage(image)
            | Task::HealthImage { image, .. } => {
                if image.as_base64().trim().is_empty() {
                    return Err(NourishError::InvalidInput(
                        "Image data cannot be empty".to_string(),
                    ));
                }
            }
            Task::RecipeFromIngredients(ingredients) => {
                if ingredients.trim().is_empty() {
                    return Err(NourishError::InvalidInput(
                        "Ingredient list cannot be empty".to_string(),
                    ));
                }
            }
            Task::HealthReport(report) => {
                if report.trim().is_empty() {
                    return Err(NourishError::InvalidInput(
                        "Health report cannot be empty".to_string(),
                    ));
                }
            }
            Task::MealPlan { .. } => {}
        }
        Ok(())
    }
}

/// Builder for configuring and running one generation task
#[derive(Default)]
pub struct RequestBuilder {
    task: Option<Task>,
    provider: Option<Box<dyn CompletionProvider>>,
    config: Option<NourishConfig>,
}

impl RequestBuilder {
    /// Set the task directly
    pub fn task(mut self, task: Task) -> Self {
        self.task = Some(task);
        self
    }

    /// Ask whether the image contains food
    ///
    /// # Example
    /// ```
    /// use nourish_ai::{ImageInput, Nourish};
    ///
    /// let builder = Nourish::builder()
    ///     .validate_food(ImageInput::from_bytes(b"..."));
    /// ```
    pub fn validate_food(self, image: ImageInput) -> Self {
        self.task(Task::ValidateFood(image))
    }

    /// Generate a recipe for the dish shown in an image
    pub fn recipe_from_image(self, image: ImageInput) -> Self {
        self.task(Task::RecipeFromImage(image))
    }

    /// Generate a recipe from a comma-separated ingredient list
    ///
    /// # Example
    /// ```
    /// use nourish_ai::Nourish;
    ///
    /// let builder = Nourish::builder()
    ///     .recipe_from_ingredients("chickpeas, spinach, garlic");
    /// ```
    pub fn recipe_from_ingredients(self, ingredients: impl Into<String>) -> Self {
        self.task(Task::RecipeFromIngredients(ingredients.into()))
    }

    /// Generate a seven-day meal plan
    pub fn meal_plan(
        self,
        goal: WeightGoal,
        diet: DietType,
        restrictions: impl Into<String>,
    ) -> Self {
        self.task(Task::MealPlan {
            goal,
            diet,
            restrictions: restrictions.into(),
        })
    }

    /// Analyze a medical image
    pub fn health_image(self, image: ImageInput, scan: ScanKind) -> Self {
        self.task(Task::HealthImage { image, scan })
    }

    /// Analyze a written health report
    pub fn health_report(self, report: impl Into<String>) -> Self {
        self.task(Task::HealthReport(report.into()))
    }

    /// Use a specific completion provider instead of the configured one
    pub fn provider(mut self, provider: Box<dyn CompletionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Use this configuration instead of loading `nourish.toml` and `NOURISH__*`
    pub fn config(mut self, config: NourishConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the prompt, request a completion and parse it
    ///
    /// # Errors
    /// Returns `NourishError` if:
    /// - No task was specified
    /// - The task input is empty
    /// - Configuration cannot be loaded
    /// - The completion service fails
    ///
    /// Parsing the completion never fails; a response the extractor cannot
    /// read yields a default-shaped record.
    ///
    /// # Example
    /// ```no_run
    /// # use nourish_ai::Nourish;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let result = Nourish::builder()
    ///     .health_report("Fasting glucose 112 mg/dL")
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<ParsedResponse, NourishError> {
        let task = self.task.ok_or_else(|| {
            NourishError::BuilderError(
                "No task specified. Use .recipe_from_ingredients() or another task setter"
                    .to_string(),
            )
        })?;
        task.validate()?;

        let provider: Box<dyn CompletionProvider> = match self.provider {
            Some(provider) => provider,
            None => {
                let config = match self.config {
                    Some(config) => config,
                    None => NourishConfig::load()?,
                };
                Box::new(RetryingProvider::from_config(&config.service)?)
            }
        };

        let mode = task.mode();
        info!("Running {} task via {}", mode, provider.provider_name());

        let raw = provider.complete(&task.messages()).await?;
        Ok(parse_response(mode, &raw))
    }
}

/// Main entry point for the builder API
pub struct Nourish;

impl Nourish {
    /// Creates a new builder for a generation task
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }
}
