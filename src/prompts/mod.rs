use crate::error::NourishError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// The shared system prompt for every generation task.
///
/// Loaded from `system_prompt.txt` at compile time. Contains a `{{TASK}}`
/// placeholder that `system_prompt` replaces with the task description.
pub const SYSTEM_PROMPT_TEMPLATE: &str = include_str!("system_prompt.txt");

/// Layout the recipe extractor reads best.
const RECIPE_FORMAT: &str = "Start with the recipe name as a `# Title` heading, then use `## Ingredients`, `## Instructions`, `## Nutritional Information` and `## Health Benefits` sections. Write ingredients and benefits as `-` bullets, instructions as a numbered list and nutrition as `Name: amount unit` lines.";

/// Layout the meal-plan extractor reads best.
const MEAL_PLAN_FORMAT: &str = "Start each day with a `## Day N` heading and each meal with a `### Breakfast`, `### Lunch`, `### Dinner` or `### Snack` heading. Put the meal name in **bold** on the first line of the meal, followed by its description.";

/// Layout the health-analysis extractor reads best.
const HEALTH_FORMAT: &str = "Use a `## Findings` section, a `## Recommendations` section and a `## Dietary Recommendations` section, with recommendations written as `-` bullets.";

const MEDICAL_DISCLAIMER: &str =
    "Note: This is for educational purposes only and not a substitute for professional medical advice.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A chat message in the shape the completion service expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

/// Plain text, or a list of text and image parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    Text { text: String },
    Image { image: String },
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// A user message carrying a text part followed by an image part.
    pub fn user_with_image(text: impl Into<String>, image: &ImageInput) -> Self {
        ChatMessage {
            role: Role::User,
            content: MessageContent::Parts(vec![
                ContentPart::Text { text: text.into() },
                ContentPart::Image {
                    image: image.as_base64().to_string(),
                },
            ]),
        }
    }
}

/// Base64-encoded image data sent alongside a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput(String);

impl ImageInput {
    /// Wrap data that is already base64-encoded
    pub fn from_base64(data: impl Into<String>) -> Self {
        ImageInput(data.into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        ImageInput(STANDARD.encode(bytes))
    }

    /// Read and encode an image file
    pub async fn from_path(path: &Path) -> Result<Self, NourishError> {
        let bytes = fs::read(path).await?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }
}

/// Weight goal of a meal plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeightGoal {
    Lose,
    Maintain,
    Gain,
}

impl WeightGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightGoal::Lose => "lose",
            WeightGoal::Maintain => "maintain",
            WeightGoal::Gain => "gain",
        }
    }

    fn plan_name(&self) -> &'static str {
        match self {
            WeightGoal::Lose => "Weight Loss",
            WeightGoal::Maintain => "Weight Maintenance",
            WeightGoal::Gain => "Weight Gain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    Vegetarian,
    Vegan,
    NonVegetarian,
}

impl DietType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::Vegetarian => "vegetarian",
            DietType::Vegan => "vegan",
            DietType::NonVegetarian => "non-vegetarian",
        }
    }
}

/// Kind of medical image submitted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    Xray,
    Mri,
    Ct,
}

impl ScanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanKind::Xray => "xray",
            ScanKind::Mri => "mri",
            ScanKind::Ct => "ct",
        }
    }
}

/// Build the system prompt for a task description.
pub fn system_prompt(task: &str) -> String {
    SYSTEM_PROMPT_TEMPLATE
        .replace("{{TASK}}", task.trim())
        .trim_end()
        .to_string()
}

pub fn food_validation_prompt(image: &ImageInput) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(
            "analyze food images and determine if they contain food items",
        )),
        ChatMessage::user_with_image(
            "Is this a food image? Please respond with \"YES\" if it contains food, or \"NO\" if it does not contain food. Then provide a brief explanation of what you see in the image.",
            image,
        ),
    ]
}

pub fn recipe_from_image_prompt(image: &ImageInput) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(
            "generate detailed recipes based on food images",
        )),
        ChatMessage::user_with_image(
            format!(
                "Create a detailed recipe based on this food image. Include title, ingredients with measurements, step-by-step instructions, nutritional information, and health benefits of key ingredients. {}",
                RECIPE_FORMAT
            ),
            image,
        ),
    ]
}

pub fn recipe_from_ingredients_prompt(ingredients: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(
            "generate creative and delicious recipes based on provided ingredients",
        )),
        ChatMessage::user(format!(
            "Create a detailed recipe using these ingredients: {}. Include title, complete ingredients list with measurements, step-by-step instructions, nutritional information, and health benefits of key ingredients. {}",
            ingredients.trim(),
            RECIPE_FORMAT
        )),
    ]
}

pub fn meal_plan_prompt(goal: WeightGoal, diet: DietType, restrictions: &str) -> Vec<ChatMessage> {
    let restrictions = match restrictions.trim() {
        "" => "none",
        other => other,
    };

    vec![
        ChatMessage::system(system_prompt(
            "create personalized meal plans based on weight goals and dietary preferences",
        )),
        ChatMessage::user(format!(
            "Create a 7-day meal plan for someone who wants to {} weight. They follow a {} diet. Additional restrictions or preferences: {}. Include breakfast, lunch, dinner, and snacks for each day. For each meal, provide a brief recipe with ingredients and instructions. Also include nutritional information and health benefits. {}",
            goal.as_str(),
            diet.as_str(),
            restrictions,
            MEAL_PLAN_FORMAT
        )),
    ]
}

pub fn health_analysis_prompt(image: &ImageInput, scan: ScanKind) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(
            "analyze medical images and health reports to provide insights and dietary recommendations",
        )),
        ChatMessage::user_with_image(
            format!(
                "Analyze this {} image. Provide a detailed explanation of what you observe, potential health implications, and dietary recommendations based on the findings. {} {}",
                scan.as_str(),
                HEALTH_FORMAT,
                MEDICAL_DISCLAIMER
            ),
            image,
        ),
    ]
}

pub fn health_report_prompt(report: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(
            "analyze health reports and provide dietary recommendations",
        )),
        ChatMessage::user(format!(
            "Analyze this health report and provide dietary recommendations based on the findings. Report details: {}. {} {}",
            report.trim(),
            HEALTH_FORMAT,
            MEDICAL_DISCLAIMER
        )),
    ]
}

/// Display name for a generated plan, e.g. "Weight Loss Vegan Plan".
pub fn meal_plan_title(goal: WeightGoal, diet: DietType) -> String {
    let diet = diet.as_str();
    let mut chars = diet.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("{} {} Plan", goal.plan_name(), capitalized)
}
