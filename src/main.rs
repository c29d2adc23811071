use clap::{Parser, Subcommand};
use log::debug;
use nourish_ai::prompts::meal_plan_title;
use nourish_ai::{
    parse_response, DietType, ImageInput, Nourish, NourishConfig, NourishError, ParseMode,
    ParsedResponse, ScanKind, Task, WeightGoal,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

#[derive(Parser)]
#[command(name = "nourish-ai", version, about = "Structured recipes, meal plans and health analyses from a language model")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a saved model response and print it as JSON
    Parse {
        /// Which extractor to run
        #[arg(value_enum)]
        mode: ParseMode,
        /// File holding the raw response (reads stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Print the chat messages a task would send
    Prompt {
        #[command(subcommand)]
        task: TaskArgs,
    },
    /// Run a task against the completion service and print the parsed result
    Generate {
        #[command(subcommand)]
        task: TaskArgs,
    },
}

#[derive(Subcommand)]
enum TaskArgs {
    /// Check whether an image shows food
    ValidateFood { image: PathBuf },
    /// Recipe for the dish in an image
    RecipeFromImage { image: PathBuf },
    /// Recipe from a comma-separated ingredient list
    RecipeFromIngredients { ingredients: String },
    /// Seven-day meal plan
    MealPlan {
        #[arg(long, value_enum, default_value = "maintain")]
        goal: WeightGoal,
        #[arg(long, value_enum, default_value = "non-vegetarian")]
        diet: DietType,
        #[arg(long, default_value = "")]
        restrictions: String,
    },
    /// Analysis of an X-ray, MRI or CT image
    HealthImage {
        image: PathBuf,
        #[arg(long, value_enum, default_value = "xray")]
        scan: ScanKind,
    },
    /// Analysis of a written health report
    HealthReport { report: String },
}

impl TaskArgs {
    async fn into_task(self) -> Result<Task, NourishError> {
        Ok(match self {
            TaskArgs::ValidateFood { image } => Task::ValidateFood(load_image(&image).await?),
            TaskArgs::RecipeFromImage { image } => {
                Task::RecipeFromImage(load_image(&image).await?)
            }
            TaskArgs::RecipeFromIngredients { ingredients } => {
                Task::RecipeFromIngredients(ingredients)
            }
            TaskArgs::MealPlan {
                goal,
                diet,
                restrictions,
            } => Task::MealPlan {
                goal,
                diet,
                restrictions,
            },
            TaskArgs::HealthImage { image, scan } => Task::HealthImage {
                image: load_image(&image).await?,
                scan,
            },
            TaskArgs::HealthReport { report } => Task::HealthReport(report),
        })
    }
}

async fn load_image(path: &Path) -> Result<ImageInput, NourishError> {
    debug!("Reading image {}", path.display());
    ImageInput::from_path(path).await
}

async fn read_input(file: Option<&Path>) -> Result<String, NourishError> {
    match file {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            Ok(raw)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Parse { mode, file } => {
            let raw = read_input(file.as_deref()).await?;
            let parsed = parse_response(mode, &raw);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Command::Prompt { task } => {
            let task = task.into_task().await?;
            println!("{}", serde_json::to_string_pretty(&task.messages())?);
        }
        Command::Generate { task } => {
            let task = task.into_task().await?;
            let title = match &task {
                Task::MealPlan { goal, diet, .. } => Some(meal_plan_title(*goal, *diet)),
                _ => None,
            };

            let parsed = Nourish::builder()
                .task(task)
                .config(NourishConfig::load()?)
                .build()
                .await?;

            let output = match (title, &parsed) {
                (Some(title), ParsedResponse::MealPlan(plan)) => {
                    json!({ "title": title, "days": plan.days })
                }
                _ => serde_json::to_value(&parsed)?,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
