use crate::error::ExtractError;
use crate::extractors::sections::{extract_list_items, locate_section};
use crate::extractors::Extractor;
use crate::model::{ParsedRecipe, DEFAULT_RECIPE_TITLE};
use log::debug;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// `name: 120 unit`; the unit is only taken from the same line.
static NUTRIENT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(\w+)[ \t]*:[ \t]*(\d+)(?:[ \t]*([a-z]+))?").ok());

pub struct RecipeExtractor;

impl Extractor for RecipeExtractor {
    type Output = ParsedRecipe;

    fn name(&self) -> &'static str {
        "recipe extractor"
    }

    fn try_extract(&self, raw: &str) -> Result<ParsedRecipe, ExtractError> {
        let title = extract_title(raw).unwrap_or_else(|| DEFAULT_RECIPE_TITLE.to_string());
        let ingredients = extract_list_items(locate_section(raw, "Ingredients"));
        let instructions = extract_list_items(locate_section(raw, "Instructions"));
        let nutritional_info =
            extract_nutrition(locate_section(raw, "Nutritional Information"))?;
        let health_benefits = extract_list_items(locate_section(raw, "Health Benefits"));

        debug!(
            "Parsed recipe '{}': {} ingredients, {} steps, {} nutrients, {} benefits",
            title,
            ingredients.len(),
            instructions.len(),
            nutritional_info.len(),
            health_benefits.len()
        );

        Ok(ParsedRecipe {
            title,
            ingredients,
            instructions,
            nutritional_info,
            health_benefits,
        })
    }
}

/// First non-empty `# Heading` or `Title: ...` line.
fn extract_title(raw: &str) -> Option<String> {
    raw.lines().find_map(|line| {
        let line = line.trim_start();
        let capture = match line.strip_prefix("# ") {
            Some(rest) => rest,
            None => {
                let prefix = line.get(..6)?;
                if !prefix.eq_ignore_ascii_case("title:") {
                    return None;
                }
                &line[6..]
            }
        };

        let capture = capture.trim();
        if capture.is_empty() {
            None
        } else {
            Some(capture.to_string())
        }
    })
}

/// Collect `nutrient: amount` pairs; later keys overwrite earlier ones.
fn extract_nutrition(section: &str) -> Result<BTreeMap<String, u32>, ExtractError> {
    let pattern = NUTRIENT_PATTERN
        .as_ref()
        .ok_or(ExtractError::PatternUnavailable("nutrient"))?;

    let mut nutrition = BTreeMap::new();
    for caps in pattern.captures_iter(section) {
        let (Some(key), Some(amount)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        match amount.as_str().parse::<u32>() {
            Ok(value) => {
                nutrition.insert(key.as_str().to_lowercase(), value);
            }
            Err(e) => debug!("Skipping nutrient '{}': {}", key.as_str(), e),
        }
    }

    Ok(nutrition)
}
