use crate::error::ExtractError;
use crate::extractors::sections::window;
use crate::extractors::Extractor;
use crate::model::{MealType, ParsedMeal, ParsedMealPlan, ParsedMealPlanDay};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// `# Day N` or `## Day N` at the start of a line.
static DAY_HEADING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*#{1,2}[ \t]*day[ \t]+(\d+)").ok());

/// First `**bold**` or `_italic_` span.
static EMPHASIS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*|_(.*?)_").ok());

/// Heading pattern for each meal type, in fixed type order.
static MEAL_HEADINGS: LazyLock<Option<Vec<(MealType, Regex)>>> = LazyLock::new(|| {
    MealType::ALL
        .iter()
        .map(|meal_type| Some((*meal_type, meal_heading_pattern(*meal_type).ok()?)))
        .collect()
});

pub struct MealPlanExtractor;

impl Extractor for MealPlanExtractor {
    type Output = ParsedMealPlan;

    fn name(&self) -> &'static str {
        "meal plan extractor"
    }

    fn try_extract(&self, raw: &str) -> Result<ParsedMealPlan, ExtractError> {
        let day_heading = DAY_HEADING
            .as_ref()
            .ok_or(ExtractError::PatternUnavailable("day heading"))?;

        let headings: Vec<(usize, &str)> = day_heading
            .captures_iter(raw)
            .filter_map(|caps| Some((caps.get(0)?.start(), caps.get(1)?.as_str())))
            .collect();

        if headings.is_empty() {
            debug!("No day headings found in meal plan response");
            return Ok(ParsedMealPlan::default());
        }

        let meal_headings = MEAL_HEADINGS
            .as_ref()
            .ok_or(ExtractError::PatternUnavailable("meal heading"))?;

        let mut days = Vec::with_capacity(headings.len());
        for (i, (start, number)) in headings.iter().enumerate() {
            let end = headings
                .get(i + 1)
                .map(|(next_start, _)| *next_start)
                .unwrap_or(raw.len());
            let block = window(raw, *start, end)?;

            let meals = parse_day(block, meal_headings)?;
            debug!("Day {}: {} meals", number, meals.len());
            days.push(ParsedMealPlanDay {
                day: format!("Day {}", number),
                meals,
            });
        }

        Ok(ParsedMealPlan { days })
    }
}

/// `### <Type>` or `## <Type>` at the start of a line, any case.
fn meal_heading_pattern(meal_type: MealType) -> Result<Regex, ExtractError> {
    let pattern = format!(
        r"(?im)^[ \t]*#{{2,3}}[ \t]*{}",
        regex::escape(meal_type.label())
    );
    Ok(Regex::new(&pattern)?)
}

/// Meals of one day block, in fixed type order.
///
/// A meal ends where the first of the *other* meal types (taken in fixed
/// order, not source order) next appears. Out-of-order headings can therefore
/// pull a later meal into an earlier meal's description.
fn parse_day(
    block: &str,
    meal_headings: &[(MealType, Regex)],
) -> Result<Vec<ParsedMeal>, ExtractError> {
    let mut meals = Vec::new();

    for (meal_type, heading) in meal_headings {
        let Some(found) = heading.find(block) else {
            continue;
        };

        let end = meal_headings
            .iter()
            .filter(|(other, _)| other != meal_type)
            .find_map(|(_, other)| other.find_at(block, found.end()).map(|m| m.start()))
            .unwrap_or(block.len());

        let meal_block = window(block, found.start(), end)?;
        meals.push(parse_meal(*meal_type, meal_block, heading)?);
    }

    Ok(meals)
}

fn parse_meal(
    meal_type: MealType,
    block: &str,
    heading: &Regex,
) -> Result<ParsedMeal, ExtractError> {
    let emphasis = EMPHASIS
        .as_ref()
        .ok_or(ExtractError::PatternUnavailable("emphasis"))?;

    let (title, rest) = match emphasis.captures(block) {
        Some(caps) => {
            let span_end = caps.get(0).map(|m| m.end()).unwrap_or(0);
            let title = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().trim())
                .filter(|title| !title.is_empty());
            (title, window(block, span_end, block.len())?)
        }
        None => (None, block),
    };

    let description = heading.replacen(rest, 1, "").trim().to_string();

    Ok(ParsedMeal {
        meal_type,
        title: title.unwrap_or(meal_type.label()).to_string(),
        description,
    })
}
