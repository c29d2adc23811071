use crate::error::ExtractError;
use crate::extractors::Extractor;
use crate::model::FoodValidation;

/// Reads the YES/NO verdict of the food-image validation prompt.
///
/// A response counts as food when it contains an upper-case `YES` anywhere;
/// the explanation is whatever follows the leading verdict word.
pub struct FoodValidationExtractor;

impl Extractor for FoodValidationExtractor {
    type Output = FoodValidation;

    fn name(&self) -> &'static str {
        "food validation extractor"
    }

    fn try_extract(&self, raw: &str) -> Result<FoodValidation, ExtractError> {
        Ok(FoodValidation {
            is_food: raw.contains("YES"),
            explanation: strip_verdict(raw).to_string(),
        })
    }
}

fn strip_verdict(raw: &str) -> &str {
    let text = raw.trim().trim_start_matches('*');
    let rest = ["YES", "NO"].iter().find_map(|verdict| {
        let head = text.get(..verdict.len())?;
        if !head.eq_ignore_ascii_case(verdict) {
            return None;
        }
        let rest = &text[verdict.len()..];
        match rest.chars().next() {
            Some(c) if c.is_alphanumeric() => None,
            _ => Some(rest),
        }
    });

    rest.unwrap_or(text)
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '.' | ',' | ':' | '!' | '-'))
        .trim_end()
}
