use crate::error::ExtractError;
use crate::extractors::sections::{extract_list_items, find_section, first_paragraph, locate_section};
use crate::extractors::Extractor;
use crate::model::ParsedHealthAnalysis;
use log::debug;

/// Headings accepted for dietary advice, most specific first.
const DIET_SECTIONS: [&str; 3] = ["Dietary Recommendations", "Dietary", "Diet"];

pub struct HealthAnalysisExtractor;

impl Extractor for HealthAnalysisExtractor {
    type Output = ParsedHealthAnalysis;

    fn name(&self) -> &'static str {
        "health analysis extractor"
    }

    fn try_extract(&self, raw: &str) -> Result<ParsedHealthAnalysis, ExtractError> {
        let findings = match find_section(raw, "Findings")
            .map(str::trim)
            .filter(|findings| !findings.is_empty())
        {
            Some(findings) => findings,
            None => {
                debug!("No findings section, using the first paragraph");
                first_paragraph(raw)
            }
        };

        let recommendations = extract_list_items(locate_section(raw, "Recommendations"));
        let diet_recommendations = DIET_SECTIONS
            .iter()
            .find_map(|name| find_section(raw, name))
            .map(extract_list_items)
            .unwrap_or_default();

        Ok(ParsedHealthAnalysis {
            findings: findings.to_string(),
            recommendations,
            diet_recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dietary_heading_priority() {
        let raw = "## Diet\n- from diet\n## Dietary Recommendations\n- from dietary\n";
        let analysis = HealthAnalysisExtractor.extract(raw);
        assert_eq!(analysis.diet_recommendations, vec!["from dietary"]);
    }

    #[test]
    fn test_short_diet_heading() {
        let raw = "# Diet\n1. More fiber\n2. Less sugar";
        let analysis = HealthAnalysisExtractor.extract(raw);
        assert_eq!(analysis.diet_recommendations, vec!["More fiber", "Less sugar"]);
    }

    #[test]
    fn test_findings_fall_back_to_first_paragraph() {
        let raw = "The scan shows no fractures.\nJoints look healthy.\n\n## Recommendations\n- Rest";
        let analysis = HealthAnalysisExtractor.extract(raw);
        assert_eq!(
            analysis.findings,
            "The scan shows no fractures.\nJoints look healthy."
        );
        assert_eq!(analysis.recommendations, vec!["Rest"]);
    }

    #[test]
    fn test_empty_findings_section_falls_back() {
        let raw = "Summary first.\n\n## Findings\n\n## Recommendations\n- Walk daily";
        let analysis = HealthAnalysisExtractor.extract(raw);
        assert_eq!(analysis.findings, "Summary first.");
    }

    #[test]
    fn test_recommendations_ignore_dietary_heading() {
        let raw = "## Dietary Recommendations\n- Oily fish\n";
        let analysis = HealthAnalysisExtractor.extract(raw);
        assert!(analysis.recommendations.is_empty());
        assert_eq!(analysis.diet_recommendations, vec!["Oily fish"]);
    }
}
