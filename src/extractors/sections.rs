//! Section and list primitives shared by every extractor.
//!
//! Model output is markdown-ish at best: headings of varying rank, bullet or
//! numbered lists, prose in between. These helpers never fail; a missing
//! section is simply an empty string and a line that is not a list item is
//! skipped.

use crate::error::ExtractError;

/// Iterate over the lines of `text` (newline included) together with the byte
/// offset where each line starts.
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    })
}

/// Recognize a markdown heading line.
///
/// Returns the heading rank (number of leading `#`) and the byte offset within
/// `line` where the heading text starts.
fn parse_heading(line: &str) -> Option<(usize, usize)> {
    let indent = line.len() - line.trim_start().len();
    let rest = &line[indent..];
    let rank = rest.bytes().take_while(|b| *b == b'#').count();
    if rank == 0 || rank > 6 {
        return None;
    }

    let after = &rest[rank..];
    if !after.is_empty() && !after.starts_with(char::is_whitespace) {
        return None;
    }

    let gap = after.len() - after.trim_start().len();
    Some((rank, indent + rank + gap))
}

/// Check whether heading text names `name`, returning the remainder after it.
fn match_name<'a>(heading_text: &'a str, name: &str) -> Option<&'a str> {
    let head = heading_text.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }

    let rest = &heading_text[name.len()..];
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() => None,
        _ => Some(rest),
    }
}

/// Find the body of the first `#`/`##` section called `name`.
///
/// The body starts on the line after the heading, so any text trailing the
/// name (`## Findings:`, `(per serving)`) is dropped, and ends at the next
/// heading of equal or higher rank. Returns `None` when no such heading
/// exists, which lets callers tell a missing section from an empty one.
pub fn find_section<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut lines = lines_with_offsets(text);
    let (body_start, rank) = lines.by_ref().find_map(|(offset, line)| {
        let (rank, text_start) = parse_heading(line)?;
        if rank > 2 {
            return None;
        }
        match_name(&line[text_start..], name)?;
        Some((offset + line.len(), rank))
    })?;

    let body_end = lines
        .find_map(|(offset, line)| match parse_heading(line) {
            Some((next_rank, _)) if next_rank <= rank => Some(offset),
            _ => None,
        })
        .unwrap_or(text.len());

    text.get(body_start..body_end)
}

/// Section body for `name`, or an empty string when the heading is absent.
pub fn locate_section<'a>(text: &'a str, name: &str) -> &'a str {
    find_section(text, name).unwrap_or("")
}

/// Collect `-` and `N.` list items from a section, in order.
pub fn extract_list_items(section: &str) -> Vec<String> {
    section.lines().filter_map(list_item).collect()
}

fn list_item(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let rest = match trimmed.strip_prefix('-') {
        Some(rest) => rest,
        None => {
            let digits = trimmed.bytes().take_while(|b| b.is_ascii_digit()).count();
            if digits == 0 {
                return None;
            }
            trimmed[digits..].strip_prefix('.')?
        }
    };

    let item = rest.trim();
    if item.is_empty() {
        None
    } else {
        Some(item.to_string())
    }
}

/// Text before the first blank line, ignoring leading blank lines.
pub fn first_paragraph(text: &str) -> &str {
    let text = text.trim_start();
    let end = lines_with_offsets(text)
        .find(|(_, line)| line.trim().is_empty())
        .map(|(offset, _)| offset)
        .unwrap_or(text.len());
    text[..end].trim()
}

/// Borrow `text[start..end]`, reporting a bad window instead of panicking.
pub(crate) fn window(text: &str, start: usize, end: usize) -> Result<&str, ExtractError> {
    text.get(start..end)
        .ok_or(ExtractError::Slice { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = "# Lentil Stew\n\
        Intro text.\n\
        ## Ingredients\n\
        - 1 cup lentils\n\
        - 2 carrots\n\
        ### Optional\n\
        - chili flakes\n\
        ## Instructions\n\
        1. Rinse\n\
        2. Simmer\n";

    #[test]
    fn test_parse_heading_ranks() {
        assert_eq!(parse_heading("# Title"), Some((1, 2)));
        assert_eq!(parse_heading("  ## Sub\n"), Some((2, 5)));
        assert_eq!(parse_heading("###"), Some((3, 3)));
        assert_eq!(parse_heading("#hashtag"), None);
        assert_eq!(parse_heading("plain"), None);
        assert_eq!(parse_heading("####### too deep"), None);
    }

    #[test]
    fn test_locate_section_stops_at_same_rank() {
        let body = locate_section(RESPONSE, "Ingredients");
        assert!(body.contains("1 cup lentils"));
        assert!(body.contains("chili flakes"), "lower rank heading stays inside");
        assert!(!body.contains("Rinse"));
    }

    #[test]
    fn test_locate_section_runs_to_end_of_text() {
        let body = locate_section(RESPONSE, "Instructions");
        assert_eq!(extract_list_items(body), vec!["Rinse", "Simmer"]);
    }

    #[test]
    fn test_locate_section_is_case_insensitive() {
        assert!(!locate_section(RESPONSE, "ingredients").is_empty());
        assert!(!locate_section(RESPONSE, "INSTRUCTIONS").is_empty());
    }

    #[test]
    fn test_locate_missing_section_is_empty() {
        assert_eq!(locate_section(RESPONSE, "Health Benefits"), "");
        assert_eq!(find_section(RESPONSE, "Health Benefits"), None);
        assert_eq!(locate_section("", "Ingredients"), "");
        assert_eq!(locate_section(RESPONSE, "   "), "");
    }

    #[test]
    fn test_name_must_end_at_word_boundary() {
        let text = "## Dietary Advice\n- less salt\n";
        assert!(find_section(text, "Diet").is_none());
        assert!(find_section(text, "Dietary").is_some());
    }

    #[test]
    fn test_top_rank_section_keeps_sub_headings() {
        let text = "# Findings\nOverview.\n## Detail\nMore.\n# Next\nOther.";
        let body = locate_section(text, "Findings");
        assert!(body.contains("Overview."));
        assert!(body.contains("More."));
        assert!(!body.contains("Other."));
    }

    #[test]
    fn test_third_rank_heading_is_not_a_section() {
        let text = "### Ingredients\n- flour\n";
        assert_eq!(find_section(text, "Ingredients"), None);
    }

    #[test]
    fn test_heading_suffix_is_not_body() {
        let text = "## Ingredients (serves 4)\n- rice\n";
        let body = locate_section(text, "Ingredients");
        assert_eq!(body, "- rice\n");
        assert_eq!(extract_list_items(body), vec!["rice"]);
    }

    #[test]
    fn test_heading_punctuation_is_not_body() {
        let text = "## Findings:\nMild swelling.\n## Next\n";
        assert_eq!(locate_section(text, "Findings"), "Mild swelling.\n");
    }

    #[test]
    fn test_heading_on_last_line_has_empty_body() {
        assert_eq!(find_section("intro\n## Ingredients", "Ingredients"), Some(""));
    }

    #[test]
    fn test_extract_list_items_markers() {
        let section = "\n- first\n  2. second\nprose line\n-   \n10.tenth\n3 no dot\n";
        assert_eq!(extract_list_items(section), vec!["first", "second", "tenth"]);
    }

    #[test]
    fn test_extract_list_items_empty_input() {
        assert!(extract_list_items("").is_empty());
        assert!(extract_list_items("just prose\nmore prose").is_empty());
    }

    #[test]
    fn test_first_paragraph() {
        assert_eq!(first_paragraph("One.\nTwo.\n\nThree."), "One.\nTwo.");
        assert_eq!(first_paragraph("\n\nLead.\n  \nRest"), "Lead.");
        assert_eq!(first_paragraph("Only"), "Only");
        assert_eq!(first_paragraph(""), "");
    }

    #[test]
    fn test_window_rejects_bad_range() {
        assert_eq!(window("abc", 1, 3).unwrap(), "bc");
        assert!(window("abc", 2, 9).is_err());
        assert!(window("é", 1, 2).is_err());
    }
}
