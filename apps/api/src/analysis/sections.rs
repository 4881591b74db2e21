//! Splits a generated analysis into titled sections.
//!
//! Recognised heading lines:
//! - markdown headings `#` to `###`
//! - a bold-only line, `**Title**` or `**Title:**`
//! - a numbered bold heading, `1. **Title**`

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

pub const OVERVIEW_TITLE: &str = "Overview";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSection {
    pub title: String,
    pub body: String,
}

fn heading_regex() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| {
        Regex::new(
            r"^\s*(?:#{1,3}\s+(?P<md>.+?)|\d+[.)]\s+\*\*(?P<num>.+?)\*\*:?|\*\*(?P<bold>[^*]+?)\*\*:?)\s*$",
        )
        .expect("heading regex is valid")
    })
}

/// Returns the heading title if `line` is a heading.
fn heading_title(line: &str) -> Option<String> {
    let caps = heading_regex().captures(line)?;
    let raw = caps
        .name("md")
        .or_else(|| caps.name("num"))
        .or_else(|| caps.name("bold"))?
        .as_str();
    let title = raw.trim().trim_end_matches(':').trim_end_matches('#').trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Text before the first heading goes under "Overview". Sections whose
/// body is empty after trimming are dropped.
pub fn split_sections(text: &str) -> Vec<AnalysisSection> {
    let mut sections = Vec::new();
    let mut title = OVERVIEW_TITLE.to_string();
    let mut body: Vec<&str> = Vec::new();

    for line in text.lines() {
        match heading_title(line) {
            Some(next_title) => {
                push_section(&mut sections, title, &body);
                title = next_title;
                body.clear();
            }
            None => body.push(line),
        }
    }
    push_section(&mut sections, title, &body);

    sections
}

fn push_section(sections: &mut Vec<AnalysisSection>, title: String, body: &[&str]) {
    let body = body.join("\n").trim().to_string();
    if !body.is_empty() {
        sections.push(AnalysisSection { title, body });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_headings() {
        let text = "## Strengths\nStrong analytical skills.\n\n## Gaps\nChange management.";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Strengths");
        assert_eq!(sections[0].body, "Strong analytical skills.");
        assert_eq!(sections[1].title, "Gaps");
        assert_eq!(sections[1].body, "Change management.");
    }

    #[test]
    fn test_bold_and_numbered_headings() {
        let text = "**Summary:**\nGood fit.\n1. **Next Steps**\nTake a course.\n2) **Roadmap:**\nYear one.";
        let titles: Vec<String> = split_sections(text).into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Summary", "Next Steps", "Roadmap"]);
    }

    #[test]
    fn test_preamble_becomes_overview() {
        let text = "Here is your analysis.\n### Strengths\nCritical thinking.";
        let sections = split_sections(text);
        assert_eq!(sections[0].title, OVERVIEW_TITLE);
        assert_eq!(sections[0].body, "Here is your analysis.");
        assert_eq!(sections[1].title, "Strengths");
    }

    #[test]
    fn test_no_headings_is_single_overview() {
        let sections = split_sections("  Just one paragraph.  \n");
        assert_eq!(
            sections,
            vec![AnalysisSection {
                title: OVERVIEW_TITLE.to_string(),
                body: "Just one paragraph.".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_sections_are_dropped() {
        let sections = split_sections("## Empty\n\n## Filled\ntext");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Filled");
    }

    #[test]
    fn test_inline_bold_is_not_a_heading() {
        let sections = split_sections("You show **strong** analytical skills.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, OVERVIEW_TITLE);
    }

    #[test]
    fn test_four_hashes_is_not_a_heading() {
        assert_eq!(heading_title("#### Deep"), None);
        assert_eq!(heading_title("# Top #"), Some("Top".to_string()));
    }

    #[test]
    fn test_empty_text_has_no_sections() {
        assert!(split_sections("").is_empty());
    }
}
