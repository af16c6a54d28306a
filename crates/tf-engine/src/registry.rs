//! Static registry of every tool page.

use crate::tool::Tool;
use crate::tools::{
    ChartGenerator, CourseCreator, DashboardBuilder, LegalAssistant, ProjectPlanner,
    QuizGenerator, StudyPlanner, SubtitleGenerator, VoiceSynthesizer,
};

static TOOLS: [&dyn Tool; 9] = [
    &QuizGenerator,
    &VoiceSynthesizer,
    &StudyPlanner,
    &CourseCreator,
    &LegalAssistant,
    &ChartGenerator,
    &SubtitleGenerator,
    &DashboardBuilder,
    &ProjectPlanner,
];

/// Minimum Jaro-Winkler similarity for a "did you mean" hint.
const SUGGEST_THRESHOLD: f64 = 0.75;

pub fn all_tools() -> &'static [&'static dyn Tool] {
    &TOOLS
}

/// Exact, case-insensitive id match.
pub fn find_tool(id: &str) -> Option<&'static dyn Tool> {
    let id = id.trim();
    TOOLS
        .iter()
        .copied()
        .find(|tool| tool.id().eq_ignore_ascii_case(id))
}

/// Closest registered id, if any is similar enough.
pub fn suggest_tool(id: &str) -> Option<&'static str> {
    let needle = id.trim().to_ascii_lowercase();
    TOOLS
        .iter()
        .map(|tool| (tool.id(), strsim::jaro_winkler(&needle, tool.id())))
        .filter(|(_, score)| *score >= SUGGEST_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: BTreeSet<&str> = all_tools().iter().map(|t| t.id()).collect();
        assert_eq!(ids.len(), all_tools().len());
    }

    #[test]
    fn test_find_tool() {
        assert_eq!(find_tool("quiz-generator").unwrap().id(), "quiz-generator");
        assert_eq!(find_tool(" Legal-Assistant ").unwrap().id(), "legal-assistant");
        assert!(find_tool("report-generator").is_none());
    }

    #[test]
    fn test_suggest_tool() {
        assert_eq!(suggest_tool("quiz-generater"), Some("quiz-generator"));
        assert_eq!(suggest_tool("subtitle"), Some("subtitle-generator"));
        assert_eq!(suggest_tool("zzzz"), None);
    }
}
