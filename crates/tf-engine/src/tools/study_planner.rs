//! Study Planner: week-by-week schedule keyed by difficulty and goal.

use crate::flavor::FlavorSource;
use crate::report::ReportWriter;
use crate::tool::{Tool, chosen, chosen_many, leading_number, text_or, title_case, yes_no};
use tf_core::catalog::{CatalogEntry, OptionCatalog};
use tf_core::form::FormState;
use tf_core::schema::{Category, FieldSpec, ToolSchema};
use tf_core::table::{ANY, KeyedTable, LookupTable, PairTable};

pub static GOAL: OptionCatalog = OptionCatalog::new(
    "goal",
    &[
        CatalogEntry::new("exam-prep", "Exam Preparation", "Maximize performance on a dated exam"),
        CatalogEntry::new("skill-building", "Skill Building", "Develop practical, lasting ability"),
        CatalogEntry::new("career-change", "Career Change", "Reach job-ready competence"),
        CatalogEntry::new("refresh", "Knowledge Refresh", "Revisit material learned before"),
    ],
    "skill-building",
);

pub static DIFFICULTY: OptionCatalog = OptionCatalog::new(
    "difficulty",
    &[
        CatalogEntry::new("beginner", "Beginner", "No prior knowledge assumed"),
        CatalogEntry::new("intermediate", "Intermediate", "Comfortable with the fundamentals"),
        CatalogEntry::new("advanced", "Advanced", "Pushing toward mastery"),
    ],
    "intermediate",
);

pub static DURATION: OptionCatalog = OptionCatalog::new(
    "duration",
    &[
        CatalogEntry::new("1-week", "1 Week", "Crash course"),
        CatalogEntry::new("2-weeks", "2 Weeks", "Short sprint"),
        CatalogEntry::new("4-weeks", "4 Weeks", "One month plan"),
        CatalogEntry::new("8-weeks", "8 Weeks", "Two month plan"),
        CatalogEntry::new("12-weeks", "12 Weeks", "Full term"),
    ],
    "4-weeks",
);

pub static HOURS_PER_DAY: OptionCatalog = OptionCatalog::new(
    "hours_per_day",
    &[
        CatalogEntry::new("1", "1 hour", "Light commitment"),
        CatalogEntry::new("2", "2 hours", "Steady progress"),
        CatalogEntry::new("3", "3 hours", "Focused study"),
        CatalogEntry::new("4", "4 hours", "Intensive"),
        CatalogEntry::new("6", "6 hours", "Full-time study"),
    ],
    "2",
);

pub static LEARNING_STYLE: OptionCatalog = OptionCatalog::new(
    "learning_style",
    &[
        CatalogEntry::new("visual", "Visual", "Diagrams, charts and video"),
        CatalogEntry::new("auditory", "Auditory", "Lectures, podcasts and discussion"),
        CatalogEntry::new("reading-writing", "Reading / Writing", "Texts, notes and summaries"),
        CatalogEntry::new("kinesthetic", "Kinesthetic", "Hands-on practice and projects"),
    ],
    "visual",
);

pub static TECHNIQUES: OptionCatalog = OptionCatalog::new(
    "techniques",
    &[
        CatalogEntry::new("pomodoro", "Pomodoro", "25 minute focus blocks with 5 minute breaks"),
        CatalogEntry::new("spaced-repetition", "Spaced Repetition", "Review at growing intervals"),
        CatalogEntry::new("active-recall", "Active Recall", "Test yourself before re-reading"),
        CatalogEntry::new("feynman", "Feynman Technique", "Explain it simply to find gaps"),
        CatalogEntry::new("mind-mapping", "Mind Mapping", "Connect ideas visually"),
    ],
    "pomodoro",
);

pub static SCHEMA: ToolSchema = ToolSchema {
    id: "study-planner",
    title: "AI Study Planner",
    description: "Build a personalised study schedule with phases, milestones and techniques.",
    category: Category::Education,
    latency_ms: 3500,
    fields: &[
        FieldSpec::text("subject", "What are you studying?", "e.g. Organic Chemistry"),
        FieldSpec::choice("goal", "Goal", &GOAL),
        FieldSpec::choice("difficulty", "Current level", &DIFFICULTY),
        FieldSpec::choice("duration", "Plan length", &DURATION),
        FieldSpec::choice("hoursPerDay", "Hours per day", &HOURS_PER_DAY),
        FieldSpec::choice("learningStyle", "Learning style", &LEARNING_STYLE),
        FieldSpec::multi(
            "techniques",
            "Study techniques",
            &TECHNIQUES,
            &["pomodoro", "active-recall"],
        ),
        FieldSpec::toggle("includeBreaks", "Weekly rest day", true),
        FieldSpec::toggle("includeResources", "Suggest resources", true),
    ],
};

const SAMPLE_SUBJECT: &str = "Data Structures and Algorithms";

type Phases = &'static [&'static str];

const PHASE_ROWS: &[((&str, &str), Phases)] = &[
    (
        ("beginner", "exam-prep"),
        &["Orientation", "Core Concepts", "Guided Practice", "Past Papers"],
    ),
    (
        ("advanced", "exam-prep"),
        &["Gap Analysis", "Timed Practice", "Mock Exams"],
    ),
    (
        ("beginner", "career-change"),
        &["Foundations", "Tooling", "Portfolio Project", "Interview Practice"],
    ),
    (
        ("advanced", ANY),
        &["Deep Dive", "Original Work", "Peer Review"],
    ),
    (
        ("beginner", ANY),
        &["Foundations", "Core Concepts", "Practice", "Review"],
    ),
    (
        (ANY, "refresh"),
        &["Rapid Review", "Targeted Practice", "Consolidation"],
    ),
];

/// Phase sequence keyed by `(difficulty, goal)`.
const PHASES: PairTable<Phases> = LookupTable::new(
    "study_phases",
    PHASE_ROWS,
    &["Foundations", "Application", "Practice", "Mastery Check"],
);

const DAILY_ROWS: &[(&str, &[&str])] = &[
    (
        "auditory",
        &[
            "Listen to a lecture or podcast episode",
            "Explain the topic aloud",
            "Discuss with a study partner",
        ],
    ),
    (
        "reading-writing",
        &[
            "Read one chapter and annotate",
            "Write a one-page summary",
            "Rewrite key definitions from memory",
        ],
    ),
    (
        "kinesthetic",
        &[
            "Work through a hands-on exercise",
            "Build a small project component",
            "Teach back using physical examples",
        ],
    ),
];

/// Daily activities keyed by learning style.
const DAILY: KeyedTable<&[&str]> = LookupTable::new(
    "study_daily",
    DAILY_ROWS,
    &[
        "Watch a short explainer video",
        "Sketch a diagram of the main ideas",
        "Review flashcards with images",
    ],
);

const RESOURCE_ROWS: &[(&str, &[&str])] = &[
    (
        "auditory",
        &["Recorded university lectures", "Topic podcasts", "Study group calls"],
    ),
    (
        "reading-writing",
        &["Standard textbook", "Lecture notes", "Summary sheets"],
    ),
    (
        "kinesthetic",
        &["Interactive labs", "Project-based tutorials", "Practice kits"],
    ),
];

const RESOURCES: KeyedTable<&[&str]> = LookupTable::new(
    "study_resources",
    RESOURCE_ROWS,
    &["Video course", "Illustrated guide", "Flashcard deck"],
);

pub struct StudyPlanner;

impl Tool for StudyPlanner {
    fn schema(&self) -> &'static ToolSchema {
        &SCHEMA
    }

    fn render(&self, form: &FormState, flavor: &mut dyn FlavorSource) -> String {
        let subject = text_or(form, "subject", SAMPLE_SUBJECT);
        let goal = chosen(form, "goal", &GOAL);
        let difficulty = chosen(form, "difficulty", &DIFFICULTY);
        let duration = chosen(form, "duration", &DURATION);
        let hours_entry = chosen(form, "hoursPerDay", &HOURS_PER_DAY);
        let style = chosen(form, "learningStyle", &LEARNING_STYLE);
        let techniques = chosen_many(form, "techniques", &TECHNIQUES, &["pomodoro"]);
        let breaks = form.flag("includeBreaks");

        let weeks = leading_number(duration, 4).max(1);
        let hours = leading_number(hours_entry, 2).max(1);
        let days = if breaks { 6 } else { 7 };
        let weekly_hours = hours * days;
        let phases = *PHASES.get_pair(difficulty.id, goal.id);
        let daily = *DAILY.get(style.id);

        let mut w = ReportWriter::new();
        w.title(&format!("Study Plan: {}", title_case(subject)))
            .field("Goal", goal.label)
            .field("Level", difficulty.label)
            .field("Duration", duration.label)
            .field("Daily Commitment", hours_entry.label)
            .field("Learning Style", style.label)
            .field("Total Study Hours", weeks * weekly_hours)
            .field("Rest Day", yes_no(breaks));

        w.heading("Overview").paragraph(format!(
            "This {} plan takes you through {} phases ({}) to reach your goal: {}.",
            duration.label.to_lowercase(),
            phases.len(),
            phases.join(" -> "),
            goal.description.to_lowercase()
        ));

        w.heading("Weekly Schedule");
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(weeks);
        for week in 0..weeks {
            let phase = phases[week * phases.len() / weeks];
            let focus = daily[week % daily.len()];
            rows.push(vec![
                format!("Week {}", week + 1),
                phase.to_string(),
                focus.to_string(),
                format!("{} h", weekly_hours),
            ]);
        }
        w.table(&["Week", "Phase", "Key Activity", "Hours"], &rows);

        w.heading("Daily Routine");
        for (i, activity) in daily.iter().enumerate() {
            let minutes = hours * 60 / daily.len();
            w.numbered(i + 1, format!("{} ({} min)", activity, minutes));
        }
        if breaks {
            w.paragraph("Day 7 is a rest day. Light review only, no new material.");
        }

        w.heading("Study Techniques");
        for technique in &techniques {
            w.bullet(format!("**{}**: {}", technique.label, technique.description));
        }

        w.heading("Milestones");
        for (i, phase) in phases.iter().enumerate() {
            let end_week = ((i + 1) * weeks).div_ceil(phases.len()).max(1);
            w.checkbox(false, format!("Complete {} by end of week {}", phase, end_week));
        }

        if form.flag("includeResources") {
            w.heading("Recommended Resources");
            w.bullets(RESOURCES.get(style.id).iter());
        }

        w.heading("Progress Forecast")
            .bullet(format!(
                "Expected retention after plan: {}%",
                flavor.percent(70, 95)
            ))
            .bullet(format!(
                "Confidence improvement: +{}%",
                flavor.percent(15, 45)
            ));

        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::FixedFlavor;

    #[test]
    fn test_phases_keyed_by_difficulty_and_goal() {
        let mut form = SCHEMA.initial_state();
        form.set_field("difficulty", "beginner").unwrap();
        form.set_field("goal", "exam-prep").unwrap();
        let out = StudyPlanner.render(&form, &mut FixedFlavor);
        assert!(out.contains("Orientation -> Core Concepts -> Guided Practice -> Past Papers"));

        // partial match on difficulty
        form.set_field("goal", "skill-building").unwrap();
        let out = StudyPlanner.render(&form, &mut FixedFlavor);
        assert!(out.contains("Foundations -> Core Concepts -> Practice -> Review"));

        // no row at all
        form.set_field("difficulty", "intermediate").unwrap();
        let out = StudyPlanner.render(&form, &mut FixedFlavor);
        assert!(out.contains("Foundations -> Application -> Practice -> Mastery Check"));
    }

    #[test]
    fn test_schedule_has_one_row_per_week() {
        let mut form = SCHEMA.initial_state();
        form.set_field("duration", "12-weeks").unwrap();
        let out = StudyPlanner.render(&form, &mut FixedFlavor);
        let rows = out.lines().filter(|l| l.starts_with("| Week ")).count();
        // header row starts with "| Week |"
        assert_eq!(rows, 13);
        assert!(out.contains("| Week 12 |"));
    }

    #[test]
    fn test_total_hours_respects_rest_day() {
        let mut form = SCHEMA.initial_state();
        form.set_field("duration", "1-week").unwrap();
        form.set_field("hoursPerDay", "3").unwrap();
        let out = StudyPlanner.render(&form, &mut FixedFlavor);
        assert!(out.contains("**Total Study Hours:** 18"));

        form.set_field("includeBreaks", false).unwrap();
        let out = StudyPlanner.render(&form, &mut FixedFlavor);
        assert!(out.contains("**Total Study Hours:** 21"));
        assert!(!out.contains("rest day"));
    }
}
