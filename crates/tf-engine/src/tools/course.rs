//! Course Creator: module outline, lesson plan and assessment strategy.

use crate::flavor::FlavorSource;
use crate::report::ReportWriter;
use crate::tool::{
    Tool, chosen, chosen_many, join_labels, leading_number, text_or, title_case, yes_no,
};
use tf_core::catalog::{CatalogEntry, OptionCatalog};
use tf_core::form::FormState;
use tf_core::schema::{Category, FieldSpec, ToolSchema};
use tf_core::table::{KeyedTable, LookupTable};

pub static AUDIENCE: OptionCatalog = OptionCatalog::new(
    "audience",
    &[
        CatalogEntry::new("beginners", "Complete Beginners", "No background in the subject"),
        CatalogEntry::new("students", "Students", "High school and university learners"),
        CatalogEntry::new("professionals", "Working Professionals", "Upskilling alongside a job"),
        CatalogEntry::new("executives", "Executives", "Strategic, time-constrained leaders"),
    ],
    "beginners",
);

pub static LEVEL: OptionCatalog = OptionCatalog::new(
    "level",
    &[
        CatalogEntry::new("introductory", "Introductory", "First exposure to the topic"),
        CatalogEntry::new("intermediate", "Intermediate", "Builds on existing basics"),
        CatalogEntry::new("advanced", "Advanced", "Specialist depth"),
    ],
    "introductory",
);

pub static FORMAT: OptionCatalog = OptionCatalog::new(
    "format",
    &[
        CatalogEntry::new("video", "Video Lectures", "Recorded video lessons"),
        CatalogEntry::new("text", "Text-Based", "Written lessons and readings"),
        CatalogEntry::new("interactive", "Interactive", "Exercises, simulations and labs"),
        CatalogEntry::new("blended", "Blended", "Mix of video, reading and practice"),
    ],
    "blended",
);

pub static DURATION: OptionCatalog = OptionCatalog::new(
    "duration",
    &[
        CatalogEntry::new("2-weeks", "2 Weeks", "Short course"),
        CatalogEntry::new("4-weeks", "4 Weeks", "Standard course"),
        CatalogEntry::new("6-weeks", "6 Weeks", "Extended course"),
        CatalogEntry::new("8-weeks", "8 Weeks", "Comprehensive course"),
        CatalogEntry::new("12-weeks", "12 Weeks", "Full program"),
    ],
    "4-weeks",
);

pub static FEATURES: OptionCatalog = OptionCatalog::new(
    "features",
    &[
        CatalogEntry::new("quizzes", "Quizzes", "Short knowledge checks after lessons"),
        CatalogEntry::new("assignments", "Assignments", "Graded practical tasks"),
        CatalogEntry::new("discussions", "Discussion Forums", "Peer conversation threads"),
        CatalogEntry::new("live-sessions", "Live Sessions", "Weekly instructor Q&A"),
        CatalogEntry::new("capstone", "Capstone Project", "End-of-course project"),
    ],
    "quizzes",
);

pub static SCHEMA: ToolSchema = ToolSchema {
    id: "course-creator",
    title: "AI Course Creator",
    description: "Design a complete course outline with modules, lessons and assessments.",
    category: Category::Education,
    latency_ms: 4500,
    fields: &[
        FieldSpec::text("courseTitle", "Course title", "e.g. Introduction to Digital Marketing"),
        FieldSpec::choice("audience", "Target audience", &AUDIENCE),
        FieldSpec::choice("level", "Level", &LEVEL),
        FieldSpec::choice("format", "Delivery format", &FORMAT),
        FieldSpec::choice("duration", "Course length", &DURATION),
        FieldSpec::multi(
            "features",
            "Course features",
            &FEATURES,
            &["quizzes", "assignments"],
        ),
        FieldSpec::toggle("includeAssessments", "Final assessment", true),
        FieldSpec::toggle("includeCertificate", "Completion certificate", false),
    ],
};

const SAMPLE_TITLE: &str = "Introduction to Digital Marketing";

const THEME_ROWS: &[(&str, &[&str])] = &[
    (
        "intermediate",
        &[
            "Revisiting the Fundamentals of",
            "Applied Techniques in",
            "Tools and Workflows for",
            "Case Studies in",
            "Measuring Success in",
            "Scaling",
        ],
    ),
    (
        "advanced",
        &[
            "Current Research in",
            "Architecture and Strategy for",
            "Optimizing",
            "Leading Teams in",
            "Emerging Trends in",
            "Expert Practice in",
        ],
    ),
];

/// Module title prefixes keyed by level, cycled by module number.
const THEMES: KeyedTable<&[&str]> = LookupTable::new(
    "course_themes",
    THEME_ROWS,
    &[
        "Welcome to",
        "Core Concepts of",
        "Key Tools for",
        "Hands-on Practice with",
        "Common Pitfalls in",
        "Next Steps in",
    ],
);

/// (lessons per module, minutes per lesson, lesson noun)
const LESSONS: KeyedTable<(usize, usize, &str)> = LookupTable::new(
    "course_lessons",
    &[
        ("video", (4, 12, "video")),
        ("text", (3, 20, "reading")),
        ("interactive", (3, 25, "lab")),
    ],
    (4, 15, "lesson"),
);

const OUTCOMES: KeyedTable<&str> = LookupTable::new(
    "course_outcomes",
    &[
        ("students", "apply the material in coursework and exams"),
        ("professionals", "use the material in day-to-day work"),
        ("executives", "make informed strategic decisions"),
    ],
    "understand and explain the essentials with confidence",
);

pub struct CourseCreator;

impl Tool for CourseCreator {
    fn schema(&self) -> &'static ToolSchema {
        &SCHEMA
    }

    fn render(&self, form: &FormState, flavor: &mut dyn FlavorSource) -> String {
        let title = text_or(form, "courseTitle", SAMPLE_TITLE);
        let audience = chosen(form, "audience", &AUDIENCE);
        let level = chosen(form, "level", &LEVEL);
        let format = chosen(form, "format", &FORMAT);
        let duration = chosen(form, "duration", &DURATION);
        let features = chosen_many(form, "features", &FEATURES, &["quizzes"]);
        let assessments = form.flag("includeAssessments");
        let certificate = form.flag("includeCertificate");

        let modules = leading_number(duration, 4).max(2);
        let themes = *THEMES.get(level.id);
        let (lessons_per, minutes_per, noun) = *LESSONS.get(format.id);
        let total_minutes = modules * lessons_per * minutes_per;

        let mut w = ReportWriter::new();
        w.title(title)
            .field("Audience", audience.label)
            .field("Level", level.label)
            .field("Format", format.label)
            .field("Duration", duration.label)
            .field("Modules", modules)
            .field(
                "Total Content",
                format!("{}h {:02}m", total_minutes / 60, total_minutes % 60),
            )
            .field("Features", join_labels(&features))
            .field("Certificate", yes_no(certificate));

        w.heading("Course Description").paragraph(format!(
            "{} is a {} course for {}. {}. By the end, learners will {}.",
            title,
            level.label.to_lowercase(),
            audience.label.to_lowercase(),
            format.description,
            OUTCOMES.get(audience.id)
        ));

        w.heading("Learning Objectives");
        for (i, theme) in themes.iter().take(4).enumerate() {
            w.numbered(i + 1, format!("{} {}", theme, title).trim().to_string());
        }

        w.heading("Curriculum");
        for m in 0..modules {
            let theme = themes[m % themes.len()];
            w.subheading(&format!("Module {}: {} {}", m + 1, theme, title));
            for l in 0..lessons_per {
                w.bullet(format!(
                    "{}.{} {} {} ({} min)",
                    m + 1,
                    l + 1,
                    title_case(noun),
                    l + 1,
                    minutes_per
                ));
            }
            for feature in &features {
                match feature.id {
                    "quizzes" => w.bullet("Module quiz (10 questions)"),
                    "assignments" => w.bullet("Graded assignment"),
                    "discussions" => w.bullet("Discussion prompt"),
                    "live-sessions" => w.bullet("Live Q&A session"),
                    _ => continue,
                };
            }
        }

        if assessments {
            w.heading("Assessment Strategy");
            let capstone = features.iter().any(|f| f.id == "capstone");
            w.bullet("Formative checks at the end of each module")
                .bullet(format!(
                    "Final {} worth 40% of the grade",
                    if capstone { "capstone project" } else { "exam" }
                ))
                .bullet("Passing grade: 70%");
        }

        if certificate {
            w.heading("Certification").paragraph(format!(
                "Learners who pass receive a verifiable certificate of completion for {}.",
                title
            ));
        }

        w.heading("Launch Projections")
            .bullet(format!(
                "Suggested price: ${:.2}",
                flavor.amount(49.0, 299.0)
            ))
            .bullet(format!(
                "Expected enrollments (first quarter): {}",
                flavor.count(150, 2500)
            ))
            .bullet(format!("Projected completion rate: {}%", flavor.percent(35, 85)));

        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::FixedFlavor;

    #[test]
    fn test_module_count_follows_duration() {
        let mut form = SCHEMA.initial_state();
        form.set_field("duration", "6-weeks").unwrap();
        let out = CourseCreator.render(&form, &mut FixedFlavor);
        let modules = out.lines().filter(|l| l.starts_with("### Module ")).count();
        assert_eq!(modules, 6);
        assert!(out.contains("### Module 1: Welcome to Introduction to Digital Marketing"));
    }

    #[test]
    fn test_format_changes_lessons() {
        let mut form = SCHEMA.initial_state();
        form.set_field("courseTitle", "Rust for Beginners").unwrap();
        form.set_field("format", "interactive").unwrap();
        form.set_field("duration", "2-weeks").unwrap();
        let out = CourseCreator.render(&form, &mut FixedFlavor);
        assert!(out.contains("- 1.1 Lab 1 (25 min)"));
        assert!(out.contains("**Total Content:** 2h 30m"));
    }

    #[test]
    fn test_capstone_replaces_exam() {
        let mut form = SCHEMA.initial_state();
        form.set_field("features", vec!["capstone"]).unwrap();
        let out = CourseCreator.render(&form, &mut FixedFlavor);
        assert!(out.contains("Final capstone project worth 40%"));
        assert!(!out.contains("Module quiz"));
    }
}
