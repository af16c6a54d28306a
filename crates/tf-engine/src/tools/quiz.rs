//! Quiz Generator: numbered questions cycling through the selected question types.

use crate::flavor::FlavorSource;
use crate::report::ReportWriter;
use crate::tool::{Tool, chosen, chosen_many, join_labels, leading_number, text_or, title_case};
use tf_core::catalog::{CatalogEntry, OptionCatalog};
use tf_core::form::FormState;
use tf_core::schema::{Category, FieldSpec, ToolSchema};
use tf_core::table::{KeyedTable, LookupTable};

pub static DIFFICULTY: OptionCatalog = OptionCatalog::new(
    "difficulty",
    &[
        CatalogEntry::new("easy", "Easy", "Recall and recognition questions"),
        CatalogEntry::new("medium", "Medium", "Application of core concepts"),
        CatalogEntry::new("hard", "Hard", "Analysis and multi-step reasoning"),
    ],
    "medium",
);

pub static QUESTION_TYPES: OptionCatalog = OptionCatalog::new(
    "question_types",
    &[
        CatalogEntry::new("multiple-choice", "Multiple Choice", "Four options, one correct"),
        CatalogEntry::new("true-false", "True / False", "Binary statements"),
        CatalogEntry::new("short-answer", "Short Answer", "Two or three sentence responses"),
        CatalogEntry::new("fill-blank", "Fill in the Blank", "Complete the missing term"),
        CatalogEntry::new("matching", "Matching", "Pair terms with definitions"),
    ],
    "multiple-choice",
);

pub static QUESTION_COUNT: OptionCatalog = OptionCatalog::new(
    "number_of_questions",
    &[
        CatalogEntry::new("5", "5 Questions", "Quick check"),
        CatalogEntry::new("10", "10 Questions", "Standard quiz"),
        CatalogEntry::new("15", "15 Questions", "Extended practice"),
        CatalogEntry::new("20", "20 Questions", "Full assessment"),
        CatalogEntry::new("25", "25 Questions", "Exam simulation"),
    ],
    "10",
);

pub static GRADE_LEVEL: OptionCatalog = OptionCatalog::new(
    "grade_level",
    &[
        CatalogEntry::new("elementary", "Elementary School", "Ages 6-11"),
        CatalogEntry::new("middle-school", "Middle School", "Ages 11-14"),
        CatalogEntry::new("high-school", "High School", "Ages 14-18"),
        CatalogEntry::new("university", "University", "Undergraduate level"),
        CatalogEntry::new("professional", "Professional", "Workplace training"),
    ],
    "high-school",
);

pub static SCHEMA: ToolSchema = ToolSchema {
    id: "quiz-generator",
    title: "AI Quiz Generator",
    description: "Create quizzes with mixed question types, answer keys and explanations.",
    category: Category::Education,
    latency_ms: 3000,
    fields: &[
        FieldSpec::text("subject", "Subject or topic", "e.g. Photosynthesis"),
        FieldSpec::choice("difficulty", "Difficulty", &DIFFICULTY),
        FieldSpec::multi(
            "questionTypes",
            "Question types",
            &QUESTION_TYPES,
            &["multiple-choice"],
        ),
        FieldSpec::choice("numberOfQuestions", "Number of questions", &QUESTION_COUNT),
        FieldSpec::choice("gradeLevel", "Grade level", &GRADE_LEVEL),
        FieldSpec::toggle("includeAnswers", "Include answer key", true),
        FieldSpec::toggle("includeExplanations", "Include explanations", false),
    ],
};

const SAMPLE_SUBJECT: &str = "General Science";

/// Per-difficulty question framing, cycled by question number.
const FOCUS_ROWS: &[(&str, &[&str])] = &[
    (
        "easy",
        &[
            "the basic definition of",
            "a key term used in",
            "a simple example of",
            "the main purpose of",
        ],
    ),
    (
        "medium",
        &[
            "how to apply",
            "the relationship between two ideas in",
            "a common misconception about",
            "the process behind",
        ],
    ),
    (
        "hard",
        &[
            "the limitations of current models of",
            "an edge case that challenges",
            "the trade-offs involved in",
            "how competing theories explain",
        ],
    ),
];
const FOCUS_DEFAULT: &[&str] = &[
    "the core ideas of",
    "an example of",
    "the purpose of",
    "the process behind",
];
const FOCUS: KeyedTable<&[&str]> = LookupTable::new("quiz_focus", FOCUS_ROWS, FOCUS_DEFAULT);

/// (minutes per question, passing score %, instructions)
const PACING: KeyedTable<(usize, u32, &str)> = LookupTable::new(
    "quiz_pacing",
    &[
        (
            "easy",
            (1, 60, "Read each question carefully and choose the best answer. Most questions check recall of key facts."),
        ),
        (
            "medium",
            (2, 70, "Answer every question. Several questions ask you to apply a concept to a new situation."),
        ),
        (
            "hard",
            (3, 80, "Questions require multi-step reasoning. Show your working for short-answer items."),
        ),
    ],
    (2, 70, "Answer every question to the best of your ability."),
);

const ANSWER_LETTERS: [&str; 4] = ["B", "C", "A", "D"];

pub struct QuizGenerator;

impl Tool for QuizGenerator {
    fn schema(&self) -> &'static ToolSchema {
        &SCHEMA
    }

    fn render(&self, form: &FormState, flavor: &mut dyn FlavorSource) -> String {
        let subject = text_or(form, "subject", SAMPLE_SUBJECT);
        let difficulty = chosen(form, "difficulty", &DIFFICULTY);
        let types = chosen_many(form, "questionTypes", &QUESTION_TYPES, &["multiple-choice"]);
        let count_entry = chosen(form, "numberOfQuestions", &QUESTION_COUNT);
        let total = leading_number(count_entry, 10).max(1);
        let grade = chosen(form, "gradeLevel", &GRADE_LEVEL);
        let with_answers = form.flag("includeAnswers");
        let with_explanations = form.flag("includeExplanations");

        let (minutes_per_q, passing, instructions) = *PACING.get(difficulty.id);
        let focus = FOCUS.get(difficulty.id);

        let mut w = ReportWriter::new();
        w.title(&format!("{} Quiz", title_case(subject)))
            .field("Subject", subject)
            .field("Difficulty", difficulty.label)
            .field("Grade Level", grade.label)
            .field("Question Types", join_labels(&types))
            .field("Total Questions", total)
            .field("Estimated Time", format!("{} minutes", total * minutes_per_q))
            .field("Passing Score", format!("{}%", passing));

        w.heading("Instructions").paragraph(instructions);

        w.heading("Questions");
        let mut answers: Vec<String> = Vec::with_capacity(total);
        for i in 0..total {
            let n = i + 1;
            let kind = types[i % types.len()];
            let angle = focus[i % focus.len()];
            w.subheading(&format!("Question {} ({})", n, kind.label));
            let answer = write_question(&mut w, kind.id, n, angle, subject);
            if with_answers {
                w.field("Answer", &answer);
            }
            if with_explanations {
                w.field(
                    "Explanation",
                    format!(
                        "This item targets {} {}. {}",
                        angle,
                        subject,
                        difficulty.description
                    ),
                );
            }
            answers.push(answer);
        }

        if with_answers {
            w.heading("Answer Key");
            for (i, answer) in answers.iter().enumerate() {
                w.numbered(i + 1, answer);
            }
        }

        w.heading("Quiz Analytics");
        w.bullet(format!(
            "Predicted average score: {}%",
            flavor.percent(passing.saturating_sub(5), 92)
        ))
        .bullet(format!(
            "Concept coverage: {} of {} learning objectives",
            flavor.count(4, 8),
            8
        ))
        .bullet(format!(
            "Question variety index: {}%",
            flavor.percent(70, 98)
        ));

        w.finish()
    }
}

/// Write one question body and return its answer line.
fn write_question(w: &mut ReportWriter, kind: &str, n: usize, angle: &str, subject: &str) -> String {
    match kind {
        "true-false" => {
            let truth = n % 2 == 1;
            if truth {
                w.paragraph(format!(
                    "True or False: Understanding {} {} helps explain related topics.",
                    angle, subject
                ));
            } else {
                w.paragraph(format!(
                    "True or False: {} has no practical applications outside the classroom.",
                    subject
                ));
            }
            if truth { "True" } else { "False" }.to_string()
        }
        "short-answer" => {
            w.paragraph(format!(
                "In two or three sentences, explain {} {}.",
                angle, subject
            ));
            format!("A complete answer names {} {} and gives one example.", angle, subject)
        }
        "fill-blank" => {
            w.paragraph(format!(
                "Complete the sentence: When studying {} {}, the most important idea is ________.",
                angle, subject
            ));
            format!("the central principle of {}", subject)
        }
        "matching" => {
            w.paragraph(format!("Match each term from {} with its description.", subject))
                .numbered(1, "Term A")
                .numbered(2, "Term B")
                .numbered(3, "Term C")
                .blank()
                .bullet("a) Describes a cause")
                .bullet("b) Describes an effect")
                .bullet("c) Describes a definition");
            "1-c, 2-a, 3-b".to_string()
        }
        _ => {
            let letter = ANSWER_LETTERS[(n - 1) % ANSWER_LETTERS.len()];
            w.paragraph(format!(
                "Which statement best describes {} {}?",
                angle, subject
            ));
            for option in ["A", "B", "C", "D"] {
                let text = if option == letter {
                    format!("The accurate description of {} {}", angle, subject)
                } else {
                    format!("A plausible but incomplete statement about {}", subject)
                };
                w.bullet(format!("{}) {}", option, text));
            }
            letter.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::FixedFlavor;

    fn render(form: &FormState) -> String {
        QuizGenerator.render(form, &mut FixedFlavor)
    }

    fn question_headers(out: &str) -> Vec<&str> {
        out.lines().filter(|l| l.starts_with("### Question ")).collect()
    }

    #[test]
    fn test_hard_ten_questions_round_robin() {
        let mut form = SCHEMA.initial_state();
        form.set_field("difficulty", "hard").unwrap();
        form.set_field("questionTypes", vec!["multiple-choice", "true-false"])
            .unwrap();
        form.set_field("numberOfQuestions", "10").unwrap();

        let out = render(&form);
        let headers = question_headers(&out);
        assert_eq!(headers.len(), 10);
        for (i, header) in headers.iter().enumerate() {
            assert!(header.starts_with(&format!("### Question {} (", i + 1)));
            let expected = if i % 2 == 0 {
                "(Multiple Choice)"
            } else {
                "(True / False)"
            };
            assert!(header.ends_with(expected), "{header}");
        }
        let header_section = out.split("## Instructions").next().unwrap();
        assert!(header_section.contains("**Difficulty:** Hard"));
    }

    #[test]
    fn test_type_order_follows_click_order() {
        let mut form = SCHEMA.initial_state();
        form.set_field("questionTypes", vec!["matching", "short-answer", "true-false"])
            .unwrap();
        form.set_field("numberOfQuestions", "5").unwrap();
        let out = render(&form);
        let headers = question_headers(&out);
        assert_eq!(headers.len(), 5);
        assert!(headers[0].ends_with("(Matching)"));
        assert!(headers[1].ends_with("(Short Answer)"));
        assert!(headers[2].ends_with("(True / False)"));
        assert!(headers[3].ends_with("(Matching)"));
    }

    #[test]
    fn test_empty_types_and_subject_fall_back() {
        let mut form = SCHEMA.initial_state();
        form.set_field("questionTypes", Vec::<String>::new()).unwrap();
        form.set_field("subject", "   ").unwrap();
        let out = render(&form);
        assert!(out.starts_with("# General Science Quiz"));
        let headers = question_headers(&out);
        assert_eq!(headers.len(), 10);
        assert!(headers.iter().all(|h| h.ends_with("(Multiple Choice)")));
    }

    #[test]
    fn test_unknown_count_uses_default() {
        let mut form = SCHEMA.initial_state();
        form.set_field("numberOfQuestions", "a-lot").unwrap();
        assert_eq!(question_headers(&render(&form)).len(), 10);
    }

    #[test]
    fn test_answer_key_toggle() {
        let mut form = SCHEMA.initial_state();
        let with_key = render(&form);
        assert!(with_key.contains("## Answer Key"));
        assert!(with_key.contains("**Answer:** B"));

        form.set_field("includeAnswers", false).unwrap();
        form.set_field("includeExplanations", true).unwrap();
        let without_key = render(&form);
        assert!(!without_key.contains("## Answer Key"));
        assert!(without_key.contains("**Explanation:**"));
    }
}
