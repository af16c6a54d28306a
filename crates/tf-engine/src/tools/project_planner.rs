//! Project Planner: phased timeline, team roles, risks and budget.

use crate::flavor::FlavorSource;
use crate::report::ReportWriter;
use crate::tool::{Tool, chosen, chosen_many, join_labels, leading_number, text_or};
use tf_core::catalog::{CatalogEntry, OptionCatalog};
use tf_core::form::FormState;
use tf_core::schema::{Category, FieldSpec, ToolSchema};
use tf_core::table::{KeyedTable, LookupTable};

pub static METHODOLOGY: OptionCatalog = OptionCatalog::new(
    "methodology",
    &[
        CatalogEntry::new("agile", "Agile (Scrum)", "Two-week sprints with ceremonies"),
        CatalogEntry::new("waterfall", "Waterfall", "Sequential stage gates"),
        CatalogEntry::new("kanban", "Kanban", "Continuous flow with WIP limits"),
        CatalogEntry::new("hybrid", "Hybrid", "Up-front planning, iterative delivery"),
    ],
    "agile",
);

pub static TEAM_SIZE: OptionCatalog = OptionCatalog::new(
    "team_size",
    &[
        CatalogEntry::new("small", "Small (2-5)", "Everyone wears several hats"),
        CatalogEntry::new("medium", "Medium (6-15)", "Dedicated specialists"),
        CatalogEntry::new("large", "Large (16+)", "Multiple coordinated squads"),
    ],
    "small",
);

pub static DURATION: OptionCatalog = OptionCatalog::new(
    "project_duration",
    &[
        CatalogEntry::new("1-month", "1 Month", "Quick initiative"),
        CatalogEntry::new("3-months", "3 Months", "Quarter-long project"),
        CatalogEntry::new("6-months", "6 Months", "Half-year program"),
        CatalogEntry::new("12-months", "12 Months", "Year-long program"),
    ],
    "3-months",
);

pub static PRIORITY: OptionCatalog = OptionCatalog::new(
    "priority",
    &[
        CatalogEntry::new("speed", "Speed to Market", "Ship as early as possible"),
        CatalogEntry::new("quality", "Quality", "Minimize defects and rework"),
        CatalogEntry::new("cost", "Cost Control", "Stay within a fixed budget"),
    ],
    "quality",
);

pub static DELIVERABLES: OptionCatalog = OptionCatalog::new(
    "deliverables",
    &[
        CatalogEntry::new("requirements", "Requirements Document", "Agreed scope and acceptance criteria"),
        CatalogEntry::new("design", "Design Mockups", "Approved UX and visual design"),
        CatalogEntry::new("mvp", "MVP Release", "First usable version"),
        CatalogEntry::new("documentation", "Documentation", "User and operator guides"),
        CatalogEntry::new("training", "Training Sessions", "Hand-over to end users"),
        CatalogEntry::new("launch", "Production Launch", "General availability"),
    ],
    "mvp",
);

pub static SCHEMA: ToolSchema = ToolSchema {
    id: "project-planner",
    title: "AI Project Planner",
    description: "Generate a phased project plan with roles, milestones, risks and budget.",
    category: Category::Productivity,
    latency_ms: 3500,
    fields: &[
        FieldSpec::text("projectName", "Project name", "e.g. Customer Portal Redesign"),
        FieldSpec::choice("methodology", "Methodology", &METHODOLOGY),
        FieldSpec::choice("teamSize", "Team size", &TEAM_SIZE),
        FieldSpec::choice("duration", "Duration", &DURATION),
        FieldSpec::choice("priority", "Top priority", &PRIORITY),
        FieldSpec::multi(
            "deliverables",
            "Key deliverables",
            &DELIVERABLES,
            &["requirements", "mvp", "launch"],
        ),
        FieldSpec::toggle("includeRiskAssessment", "Risk assessment", true),
        FieldSpec::toggle("includeBudget", "Budget estimate", false),
    ],
};

const SAMPLE_PROJECT: &str = "Customer Portal Redesign";

/// (phase name, share of total weeks in percent)
type Phase = (&'static str, usize);

const PHASE_ROWS: &[(&str, &[Phase])] = &[
    (
        "waterfall",
        &[
            ("Requirements", 15),
            ("Design", 20),
            ("Implementation", 35),
            ("Verification", 20),
            ("Deployment", 10),
        ],
    ),
    (
        "kanban",
        &[("Setup & Board Design", 10), ("Continuous Delivery", 80), ("Review & Handover", 10)],
    ),
    (
        "hybrid",
        &[
            ("Discovery & Planning", 20),
            ("Iterative Build", 55),
            ("Stabilization", 15),
            ("Launch", 10),
        ],
    ),
];

const PHASES: KeyedTable<&[Phase]> = LookupTable::new(
    "project_phases",
    PHASE_ROWS,
    &[
        ("Sprint 0: Inception", 10),
        ("Build Sprints", 65),
        ("Hardening Sprint", 15),
        ("Release", 10),
    ],
);

const ROLE_ROWS: &[(&str, &[&str])] = &[
    (
        "medium",
        &[
            "Project Manager",
            "Tech Lead",
            "Backend Developers (3)",
            "Frontend Developers (2)",
            "QA Engineers (2)",
            "UX Designer",
        ],
    ),
    (
        "large",
        &[
            "Program Manager",
            "Squad Leads (3)",
            "Architect",
            "Developers (9)",
            "QA Engineers (4)",
            "Design Team (2)",
            "DevOps Engineers (2)",
        ],
    ),
];

const ROLES: KeyedTable<&[&str]> = LookupTable::new(
    "project_roles",
    ROLE_ROWS,
    &["Project Lead / Product Owner", "Full-stack Developers (2)", "Designer / QA"],
);

/// (headcount, blended weekly rate in USD)
const STAFFING: KeyedTable<(u64, u64)> = LookupTable::new(
    "project_staffing",
    &[("medium", (10, 2400)), ("large", (23, 2300))],
    (4, 2600),
);

/// (risk, mitigation)
const RISK_ROWS: &[(&str, &[(&str, &str)])] = &[
    (
        "speed",
        &[
            ("Scope creep delays release", "Freeze scope per milestone and keep a change log"),
            ("Technical debt from shortcuts", "Reserve 15% of capacity for refactoring"),
        ],
    ),
    (
        "cost",
        &[
            ("Budget overrun", "Track burn rate weekly against the baseline"),
            ("Vendor price changes", "Lock rates in contracts before kickoff"),
        ],
    ),
];

const RISKS: KeyedTable<&[(&str, &str)]> = LookupTable::new(
    "project_risks",
    RISK_ROWS,
    &[
        ("Insufficient test coverage", "Define a definition of done with coverage gates"),
        ("Late requirement changes", "Review acceptance criteria at every demo"),
    ],
);

const WEEKS_PER_MONTH: usize = 4;

pub struct ProjectPlanner;

impl Tool for ProjectPlanner {
    fn schema(&self) -> &'static ToolSchema {
        &SCHEMA
    }

    fn render(&self, form: &FormState, flavor: &mut dyn FlavorSource) -> String {
        let name = text_or(form, "projectName", SAMPLE_PROJECT);
        let method = chosen(form, "methodology", &METHODOLOGY);
        let team = chosen(form, "teamSize", &TEAM_SIZE);
        let duration = chosen(form, "duration", &DURATION);
        let priority = chosen(form, "priority", &PRIORITY);
        let deliverables = chosen_many(form, "deliverables", &DELIVERABLES, &["mvp"]);
        let total_weeks = leading_number(duration, 3) * WEEKS_PER_MONTH;
        let phases = *PHASES.get(method.id);

        let mut w = ReportWriter::new();
        w.title(&format!("Project Plan: {}", name))
            .field("Methodology", method.label)
            .field("Team Size", team.label)
            .field("Duration", format!("{} ({} weeks)", duration.label, total_weeks))
            .field("Priority", priority.label)
            .field("Deliverables", join_labels(&deliverables));

        w.heading("Timeline");
        let rows: Vec<Vec<String>> = phases
            .iter()
            .zip(phase_schedule(phases, total_weeks))
            .map(|((phase, _), (start, end))| {
                let schedule = if start == end {
                    format!("Week {}", start)
                } else {
                    format!("Week {}-{}", start, end)
                };
                vec![(*phase).to_string(), schedule, weeks_label(end - start + 1)]
            })
            .collect();
        w.table(&["Phase", "Schedule", "Length"], &rows);

        w.heading("Team & Roles");
        w.bullets(ROLES.get(team.id).iter());

        w.heading("Milestones");
        let count = deliverables.len();
        for (i, deliverable) in deliverables.iter().enumerate() {
            let week = (total_weeks * (i + 1)).div_ceil(count).max(1);
            w.checkbox(
                false,
                format!("Week {}: {} ({})", week, deliverable.label, deliverable.description),
            );
        }

        if form.flag("includeRiskAssessment") {
            w.heading("Risk Assessment");
            for (risk, mitigation) in *RISKS.get(priority.id) {
                w.subheading(risk)
                    .field("Likelihood", format!("{}%", flavor.percent(15, 60)))
                    .field("Mitigation", mitigation);
            }
        }

        if form.flag("includeBudget") {
            let (headcount, rate) = *STAFFING.get(team.id);
            let labor = headcount * rate * total_weeks as u64;
            let tooling = flavor.count(2_000, 12_000);
            let contingency = (labor + tooling) / 10;
            w.heading("Budget Estimate")
                .field("Labor", usd(labor))
                .field("Tooling & Infrastructure", usd(tooling))
                .field("Contingency (10%)", usd(contingency))
                .field("Total", usd(labor + tooling + contingency));
        }

        w.heading("Success Metrics")
            .bullet(format!("On-time delivery confidence: {}%", flavor.percent(70, 95)))
            .bullet(format!("Team utilization target: {}%", flavor.percent(75, 90)))
            .bullet(format!("{} reviewed at every phase gate", priority.label));

        w.finish()
    }
}

/// Inclusive week range for each phase, ending on week `total`. Short projects
/// with fewer weeks than phases put several phases in the same week.
fn phase_schedule(phases: &[Phase], total: usize) -> Vec<(usize, usize)> {
    let total = total.max(1);
    if total < phases.len() {
        return (0..phases.len())
            .map(|i| {
                let week = i * total / phases.len() + 1;
                (week, week)
            })
            .collect();
    }
    let mut start = 1;
    phase_weeks(phases, total)
        .into_iter()
        .map(|weeks| {
            let range = (start, start + weeks - 1);
            start += weeks;
            range
        })
        .collect()
}

/// Whole-week split of `total` by phase share. Needs `total >= phases.len()`:
/// every phase gets at least one week and the remainder lands on the longest phase.
fn phase_weeks(phases: &[Phase], total: usize) -> Vec<usize> {
    let mut weeks: Vec<usize> = phases
        .iter()
        .map(|(_, share)| (total * share / 100).max(1))
        .collect();
    let assigned: usize = weeks.iter().sum();
    if let Some(longest) = (0..weeks.len()).max_by_key(|&i| (weeks[i], usize::MAX - i)) {
        if assigned < total {
            weeks[longest] += total - assigned;
        } else {
            weeks[longest] -= (assigned - total).min(weeks[longest] - 1);
        }
    }
    weeks
}

fn weeks_label(weeks: usize) -> String {
    if weeks == 1 {
        "1 week".to_string()
    } else {
        format!("{} weeks", weeks)
    }
}

fn usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${}", out)
}
