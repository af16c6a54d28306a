//! One module per tool page. Each defines its catalogs, content tables and template.

pub mod chart;
pub mod course;
pub mod dashboard;
pub mod legal;
pub mod project_planner;
pub mod quiz;
pub mod study_planner;
pub mod subtitles;
pub mod voice;

pub use chart::ChartGenerator;
pub use course::CourseCreator;
pub use dashboard::DashboardBuilder;
pub use legal::LegalAssistant;
pub use project_planner::ProjectPlanner;
pub use quiz::QuizGenerator;
pub use study_planner::StudyPlanner;
pub use subtitles::SubtitleGenerator;
pub use voice::VoiceSynthesizer;
