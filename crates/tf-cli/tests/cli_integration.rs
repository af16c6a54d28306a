//! Integration tests for tf-cli functionality.
//! Tests the underlying library functions that the CLI commands invoke.

use tf_core::config::ToolforgeConfig;
use tf_core::form::{FieldValue, FormError};
use tf_core::request;
use tf_engine::{FixedFlavor, SeededFlavor, find_tool, generate, suggest_tool};

#[test]
fn test_unknown_tool_gets_suggestion() {
    assert!(find_tool("voice-synth").is_none());
    assert_eq!(suggest_tool("voice-synth"), Some("voice-synthesizer"));
    assert_eq!(suggest_tool("dashbord-builder"), Some("dashboard-builder"));
}

#[test]
fn test_set_assignments_on_real_schema() {
    let quiz = find_tool("quiz-generator").unwrap();
    let mut form = quiz.schema().initial_state();
    form.set_from_str("questionTypes", "true-false,matching").unwrap();
    form.set_from_str("includeExplanations", "true").unwrap();
    form.set_from_str("difficulty", "easy").unwrap();

    assert_eq!(
        form.get("questionTypes"),
        Some(&FieldValue::from(vec!["true-false", "matching"]))
    );
    assert!(form.flag("includeExplanations"));
    assert_eq!(form.choice("difficulty"), "easy");

    assert!(!form.toggle_option("questionTypes", "true-false").unwrap());
    assert_eq!(form.multi("questionTypes"), ["matching".to_string()]);
}

#[test]
fn test_bad_toggle_value_is_rejected() {
    let voice = find_tool("voice-synthesizer").unwrap();
    let mut form = voice.schema().initial_state();
    let err = form.set_from_str("addPauses", "sometimes").unwrap_err();
    assert!(matches!(err, FormError::InvalidValue { .. }));
}

#[test]
fn test_request_file_reproduces_output() {
    let tmpdir = tempfile::tempdir().unwrap();
    let path = tmpdir.path().join("requests").join("study.json");

    let planner = find_tool("study-planner").unwrap();
    let mut form = planner.schema().initial_state();
    form.set_from_str("subject", "Organic Chemistry").unwrap();
    let snapshot = form.snapshot(Some(2024));
    request::save(&path, &snapshot).unwrap();

    let loaded = request::load(&path).unwrap();
    assert_eq!(loaded, snapshot);

    let seed = loaded.seed.unwrap();
    let first = generate(planner, &snapshot, &mut SeededFlavor::new(seed)).unwrap();
    let second = generate(planner, &loaded, &mut SeededFlavor::new(seed)).unwrap();
    assert_eq!(first, second);
    assert!(first.contains("Organic Chemistry"));
}

#[test]
fn test_request_load_nonexistent() {
    let tmpdir = tempfile::tempdir().unwrap();
    assert!(request::load(&tmpdir.path().join("missing.json")).is_err());
}

#[test]
fn test_request_for_wrong_tool_fails_to_generate() {
    let chart = find_tool("chart-generator").unwrap();
    let course = find_tool("course-creator").unwrap();
    let snapshot = chart.schema().initial_state().snapshot(None);
    assert!(generate(course, &snapshot, &mut FixedFlavor).is_err());
}

#[test]
fn test_config_defaults_without_file() {
    let tmpdir = tempfile::tempdir().unwrap();
    let config = ToolforgeConfig::load(tmpdir.path()).unwrap();
    assert!(config.output.show_header);
    let quiz = find_tool("quiz-generator").unwrap();
    assert_eq!(
        config
            .effective_latency(quiz.id(), quiz.schema().latency_ms)
            .as_millis(),
        3000
    );
}

#[test]
fn test_config_file_overrides_latency() {
    let tmpdir = tempfile::tempdir().unwrap();
    let dir = tmpdir.path().join(".toolforge");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        "[generation]\nlatency_scale = 0.5\n\n[generation.latency_ms]\nChart-Generator = 1000\n\n[output]\nshow_header = false\n",
    )
    .unwrap();

    let config = ToolforgeConfig::load(tmpdir.path()).unwrap();
    assert!(!config.output.show_header);
    let chart = find_tool("chart-generator").unwrap();
    let course = find_tool("course-creator").unwrap();
    assert_eq!(
        config
            .effective_latency(chart.id(), chart.schema().latency_ms)
            .as_millis(),
        500
    );
    assert_eq!(
        config
            .effective_latency(course.id(), course.schema().latency_ms)
            .as_millis(),
        2250
    );
}
