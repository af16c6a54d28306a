use tf_core::catalog::{CatalogEntry, OptionCatalog};
use tf_core::form::{FieldValue, FormState};
use tf_core::request;
use tf_core::schema::{Category, FieldSpec, ToolSchema};
use tempfile::TempDir;

static STYLES: OptionCatalog = OptionCatalog::new(
    "voice_style",
    &[
        CatalogEntry::new("natural", "Natural", "Conversational delivery"),
        CatalogEntry::new("calm", "Calm", "Slow, soothing delivery"),
    ],
    "natural",
);

static EFFECTS: OptionCatalog = OptionCatalog::new(
    "effects",
    &[
        CatalogEntry::new("reverb", "Reverb", ""),
        CatalogEntry::new("echo", "Echo", ""),
    ],
    "reverb",
);

static VOICE: ToolSchema = ToolSchema {
    id: "voice",
    title: "Voice",
    description: "",
    category: Category::Media,
    latency_ms: 4000,
    fields: &[
        FieldSpec::text("text", "Text", "Type something"),
        FieldSpec::choice("voiceStyle", "Voice style", &STYLES),
        FieldSpec::toggle("music", "Background music", false),
        FieldSpec::multi("effects", "Effects", &EFFECTS, &[]),
    ],
};

#[test]
fn test_save_and_load_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("requests").join("voice.json");

    let mut form = FormState::new(&VOICE);
    form.set_field("text", "Hello there").unwrap();
    form.set_field("voiceStyle", "calm").unwrap();
    form.toggle_option("effects", "echo").unwrap();
    let snapshot = form.snapshot(Some(3));

    request::save(&path, &snapshot).unwrap();
    assert!(path.exists());

    let loaded = request::load(&path).unwrap();
    assert_eq!(loaded, snapshot);

    let rebuilt = FormState::from_request(&VOICE, &loaded).unwrap();
    assert_eq!(rebuilt.text("text"), "Hello there");
    assert_eq!(rebuilt.choice("voiceStyle"), "calm");
    assert_eq!(rebuilt.multi("effects"), ["echo".to_string()]);
    assert!(!rebuilt.flag("music"));
}

#[test]
fn test_load_nonexistent_fails() {
    let tmp = TempDir::new().unwrap();
    let result = request::load(&tmp.path().join("missing.json"));
    assert!(result.is_err(), "loading a missing file should fail");
}

#[test]
fn test_partial_request_keeps_defaults() {
    let json = r#"{
        "version": "1.0.0",
        "tool": "voice",
        "fields": { "music": true }
    }"#;
    let loaded = request::from_json(json).unwrap();
    let form = FormState::from_request(&VOICE, &loaded).unwrap();
    assert!(form.flag("music"));
    assert_eq!(form.choice("voiceStyle"), "natural");
    assert_eq!(form.get("text"), Some(&FieldValue::Str(String::new())));
}

#[test]
fn test_request_with_wrong_kind_is_rejected() {
    let json = r#"{
        "version": "1.0.0",
        "tool": "voice",
        "fields": { "effects": "echo" }
    }"#;
    let loaded = request::from_json(json).unwrap();
    let err = FormState::from_request(&VOICE, &loaded).unwrap_err();
    assert!(err.to_string().contains("effects"));
}
