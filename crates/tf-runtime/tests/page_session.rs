use std::collections::BTreeMap;
use std::time::Duration;
use tf_core::config::ToolforgeConfig;
use tf_core::form::FieldValue;
use tf_core::request::GenerationRequest;
use tf_engine::{SeededFlavor, find_tool};
use tf_runtime::{PageError, PageStatus, ToolPage};
use tokio::time::Instant;

fn configured_page(config: &ToolforgeConfig, id: &str) -> ToolPage {
    let tool = find_tool(id).unwrap();
    let latency = config.effective_latency(tool.id(), tool.schema().latency_ms);
    ToolPage::new(tool, latency)
}

#[tokio::test(start_paused = true)]
async fn test_configured_latency_is_honored() {
    let mut config = ToolforgeConfig::default();
    config
        .generation
        .latency_ms
        .insert("legal-assistant".to_string(), 250);
    let mut page = configured_page(&config, "legal-assistant");
    assert_eq!(page.latency(), Duration::from_millis(250));

    let start = Instant::now();
    page.generate(Box::new(SeededFlavor::new(1))).unwrap();
    page.wait_ready().await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(250));
    assert!(start.elapsed() < Duration::from_millis(4000));
}

#[tokio::test(start_paused = true)]
async fn test_skip_latency_still_goes_through_generating() {
    let mut config = ToolforgeConfig::default();
    config.generation.skip_latency = true;
    let mut page = configured_page(&config, "subtitle-generator");
    assert_eq!(page.latency(), Duration::ZERO);

    page.generate(Box::new(SeededFlavor::new(1))).unwrap();
    assert!(page.is_generating());
    assert!(page.wait_ready().await.is_some());
    assert_eq!(page.status(), PageStatus::Ready);
}

#[tokio::test(start_paused = true)]
async fn test_loaded_request_with_seed_is_reproducible() {
    let fields = BTreeMap::from([
        ("documentType".to_string(), FieldValue::from("nda")),
        ("jurisdiction".to_string(), FieldValue::from("uk")),
        (
            "focusAreas".to_string(),
            FieldValue::from(vec!["confidentiality", "termination"]),
        ),
    ]);
    let request = GenerationRequest::new("legal-assistant", fields, Some(77));

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let mut page = configured_page(&ToolforgeConfig::default(), "legal-assistant");
        page.load_request(&request).unwrap();
        page.generate_seeded(Box::new(SeededFlavor::new(77)), request.seed)
            .unwrap();
        outputs.push(page.wait_ready().await.unwrap());
        let snapshot = page.last_request().unwrap();
        assert_eq!(snapshot.seed, Some(77));
        assert_eq!(snapshot.fields["jurisdiction"], FieldValue::from("uk"));
    }
    assert_eq!(outputs[0], outputs[1]);
    assert!(outputs[0].contains("Non-Disclosure Agreement"));
}

#[tokio::test(start_paused = true)]
async fn test_request_for_another_tool_is_rejected() {
    let mut page = configured_page(&ToolforgeConfig::default(), "quiz-generator");
    let request = GenerationRequest::new("chart-generator", BTreeMap::new(), None);
    assert!(matches!(
        page.load_request(&request),
        Err(PageError::Form(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_page_cancels_generation() {
    let tool = find_tool("dashboard-builder").unwrap();
    let mut page = ToolPage::new(tool, Duration::from_millis(4000));
    let mut rx = page.subscribe();
    page.generate(Box::new(SeededFlavor::new(3))).unwrap();
    let _ = rx.borrow_and_update();
    drop(page);

    tokio::time::sleep(Duration::from_millis(10_000)).await;
    // Sender is gone with the page; no Ready was ever published.
    assert!(rx.has_changed().is_err());
    assert!(matches!(*rx.borrow(), PageStatus::Generating { .. }));
}
