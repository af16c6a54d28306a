//! One tool page session: form, busy flag, pending generation and result slot.
//!
//! `generate` snapshots the form, flips the page to [`PageStatus::Generating`] and
//! spawns a task that waits out the fake latency before rendering. The status is
//! published on a `watch` channel so a presentation layer (or the CLI spinner)
//! can follow it. `teardown` and `Drop` abort the pending task; a generation that
//! was torn down never writes its result.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tf_core::form::{FieldValue, FormError, FormState};
use tf_core::request::GenerationRequest;
use tf_engine::{FlavorSource, Tool};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Idle,
    Generating { started_at: Instant },
    Ready,
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("a generation is already in progress")]
    Busy,
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Result slot shared with the pending task. `epoch` moves on every new
/// generation and every teardown; a task only writes if its epoch is current.
#[derive(Debug, Default)]
struct Slot {
    epoch: u64,
    value: Option<String>,
}

pub struct ToolPage {
    tool: &'static dyn Tool,
    form: FormState,
    latency: Duration,
    status: Arc<watch::Sender<PageStatus>>,
    slot: Arc<Mutex<Slot>>,
    last_request: Option<GenerationRequest>,
    pending: Option<JoinHandle<()>>,
}

impl ToolPage {
    pub fn new(tool: &'static dyn Tool, latency: Duration) -> Self {
        let (status, _) = watch::channel(PageStatus::Idle);
        Self {
            tool,
            form: tool.schema().initial_state(),
            latency,
            status: Arc::new(status),
            slot: Arc::new(Mutex::new(Slot::default())),
            last_request: None,
            pending: None,
        }
    }

    pub fn tool(&self) -> &'static dyn Tool {
        self.tool
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn status(&self) -> PageStatus {
        *self.status.borrow()
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.status(), PageStatus::Generating { .. })
    }

    pub fn subscribe(&self) -> watch::Receiver<PageStatus> {
        self.status.subscribe()
    }

    /// Snapshot taken by the most recent `generate` call.
    pub fn last_request(&self) -> Option<&GenerationRequest> {
        self.last_request.as_ref()
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), PageError> {
        self.ensure_idle()?;
        self.form.set_field(name, value)?;
        Ok(())
    }

    /// Add or remove `id` in a multi-select field. Returns whether it is now selected.
    pub fn toggle_option(&mut self, name: &str, id: &str) -> Result<bool, PageError> {
        self.ensure_idle()?;
        Ok(self.form.toggle_option(name, id)?)
    }

    /// Replace the whole form with a request snapshot.
    pub fn load_request(&mut self, request: &GenerationRequest) -> Result<(), PageError> {
        self.ensure_idle()?;
        self.form = FormState::from_request(self.tool.schema(), request)?;
        Ok(())
    }

    /// Start a generation. The result appears after the page latency.
    pub fn generate(&mut self, flavor: Box<dyn FlavorSource>) -> Result<(), PageError> {
        self.generate_seeded(flavor, None)
    }

    /// Like [`ToolPage::generate`], recording `seed` in the request snapshot.
    pub fn generate_seeded(
        &mut self,
        mut flavor: Box<dyn FlavorSource>,
        seed: Option<u64>,
    ) -> Result<(), PageError> {
        self.ensure_idle()?;

        let request = self.form.snapshot(seed);
        let epoch = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            slot.epoch += 1;
            slot.value = None;
            slot.epoch
        };
        self.status.send_replace(PageStatus::Generating {
            started_at: Instant::now(),
        });
        tracing::debug!(
            tool = self.tool.id(),
            latency_ms = self.latency.as_millis() as u64,
            "generating"
        );

        let tool = self.tool;
        let latency = self.latency;
        let status = Arc::clone(&self.status);
        let slot = Arc::clone(&self.slot);
        let snapshot = request.clone();
        self.pending = Some(tokio::spawn(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let rendered = tf_engine::generate(tool, &snapshot, flavor.as_mut());
            let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.epoch != epoch {
                tracing::debug!(tool = tool.id(), "stale generation dropped");
                return;
            }
            match rendered {
                Ok(text) => {
                    tracing::info!(tool = tool.id(), bytes = text.len(), "generation complete");
                    slot.value = Some(text);
                    status.send_replace(PageStatus::Ready);
                }
                Err(e) => {
                    tracing::warn!(tool = tool.id(), "generation failed: {}", e);
                    status.send_replace(PageStatus::Idle);
                }
            }
        }));
        self.last_request = Some(request);
        Ok(())
    }

    /// Wait until no generation is pending, then return the current result.
    pub async fn wait_ready(&self) -> Option<String> {
        let mut rx = self.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx
            .wait_for(|s| !matches!(s, PageStatus::Generating { .. }))
            .await;
        self.result()
    }

    /// Last completed result, if any.
    pub fn result(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .value
            .clone()
    }

    /// Cancel any pending generation. The page returns to `Idle` if it was busy.
    pub fn teardown(&mut self) {
        {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            slot.epoch += 1;
        }
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        if self.is_generating() {
            tracing::debug!(tool = self.tool.id(), "pending generation cancelled");
            self.status.send_replace(PageStatus::Idle);
        }
    }

    fn ensure_idle(&self) -> Result<(), PageError> {
        if self.is_generating() {
            return Err(PageError::Busy);
        }
        Ok(())
    }
}

impl Drop for ToolPage {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_engine::{FixedFlavor, find_tool};

    fn quiz_page(ms: u64) -> ToolPage {
        ToolPage::new(find_tool("quiz-generator").unwrap(), Duration::from_millis(ms))
    }

    #[tokio::test(start_paused = true)]
    async fn test_busy_only_during_latency() {
        let mut page = quiz_page(3000);
        assert_eq!(page.status(), PageStatus::Idle);

        page.generate(Box::new(FixedFlavor)).unwrap();
        assert!(page.is_generating());
        assert!(page.result().is_none());

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(page.is_generating());

        let out = page.wait_ready().await.unwrap();
        assert_eq!(page.status(), PageStatus::Ready);
        assert!(out.starts_with("# "));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_takes_exactly_the_latency() {
        let mut page = quiz_page(3000);
        let start = Instant::now();
        page.generate(Box::new(FixedFlavor)).unwrap();
        page.wait_ready().await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(3000));
        assert!(elapsed < Duration::from_millis(3010));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_generate_is_rejected() {
        let mut page = quiz_page(3000);
        page.generate(Box::new(FixedFlavor)).unwrap();
        assert!(matches!(
            page.generate(Box::new(FixedFlavor)),
            Err(PageError::Busy)
        ));
        assert!(matches!(
            page.set_field("subject", "Physics"),
            Err(PageError::Busy)
        ));
        assert!(matches!(
            page.toggle_option("questionTypes", "matching"),
            Err(PageError::Busy)
        ));
        page.wait_ready().await.unwrap();

        page.set_field("subject", "Physics").unwrap();
        page.generate(Box::new(FixedFlavor)).unwrap();
        let out = page.wait_ready().await.unwrap();
        assert!(out.contains("Physics"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_prevents_result() {
        let mut page = quiz_page(3000);
        page.generate(Box::new(FixedFlavor)).unwrap();
        tokio::time::sleep(Duration::from_millis(1000)).await;

        page.teardown();
        assert_eq!(page.status(), PageStatus::Idle);

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(page.result().is_none());
        assert_eq!(page.status(), PageStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_latency_completes() {
        let mut page = quiz_page(0);
        page.generate(Box::new(FixedFlavor)).unwrap();
        assert!(page.is_generating());
        assert!(page.wait_ready().await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_ignores_later_edits() {
        let mut page = quiz_page(3000);
        page.set_field("subject", "Chemistry").unwrap();
        page.generate_seeded(Box::new(FixedFlavor), Some(9)).unwrap();
        let out = page.wait_ready().await.unwrap();
        page.set_field("subject", "Biology").unwrap();

        assert!(out.contains("Chemistry"));
        let request = page.last_request().unwrap();
        assert_eq!(request.seed, Some(9));
        assert_eq!(request.fields["subject"], FieldValue::from("Chemistry"));
        assert_eq!(page.form().text("subject"), "Biology");
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_updates_are_published() {
        let mut page = quiz_page(500);
        let mut rx = page.subscribe();
        page.generate(Box::new(FixedFlavor)).unwrap();
        rx.changed().await.unwrap();
        assert!(matches!(*rx.borrow_and_update(), PageStatus::Generating { .. }));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), PageStatus::Ready);
    }
}
