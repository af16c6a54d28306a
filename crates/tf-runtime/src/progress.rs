//! Terminal spinner shown while a page is generating.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::watch;

use crate::page::PageStatus;

const TICK: Duration = Duration::from_millis(80);

/// Spinner bound to one generation.
pub struct GenerationSpinner {
    bar: ProgressBar,
}

impl GenerationSpinner {
    /// Visible spinner on stderr with a steady tick.
    pub fn new(title: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.green} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(format!("Generating with {}...", title));
        bar.enable_steady_tick(TICK);
        Self { bar }
    }

    /// Spinner that draws nothing, for quiet runs and non-interactive output.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    /// Follow `status` until the page leaves `Generating`, then clear the line.
    pub async fn follow(&self, mut status: watch::Receiver<PageStatus>) -> PageStatus {
        let last = match status
            .wait_for(|s| !matches!(s, PageStatus::Generating { .. }))
            .await
        {
            Ok(s) => *s,
            Err(_) => PageStatus::Idle,
        };
        self.finish();
        last
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for GenerationSpinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ToolPage;
    use tf_engine::{FixedFlavor, find_tool};

    #[tokio::test(start_paused = true)]
    async fn test_follow_returns_final_status() {
        let mut page = ToolPage::new(
            find_tool("chart-generator").unwrap(),
            Duration::from_millis(3000),
        );
        let spinner = GenerationSpinner::hidden();
        assert!(spinner.is_hidden());

        page.generate(Box::new(FixedFlavor)).unwrap();
        let status = spinner.follow(page.subscribe()).await;
        assert_eq!(status, PageStatus::Ready);
        assert!(page.result().is_some());
    }
}
