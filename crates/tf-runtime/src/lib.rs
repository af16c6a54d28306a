//! Tool page sessions for toolforge.
//!
//! Wraps a [`Tool`](tf_engine::Tool) in a [`ToolPage`]: the live form, a busy flag
//! published over `tokio::sync::watch`, and a cancellable task that fakes the
//! generation latency before rendering.
//!
//! # Architecture
//!
//! - **page**: `ToolPage`, `PageStatus`, `PageError`
//! - **progress**: terminal spinner via `indicatif`

pub mod page;
pub mod progress;

pub use page::{PageError, PageStatus, ToolPage};
pub use progress::GenerationSpinner;
