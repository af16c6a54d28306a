//! # tf-engine
//!
//! Template expansion for toolforge tool pages.
//!
//! Every tool is a [`Tool`]: a static [`ToolSchema`](tf_core::schema::ToolSchema)
//! plus a `render` function that turns a form snapshot into a text report. Rendering
//! is pure apart from the injected [`FlavorSource`], which supplies the decorative
//! numbers. Given the same request and the same seed, output is byte-identical.
//!
//! - **flavor**: seeded and fixed sources of cosmetic numbers
//! - **report**: markdown-like text builder
//! - **tool**: the `Tool` trait, `generate`, and lookup helpers
//! - **tools**: one template per tool page
//! - **registry**: lookup by id and "did you mean" suggestions

pub mod flavor;
pub mod registry;
pub mod report;
pub mod tool;
pub mod tools;

pub use flavor::{FixedFlavor, FlavorSource, SeededFlavor};
pub use registry::{all_tools, find_tool, suggest_tool};
pub use report::ReportWriter;
pub use tool::{Tool, generate};
