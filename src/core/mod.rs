//! Core module - template linting, rendering and supporting types

pub mod braces;
pub mod config;
pub mod data;
pub mod diagnostics;
pub mod engine;
pub mod render;
pub mod template;

pub use braces::{check_braces, BraceError, BraceMatch};
pub use config::Config;
pub use data::{load_data, DataError};
pub use engine::EngineOptions;
pub use render::{render_source, RenderError, RenderIssue, RenderIssueKind};
pub use template::{lint_source, LintError, Template};
