//! Template files: linting and rendering

use log::debug;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::braces::{check_braces, BraceError};
use crate::core::config::Config;
use crate::core::diagnostics::{generate_help, line_span};
use crate::core::engine::{engine_message, environment, EngineOptions};
use crate::core::render::{render_source, RenderError};

/// Lint failure
///
/// Every variant displays with the `Linting completed but with errors: `
/// prefix.
#[derive(Debug, Error, Diagnostic)]
pub enum LintError {
    #[error("Linting completed but with errors: {}: {source}", .path.display())]
    #[diagnostic(code(jintest::lint::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Linting completed but with errors: {message} on line # {line}")]
    #[diagnostic(code(jintest::lint::syntax))]
    Syntax {
        message: String,
        line: usize,

        #[source_code]
        src: NamedSource<String>,

        #[label("error here")]
        span: SourceSpan,

        #[help]
        help: Option<String>,
    },

    #[error("Linting completed but with errors: {0}")]
    #[diagnostic(transparent)]
    Braces(BraceError),

    #[error("Linting completed but with errors: {0}")]
    #[diagnostic(code(jintest::lint::engine))]
    Engine(String),
}

impl From<BraceError> for LintError {
    fn from(err: BraceError) -> Self {
        LintError::Braces(err)
    }
}

/// A template file on disk
#[derive(Debug, Clone)]
pub struct Template {
    path: PathBuf,
    engine: EngineOptions,
    check_braces: bool,
}

impl Template {
    /// Template at `path` with default settings
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            engine: EngineOptions::default(),
            check_braces: true,
        }
    }

    /// Template at `path` with settings taken from `config`
    pub fn with_config(path: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            path: path.into(),
            engine: EngineOptions {
                strict_undefined: true,
                keep_trailing_newline: config.keep_trailing_newline(),
            },
            check_braces: config.check_braces(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check the template for syntax and brace-balance defects
    ///
    /// Stops at the first failing step: read, compile, brace check.
    pub fn lint(&self) -> Result<(), LintError> {
        debug!("linting {}", self.path.display());
        let source = std::fs::read_to_string(&self.path).map_err(|source| LintError::Read {
            path: self.path.clone(),
            source,
        })?;
        lint_source(&source, &self.display_name(), self.check_braces)
    }

    /// Render the template with `data` as its context
    pub fn render(&self, data: &serde_json::Value) -> Result<String, RenderError> {
        debug!("rendering {}", self.path.display());
        let source = std::fs::read_to_string(&self.path).map_err(|source| RenderError::Read {
            path: self.path.clone(),
            source,
        })?;
        render_source(&source, data, self.engine)
    }

    fn display_name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Lint template source text
///
/// `filename` is only used to label diagnostics.
pub fn lint_source(source: &str, filename: &str, braces: bool) -> Result<(), LintError> {
    let env = environment(EngineOptions {
        strict_undefined: false,
        keep_trailing_newline: false,
    });

    if let Err(err) = env.template_from_str(source) {
        let message = engine_message(&err);
        return Err(match err.line() {
            Some(line) => LintError::Syntax {
                help: generate_help(&message),
                message,
                line,
                src: NamedSource::new(filename, source.to_string()),
                span: line_span(source, line),
            },
            None => LintError::Engine(message),
        });
    }

    if braces {
        check_braces(source, filename)?;
    }

    Ok(())
}
