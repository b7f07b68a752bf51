//! Rendering templates against JSON data
//!
//! Failures are collected rather than returned at the first problem: a
//! template that does not compile still goes through the render step, so the
//! caller sees both the syntax problem and the render failure it causes.

use log::debug;
use miette::Diagnostic;
use minijinja::Value;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::engine::{engine_message, environment, is_data_error, EngineOptions};

/// Category of a single render problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderIssueKind {
    /// The template did not compile
    Syntax,
    /// The data does not fit the template (missing name, wrong type or key)
    Values,
    /// Anything else; usually a template that should have been linted
    Unexpected,
}

/// One problem found while rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderIssue {
    pub kind: RenderIssueKind,
    pub message: String,
    pub line: Option<usize>,
}

impl RenderIssue {
    /// Issue from an engine error, quoting the failing expression when the
    /// engine reports where it is
    fn from_engine(kind: RenderIssueKind, err: &minijinja::Error, source: &str) -> Self {
        let mut message = engine_message(err);
        let snippet = err
            .range()
            .and_then(|range| source.get(range))
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.contains('\n'));
        if let Some(snippet) = snippet {
            message.push_str(&format!(" in `{}`", snippet));
        }
        Self {
            kind,
            message,
            line: err.line(),
        }
    }
}

impl fmt::Display for RenderIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RenderIssueKind::Syntax => {
                write!(f, "[!] Syntax Error in jinja2 template: {}", self.message)?
            }
            RenderIssueKind::Values => {
                write!(f, "[!] Error in your values input field: {}", self.message)?
            }
            RenderIssueKind::Unexpected => write!(f, "{}", self.message)?,
        }
        if let Some(line) = self.line {
            write!(f, " on line # {}", line)?;
        }
        if self.kind == RenderIssueKind::Unexpected {
            write!(f, ". Error: Make sure you linted the template first.")?;
        }
        Ok(())
    }
}

/// Issues joined one per line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderIssues(pub Vec<RenderIssue>);

impl fmt::Display for RenderIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

/// Render failure
#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    #[error("{}: {source}", .path.display())]
    #[diagnostic(code(jintest::render::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    #[diagnostic(
        code(jintest::render::failed),
        help("Lint the template first, then check the JSON data against the names it uses")
    )]
    Failed(RenderIssues),
}

impl RenderError {
    /// Issues collected during rendering (empty for read failures)
    pub fn issues(&self) -> &[RenderIssue] {
        match self {
            RenderError::Read { .. } => &[],
            RenderError::Failed(issues) => &issues.0,
        }
    }
}

/// Render template source with `data` as the top-level context
///
/// `data` must be a JSON object or `null` (no data).
pub fn render_source(
    source: &str,
    data: &serde_json::Value,
    options: EngineOptions,
) -> Result<String, RenderError> {
    let env = environment(options);
    let mut issues = Vec::new();

    let template = match env.template_from_str(source) {
        Ok(template) => Some(template),
        Err(err) => {
            debug!("template failed to compile: {}", err);
            issues.push(RenderIssue::from_engine(RenderIssueKind::Syntax, &err, source));
            None
        }
    };

    let context = match data {
        serde_json::Value::Null | serde_json::Value::Object(_) => Some(Value::from_serialize(data)),
        other => {
            issues.push(RenderIssue {
                kind: RenderIssueKind::Values,
                message: format!(
                    "template data must be a JSON object, got {}",
                    json_type_name(other)
                ),
                line: None,
            });
            None
        }
    };

    let mut output = String::new();
    match (template, context) {
        (Some(template), Some(context)) => match template.render(context) {
            Ok(rendered) => output = rendered,
            Err(err) => {
                debug!("render failed: {:?}", err.kind());
                let kind = if is_data_error(err.kind()) {
                    RenderIssueKind::Values
                } else {
                    RenderIssueKind::Unexpected
                };
                issues.push(RenderIssue::from_engine(kind, &err, source));
            }
        },
        (None, _) => issues.push(RenderIssue {
            kind: RenderIssueKind::Unexpected,
            message: "the template could not be compiled".to_string(),
            line: None,
        }),
        (Some(_), None) => {}
    }

    if issues.is_empty() {
        Ok(output)
    } else {
        Err(RenderError::Failed(RenderIssues(issues)))
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
