//! Template engine setup shared by linting and rendering

use minijinja::{Environment, Error, ErrorKind, UndefinedBehavior};

/// Engine settings that affect parsing and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Fail on references to names missing from the data
    pub strict_undefined: bool,
    /// Keep a single trailing newline at the end of rendered output
    pub keep_trailing_newline: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strict_undefined: true,
            keep_trailing_newline: false,
        }
    }
}

/// Build an engine environment for the given options
pub fn environment<'source>(options: EngineOptions) -> Environment<'source> {
    let mut env = Environment::new();
    if options.strict_undefined {
        env.set_undefined_behavior(UndefinedBehavior::Strict);
    }
    env.set_keep_trailing_newline(options.keep_trailing_newline);
    env
}

/// The engine's message for an error, without the location suffix
pub fn engine_message(err: &Error) -> String {
    match err.detail() {
        Some(detail) => format!("{}: {}", err.kind(), detail),
        None => err.kind().to_string(),
    }
}

/// Whether a render failure points at the supplied data rather than the template
pub fn is_data_error(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::SyntaxError
            | ErrorKind::UndefinedError
            | ErrorKind::InvalidOperation
            | ErrorKind::NonKey
            | ErrorKind::NonPrimitive
            | ErrorKind::CannotUnpack
            | ErrorKind::MissingArgument
            | ErrorKind::TooManyArguments
            | ErrorKind::BadSerialization
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_environment_rejects_undefined() {
        let env = environment(EngineOptions::default());
        let err = env.render_str("{{ missing }}", ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UndefinedError);
        assert!(is_data_error(err.kind()));
    }

    #[test]
    fn test_lenient_environment_renders_undefined_as_empty() {
        let env = environment(EngineOptions {
            strict_undefined: false,
            keep_trailing_newline: false,
        });
        assert_eq!(env.render_str("[{{ missing }}]", ()).unwrap(), "[]");
    }

    #[test]
    fn test_engine_message_omits_location() {
        let env = environment(EngineOptions::default());
        let err = env.template_from_str("{% if %}").unwrap_err();
        let message = engine_message(&err);
        assert!(message.starts_with("syntax error"));
        assert!(!message.contains("<string>"));
    }

    #[test]
    fn test_trailing_newline_option() {
        let keep = environment(EngineOptions {
            strict_undefined: true,
            keep_trailing_newline: true,
        });
        assert_eq!(keep.render_str("x\n", ()).unwrap(), "x\n");
        let strip = environment(EngineOptions::default());
        assert_eq!(strip.render_str("x\n", ()).unwrap(), "x");
    }

    #[test]
    fn test_template_not_found_is_not_a_data_error() {
        assert!(!is_data_error(ErrorKind::TemplateNotFound));
    }
}
