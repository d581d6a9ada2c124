//! Error types for parsing and interpretation
//!
//!     Every failure in paxter belongs to one of three families:
//!
//!         - Config: an illegal switch character, raised when the tokenizer is built.
//!         - Syntax: raised by the parser, pinned to a source offset.
//!         - Render: raised by the interpreter and the call-wrappers, pinned to the offending
//!           node.
//!
//!     Offsets are stored as plain byte offsets. The line/column they point to is only computed
//!     when the error leaves the parser or the interpreter, through [`PaxterError::locate`].
//!     Nothing in paxter recovers from an error: they all bubble to the caller.

use crate::paxter::ast::range::{Position, SourceLocation};
use std::fmt;
use thiserror::Error;

/// Where an error points to in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorLocation {
    pub offset: usize,
    pub position: Option<Position>,
}

impl ErrorLocation {
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            position: None,
        }
    }
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{}", position),
            None => write!(f, "offset {}", self.offset),
        }
    }
}

/// Errors raised while building the tokenizer, parsing or interpreting
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaxterError {
    /// The configured switch character cannot be used
    #[error("invalid switch character {switch:?}: {reason}")]
    Config { switch: char, reason: String },

    /// The source does not follow the paxter grammar
    #[error("syntax error: {message} at {location}")]
    Syntax {
        message: String,
        location: ErrorLocation,
    },

    /// Interpretation of a node failed
    #[error("render error: {message} at {location}")]
    Render {
        message: String,
        location: ErrorLocation,
    },
}

impl PaxterError {
    pub fn config(switch: char, reason: impl Into<String>) -> Self {
        PaxterError::Config {
            switch,
            reason: reason.into(),
        }
    }

    pub fn syntax(message: impl Into<String>, offset: usize) -> Self {
        PaxterError::Syntax {
            message: message.into(),
            location: ErrorLocation::new(offset),
        }
    }

    pub fn render(message: impl Into<String>, offset: usize) -> Self {
        PaxterError::Render {
            message: message.into(),
            location: ErrorLocation::new(offset),
        }
    }

    /// Turn the error of a user callable into a render error pinned at `offset`.
    ///
    /// Paxter errors pass through unchanged so they are never wrapped twice.
    pub fn from_call_error(err: Box<dyn std::error::Error>, offset: usize) -> Self {
        match err.downcast::<PaxterError>() {
            Ok(err) => *err,
            Err(other) => PaxterError::render(other.to_string(), offset),
        }
    }

    /// The bare message, without location
    pub fn message(&self) -> String {
        match self {
            PaxterError::Config { reason, .. } => reason.clone(),
            PaxterError::Syntax { message, .. } | PaxterError::Render { message, .. } => {
                message.clone()
            }
        }
    }

    pub fn location(&self) -> Option<&ErrorLocation> {
        match self {
            PaxterError::Config { .. } => None,
            PaxterError::Syntax { location, .. } | PaxterError::Render { location, .. } => {
                Some(location)
            }
        }
    }

    pub fn offset(&self) -> Option<usize> {
        self.location().map(|location| location.offset)
    }

    pub fn position(&self) -> Option<Position> {
        self.location().and_then(|location| location.position)
    }

    /// Resolve the line/column of the error against the source it was raised for.
    ///
    /// Already located errors are returned unchanged.
    pub fn locate(self, source: &str) -> Self {
        if matches!(self, PaxterError::Config { .. }) || self.position().is_some() {
            return self;
        }
        self.locate_with(&SourceLocation::new(source))
    }

    pub fn locate_with(mut self, source_location: &SourceLocation) -> Self {
        match &mut self {
            PaxterError::Config { .. } => {}
            PaxterError::Syntax { location, .. } | PaxterError::Render { location, .. } => {
                location.position = Some(source_location.byte_to_position(location.offset));
            }
        }
        self
    }
}

/// Generic result for any paxter operation
pub type PaxterResult<T> = Result<T, PaxterError>;

/// Result of a parser step
pub type ParserResult<T> = Result<T, PaxterError>;

/// Result of an interpreter step
pub type RenderResult<T> = Result<T, PaxterError>;

/// Format source code context around an error offset
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// All lines are numbered for easy reference.
pub fn format_source_context(source: &str, offset: usize) -> String {
    let mut lines: Vec<&str> = source.lines().collect();
    let error_line = SourceLocation::new(source).byte_to_position(offset).line - 1;
    // An offset past a trailing newline sits on an empty last line
    if error_line >= lines.len() {
        lines.push("");
    }

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();

    for (line_num, line) in lines.iter().enumerate().take(end_line).skip(start_line) {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, line));
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlocated_display_uses_offset() {
        let err = PaxterError::syntax("unclosed `{`", 7);
        assert_eq!(err.to_string(), "syntax error: unclosed `{` at offset 7");
    }

    #[test]
    fn test_locate_renders_line_and_column() {
        let source = "first line\nsecond @x{";
        let err = PaxterError::syntax("unclosed `{`", 20).locate(source);
        assert_eq!(err.position(), Some(Position::new(2, 10)));
        assert_eq!(
            err.to_string(),
            "syntax error: unclosed `{` at line 2, col 10"
        );
    }

    #[test]
    fn test_source_context_marks_line_after_trailing_newline() {
        let source = "first\nsecond\n";
        let context = format_source_context(source, source.len());
        assert_eq!(context, "     1 | first\n     2 | second\n>>   3 | \n");
    }

    #[test]
    fn test_locate_is_idempotent() {
        let err = PaxterError::render("boom", 3).locate("abcdef");
        let again = err.clone().locate("\n\n\n\n");
        assert_eq!(err, again);
    }

    #[test]
    fn test_config_error_has_no_location() {
        let err = PaxterError::config('a', "not a symbol");
        assert_eq!(err.offset(), None);
        assert_eq!(err.clone().locate("abc"), err);
        assert_eq!(err.to_string(), "invalid switch character 'a': not a symbol");
    }

    #[test]
    fn test_call_errors_are_wrapped_once() {
        let inner = PaxterError::render("duplicated keyword x", 4);
        let passed = PaxterError::from_call_error(Box::new(inner.clone()), 0);
        assert_eq!(passed, inner);

        let foreign: Box<dyn std::error::Error> = "division by zero".into();
        let wrapped = PaxterError::from_call_error(foreign, 9);
        assert_eq!(wrapped, PaxterError::render("division by zero", 9));
    }

    #[test]
    fn test_format_source_context() {
        let source = "line 1\nline 2\nline 3\nerror line\nline 5\nline 6\nline 7";
        let offset = source.find("error").unwrap();

        let context = format_source_context(source, offset);

        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error line"));
        assert!(context.contains("line 6"));
        assert!(!context.contains("line 7"));
        assert!(!context.contains("line 1"));
    }
}
