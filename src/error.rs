//! Error types for loading and running layout scripts

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::layout::LayoutError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum ScriptError {
    /// The document is not valid TOML or does not match the script schema
    #[error("syntax error: {message}")]
    Syntax { span: Option<Span>, message: String },

    /// The initial table could not be built
    #[error("invalid table: {0}")]
    Layout(#[from] LayoutError),

    /// An operation was rejected by the table
    #[error("operation {index} ({op}) failed: {source}")]
    Operation {
        index: usize,
        op: &'static str,
        span: Option<Span>,
        source: LayoutError,
    },

    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ScriptError {
    fn from(err: toml::de::Error) -> Self {
        ScriptError::Syntax {
            span: err.span(),
            message: err.message().to_string(),
        }
    }
}

impl ScriptError {
    pub fn operation(index: usize, op: &'static str, source: LayoutError) -> Self {
        Self::Operation {
            index,
            op,
            span: None,
            source,
        }
    }

    /// Attach the source range of the failing entry
    pub fn with_span(self, span: Span) -> Self {
        match self {
            Self::Operation {
                index, op, source, ..
            } => Self::Operation {
                index,
                op,
                span: Some(span),
                source,
            },
            other => other,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (offset, span, label) = match self {
            ScriptError::Syntax {
                span: Some(span),
                message,
            } => (span.start, Some(span.clone()), message.clone()),
            ScriptError::Operation {
                index,
                op,
                span: Some(span),
                source: cause,
            } => (
                span.start,
                Some(span.clone()),
                format!("[[ops]] entry {} ({}) failed here: {}", index, op, cause),
            ),
            _ => (0, None, String::new()),
        };

        let mut report = Report::build(ReportKind::Error, filename, offset).with_message(self);
        if let Some(span) = span {
            report = report.with_label(
                Label::new((filename, span))
                    .with_message(label)
                    .with_color(Color::Red),
            );
        }
        if let ScriptError::Operation { index, .. } = self {
            report = report.with_note(format!(
                "operations are numbered from 0; this is [[ops]] entry {}",
                index
            ));
        }

        let mut buf = Vec::new();
        match report
            .finish()
            .write((filename, Source::from(source)), &mut buf)
        {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: {}", filename, self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_error_keeps_span() {
        let err = toml::from_str::<toml::Value>("scale = = 2").unwrap_err();
        let err = ScriptError::from(err);
        match &err {
            ScriptError::Syntax { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected {other:?}"),
        }
        let formatted = err.format("scale = = 2", "bad.toml");
        assert!(formatted.contains("bad.toml"));
    }

    #[test]
    fn test_operation_error_display() {
        let err = ScriptError::operation(3, "delete_row", LayoutError::index("row", 9, 2));
        assert_eq!(
            err.to_string(),
            "operation 3 (delete_row) failed: row index 9 out of range (valid: 0..2)"
        );
    }

    #[test]
    fn test_operation_error_points_at_entry() {
        let source = "[table]\ncolumns = 1\n\n[[ops]]\nop = \"delete_row\"\nindex = 9\n";
        let start = source.find("[[ops]]").unwrap();
        let err = ScriptError::operation(3, "delete_row", LayoutError::index("row", 9, 2))
            .with_span(start..start + "[[ops]]".len());

        let formatted = err.format(source, "ops.toml");
        assert!(formatted.contains("ops.toml"));
        assert!(formatted.contains("[[ops]] entry 3 (delete_row) failed here"));
        assert!(formatted.contains("[[ops]]"));
        assert!(formatted.lines().count() > 1);
    }
}
