use crate::span::Span;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Syntax error: {msg}")]
    Syntax { msg: String, span: Span },

    #[error("Metadata error: {msg}")]
    Metadata { msg: String, path: PathBuf },

    #[error("Project error: {msg}")]
    Project { msg: String, path: PathBuf },
}

impl EngineError {
    pub fn syntax(msg: impl Into<String>, span: Span) -> Self {
        Self::Syntax { msg: msg.into(), span }
    }

    pub fn metadata(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Metadata { msg: msg.into(), path }
    }

    pub fn project(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Project { msg: msg.into(), path }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            EngineError::Syntax { span, .. } => Some(*span),
            _ => None,
        }
    }
}

/// Render an EngineError with ariadne for nice terminal output.
pub fn render_error(source: &str, err: &EngineError) {
    use ariadne::{Label, Report, ReportKind, Source};

    match err {
        EngineError::Syntax { msg, span } => {
            let printed = Report::build(ReportKind::Error, (), span.start)
                .with_message("syntax error in expression")
                .with_label(Label::new(span.start..span.end).with_message(msg))
                .finish()
                .eprint(Source::from(source));
            if printed.is_err() {
                eprintln!("error: {msg}");
            }
        }
        EngineError::Metadata { msg, path } => {
            eprintln!("error[metadata]: {msg}");
            eprintln!("  --> {}", path.display());
        }
        EngineError::Project { msg, path } => {
            eprintln!("error[project]: {msg}");
            eprintln!("  --> {}", path.display());
        }
    }
}
