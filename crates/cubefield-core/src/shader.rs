//! Shader compile/link outcomes.
//!
//! The graphics backend reports compilation as a list of diagnostics and
//! pipeline creation as an optional validation message. These helpers turn
//! both into `SceneError`s carrying a printable log for the error display.

use crate::error::SceneError;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One compiler message.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub line: Option<u32>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            line: None,
            message: message.into(),
        }
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        match self.line {
            Some(line) => write!(f, "{tag} (line {line}): {}", self.message),
            None => write!(f, "{tag}: {}", self.message),
        }
    }
}

/// Joins diagnostics into one log, one message per line.
pub fn format_log(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compilation succeeds unless at least one diagnostic is an error.
/// Warnings are logged but never fail the stage.
pub fn compile_outcome(stage: ShaderStage, diagnostics: &[Diagnostic]) -> Result<(), SceneError> {
    let has_error = diagnostics.iter().any(|d| d.severity == Severity::Error);
    for d in diagnostics.iter().filter(|d| d.severity == Severity::Warning) {
        log::warn!("[shader] {stage}: {d}");
    }
    if has_error {
        return Err(SceneError::ShaderCompile {
            stage,
            log: format_log(diagnostics),
        });
    }
    Ok(())
}

/// `validation` is whatever the backend reported while building the pipeline.
pub fn link_outcome(validation: Option<String>) -> Result<(), SceneError> {
    match validation {
        Some(log) => Err(SceneError::ShaderLink { log }),
        None => Ok(()),
    }
}
