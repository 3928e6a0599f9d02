//! Non-fatal diagnostics recorded while reading a source tree
//!
//! Parsing problems never abort resolution. Each one is captured as a
//! [`Diagnostic`] alongside the (possibly defaulted) value so callers and
//! tests can inspect what went wrong without scraping log output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MalformedManifest,
    MalformedBuildDescriptor,
    MalformedPackageDescriptor,
    UnreadableFile,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::MalformedManifest => "malformed manifest",
            DiagnosticKind::MalformedBuildDescriptor => "malformed build descriptor",
            DiagnosticKind::MalformedPackageDescriptor => "malformed package descriptor",
            DiagnosticKind::UnreadableFile => "unreadable file",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub source: PathBuf,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, source: impl AsRef<Path>, message: impl fmt::Display) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            kind,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.source.display(), self.message)
    }
}

/// A value together with the diagnostics collected while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosed<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Diagnosed<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Diagnosed<U> {
        Diagnosed {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }
}

/// Ordered collector used while a value is still being built.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the diagnostic and mirrors it to the tracing subscriber.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        warn!(
            kind = %diagnostic.kind,
            source = %diagnostic.source.display(),
            "{}",
            diagnostic.message
        );
        self.entries.push(diagnostic);
    }

    pub fn finish<T>(self, value: T) -> Diagnosed<T> {
        Diagnosed::with_diagnostics(value, self.entries)
    }
}
