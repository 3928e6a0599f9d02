//! Dependency mapping
//!
//! Reads the ecosystem file that matches the final archetype and returns
//! its declared dependencies as opaque, archetype-formatted records in file
//! order. Nothing is deduplicated or compared.

pub mod parsers;

pub use parsers::{DependencyParser, PackageJsonParser, ParseError, PomParser, RequirementsParser};

use crate::diagnostics::{Diagnosed, Diagnostic, DiagnosticKind, DiagnosticLog};
use crate::fs::FileSystem;
use crate::stack::Archetype;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// One declared dependency, e.g. `group:artifact:version` or `name@^1.0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyRecord(String);

impl DependencyRecord {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DependencyRecord {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DependencyRecord {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parser responsible for an archetype, if it has declared dependencies.
pub fn parser_for(archetype: Archetype) -> Option<&'static dyn DependencyParser> {
    match archetype {
        Archetype::Python => Some(&RequirementsParser),
        Archetype::JavaMaven => Some(&PomParser),
        Archetype::NodeJs | Archetype::React => Some(&PackageJsonParser),
        Archetype::Unknown => None,
    }
}

pub struct DependencyMapper<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> DependencyMapper<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    pub fn map(&self, source: &Path, archetype: Archetype) -> Diagnosed<Vec<DependencyRecord>> {
        let Some(parser) = parser_for(archetype) else {
            return Diagnosed::clean(Vec::new());
        };

        let path = self.fs.join(source, parser.manifest());
        if !self.fs.is_file(&path) {
            debug!(file = parser.manifest(), "Dependency file absent");
            return Diagnosed::clean(Vec::new());
        }

        let mut log = DiagnosticLog::new();

        let content = match self.fs.read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                log.record(Diagnostic::new(DiagnosticKind::UnreadableFile, &path, e));
                return log.finish(Vec::new());
            }
        };

        let records = match parser.parse(&content) {
            Ok(records) => records,
            Err(e) => {
                log.record(Diagnostic::new(e.kind(), &path, &e));
                Vec::new()
            }
        };
        debug!(%archetype, count = records.len(), "Dependencies mapped");

        log.finish(records)
    }
}
