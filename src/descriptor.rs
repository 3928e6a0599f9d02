//! The application descriptor produced by resolution and classification

use crate::stack::Archetype;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_JAVA_VERSION: &str = "11";
pub const DEFAULT_JAVA_PACKAGING: &str = "jar";
pub const DEFAULT_NODE_VERSION: &str = "18";

/// Fully classified application.
///
/// Only constructed through [`DescriptorDraft::freeze`], so every instance
/// has a definite archetype and the metadata that archetype requires.
/// Deserializing one would bypass that, so it is serialize-only:
///
/// ```compile_fail
/// let descriptor: shiftpack::ApplicationDescriptor = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationDescriptor {
    name: String,
    archetype: Archetype,
    source_path: PathBuf,
    environment: BTreeMap<String, String>,
    declared_services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    buildpack_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    runtime_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    packaging_kind: Option<String>,
}

impl ApplicationDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.environment
    }

    pub fn declared_services(&self) -> &[String] {
        &self.declared_services
    }

    pub fn buildpack_hint(&self) -> Option<&str> {
        self.buildpack_hint.as_deref()
    }

    pub fn runtime_version(&self) -> Option<&str> {
        self.runtime_version.as_deref()
    }

    pub fn packaging_kind(&self) -> Option<&str> {
        self.packaging_kind.as_deref()
    }

    /// Dockerfile template for this archetype, if one exists
    pub fn dockerfile_template(&self) -> Option<&'static str> {
        match self.archetype {
            Archetype::Python => Some("Dockerfile.python.j2"),
            Archetype::JavaMaven => Some("Dockerfile.java.j2"),
            Archetype::NodeJs => Some("Dockerfile.nodejs.j2"),
            Archetype::React => Some("Dockerfile.react.j2"),
            Archetype::Unknown => None,
        }
    }

    /// Name used for the generated chart directory
    pub fn chart_name(&self) -> String {
        self.name.to_lowercase().replace(' ', "-")
    }
}

/// Mutable descriptor state threaded through resolution and classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorDraft {
    pub name: String,
    pub archetype: Option<Archetype>,
    pub source_path: PathBuf,
    pub environment: BTreeMap<String, String>,
    pub declared_services: Vec<String>,
    pub buildpack_hint: Option<String>,
    pub runtime_version: Option<String>,
    pub packaging_kind: Option<String>,
}

impl DescriptorDraft {
    /// Fresh draft named after the source directory's base name.
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        let source_path = source_path.into();
        Self {
            name: default_name(&source_path),
            archetype: None,
            source_path,
            environment: BTreeMap::new(),
            declared_services: Vec::new(),
            buildpack_hint: None,
            runtime_version: None,
            packaging_kind: None,
        }
    }

    /// Finalises the draft, filling whatever the archetype still requires.
    pub fn freeze(self) -> ApplicationDescriptor {
        let archetype = self.archetype.unwrap_or(Archetype::Unknown);

        let runtime_version = match archetype {
            Archetype::JavaMaven => self
                .runtime_version
                .or_else(|| Some(DEFAULT_JAVA_VERSION.to_string())),
            Archetype::NodeJs | Archetype::React => self
                .runtime_version
                .or_else(|| Some(DEFAULT_NODE_VERSION.to_string())),
            Archetype::Python | Archetype::Unknown => self.runtime_version,
        };

        let packaging_kind = match archetype {
            Archetype::JavaMaven => self
                .packaging_kind
                .or_else(|| Some(DEFAULT_JAVA_PACKAGING.to_string())),
            _ => self.packaging_kind,
        };

        ApplicationDescriptor {
            name: self.name,
            archetype,
            source_path: self.source_path,
            environment: self.environment,
            declared_services: self.declared_services,
            buildpack_hint: self.buildpack_hint,
            runtime_version,
            packaging_kind,
        }
    }
}

fn default_name(source_path: &Path) -> String {
    source_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .or_else(|| {
            // "." and ".." carry no base name until resolved against the cwd
            source_path
                .canonicalize()
                .ok()
                .and_then(|abs| abs.file_name().map(|n| n.to_string_lossy().to_string()))
        })
        .unwrap_or_else(|| "app".to_string())
}
