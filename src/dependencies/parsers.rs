use super::DependencyRecord;
use crate::diagnostics::DiagnosticKind;
use crate::stack::{MAVEN_POM, NODE_PACKAGE, PYTHON_REQUIREMENTS};
use crate::xml::XmlElement;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Structure(String),
}

impl ParseError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ParseError::Xml(_) => DiagnosticKind::MalformedBuildDescriptor,
            ParseError::Json(_) | ParseError::Structure(_) => {
                DiagnosticKind::MalformedPackageDescriptor
            }
        }
    }
}

/// Extracts dependency records from one ecosystem file format.
pub trait DependencyParser: Send + Sync {
    /// File name, relative to the source directory
    fn manifest(&self) -> &'static str;

    fn parse(&self, content: &str) -> Result<Vec<DependencyRecord>, ParseError>;
}

/// `requirements.txt`: one record per non-blank, non-comment line.
pub struct RequirementsParser;

impl DependencyParser for RequirementsParser {
    fn manifest(&self) -> &'static str {
        PYTHON_REQUIREMENTS
    }

    fn parse(&self, content: &str) -> Result<Vec<DependencyRecord>, ParseError> {
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(DependencyRecord::from)
            .collect())
    }
}

/// `pom.xml`: `groupId:artifactId:version` per entry of the project's
/// top-level `<dependencies>`.
pub struct PomParser;

impl DependencyParser for PomParser {
    fn manifest(&self) -> &'static str {
        MAVEN_POM
    }

    fn parse(&self, content: &str) -> Result<Vec<DependencyRecord>, ParseError> {
        let root = XmlElement::parse(content)?;
        let Some(dependencies) = root.child("dependencies") else {
            return Ok(Vec::new());
        };

        Ok(dependencies
            .children_named("dependency")
            .map(|dep| {
                DependencyRecord::from(format!(
                    "{}:{}:{}",
                    dep.child_text_or_empty("groupId"),
                    dep.child_text_or_empty("artifactId"),
                    dep.child_text_or_empty("version"),
                ))
            })
            .collect())
    }
}

/// `package.json`: `name@constraint` per runtime dependency, in file order.
pub struct PackageJsonParser;

impl DependencyParser for PackageJsonParser {
    fn manifest(&self) -> &'static str {
        NODE_PACKAGE
    }

    fn parse(&self, content: &str) -> Result<Vec<DependencyRecord>, ParseError> {
        let package: Value = serde_json::from_str(content)?;
        let package = package
            .as_object()
            .ok_or_else(|| ParseError::Structure("top-level value is not an object".to_string()))?;

        let Some(deps) = package.get("dependencies") else {
            return Ok(Vec::new());
        };
        let deps = deps
            .as_object()
            .ok_or_else(|| ParseError::Structure("\"dependencies\" is not an object".to_string()))?;

        Ok(deps
            .iter()
            .map(|(name, constraint)| {
                let constraint = match constraint {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                DependencyRecord::from(format!("{}@{}", name, constraint))
            })
            .collect())
    }
}
