//! Archetype classification
//!
//! Turns the preliminary descriptor from manifest resolution into a final
//! [`ApplicationDescriptor`]. Archetype determination walks a fixed rule
//! list and stops at the first match; metadata extraction then always runs
//! for whichever archetype was chosen.

pub mod java;
pub mod node;

use crate::descriptor::{ApplicationDescriptor, DescriptorDraft};
use crate::diagnostics::{Diagnosed, Diagnostic, DiagnosticKind, DiagnosticLog};
use crate::fs::FileSystem;
use crate::stack::{Archetype, MAVEN_POM, NODE_PACKAGE, PYTHON_REQUIREMENTS, PYTHON_SETUP};
use crate::xml::XmlElement;
use std::path::Path;
use tracing::debug;

/// Which rule decided the archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    ManifestHint,
    JavaBuildFile,
    PythonFile,
    NodePackage,
    None,
}

type Predicate = fn(&ArchetypeClassifier<'_>, &DescriptorDraft) -> bool;

/// Determination rules in priority order.
const RULES: &[(Signal, Predicate)] = &[
    (Signal::ManifestHint, manifest_hint),
    (Signal::JavaBuildFile, java_build_file),
    (Signal::PythonFile, python_file),
    (Signal::NodePackage, node_package),
];

fn manifest_hint(_: &ArchetypeClassifier<'_>, draft: &DescriptorDraft) -> bool {
    draft.archetype.is_some()
}

fn java_build_file(c: &ArchetypeClassifier<'_>, draft: &DescriptorDraft) -> bool {
    c.has_file(&draft.source_path, MAVEN_POM)
}

fn python_file(c: &ArchetypeClassifier<'_>, draft: &DescriptorDraft) -> bool {
    c.has_file(&draft.source_path, PYTHON_REQUIREMENTS) || c.has_file(&draft.source_path, PYTHON_SETUP)
}

fn node_package(c: &ArchetypeClassifier<'_>, draft: &DescriptorDraft) -> bool {
    c.has_file(&draft.source_path, NODE_PACKAGE)
}

pub struct ArchetypeClassifier<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ArchetypeClassifier<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// First matching rule, or [`Signal::None`].
    pub fn detect_signal(&self, draft: &DescriptorDraft) -> Signal {
        RULES
            .iter()
            .find(|(_, applies)| applies(self, draft))
            .map(|(signal, _)| *signal)
            .unwrap_or(Signal::None)
    }

    pub fn classify(&self, mut draft: DescriptorDraft) -> Diagnosed<ApplicationDescriptor> {
        let mut log = DiagnosticLog::new();
        let signal = self.detect_signal(&draft);

        // Kept so the package descriptor is read at most once per run.
        let mut package = None;
        let archetype = match signal {
            Signal::ManifestHint => draft.archetype.unwrap_or(Archetype::Unknown),
            Signal::JavaBuildFile => Archetype::JavaMaven,
            Signal::PythonFile => Archetype::Python,
            Signal::NodePackage => {
                let inspection = self.inspect_package(&draft.source_path, &mut log);
                let archetype = match &inspection {
                    Some(i) if i.uses_react => Archetype::React,
                    _ => Archetype::NodeJs,
                };
                package = Some(inspection);
                archetype
            }
            Signal::None => Archetype::Unknown,
        };
        debug!(?signal, %archetype, "Archetype determined");
        draft.archetype = Some(archetype);

        match archetype {
            Archetype::JavaMaven => self.fill_java_metadata(&mut draft, &mut log),
            node if node.is_node_family() && draft.runtime_version.is_none() => {
                let inspection = match package {
                    Some(inspection) => inspection,
                    None => self.inspect_package(&draft.source_path, &mut log),
                };
                draft.runtime_version = inspection.and_then(|i| i.runtime_version);
            }
            _ => {}
        }

        log.finish(draft.freeze())
    }

    fn has_file(&self, source: &Path, name: &str) -> bool {
        self.fs.is_file(&self.fs.join(source, name))
    }

    fn read(&self, path: &Path, log: &mut DiagnosticLog) -> Option<String> {
        if !self.fs.is_file(path) {
            return None;
        }
        match self.fs.read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                log.record(Diagnostic::new(DiagnosticKind::UnreadableFile, path, e));
                None
            }
        }
    }

    fn inspect_package(&self, source: &Path, log: &mut DiagnosticLog) -> Option<node::NodeInspection> {
        let path = self.fs.join(source, NODE_PACKAGE);
        let content = self.read(&path, log)?;
        match node::inspect(&content) {
            Ok(inspection) => Some(inspection),
            Err(e) => {
                log.record(Diagnostic::new(
                    DiagnosticKind::MalformedPackageDescriptor,
                    &path,
                    e,
                ));
                None
            }
        }
    }

    /// Fills unset Java fields from the build descriptor; defaults are
    /// applied on freeze for anything still missing.
    fn fill_java_metadata(&self, draft: &mut DescriptorDraft, log: &mut DiagnosticLog) {
        let path = self.fs.join(&draft.source_path, MAVEN_POM);
        let Some(content) = self.read(&path, log) else {
            debug!("No build descriptor, using Java defaults");
            return;
        };

        let root = match XmlElement::parse(&content) {
            Ok(root) => root,
            Err(e) => {
                log.record(Diagnostic::new(
                    DiagnosticKind::MalformedBuildDescriptor,
                    &path,
                    e,
                ));
                return;
            }
        };

        let metadata = java::extract(&root);
        debug!(?metadata, "Java metadata extracted");
        if draft.runtime_version.is_none() {
            draft.runtime_version = metadata.java_version;
        }
        if draft.packaging_kind.is_none() {
            draft.packaging_kind = metadata.packaging;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    const POM_17: &str = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
    <groupId>org.a</groupId>
    <artifactId>app</artifactId>
    <packaging>war</packaging>
    <properties><java.version>17</java.version></properties>
</project>"#;

    fn classify(fs: &MockFileSystem, draft: DescriptorDraft) -> Diagnosed<ApplicationDescriptor> {
        ArchetypeClassifier::new(fs).classify(draft)
    }

    fn draft() -> DescriptorDraft {
        DescriptorDraft::new("/mock")
    }

    #[test]
    fn test_empty_directory_is_unknown() {
        let fs = MockFileSystem::new();
        let result = classify(&fs, draft());

        assert!(result.is_clean());
        assert_eq!(result.value.archetype(), Archetype::Unknown);
        assert_eq!(result.value.runtime_version(), None);
        assert_eq!(result.value.packaging_kind(), None);
    }

    #[test]
    fn test_rule_priority() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "{}");
        fs.add_file("requirements.txt", "flask");
        let classifier = ArchetypeClassifier::new(&fs);
        assert_eq!(classifier.detect_signal(&draft()), Signal::PythonFile);

        fs.add_file("pom.xml", "<project/>");
        assert_eq!(classifier.detect_signal(&draft()), Signal::JavaBuildFile);

        let mut hinted = draft();
        hinted.archetype = Some(Archetype::NodeJs);
        assert_eq!(classifier.detect_signal(&hinted), Signal::ManifestHint);
    }

    #[test]
    fn test_setup_py_is_python() {
        let fs = MockFileSystem::new();
        fs.add_file("setup.py", "from setuptools import setup");
        assert_eq!(classify(&fs, draft()).value.archetype(), Archetype::Python);
    }

    #[test]
    fn test_java_metadata_from_pom() {
        let fs = MockFileSystem::new();
        fs.add_file("pom.xml", POM_17);

        let descriptor = classify(&fs, draft()).value;
        assert_eq!(descriptor.archetype(), Archetype::JavaMaven);
        assert_eq!(descriptor.runtime_version(), Some("17"));
        assert_eq!(descriptor.packaging_kind(), Some("war"));
    }

    #[test]
    fn test_java_defaults_when_fields_missing() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "pom.xml",
            "<project><artifactId>a</artifactId><properties><maven.compiler.release>21</maven.compiler.release></properties></project>",
        );

        let descriptor = classify(&fs, draft()).value;
        assert_eq!(descriptor.runtime_version(), Some("11"));
        assert_eq!(descriptor.packaging_kind(), Some("jar"));
    }

    #[test]
    fn test_malformed_pom_defaults_with_diagnostic() {
        let fs = MockFileSystem::new();
        fs.add_file("pom.xml", "<project><packaging>war</project>");

        let result = classify(&fs, draft());
        assert!(result.has(DiagnosticKind::MalformedBuildDescriptor));
        assert_eq!(result.value.archetype(), Archetype::JavaMaven);
        assert_eq!(result.value.runtime_version(), Some("11"));
        assert_eq!(result.value.packaging_kind(), Some("jar"));
    }

    #[test]
    fn test_manifest_java_without_pom_gets_defaults() {
        let fs = MockFileSystem::new();
        let mut hinted = draft();
        hinted.archetype = Some(Archetype::JavaMaven);

        let result = classify(&fs, hinted);
        assert!(result.is_clean());
        assert_eq!(result.value.runtime_version(), Some("11"));
        assert_eq!(result.value.packaging_kind(), Some("jar"));
    }

    #[test]
    fn test_manifest_jre_version_survives_pom() {
        let fs = MockFileSystem::new();
        fs.add_file("pom.xml", POM_17);
        let mut hinted = draft();
        hinted.archetype = Some(Archetype::JavaMaven);
        hinted.runtime_version = Some("8".to_string());

        let descriptor = classify(&fs, hinted).value;
        assert_eq!(descriptor.runtime_version(), Some("8"));
        assert_eq!(descriptor.packaging_kind(), Some("war"));
    }

    #[test]
    fn test_manifest_hint_beats_files() {
        let fs = MockFileSystem::new();
        fs.add_file("pom.xml", POM_17);
        let mut hinted = draft();
        hinted.archetype = Some(Archetype::Python);

        let descriptor = classify(&fs, hinted).value;
        assert_eq!(descriptor.archetype(), Archetype::Python);
        assert_eq!(descriptor.runtime_version(), None);
        assert_eq!(descriptor.packaging_kind(), None);
    }

    #[test]
    fn test_react_with_engine() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "package.json",
            r#"{"dependencies": {"react": "^18.0.0"}, "engines": {"node": ">=16.0.0"}}"#,
        );

        let descriptor = classify(&fs, draft()).value;
        assert_eq!(descriptor.archetype(), Archetype::React);
        assert_eq!(descriptor.runtime_version(), Some("16"));
        assert_eq!(descriptor.packaging_kind(), None);
    }

    #[test]
    fn test_node_default_version() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", r#"{"dependencies": {"express": "^4.18.2"}}"#);

        let descriptor = classify(&fs, draft()).value;
        assert_eq!(descriptor.archetype(), Archetype::NodeJs);
        assert_eq!(descriptor.runtime_version(), Some("18"));
    }

    #[test]
    fn test_malformed_package_is_node_18() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "{ \"dependencies\": ");

        let result = classify(&fs, draft());
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.has(DiagnosticKind::MalformedPackageDescriptor));
        assert_eq!(result.value.archetype(), Archetype::NodeJs);
        assert_eq!(result.value.runtime_version(), Some("18"));
    }

    #[test]
    fn test_manifest_node_hint_reads_engine() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "package.json",
            r#"{"dependencies": {"react": "18"}, "engines": {"node": "20.x"}}"#,
        );
        let mut hinted = draft();
        hinted.archetype = Some(Archetype::NodeJs);

        let descriptor = classify(&fs, hinted).value;
        assert_eq!(descriptor.archetype(), Archetype::NodeJs);
        assert_eq!(descriptor.runtime_version(), Some("20"));
    }

    #[test]
    fn test_unreadable_pom() {
        let fs = MockFileSystem::new();
        fs.add_unreadable_file("pom.xml");

        let result = classify(&fs, draft());
        assert!(result.has(DiagnosticKind::UnreadableFile));
        assert_eq!(result.value.archetype(), Archetype::JavaMaven);
        assert_eq!(result.value.runtime_version(), Some("11"));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let fs = MockFileSystem::new();
        fs.add_file("pom.xml", POM_17);

        let first = classify(&fs, draft());
        let second = classify(&fs, draft());
        assert_eq!(first, second);
    }
}
