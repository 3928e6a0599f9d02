//! Entry points tying resolution, classification and dependency mapping
//! together.
//!
//! Every function here always returns a value: problems in the source tree
//! degrade the result and are reported as diagnostics.

use crate::classify::ArchetypeClassifier;
use crate::dependencies::{DependencyMapper, DependencyRecord};
use crate::descriptor::ApplicationDescriptor;
use crate::diagnostics::{Diagnosed, Diagnostic};
use crate::fs::{FileSystem, RealFileSystem};
use crate::manifest::ManifestResolver;
use crate::stack::Archetype;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Manifest resolution followed by archetype classification.
pub fn analyze_with(source: &Path, fs: &dyn FileSystem) -> Diagnosed<ApplicationDescriptor> {
    debug!(source = %source.display(), "Resolving manifests");
    let (draft, mut diagnostics) = ManifestResolver::new(fs).resolve(source).into_parts();

    let (descriptor, classify_diagnostics) = ArchetypeClassifier::new(fs).classify(draft).into_parts();
    diagnostics.extend(classify_diagnostics);

    info!(
        name = descriptor.name(),
        archetype = %descriptor.archetype(),
        runtime_version = descriptor.runtime_version().unwrap_or("-"),
        "Application classified"
    );
    Diagnosed::with_diagnostics(descriptor, diagnostics)
}

pub fn analyze(source: &Path) -> Diagnosed<ApplicationDescriptor> {
    analyze_with(source, &RealFileSystem::new())
}

pub fn map_dependencies_with(
    source: &Path,
    archetype: Archetype,
    fs: &dyn FileSystem,
) -> Diagnosed<Vec<DependencyRecord>> {
    DependencyMapper::new(fs).map(source, archetype)
}

pub fn map_dependencies(source: &Path, archetype: Archetype) -> Diagnosed<Vec<DependencyRecord>> {
    map_dependencies_with(source, archetype, &RealFileSystem::new())
}

/// Everything learned about one application in a single run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationReport {
    pub application: ApplicationDescriptor,
    pub dependencies: Vec<DependencyRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl MigrationReport {
    /// Runs the full core pipeline against `source`.
    pub fn build_with(source: &Path, fs: &dyn FileSystem) -> Self {
        let (application, mut diagnostics) = analyze_with(source, fs).into_parts();
        let (dependencies, dep_diagnostics) =
            map_dependencies_with(application.source_path(), application.archetype(), fs).into_parts();
        diagnostics.extend(dep_diagnostics);

        Self {
            application,
            dependencies,
            diagnostics,
        }
    }

    pub fn build(source: &Path) -> Self {
        Self::build_with(source, &RealFileSystem::new())
    }
}
