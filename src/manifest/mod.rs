//! Manifest resolution
//!
//! Discovers every `manifest*.yml` in a source directory and folds the first
//! application block of each into a [`DescriptorDraft`]. Malformed manifests
//! are skipped with a diagnostic; a directory without manifests simply
//! yields an empty draft.

mod document;
pub mod merge;

pub use document::{ApplicationBlock, ManifestDocument, ServiceRef};
pub use merge::{jre_major_version, merge_environments, merge_into, JRE_CONFIG_KEY};

use crate::descriptor::DescriptorDraft;
use crate::diagnostics::{Diagnosed, Diagnostic, DiagnosticKind, DiagnosticLog};
use crate::fs::FileSystem;
use crate::stack::Archetype;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the canonical manifest
pub const CANONICAL_MANIFEST: &str = "manifest.yml";

/// Glob matched against file names during discovery
pub const MANIFEST_PATTERN: &str = "manifest*.yml";

pub struct ManifestResolver<'a> {
    fs: &'a dyn FileSystem,
    pattern: Pattern,
}

impl<'a> ManifestResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            fs,
            pattern: Pattern::new(MANIFEST_PATTERN).expect("manifest pattern is valid"),
        }
    }

    /// Manifest files in `source`, ordered by file stem then extension.
    pub fn discover(&self, source: &Path) -> Vec<PathBuf> {
        let entries = match self.fs.read_dir(source) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(source = %source.display(), error = %e, "Source directory not listable");
                return Vec::new();
            }
        };

        let mut manifests: Vec<PathBuf> = entries
            .into_iter()
            .filter(|e| e.is_file() && self.pattern.matches(e.file_name()))
            .map(|e| e.path)
            .collect();

        manifests.sort_by(|a, b| {
            (a.file_stem(), a.extension()).cmp(&(b.file_stem(), b.extension()))
        });
        manifests
    }

    /// Builds the preliminary descriptor from all discovered manifests.
    pub fn resolve(&self, source: &Path) -> Diagnosed<DescriptorDraft> {
        let mut draft = DescriptorDraft::new(source);
        let mut log = DiagnosticLog::new();

        let manifests = self.discover(source);
        let has_canonical = manifests.iter().any(|p| is_canonical(p));
        debug!(count = manifests.len(), has_canonical, "Discovered manifests");

        let mut name_taken = false;
        for path in &manifests {
            let Some(document) = self.load(path, &mut log) else {
                continue;
            };
            let Some(app) = document.first_application() else {
                debug!(manifest = %path.display(), "Manifest declares no applications");
                continue;
            };

            let name_eligible = if has_canonical {
                is_canonical(path)
            } else {
                !name_taken
            };
            if name_eligible {
                if let Some(name) = app.name.as_deref().filter(|n| !n.trim().is_empty()) {
                    draft.name = name.to_string();
                    name_taken = true;
                }
            }

            fold_application(&mut draft, app, path);
        }

        if draft.archetype.is_none() {
            if let Some(archetype) = draft.buildpack_hint.as_deref().and_then(archetype_from_buildpack) {
                debug!(%archetype, "Archetype from buildpack hint");
                draft.archetype = Some(archetype);
            }
        }

        log.finish(draft)
    }

    fn load(&self, path: &Path, log: &mut DiagnosticLog) -> Option<ManifestDocument> {
        let content = match self.fs.read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log.record(Diagnostic::new(DiagnosticKind::UnreadableFile, path, e));
                return None;
            }
        };

        match ManifestDocument::parse(&content) {
            Ok(document) => Some(document),
            Err(e) => {
                log.record(Diagnostic::new(DiagnosticKind::MalformedManifest, path, e));
                None
            }
        }
    }
}

fn is_canonical(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()) == Some(CANONICAL_MANIFEST)
}

fn fold_application(draft: &mut DescriptorDraft, app: &ApplicationBlock, path: &Path) {
    let (env, jre_config) = merge::split_jre_config(app.env_pairs());
    let added = merge_into(&mut draft.environment, env);
    debug!(manifest = %path.display(), added = ?added, "Merged environment");

    if draft.runtime_version.is_none() {
        if let Some(version) = jre_config.as_deref().and_then(jre_major_version) {
            debug!(%version, "JRE version from legacy configuration");
            draft.runtime_version = Some(version);
            draft.archetype = Some(Archetype::JavaMaven);
        }
    }

    if draft.declared_services.is_empty() {
        draft.declared_services = app.service_names();
    }

    if draft.buildpack_hint.is_none() {
        draft.buildpack_hint = app.buildpack_hint().map(str::to_string);
    }
}

/// Weak archetype signal from a buildpack name.
pub fn archetype_from_buildpack(hint: &str) -> Option<Archetype> {
    let hint = hint.to_lowercase();
    if hint.contains("python") {
        Some(Archetype::Python)
    } else if hint.contains("java") {
        Some(Archetype::JavaMaven)
    } else if hint.contains("nodejs") {
        Some(Archetype::NodeJs)
    } else {
        None
    }
}
