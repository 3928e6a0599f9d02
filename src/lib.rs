//! shiftpack - move platform-as-a-service applications onto containers
//!
//! Reads an application's deployment manifests and build descriptors,
//! classifies it into an archetype, lists its declared dependencies and
//! renders a Dockerfile plus Helm chart for it.
//!
//! # Pipeline
//!
//! - [`manifest`]: merges every `manifest*.yml` into a draft descriptor
//! - [`classify`]: decides the archetype and fills runtime metadata
//! - [`dependencies`]: reads the archetype's dependency file
//! - [`generate`]: renders deployment artifacts
//!
//! Nothing in the pipeline fails on bad input. Unreadable or malformed files
//! are reported as [`Diagnostic`]s next to a best-effort result.
//!
//! ```no_run
//! use shiftpack::{analyze, map_dependencies};
//! use std::path::Path;
//!
//! let app = analyze(Path::new("./legacy-app"));
//! for diagnostic in &app.diagnostics {
//!     eprintln!("{}", diagnostic);
//! }
//! let deps = map_dependencies(app.value.source_path(), app.value.archetype());
//! println!("{} is {} with {} dependencies", app.value.name(), app.value.archetype(), deps.value.len());
//! ```

pub mod analysis;
pub mod classify;
pub mod cli;
pub mod config;
pub mod dependencies;
pub mod descriptor;
pub mod diagnostics;
pub mod fs;
pub mod generate;
pub mod manifest;
pub mod stack;
pub mod util;
pub mod xml;

pub use analysis::{analyze, analyze_with, map_dependencies, map_dependencies_with, MigrationReport};
pub use classify::ArchetypeClassifier;
pub use config::{ConfigError, ShiftpackConfig};
pub use dependencies::{DependencyMapper, DependencyRecord};
pub use descriptor::{ApplicationDescriptor, DescriptorDraft};
pub use diagnostics::{Diagnosed, Diagnostic, DiagnosticKind};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use generate::{ArtifactGenerator, GenerateError, GeneratedArtifacts};
pub use manifest::ManifestResolver;
pub use stack::Archetype;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
