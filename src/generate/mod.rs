//! Deployment artifact generation
//!
//! Renders a Dockerfile and a Helm chart from a classified
//! [`ApplicationDescriptor`]. All decisions were already made during
//! classification; this module only fills templates and writes files.

mod templates;

use crate::descriptor::{
    ApplicationDescriptor, DEFAULT_JAVA_PACKAGING, DEFAULT_JAVA_VERSION, DEFAULT_NODE_VERSION,
};
use crate::stack::Archetype;
use minijinja::{context, Environment};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}

/// Paths written by one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifacts {
    pub dockerfile: Option<PathBuf>,
    pub chart_dir: PathBuf,
    pub chart_files: Vec<PathBuf>,
}

/// Container port exposed for an archetype
pub fn default_port(archetype: Archetype) -> u16 {
    match archetype {
        Archetype::NodeJs => 3000,
        Archetype::React => 80,
        Archetype::Python | Archetype::JavaMaven | Archetype::Unknown => 8080,
    }
}

pub struct ArtifactGenerator {
    output_dir: PathBuf,
    env: Environment<'static>,
}

impl ArtifactGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, GenerateError> {
        Ok(Self {
            output_dir: output_dir.into(),
            env: templates::environment()?,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Dockerfile contents, or `None` when the archetype has no template.
    pub fn render_dockerfile(
        &self,
        descriptor: &ApplicationDescriptor,
    ) -> Result<Option<String>, GenerateError> {
        let Some(template) = descriptor.dockerfile_template() else {
            return Ok(None);
        };

        let runtime_version = descriptor.runtime_version();
        let rendered = self.env.get_template(template)?.render(context! {
            app_name => descriptor.name(),
            env => descriptor.environment(),
            java_version => runtime_version.unwrap_or(DEFAULT_JAVA_VERSION),
            node_version => runtime_version.unwrap_or(DEFAULT_NODE_VERSION),
            packaging => descriptor.packaging_kind().unwrap_or(DEFAULT_JAVA_PACKAGING),
            port => default_port(descriptor.archetype()),
        })?;
        Ok(Some(rendered))
    }

    /// Rendered `(file name, contents)` pairs for the chart root.
    pub fn render_chart(
        &self,
        descriptor: &ApplicationDescriptor,
    ) -> Result<Vec<(&'static str, String)>, GenerateError> {
        let ctx = context! {
            app_name => descriptor.name(),
            chart_name => descriptor.chart_name(),
            archetype => descriptor.archetype().id(),
            env => descriptor.environment(),
            services => descriptor.declared_services(),
            port => default_port(descriptor.archetype()),
        };

        templates::CHART_TEMPLATES
            .iter()
            .map(|&(name, _)| {
                let rendered = self.env.get_template(name)?.render(&ctx)?;
                Ok((name, rendered))
            })
            .collect()
    }

    /// Writes the Dockerfile and chart under the output directory.
    ///
    /// An existing chart directory for this application is replaced.
    pub fn generate(
        &self,
        descriptor: &ApplicationDescriptor,
    ) -> Result<GeneratedArtifacts, GenerateError> {
        create_dir_all(&self.output_dir)?;
        let mut artifacts = GeneratedArtifacts::default();

        match self.render_dockerfile(descriptor)? {
            Some(dockerfile) => {
                let path = self.output_dir.join("Dockerfile");
                write(&path, &dockerfile)?;
                info!(archetype = %descriptor.archetype(), "Generated Dockerfile");
                artifacts.dockerfile = Some(path);
            }
            None => {
                info!(archetype = %descriptor.archetype(), "No Dockerfile template for archetype");
            }
        }

        let chart_dir = self
            .output_dir
            .join("chart")
            .join(descriptor.chart_name());
        if chart_dir.exists() {
            debug!(dir = %chart_dir.display(), "Replacing existing chart");
            fs::remove_dir_all(&chart_dir).map_err(|source| GenerateError::Io {
                path: chart_dir.clone(),
                source,
            })?;
        }
        let static_dir = chart_dir.join("templates");
        create_dir_all(&static_dir)?;

        for (name, contents) in self.render_chart(descriptor)? {
            let path = chart_dir.join(name);
            write(&path, &contents)?;
            artifacts.chart_files.push(path);
        }
        for (name, contents) in templates::CHART_STATIC_FILES {
            let path = static_dir.join(name);
            write(&path, contents)?;
            artifacts.chart_files.push(path);
        }

        info!(chart = %descriptor.chart_name(), "Generated Helm chart");
        artifacts.chart_dir = chart_dir;
        Ok(artifacts)
    }
}

fn create_dir_all(path: &Path) -> Result<(), GenerateError> {
    fs::create_dir_all(path).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), GenerateError> {
    fs::write(path, contents).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}
