//! Output formatting for reports
//!
//! JSON and YAML are stable, machine-readable renderings of the same data the
//! human format shows.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::MigrationReport;
use crate::descriptor::ApplicationDescriptor;
use crate::diagnostics::Diagnostic;
use crate::generate::GeneratedArtifacts;
use crate::stack::Archetype;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

#[derive(Serialize)]
struct MigrationOutput<'a> {
    #[serde(flatten)]
    report: &'a MigrationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    artifacts: Option<&'a GeneratedArtifacts>,
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    application: &'a ApplicationDescriptor,
    diagnostics: &'a [Diagnostic],
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a full report, optionally with the files a migration wrote.
    pub fn format(
        &self,
        report: &MigrationReport,
        artifacts: Option<&GeneratedArtifacts>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&MigrationOutput { report, artifacts })
                .context("Failed to serialize report to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&MigrationOutput { report, artifacts })
                .context("Failed to serialize report to YAML"),
            OutputFormat::Human => {
                let mut output = String::new();
                write_application(&mut output, &report.application);
                write_dependencies(&mut output, &report.dependencies);
                write_diagnostics(&mut output, &report.diagnostics);
                if let Some(artifacts) = artifacts {
                    write_artifacts(&mut output, artifacts);
                }
                Ok(output)
            }
        }
    }

    /// Formats a descriptor without a dependency listing.
    pub fn format_application(
        &self,
        application: &ApplicationDescriptor,
        diagnostics: &[Diagnostic],
    ) -> Result<String> {
        let view = InspectOutput {
            application,
            diagnostics,
        };
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&view).context("Failed to serialize descriptor to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(&view).context("Failed to serialize descriptor to YAML")
            }
            OutputFormat::Human => {
                let mut output = String::new();
                write_application(&mut output, application);
                write_diagnostics(&mut output, diagnostics);
                Ok(output)
            }
        }
    }
}

fn write_application(output: &mut String, app: &ApplicationDescriptor) {
    if app.archetype() == Archetype::Unknown {
        output.push_str("\u{26A0} Application (unclassified)\n");
    } else {
        output.push_str("\u{2713} Application\n");
    }
    output.push_str(RULE);
    output.push_str("\n\n");

    output.push_str(&format!("Name:       {}\n", app.name()));
    output.push_str(&format!(
        "Archetype:  {} ({})\n",
        app.archetype().display_name(),
        app.archetype()
    ));
    output.push_str(&format!("Source:     {}\n", app.source_path().display()));
    if let Some(version) = app.runtime_version() {
        output.push_str(&format!("Runtime:    {}\n", version));
    }
    if let Some(packaging) = app.packaging_kind() {
        output.push_str(&format!("Packaging:  {}\n", packaging));
    }
    if let Some(hint) = app.buildpack_hint() {
        output.push_str(&format!("Buildpack:  {}\n", hint));
    }
    output.push('\n');

    let env: Vec<String> = app
        .environment()
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    write_tree(output, "Environment", &env);
    write_tree(output, "Services", app.declared_services());
}

fn write_dependencies(output: &mut String, dependencies: &[crate::dependencies::DependencyRecord]) {
    let items: Vec<&str> = dependencies.iter().map(|d| d.as_str()).collect();
    write_tree(output, "Dependencies", &items);
}

fn write_diagnostics(output: &mut String, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    output.push_str("\u{26A0} Warnings:\n");
    for diagnostic in diagnostics {
        output.push_str(&format!("  - {}\n", diagnostic));
    }
    output.push('\n');
}

fn write_artifacts(output: &mut String, artifacts: &GeneratedArtifacts) {
    let mut files = Vec::new();
    if let Some(dockerfile) = &artifacts.dockerfile {
        files.push(dockerfile.display().to_string());
    }
    files.extend(artifacts.chart_files.iter().map(|p| p.display().to_string()));
    write_tree(output, "Generated Artifacts", &files);
}

fn write_tree<S: AsRef<str>>(output: &mut String, title: &str, items: &[S]) {
    if items.is_empty() {
        output.push_str(&format!("{}: (none)\n\n", title));
        return;
    }
    output.push_str(&format!("{}:\n", title));
    for (i, item) in items.iter().enumerate() {
        let connector = if i == items.len() - 1 {
            "\u{2514}"
        } else {
            "\u{251C}"
        };
        output.push_str(&format!("{}\u{2500} {}\n", connector, item.as_ref()));
    }
    output.push('\n');
}
