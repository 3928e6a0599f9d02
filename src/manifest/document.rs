//! Serde model of a legacy platform manifest

use serde::Deserialize;
use serde_yaml::Value;

#[derive(Debug, Default, Deserialize)]
pub struct ManifestDocument {
    #[serde(default)]
    pub applications: Vec<ApplicationBlock>,
}

impl ManifestDocument {
    /// Parses a manifest; an empty or whitespace-only file has no applications.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Only the first declared application is considered.
    pub fn first_application(&self) -> Option<&ApplicationBlock> {
        self.applications.first()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ApplicationBlock {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub env: serde_yaml::Mapping,
    #[serde(default)]
    pub services: Vec<ServiceRef>,
    #[serde(default)]
    pub buildpack: Option<String>,
    #[serde(default)]
    pub buildpacks: Vec<String>,
}

impl ApplicationBlock {
    /// Environment entries in document order with values rendered as strings.
    pub fn env_pairs(&self) -> Vec<(String, String)> {
        self.env
            .iter()
            .map(|(k, v)| (render_value(k), render_value(v)))
            .collect()
    }

    pub fn service_names(&self) -> Vec<String> {
        self.services
            .iter()
            .map(|s| s.name().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// `buildpack`, falling back to the first entry of `buildpacks`.
    pub fn buildpack_hint(&self) -> Option<&str> {
        self.buildpack
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .or_else(|| {
                self.buildpacks
                    .iter()
                    .map(String::as_str)
                    .find(|b| !b.trim().is_empty())
            })
    }
}

/// A bound service, either by bare name or as a map with a `name` key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ServiceRef {
    Name(String),
    Binding { name: String },
}

impl ServiceRef {
    pub fn name(&self) -> &str {
        match self {
            ServiceRef::Name(name) => name,
            ServiceRef::Binding { name } => name,
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => render_value(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_application_block() {
        let doc = ManifestDocument::parse(
            r#"
applications:
- name: billing
  buildpack: python_buildpack
  env:
    DEBUG: "false"
    WORKERS: 4
    FEATURE_X: true
  services:
  - billing-db
  - name: billing-cache
"#,
        )
        .unwrap();

        let app = doc.first_application().unwrap();
        assert_eq!(app.name.as_deref(), Some("billing"));
        assert_eq!(app.buildpack_hint(), Some("python_buildpack"));
        assert_eq!(
            app.env_pairs(),
            vec![
                ("DEBUG".to_string(), "false".to_string()),
                ("WORKERS".to_string(), "4".to_string()),
                ("FEATURE_X".to_string(), "true".to_string()),
            ]
        );
        assert_eq!(app.service_names(), vec!["billing-db", "billing-cache"]);
    }

    #[test]
    fn test_empty_document_has_no_applications() {
        let doc = ManifestDocument::parse("   \n").unwrap();
        assert!(doc.first_application().is_none());
    }

    #[test]
    fn test_missing_applications_key() {
        let doc = ManifestDocument::parse("---\ninherit: base.yml\n").unwrap();
        assert!(doc.applications.is_empty());
    }

    #[test]
    fn test_buildpacks_list_fallback() {
        let doc = ManifestDocument::parse(
            "applications:\n- name: a\n  buildpacks:\n  - ''\n  - nodejs_buildpack\n",
        )
        .unwrap();
        assert_eq!(
            doc.first_application().unwrap().buildpack_hint(),
            Some("nodejs_buildpack")
        );
    }

    #[test]
    fn test_blank_buildpack_is_no_hint() {
        let doc = ManifestDocument::parse("applications:\n- name: a\n  buildpack: ''\n").unwrap();
        assert_eq!(doc.first_application().unwrap().buildpack_hint(), None);
    }

    #[test]
    fn test_nested_env_value_rendered_as_yaml() {
        let doc = ManifestDocument::parse(
            "applications:\n- env:\n    JBP_CONFIG_OPEN_JDK_JRE:\n      jre:\n        version: 17.+\n",
        )
        .unwrap();
        let pairs = doc.first_application().unwrap().env_pairs();
        assert_eq!(pairs[0].0, "JBP_CONFIG_OPEN_JDK_JRE");
        assert!(pairs[0].1.contains("version: 17.+"));
    }

    #[test]
    fn test_null_env_value_is_empty_string() {
        let doc = ManifestDocument::parse("applications:\n- env:\n    EMPTY:\n").unwrap();
        assert_eq!(
            doc.first_application().unwrap().env_pairs(),
            vec![("EMPTY".to_string(), String::new())]
        );
    }

    #[test]
    fn test_malformed_applications_is_error() {
        assert!(ManifestDocument::parse("applications: 42\n").is_err());
        assert!(ManifestDocument::parse("applications:\n- name: [unclosed\n").is_err());
    }
}
