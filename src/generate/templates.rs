//! Templates embedded in the binary

use minijinja::{Environment, Error, ErrorKind};

pub const DOCKERFILE_TEMPLATES: &[(&str, &str)] = &[
    (
        "Dockerfile.python.j2",
        include_str!("../../templates/Dockerfile.python.j2"),
    ),
    (
        "Dockerfile.java.j2",
        include_str!("../../templates/Dockerfile.java.j2"),
    ),
    (
        "Dockerfile.nodejs.j2",
        include_str!("../../templates/Dockerfile.nodejs.j2"),
    ),
    (
        "Dockerfile.react.j2",
        include_str!("../../templates/Dockerfile.react.j2"),
    ),
];

/// Rendered into `<chart>/`
pub const CHART_TEMPLATES: &[(&str, &str)] = &[
    (
        "Chart.yaml",
        include_str!("../../templates/chart/Chart.yaml.j2"),
    ),
    (
        "values.yaml",
        include_str!("../../templates/chart/values.yaml.j2"),
    ),
];

/// Copied verbatim into `<chart>/templates/`; these are Helm templates and
/// must not pass through the renderer.
pub const CHART_STATIC_FILES: &[(&str, &str)] = &[
    (
        "deployment.yaml",
        include_str!("../../templates/chart/templates/deployment.yaml"),
    ),
    (
        "service.yaml",
        include_str!("../../templates/chart/templates/service.yaml"),
    ),
];

pub fn environment() -> Result<Environment<'static>, Error> {
    let mut env = Environment::new();

    // Double-quoted string literal, valid in both Dockerfile ENV and YAML.
    env.add_filter("quoted", |s: String| -> Result<String, Error> {
        serde_json::to_string(&s).map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
    });

    for &(name, source) in DOCKERFILE_TEMPLATES.iter().chain(CHART_TEMPLATES) {
        env.add_template(name, source)?;
    }
    Ok(env)
}
