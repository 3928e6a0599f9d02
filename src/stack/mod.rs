//! Archetype identifiers and the well-known ecosystem files that signal them

mod id_enum_macro;

pub mod archetype;

pub use archetype::Archetype;

/// Java build descriptor
pub const MAVEN_POM: &str = "pom.xml";

/// Python dependency-declaration file
pub const PYTHON_REQUIREMENTS: &str = "requirements.txt";

/// Python packaging descriptor
pub const PYTHON_SETUP: &str = "setup.py";

/// Node package descriptor
pub const NODE_PACKAGE: &str = "package.json";
