//! Java build descriptor metadata

use crate::xml::XmlElement;

/// Values found in a build descriptor; `None` means the lookup failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JavaMetadata {
    pub java_version: Option<String>,
    pub packaging: Option<String>,
}

pub fn extract(root: &XmlElement) -> JavaMetadata {
    JavaMetadata {
        java_version: lookup(root, &["properties", "java.version"], "java.version"),
        packaging: lookup(root, &["packaging"], "packaging"),
    }
}

/// Conventional path first, then a tree-wide scan by name fragment.
fn lookup(root: &XmlElement, path: &[&str], fragment: &str) -> Option<String> {
    root.find_path(path)
        .and_then(XmlElement::text)
        .or_else(|| root.find_name_containing(fragment).and_then(XmlElement::text))
        .map(str::to_string)
}
