//! Namespace-free XML trees
//!
//! Build descriptors may or may not declare a default namespace. Parsing
//! produces an owned copy of the element tree keyed by local names only, so
//! one lookup path serves both forms.

use roxmltree::{Document, Node};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parses `content` and returns the normalised root element.
    pub fn parse(content: &str) -> Result<Self, roxmltree::Error> {
        let doc = Document::parse(content)?;
        Ok(Self::normalize(doc.root_element()))
    }

    fn normalize(node: Node<'_, '_>) -> Self {
        let text = node
            .children()
            .filter(|c| c.is_text())
            .filter_map(|c| c.text())
            .collect::<String>();
        let text = text.trim();

        Self {
            name: local_name(node.tag_name().name()).to_string(),
            text: (!text.is_empty()).then(|| text.to_string()),
            children: node
                .children()
                .filter(|c| c.is_element())
                .map(Self::normalize)
                .collect(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// First direct child named `name`
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of a direct child, or the empty string when absent.
    pub fn child_text_or_empty(&self, name: &str) -> &str {
        self.child(name).and_then(XmlElement::text).unwrap_or("")
    }

    /// All elements below this one (excluding self), in document order.
    pub fn descendants(&self) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        let mut stack: Vec<&XmlElement> = self.children.iter().rev().collect();
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(el.children.iter().rev());
        }
        out
    }

    /// Element reached by `path` starting from any descendant matching its
    /// first segment, like an XPath `.//a/b` query.
    pub fn find_path(&self, path: &[&str]) -> Option<&XmlElement> {
        let (first, rest) = path.split_first()?;
        self.descendants()
            .into_iter()
            .filter(|el| el.name == *first)
            .find_map(|start| {
                rest.iter()
                    .try_fold(start, |el, segment| el.child(segment))
            })
    }

    /// First descendant with text whose name contains `needle`.
    pub fn find_name_containing(&self, needle: &str) -> Option<&XmlElement> {
        self.descendants()
            .into_iter()
            .find(|el| el.text.is_some() && el.name.contains(needle))
    }
}

fn local_name(name: &str) -> &str {
    match name.rsplit_once(['}', ':']) {
        Some((_, local)) => local,
        None => name,
    }
}
