use crate::errors::{Error, Result};

/// Top-level element kinds we turn into records. Everything else in the
/// document is skipped by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Way,
}

impl ElementKind {
    pub fn tag_name(self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Way => "way",
        }
    }

    pub fn from_tag_name(name: &[u8]) -> Option<ElementKind> {
        match name {
            b"node" => Some(ElementKind::Node),
            b"way" => Some(ElementKind::Way),
            _ => None,
        }
    }
}

/// Attributes in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Attributes(Vec::new())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn require(&self, owner: &str, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| Error::missing_field(owner, name))
    }

    /// Replaces the value of `name`, appending it if absent.
    pub fn set(&mut self, name: &str, value: String) {
        match self.0.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Attributes(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A direct child of a node or way, e.g. `<tag k=".." v=".."/>` or `<nd ref=".."/>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildElement {
    pub name: String,
    pub attributes: Attributes,
}

impl ChildElement {
    pub fn new(name: impl Into<String>, attributes: Attributes) -> Self {
        ChildElement {
            name: name.into(),
            attributes,
        }
    }

    pub fn tag(key: &str, value: &str) -> Self {
        ChildElement::new("tag", [("k", key), ("v", value)].into_iter().collect())
    }

    pub fn node_ref(node_id: &str) -> Self {
        ChildElement::new("nd", [("ref", node_id)].into_iter().collect())
    }

    pub fn is_tag(&self) -> bool {
        self.name == "tag"
    }

    pub fn is_node_ref(&self) -> bool {
        self.name == "nd"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawElement {
    pub kind: ElementKind,
    pub attributes: Attributes,
    pub children: Vec<ChildElement>,
}

impl RawElement {
    pub fn new(kind: ElementKind, attributes: Attributes) -> Self {
        RawElement {
            kind,
            attributes,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: ChildElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn require(&self, name: &str) -> Result<&str> {
        self.attributes.require(self.kind.tag_name(), name)
    }

    pub fn id(&self) -> Result<&str> {
        self.require("id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn require_reports_owner_and_field() {
        let element = RawElement::new(ElementKind::Way, [("id", "7")].into_iter().collect());
        assert_eq!(element.id().unwrap(), "7");

        let err = element.require("user").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingField);
        assert!(err.message.contains("<way>"));
        assert!(err.message.contains("'user'"));
    }

    #[test]
    fn set_replaces_in_place() {
        let mut attributes: Attributes = [("k", "a"), ("v", "b")].into_iter().collect();
        attributes.set("k", "c".to_string());
        attributes.set("x", "y".to_string());
        let pairs: Vec<_> = attributes.iter().collect();
        assert_eq!(pairs, vec![("k", "c"), ("v", "b"), ("x", "y")]);
    }
}
