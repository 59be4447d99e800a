use crate::data::{ChildElement, RawElement};

use super::normalize::ValueNormalizer;
use super::remap::KeyRemapper;

/// Remaps keys and normalizes values of every tag child. Consumes the element
/// and hands back the audited copy, so the raw tags cannot be reused.
#[derive(Debug, Clone)]
pub struct ElementAuditor {
    remapper: KeyRemapper,
    normalizer: ValueNormalizer,
}

impl ElementAuditor {
    pub fn new(remapper: KeyRemapper, normalizer: ValueNormalizer) -> Self {
        ElementAuditor {
            remapper,
            normalizer,
        }
    }

    pub fn audit(&self, element: RawElement) -> RawElement {
        let RawElement { kind, attributes, children } = element;
        RawElement {
            kind,
            attributes,
            children: children.into_iter().map(|child| self.audit_child(child)).collect(),
        }
    }

    fn audit_child(&self, mut child: ChildElement) -> ChildElement {
        if !child.is_tag() {
            return child;
        }
        let Some(raw_key) = child.attributes.get("k") else {
            return child;
        };

        let key = self.remapper.remap(raw_key).to_string();
        if let Some(value) = child.attributes.get("v") {
            let value = self.normalizer.normalize(&key, value);
            child.attributes.set("v", value);
        }
        child.attributes.set("k", key);
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::CleaningRules;
    use crate::data::{Attributes, ElementKind};

    fn auditor() -> ElementAuditor {
        let rules = CleaningRules::default();
        ElementAuditor::new(KeyRemapper::new(rules.key_mapping.clone()), ValueNormalizer::from_rules(&rules))
    }

    #[test]
    fn normalizes_with_the_remapped_key() {
        let mut rules = CleaningRules::default();
        rules.key_mapping.insert("telephone".to_string(), "phone".to_string());
        let auditor = ElementAuditor::new(KeyRemapper::new(rules.key_mapping.clone()), ValueNormalizer::from_rules(&rules));

        let element = RawElement::new(ElementKind::Node, Attributes::new())
            .with_child(ChildElement::tag("telephone", "+971 4 555-0000"));
        let audited = auditor.audit(element);

        assert_eq!(audited.children, vec![ChildElement::tag("phone", "97145550000")]);
    }

    #[test]
    fn leaves_node_refs_and_attributes_alone() {
        let attributes: Attributes = [("id", "3"), ("user", "DUBAI")].into_iter().collect();
        let element = RawElement::new(ElementKind::Way, attributes.clone())
            .with_child(ChildElement::node_ref("10"))
            .with_child(ChildElement::tag("addr:city", "DUBAI"))
            .with_child(ChildElement::node_ref("20"));

        let audited = auditor().audit(element);

        assert_eq!(audited.attributes, attributes);
        assert_eq!(
            audited.children,
            vec![
                ChildElement::node_ref("10"),
                ChildElement::tag("addr:city", "Dubai"),
                ChildElement::node_ref("20"),
            ]
        );
    }

    #[test]
    fn tag_without_value_keeps_remapped_key() {
        let element = RawElement::new(ElementKind::Node, Attributes::new())
            .with_child(ChildElement::new("tag", [("k", "old_name_2")].into_iter().collect()));
        let audited = auditor().audit(element);
        assert_eq!(audited.children[0].attributes.get("k"), Some("old_name"));
        assert_eq!(audited.children[0].attributes.get("v"), None);
    }
}
