//! Tag cleaning: key remapping, value normalization, key classification and
//! shaping of audited elements into table records.

pub mod audit;
pub mod classify;
pub mod normalize;
pub mod remap;
pub mod shape;

use std::collections::HashMap;

use serde::Deserialize;

use crate::data::{RawElement, ShapedElement};
use crate::errors::Result;

use self::audit::ElementAuditor;
use self::classify::TagClassifier;
use self::normalize::ValueNormalizer;
use self::remap::KeyRemapper;
use self::shape::ElementShaper;

pub const DEFAULT_TAG_TYPE: &str = "regular";
pub const PROBLEM_CHARS_PATTERN: &str = r#"[=+/&<>;'"?%#$@,. \t\r\n]"#;

/// A literal substring (or exact value) rewrite.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: &str, to: &str) -> Self {
        Replacement {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Lookup tables driving the cleaning stages. Any field left out of the user
/// config falls back to the built-in table.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CleaningRules {
    pub street_typo: Replacement,
    /// Scanned in order; the first applicable entry wins.
    pub street_mapping: Vec<Replacement>,
    pub city_names: Vec<Replacement>,
    pub key_mapping: HashMap<String, String>,
    pub phone_bad_chars: Vec<char>,
    pub problem_chars: String,
    pub default_tag_type: String,
}

impl Default for CleaningRules {
    fn default() -> Self {
        CleaningRules {
            street_typo: Replacement::new("Steet", "Street"),
            street_mapping: vec![
                Replacement::new("St", "Street"),
                Replacement::new("St.", "Street"),
                Replacement::new("Ave", "Avenue"),
                Replacement::new("Rd.", "Road"),
                Replacement::new("road", "Road"),
            ],
            city_names: vec![Replacement::new("DUBAI", "Dubai")],
            // "phone_1" maps to " phone" (leading space) in the source data
            // dictionary, so those tags end up dropped as problem keys.
            key_mapping: [
                ("motorcar", "motor_vehicle"),
                ("old_name_1", "old_name"),
                ("old_name_2", "old_name"),
                ("phone_1", " phone"),
            ]
            .into_iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect(),
            phone_bad_chars: vec![' ', '+', '-', '(', ')'],
            problem_chars: PROBLEM_CHARS_PATTERN.to_string(),
            default_tag_type: DEFAULT_TAG_TYPE.to_string(),
        }
    }
}

/// Audits then shapes one element at a time.
#[derive(Debug, Clone)]
pub struct Cleaner {
    auditor: ElementAuditor,
    shaper: ElementShaper,
}

impl Cleaner {
    pub fn from_rules(rules: &CleaningRules) -> Result<Self> {
        let remapper = KeyRemapper::new(rules.key_mapping.clone());
        let normalizer = ValueNormalizer::from_rules(rules);
        let classifier = TagClassifier::new(&rules.problem_chars, &rules.default_tag_type)?;

        Ok(Cleaner {
            auditor: ElementAuditor::new(remapper, normalizer),
            shaper: ElementShaper::new(classifier),
        })
    }

    pub fn clean(&self, element: RawElement) -> Result<ShapedElement> {
        let audited = self.auditor.audit(element);
        self.shaper.shape(&audited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ChildElement, ElementKind, TagRecord};
    use crate::errors::ErrorKind;

    fn node(tags: &[(&str, &str)]) -> RawElement {
        let attributes = [
            ("id", "1"), ("lat", "25.1"), ("lon", "55.2"), ("user", "u"),
            ("uid", "1"), ("version", "1"), ("changeset", "1"), ("timestamp", "t"),
        ]
        .into_iter()
        .collect();
        tags.iter().fold(RawElement::new(ElementKind::Node, attributes), |el, (k, v)| {
            el.with_child(ChildElement::tag(k, v))
        })
    }

    #[test]
    fn cleans_namespaced_street_and_remapped_keys() {
        let cleaner = Cleaner::from_rules(&CleaningRules::default()).unwrap();
        let shaped = cleaner
            .clean(node(&[
                ("addr:street", "Sheikh Zayed Rd."),
                ("motorcar", "yes"),
                ("phone_1", "+971 4 1234567"),
            ]))
            .unwrap();

        assert_eq!(
            shaped.tags(),
            &[
                TagRecord {
                    id: "1".into(),
                    key: "street".into(),
                    value: "Sheikh Zayed Road".into(),
                    tag_type: "addr".into(),
                },
                TagRecord {
                    id: "1".into(),
                    key: "motor_vehicle".into(),
                    value: "yes".into(),
                    tag_type: "regular".into(),
                },
            ]
        );
    }

    #[test]
    fn partial_rules_fall_back_to_defaults() {
        let rules: CleaningRules =
            serde_json::from_str(r#"{"city_names": [{"from": "ABU DHABI", "to": "Abu Dhabi"}]}"#).unwrap();
        assert_eq!(rules.city_names, vec![Replacement::new("ABU DHABI", "Abu Dhabi")]);
        assert_eq!(rules.street_mapping.len(), 5);
        assert_eq!(rules.default_tag_type, "regular");
    }

    #[test]
    fn invalid_problem_pattern_is_a_config_error() {
        let rules = CleaningRules {
            problem_chars: "[unclosed".to_string(),
            ..CleaningRules::default()
        };
        let err = Cleaner::from_rules(&rules).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
    }
}
