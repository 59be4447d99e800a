use regex::Regex;

/// What happens to a tag given its raw key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagDisposition<'a> {
    /// Key contains a problem character; no record is written.
    Dropped,
    Namespaced { tag_type: &'a str, key: &'a str },
    Regular { tag_type: &'a str, key: &'a str },
}

impl<'a> TagDisposition<'a> {
    /// `(tag_type, key)` for tags that survive classification.
    pub fn kept(self) -> Option<(&'a str, &'a str)> {
        match self {
            TagDisposition::Dropped => None,
            TagDisposition::Namespaced { tag_type, key } | TagDisposition::Regular { tag_type, key } => {
                Some((tag_type, key))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TagClassifier {
    problem_chars: Regex,
    default_tag_type: String,
}

impl TagClassifier {
    pub fn new(problem_chars: &str, default_tag_type: &str) -> crate::errors::Result<Self> {
        Ok(TagClassifier {
            problem_chars: Regex::new(problem_chars)?,
            default_tag_type: default_tag_type.to_string(),
        })
    }

    pub fn classify<'a>(&'a self, raw_key: &'a str) -> TagDisposition<'a> {
        if self.problem_chars.is_match(raw_key) {
            TagDisposition::Dropped
        } else if let Some((tag_type, key)) = raw_key.split_once(':') {
            TagDisposition::Namespaced { tag_type, key }
        } else {
            TagDisposition::Regular {
                tag_type: &self.default_tag_type,
                key: raw_key,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::{DEFAULT_TAG_TYPE, PROBLEM_CHARS_PATTERN};

    fn classifier() -> TagClassifier {
        TagClassifier::new(PROBLEM_CHARS_PATTERN, DEFAULT_TAG_TYPE).unwrap()
    }

    #[test]
    fn splits_on_first_colon_only() {
        assert_eq!(
            classifier().classify("addr:street:name"),
            TagDisposition::Namespaced { tag_type: "addr", key: "street:name" },
        );
    }

    #[test]
    fn plain_keys_get_default_type() {
        assert_eq!(
            classifier().classify("highway"),
            TagDisposition::Regular { tag_type: "regular", key: "highway" },
        );
    }

    #[test]
    fn drops_every_problem_character() {
        let classifier = classifier();
        for c in ['=', '+', '/', '&', '<', '>', ';', '\'', '"', '?', '%', '#', '$', '@', ',', '.', ' ', '\t', '\r', '\n'] {
            let key = format!("name{c}en");
            assert_eq!(classifier.classify(&key), TagDisposition::Dropped, "key {key:?}");
        }
        assert_eq!(classifier.classify("addr:street name"), TagDisposition::Dropped);
    }

    #[test]
    fn keeps_underscores_dashes_and_colons() {
        let classifier = classifier();
        assert_eq!(classifier.classify("old_name").kept(), Some(("regular", "old_name")));
        assert_eq!(classifier.classify("name:zh-Hans").kept(), Some(("name", "zh-Hans")));
        assert_eq!(classifier.classify(":").kept(), Some(("", "")));
    }
}
