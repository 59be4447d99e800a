use std::collections::HashMap;

/// Maps deprecated or alternate tag keys to their canonical key.
#[derive(Debug, Clone, Default)]
pub struct KeyRemapper {
    mapping: HashMap<String, String>,
}

impl KeyRemapper {
    pub fn new(mapping: HashMap<String, String>) -> Self {
        KeyRemapper { mapping }
    }

    pub fn remap<'a>(&'a self, key: &'a str) -> &'a str {
        self.mapping.get(key).map(String::as_str).unwrap_or(key)
    }
}
