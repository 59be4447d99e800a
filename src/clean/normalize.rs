use super::{CleaningRules, Replacement};

pub const STREET_KEY: &str = "addr:street";
pub const CITY_KEY: &str = "addr:city";
pub const PHONE_KEY: &str = "phone";

/// Rewrites tag values for the handful of keys we know how to clean.
#[derive(Debug, Clone)]
pub struct ValueNormalizer {
    street_typo: Replacement,
    street_mapping: Vec<Replacement>,
    city_names: Vec<Replacement>,
    phone_bad_chars: Vec<char>,
}

impl ValueNormalizer {
    pub fn from_rules(rules: &CleaningRules) -> Self {
        ValueNormalizer {
            street_typo: rules.street_typo.clone(),
            street_mapping: rules.street_mapping.clone(),
            city_names: rules.city_names.clone(),
            phone_bad_chars: rules.phone_bad_chars.clone(),
        }
    }

    /// `key` is the already remapped, not yet split tag key.
    pub fn normalize(&self, key: &str, value: &str) -> String {
        match key {
            STREET_KEY => self.update_street_name(value),
            CITY_KEY => self.update_city_name(value),
            PHONE_KEY => self.update_phone_number(value),
            _ => value.to_string(),
        }
    }

    /// Applies at most one rule: the typo fix, or else the first mapping entry
    /// whose abbreviation occurs and whose full form does not.
    pub fn update_street_name(&self, street_name: &str) -> String {
        if street_name.contains(&self.street_typo.from) {
            return street_name.replace(&self.street_typo.from, &self.street_typo.to);
        }

        self.street_mapping
            .iter()
            .find(|entry| street_name.contains(&entry.from) && !street_name.contains(&entry.to))
            .map(|entry| street_name.replace(&entry.from, &entry.to))
            .unwrap_or_else(|| street_name.to_string())
    }

    pub fn update_city_name(&self, city: &str) -> String {
        self.city_names
            .iter()
            .find(|entry| entry.from == city)
            .map(|entry| entry.to.clone())
            .unwrap_or_else(|| city.to_string())
    }

    pub fn update_phone_number(&self, number: &str) -> String {
        number.chars()
            .filter(|c| !self.phone_bad_chars.contains(c))
            .collect()
    }
}
