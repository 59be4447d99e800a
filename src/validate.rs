use crate::data::tables::FieldType;
use crate::data::{ShapedElement, Table, TableRow};
use crate::errors::{Error, ErrorKind, Result};

/// Checks shaped records against the column schema of their table before
/// they are written.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn new() -> Self {
        SchemaValidator
    }

    /// Fails on the first record with problems, listing all of its bad fields.
    pub fn validate(&self, shaped: &ShapedElement) -> Result<()> {
        for (table, row) in shaped.rows() {
            let failures = Self::check_row(table, row);
            if !failures.is_empty() {
                return Err(Error::new(
                    ErrorKind::SchemaViolation,
                    format!(
                        "Element of type '{}' has the following errors: {}",
                        table.name(),
                        failures.join("; ")
                    ),
                ));
            }
        }
        Ok(())
    }

    fn check_row(table: Table, row: &dyn TableRow) -> Vec<String> {
        let values = row.values();
        let schema = table.schema();
        if values.len() != schema.len() {
            return vec![format!("expected {} fields, found {}", schema.len(), values.len())];
        }

        schema
            .iter()
            .zip(values.iter())
            .filter_map(|((field, field_type), value)| {
                Self::check_value(*field_type, value).map(|problem| format!("{field}: {problem}"))
            })
            .collect()
    }

    fn check_value(field_type: FieldType, value: &str) -> Option<&'static str> {
        match field_type {
            FieldType::Integer if value.parse::<i64>().is_err() => Some("must be of integer type"),
            FieldType::Float if value.parse::<f64>().is_err() => Some("must be of float type"),
            _ => None,
        }
    }
}
