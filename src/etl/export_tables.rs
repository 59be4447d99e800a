use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::clean::Cleaner;
use crate::config::UserConfig;
use crate::data::{RawElement, ShapedElement, Table};
use crate::errors::Result;
use crate::validate::SchemaValidator;

use super::parse_osm::{open_osm_file, OsmSource};
use super::sinks::TableSinks;
use super::Etl;

pub const ETL_NAME: &str = "export_tables";

/// Shaped elements, produced lazily as the loader pulls them.
pub type ShapedStream = Box<dyn Iterator<Item = Result<ShapedElement>>>;

pub struct OsmTablesEtl<'a> {
    config: &'a UserConfig,
    cleaner: Cleaner,
    validator: Option<SchemaValidator>,
    row_counts: HashMap<Table, u64>,
}

impl<'a> OsmTablesEtl<'a> {
    pub fn new(config: &'a UserConfig) -> Result<OsmTablesEtl<'a>> {
        Ok(OsmTablesEtl {
            config,
            cleaner: Cleaner::from_rules(&config.rules)?,
            validator: config.validate.then(SchemaValidator::new),
            row_counts: HashMap::new(),
        })
    }

    /// Rows written per table by the last completed load.
    pub fn row_counts(&self) -> &HashMap<Table, u64> {
        &self.row_counts
    }

    fn output_paths(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
        Table::ALL.into_iter().map(move |table| dir.join(table.file_name()))
    }
}

impl Etl for OsmTablesEtl<'_> {
    type Input = OsmSource;
    type Output = ShapedStream;

    fn etl_name(&self) -> &str {
        ETL_NAME
    }

    fn is_cached(&self, dir: &Path) -> Result<bool> {
        if !self.config.reuse_cached {
            return Ok(false);
        }
        for path in Self::output_paths(dir) {
            if !path.try_exists()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn clean(&self, dir: &Path) -> Result<()> {
        for path in Self::output_paths(dir) {
            if path.try_exists()? {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    fn extract(&mut self, _dir: &Path) -> Result<Self::Input> {
        let data_path = self.config.data_path.display().to_string();
        info!(etl_name = ETL_NAME, data_path = data_path.as_str(); "Opening OSM source");
        open_osm_file(&self.config.data_path)
    }

    fn transform(&mut self, input: Self::Input) -> Result<Self::Output> {
        let elements: Box<dyn Iterator<Item = Result<RawElement>>> = if self.config.show_progress {
            Box::new(tqdm::tqdm(input))
        } else {
            Box::new(input)
        };

        let cleaner = self.cleaner.clone();
        let validator = self.validator;
        Ok(Box::new(elements.map(move |element| {
            let shaped = cleaner.clean(element?)?;
            if let Some(validator) = &validator {
                validator.validate(&shaped)?;
            }
            Ok(shaped)
        })))
    }

    fn load(&mut self, dir: &Path, output: Self::Output) -> Result<()> {
        fs::create_dir_all(dir)?;
        let mut sinks = TableSinks::create(dir)?;
        for shaped in output {
            sinks.write(&shaped?)?;
        }
        self.row_counts = sinks.finish()?;

        for table in Table::ALL {
            let rows = self.row_counts.get(&table).copied().unwrap_or(0);
            info!(etl_name = ETL_NAME, table = table.name(), rows = rows; "Wrote table");
        }
        Ok(())
    }
}
