pub mod export_tables;
pub mod parse_osm;
pub mod sinks;

use std::path::Path;
use log::{info, error, warn};

use crate::errors::Result;


pub trait Etl {
    type Input;
    type Output;

    fn etl_name(&self) -> &str;

    fn is_cached(&self, dir: &Path) -> Result<bool>;
    fn clean(&self, dir: &Path) -> Result<()>;

    fn extract(&mut self, dir: &Path) -> Result<Self::Input>;
    fn transform(&mut self, input: Self::Input) -> Result<Self::Output>;
    fn load(&mut self, dir: &Path, output: Self::Output) -> Result<()>;

    fn log_failure<T>(&self, stage: &str, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            error!(etl_name = self.etl_name(), stage = stage, err = err.message.as_str(); "Stage failed with error");
        }
        result
    }

    fn process(&mut self, dir: &Path) -> Result<()> {
        info!(etl_name = self.etl_name(); "Starting ETL process");
        if self.is_cached(dir)? {
            info!(etl_name = self.etl_name(); "Using cached value");
        } else {
            info!(etl_name = self.etl_name(); "Extracting");
            let input = self.extract(dir);
            let input = self.log_failure("extract", input)?;

            info!(etl_name = self.etl_name(); "Transforming");
            let output = self.transform(input);
            let output = self.log_failure("transform", output)?;

            // Outputs are only touched from here on, so only a failed load
            // leaves partial tables behind.
            info!(etl_name = self.etl_name(); "Loading");
            let loaded = self.load(dir, output);
            if loaded.is_err() {
                if let Err(clean_err) = self.clean(dir) {
                    warn!(etl_name = self.etl_name(), err = clean_err.message.as_str(); "Could not remove partial output");
                }
            }
            self.log_failure("load", loaded)?;
        }
        info!(etl_name = self.etl_name(); "Process finished");
        Ok(())
    }
}
