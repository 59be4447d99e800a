use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::clean::CleaningRules;
use crate::errors::{Error, Result};

#[derive(Deserialize, Debug, Clone)]
pub struct UserConfig {
    pub data_path: PathBuf,
    /// Defaults to `output/<input file name>`.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Check every shaped record against the table schema before writing.
    #[serde(default)]
    pub validate: bool,
    #[serde(default)]
    pub show_progress: bool,
    /// Skip the run when all five tables already exist in the output dir.
    #[serde(default)]
    pub reuse_cached: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub rules: CleaningRules,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl UserConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        UserConfig {
            data_path: data_path.into(),
            output_dir: None,
            validate: false,
            show_progress: false,
            reuse_cached: false,
            log_level: default_log_level(),
            rules: CleaningRules::default(),
        }
    }

    pub fn output_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.output_dir {
            return Ok(dir.clone());
        }
        let input_fname = self.data_path
            .file_name()
            .ok_or("Could not get input file name")?;
        Ok(Path::new("output").join(input_fname))
    }
}

pub fn load_user_config(path: &Path) -> Result<UserConfig> {
    let file = File::open(path)
        .map_err(|err| Error::from(format!("Could not open config file {}: {err}", path.display())))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
