use std::env;
use std::io;
use std::path::PathBuf;

use structured_logger::json::new_writer;
use structured_logger::Builder;

use osm_tables::etl::export_tables::OsmTablesEtl;
use osm_tables::etl::Etl;
use osm_tables::{load_user_config, Result};

const DEFAULT_CONFIG_PATH: &str = "config/dubai_abu-dhabi.json";

fn setup_logging(level: &str) {
    Builder::with_level(level)
        .with_target_writer("*", new_writer(io::stdout()))
        .init();
}

fn main() -> Result<()> {
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let user_config = load_user_config(&config_path)?;
    setup_logging(&user_config.log_level);

    let output_dir = user_config.output_dir()?;
    let mut etl = OsmTablesEtl::new(&user_config)?;
    etl.process(&output_dir)?;

    Ok(())
}
