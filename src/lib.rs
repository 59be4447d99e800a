//! Converts an OpenStreetMap XML export into five normalized CSV tables
//! (nodes, node tags, ways, way node memberships, way tags) ready to load
//! into a relational store.

pub mod clean;
pub mod config;
pub mod data;
pub mod errors;
pub mod etl;
pub mod validate;

pub use crate::config::{load_user_config, UserConfig};
pub use crate::errors::{Error, ErrorKind, Result};
