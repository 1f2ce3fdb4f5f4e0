use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use getset::Getters;
use serde_json::{Map, Value};
use thiserror::Error;

const DATE_FIELD: &str = "date_field";
const DESCRIPTION_FIELD: &str = "description_field";
const AMOUNT_FIELD: &str = "amount_field";
const CATEGORY_FIELD: &str = "category_field";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .path.display())]
    Missing {
        path: PathBuf,
        source: io::Error,
    },
    #[error("invalid JSON in config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config field mapping `{key}` {reason}")]
    Invalid { key: &'static str, reason: &'static str },
}

/// Which source column feeds each canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct FieldMapping {
    date_field: String,
    description_field: String,
    amount_field: String,
    category_field: String,
}

impl FieldMapping {
    pub fn new(
        date_field: impl Into<String>,
        description_field: impl Into<String>,
        amount_field: impl Into<String>,
        category_field: impl Into<String>,
    ) -> Result<FieldMapping, ConfigError> {
        Ok(FieldMapping {
            date_field: non_empty(DATE_FIELD, date_field.into())?,
            description_field: non_empty(DESCRIPTION_FIELD, description_field.into())?,
            amount_field: non_empty(AMOUNT_FIELD, amount_field.into())?,
            category_field: non_empty(CATEGORY_FIELD, category_field.into())?,
        })
    }

    /// Mapping that reads back files written by [`crate::data::export_csv`].
    pub fn identity() -> FieldMapping {
        FieldMapping {
            date_field: "date".to_string(),
            description_field: "description".to_string(),
            amount_field: "amount".to_string(),
            category_field: "category".to_string(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<FieldMapping, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Missing {
            path: path.to_path_buf(),
            source,
        })?;

        FieldMapping::from_json(&contents)
    }

    /// Builds a mapping from a JSON object. Keys other than the four
    /// mapping keys are ignored.
    pub fn from_json(json: &str) -> Result<FieldMapping, ConfigError> {
        let descriptor: Map<String, Value> = serde_json::from_str(json)?;

        FieldMapping::new(
            required(&descriptor, DATE_FIELD)?,
            required(&descriptor, DESCRIPTION_FIELD)?,
            required(&descriptor, AMOUNT_FIELD)?,
            required(&descriptor, CATEGORY_FIELD)?,
        )
    }
}

fn required<'a>(descriptor: &'a Map<String, Value>, key: &'static str) -> Result<&'a str, ConfigError> {
    match descriptor.get(key) {
        Some(Value::String(column)) => Ok(column),
        Some(_) => Err(ConfigError::Invalid {
            key,
            reason: "must be a string",
        }),
        None => Err(ConfigError::Invalid {
            key,
            reason: "is missing",
        }),
    }
}

fn non_empty(key: &'static str, column: String) -> Result<String, ConfigError> {
    if column.is_empty() {
        return Err(ConfigError::Invalid {
            key,
            reason: "must not be empty",
        });
    }

    Ok(column)
}
