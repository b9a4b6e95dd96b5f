//! Clause tables authored as data.
//!
//! A table is a list of `pattern`/`result` entries in YAML or JSON:
//!
//! ```yaml
//! clauses:
//!   - pattern: { status: { $regex: "^5" } }
//!     result: retry
//!   - pattern: { $any: true }
//!     result: ignore
//! ```
//!
//! Single-key objects whose key starts with `$` are directives:
//!
//! - `{"$any": ...}` - wildcard (the value is ignored)
//! - `{"$regex": "<pattern>"}` - regex leaf
//! - `{"$type": "<name>"}` - builtin class (`number`, `string`, `array`, ...)
//! - `{"$nan": ...}` - the not-a-number marker
//!
//! Every other value is taken literally. Results are returned as constants.

use crate::dispatch::{Dispatcher, DispatcherBuilder};
use crate::value::{classes, Value};
use serde::{Deserialize, Serialize};

/// Errors raised while loading a clause table.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("clause table has no clauses")]
    Empty,
    #[error("clauses[{index}].pattern: {message}")]
    InvalidPattern { index: usize, message: String },
}

/// One clause: a pattern and the constant it produces.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ClauseConfig {
    pub pattern: serde_json::Value,
    #[serde(default)]
    pub result: serde_json::Value,
}

/// A clause table in declaration order.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TableConfig {
    pub clauses: Vec<ClauseConfig>,
}

impl TableConfig {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clauses.is_empty() {
            return Err(ConfigError::Empty);
        }
        for (index, clause) in self.clauses.iter().enumerate() {
            pattern_from_json(&clause.pattern)
                .map_err(|message| ConfigError::InvalidPattern { index, message })?;
        }
        Ok(())
    }

    /// Compile the table.
    pub fn build(&self) -> Result<Dispatcher, ConfigError> {
        let mut builder = DispatcherBuilder::new();
        for (index, clause) in self.clauses.iter().enumerate() {
            let pattern = pattern_from_json(&clause.pattern)
                .map_err(|message| ConfigError::InvalidPattern { index, message })?;
            builder = builder.clause(pattern, Value::from(clause.result.clone()));
        }
        Ok(builder.build())
    }
}

/// Convert a JSON pattern into a pattern value, expanding directives.
pub fn pattern_from_json(json: &serde_json::Value) -> Result<Value, String> {
    use serde_json::Value as Json;

    match json {
        Json::Array(items) => items
            .iter()
            .map(pattern_from_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::from),
        Json::Object(entries) => {
            if entries.len() == 1 {
                if let Some((key, arg)) = entries.iter().next() {
                    if let Some(directive) = key.strip_prefix('$') {
                        return directive_from_json(directive, arg);
                    }
                }
            }
            entries
                .iter()
                .map(|(k, v)| pattern_from_json(v).map(|p| (k.clone(), p)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::map)
        }
        other => Ok(Value::from(other.clone())),
    }
}

fn directive_from_json(directive: &str, arg: &serde_json::Value) -> Result<Value, String> {
    match directive {
        "any" => Ok(Value::Wildcard),
        "nan" => Ok(Value::nan()),
        "regex" => {
            let source = arg
                .as_str()
                .ok_or_else(|| "$regex expects a string".to_string())?;
            Value::regex(source).map_err(|e| format!("invalid $regex: {e}"))
        }
        "type" => {
            let name = arg
                .as_str()
                .ok_or_else(|| "$type expects a string".to_string())?;
            classes::lookup(name)
                .map(Value::Class)
                .ok_or_else(|| format!("unknown $type '{name}'"))
        }
        other => Err(format!("unknown directive '${other}'")),
    }
}
