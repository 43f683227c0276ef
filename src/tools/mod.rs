//! Built-in tools.

pub mod fetch;
pub mod save;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::error::ToolError;
use crate::protocol::json_type;
use crate::registry::ToolRegistry;

pub use fetch::{FetchUrl, FetchUrlParams};
pub use save::{SaveFile, SaveFileParams};

/// Registry holding `fetch_url` and `save_file`.
pub fn default_registry(config: &Config) -> reqwest::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry
        .register(FetchUrl::new(config)?)
        .register(SaveFile::new(config));
    Ok(registry)
}

/// Deserialize a params object into a tool's typed parameters.
pub(crate) fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, ToolError> {
    if !params.is_object() {
        return Err(ToolError::InvalidParams(format!(
            "params must be an object, got {}",
            json_type(&params)
        )));
    }
    serde_json::from_value(params).map_err(|e| ToolError::InvalidParams(e.to_string()))
}
