//! JSON serialization of the output tree.
//!
//! Elements serialize as `{ "tag", "props", "children" }` (children `null` for childless void
//! elements) and text as a bare string. Pretty-printed unless `pretty=false` is passed.

use crate::error::FormatError;
use crate::format::Format;
use crate::output::OutputNode;
use std::collections::HashMap;

pub fn to_json(nodes: &[OutputNode], pretty: bool) -> Result<String, FormatError> {
    let result = if pretty {
        serde_json::to_string_pretty(nodes)
    } else {
        serde_json::to_string(nodes)
    };
    result.map_err(|e| FormatError::SerializationError(format!("JSON serialization failed: {e}")))
}

#[derive(Debug, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Output tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, nodes: &[OutputNode]) -> Result<String, FormatError> {
        to_json(nodes, true)
    }

    fn serialize_with_options(
        &self,
        nodes: &[OutputNode],
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let pretty = options
            .get("pretty")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);
        to_json(nodes, pretty)
    }
}
