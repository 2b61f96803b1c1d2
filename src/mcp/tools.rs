//! Tool definitions for Sheetbridge

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The single registered tool identifier
pub const EXPORT_TOOL: &str = "export_to_sheet";

/// All tool definitions: (name, description, input schema)
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[(
    EXPORT_TOOL,
    "Export rows of data into a Google Sheet",
    r#"{
        "type": "object",
        "properties": {
            "rows": {
                "type": "array",
                "description": "Array of rows to append to the sheet (each item is an array of cell values)"
            }
        },
        "required": ["rows"]
    }"#,
)];

/// A single tool entry in the discovery payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Top-level discovery payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerDescriptor {
    pub name: String,
    pub description: String,
    pub tools: Vec<ToolDefinition>,
}

pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}

/// Static descriptor served at the discovery endpoint
pub fn descriptor() -> ServerDescriptor {
    ServerDescriptor {
        name: "Sheetbridge".to_string(),
        description: "Export structured agent data to Google Sheets".to_string(),
        tools: get_tool_definitions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_declares_exactly_one_tool() {
        let descriptor = descriptor();
        assert_eq!(descriptor.tools.len(), 1);
        assert_eq!(descriptor.tools[0].name, EXPORT_TOOL);
    }

    #[test]
    fn test_schema_requires_rows_array() {
        let tools = get_tool_definitions();
        let schema = &tools[0].input_schema;
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["rows"]["type"], "array");
        assert_eq!(schema["required"], json!(["rows"]));
    }

    #[test]
    fn test_all_schemas_parse() {
        for (name, _, schema) in TOOL_DEFINITIONS {
            assert!(
                serde_json::from_str::<Value>(schema).is_ok(),
                "schema for {name} does not parse"
            );
        }
    }
}
