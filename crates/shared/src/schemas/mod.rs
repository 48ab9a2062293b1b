// crates/shared/src/schemas/mod.rs
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterSchema>,
}

#[derive(Debug, Clone)]
pub struct ParameterSchema {
    pub name: &'static str,
    pub type_name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// Tool definition as sent to the model in a Converse `toolConfig`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ToolDefinition {
    #[serde(rename = "toolSpec")]
    pub tool_spec: ToolSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct InputSchema {
    pub json: Value,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, schema: Value) -> Self {
        Self {
            tool_spec: ToolSpec {
                name: name.into(),
                description: description.into(),
                input_schema: InputSchema { json: schema },
            },
        }
    }
}

impl ToolSchema {
    /// JSON Schema object describing the tool's arguments.
    pub fn input_schema(&self) -> Value {
        let mut properties = json!({});
        let mut required = vec![];

        for param in &self.parameters {
            properties[param.name] = json!({
                "type": param.type_name,
                "description": param.description
            });
            if param.required {
                required.push(param.name);
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }

    pub fn to_definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name, self.description, self.input_schema())
    }
}

pub type ToolHandler = fn(&Value) -> anyhow::Result<String>;

#[cfg(test)]
mod tests {
    use super::*;

    fn search_schema() -> ToolSchema {
        ToolSchema {
            name: "search_knowledge",
            description: "Search knowledge base.",
            parameters: vec![ParameterSchema {
                name: "query",
                type_name: "string",
                description: "What to look up",
                required: true,
            }],
        }
    }

    #[test]
    fn input_schema_lists_required_params() {
        let schema = search_schema().input_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["query"]["type"], "string");
        assert_eq!(schema["required"], json!(["query"]));
    }

    #[test]
    fn parameterless_tool_has_empty_object_schema() {
        let schema = ToolSchema {
            name: "get_current_time",
            description: "Get the current UTC time.",
            parameters: vec![],
        };

        assert_eq!(
            schema.input_schema(),
            json!({ "type": "object", "properties": {}, "required": [] })
        );
    }

    #[test]
    fn definition_serializes_in_converse_shape() {
        let value = serde_json::to_value(search_schema().to_definition()).unwrap();

        assert_eq!(value["toolSpec"]["name"], "search_knowledge");
        assert_eq!(value["toolSpec"]["description"], "Search knowledge base.");
        assert_eq!(value["toolSpec"]["inputSchema"]["json"]["type"], "object");
    }
}
