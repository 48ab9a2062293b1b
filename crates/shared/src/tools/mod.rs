use anyhow::Result;
use serde_json::Value;

use crate::schemas::{ToolDefinition, ToolHandler, ToolSchema};

pub mod toolbelts;

/// A callable the model may request during a turn.
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema for the arguments object.
    fn input_schema(&self) -> Value;

    fn invoke(&self, args: &Value) -> Result<String>;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.input_schema())
    }
}

/// A toolbelt entry: a declared schema paired with its generated handler.
#[derive(Debug, Clone)]
pub struct FunctionTool {
    schema: ToolSchema,
    handler: ToolHandler,
}

impl FunctionTool {
    pub fn new(schema: ToolSchema, handler: ToolHandler) -> Self {
        Self { schema, handler }
    }
}

impl Tool for FunctionTool {
    fn name(&self) -> &str {
        self.schema.name
    }

    fn description(&self) -> &str {
        self.schema.description
    }

    fn input_schema(&self) -> Value {
        self.schema.input_schema()
    }

    fn invoke(&self, args: &Value) -> Result<String> {
        (self.handler)(args)
    }
}
