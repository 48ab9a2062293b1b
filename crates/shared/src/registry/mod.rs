use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::schemas::{ToolDefinition, ToolHandler, ToolSchema};
use crate::tools::toolbelts::{clock, knowledge};
use crate::tools::{FunctionTool, Tool};

/// Named tools offered to the model, kept in registration order.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in toolbelt.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register_toolbelt(clock::TOOLBELT_DESCRIPTION, clock::TOOL_ENTRIES, &clock::TOOL_SCHEMAS)?;
        registry.register_toolbelt(knowledge::TOOLBELT_DESCRIPTION, knowledge::TOOL_ENTRIES, &knowledge::TOOL_SCHEMAS)?;
        Ok(registry)
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<()> {
        self.register_arc(Arc::new(tool))
    }

    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            anyhow::bail!("Tool '{}' is already registered", name);
        }

        tracing::debug!(tool = %name, "registered tool");
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Pairs each declared schema with its handler from `entries`.
    pub fn register_toolbelt(
        &mut self,
        description: &str,
        entries: &[(&str, ToolHandler)],
        schemas: &[ToolSchema],
    ) -> Result<()> {
        tracing::debug!(toolbelt = description, tools = schemas.len(), "registering toolbelt");

        for schema in schemas {
            let handler = entries
                .iter()
                .find(|(name, _)| *name == schema.name)
                .map(|(_, handler)| *handler)
                .ok_or_else(|| anyhow::anyhow!("No handler for tool '{}'", schema.name))?;

            self.register(FunctionTool::new(schema.clone(), handler))?;
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| Arc::clone(&self.tools[i]))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn invoke(&self, name: &str, args: &Value) -> Result<String> {
        self.get(name)
            .ok_or_else(|| anyhow::anyhow!("Tool '{}' not found", name))
            .and_then(|tool| tool.invoke(args))
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }
}
