pub mod macros;
pub mod registry;
pub mod schemas;
pub mod tools;

pub use registry::ToolRegistry;
pub use schemas::{ParameterSchema, ToolDefinition, ToolSchema};
pub use tools::{FunctionTool, Tool};
