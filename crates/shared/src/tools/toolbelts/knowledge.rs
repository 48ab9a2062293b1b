// crates/shared/src/tools/toolbelts/knowledge.rs

use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::register_toolbelt;

/// Placeholder for a knowledge base. Echoes the query back until a real
/// backend is wired in.
#[derive(Default)]
pub struct Knowledge;

register_toolbelt! {
    Knowledge {
        description: "Look things up in the knowledge base",
        tools: {
            "search_knowledge" => search_knowledge {
                description: "Search knowledge base.",
                params: [
                    "query": "string" => "What to search for"
                ]
            }
        }
    }
}

impl Knowledge {
    fn search_knowledge(&self, args: &Value) -> Result<String> {
        let query = args["query"]
            .as_str()
            .ok_or_else(|| anyhow!("Missing required argument 'query'"))?;
        Ok(search_knowledge(query))
    }
}

pub fn search_knowledge(query: &str) -> String {
    format!("Knowledge results for: {}", query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn echoes_query() {
        assert_eq!(search_knowledge("cats"), "Knowledge results for: cats");
    }

    #[test]
    fn handler_reads_query_argument() {
        let out = search_knowledge_handler(&json!({ "query": "cats" })).unwrap();
        assert_eq!(out, "Knowledge results for: cats");
    }

    #[test]
    fn missing_query_is_an_error() {
        let err = search_knowledge_handler(&json!({})).unwrap_err();
        assert!(err.to_string().contains("query"));

        assert!(search_knowledge_handler(&json!({ "query": 42 })).is_err());
    }

    #[test]
    fn query_is_required_in_schema() {
        let schema = TOOL_SCHEMAS[0].input_schema();
        assert_eq!(schema["required"], json!(["query"]));
    }
}
