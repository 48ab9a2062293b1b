pub mod bedrock;
pub mod client;
pub mod signing;
pub mod types;

use std::fmt;
use std::sync::Arc;

use parv_shared::ToolRegistry;

use crate::config::DEFAULT_MAX_ITERATIONS;
use crate::error::{AgentError, Result};
pub use bedrock::{BedrockAuth, BedrockClient, DEFAULT_MODEL_ID};
pub use client::ModelClient;
use types::{ContentBlock, ConverseRequest, Message, Role, StopReason, SystemContent, ToolConfig, ToolResult, Usage};

/// A model bound to a tool set and a system prompt.
pub struct Agent {
    model: Option<String>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
    client: Arc<dyn ModelClient>,
    max_iterations: usize,
}

/// Final assistant turn of an invocation.
#[derive(Debug, Clone)]
pub struct AgentResponse {
    pub message: Message,
    pub stop_reason: StopReason,
    pub usage: Usage,
}

impl fmt::Display for AgentResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message.text())
    }
}

impl Agent {
    pub fn new(
        model: Option<String>,
        tools: Arc<ToolRegistry>,
        system_prompt: impl Into<String>,
        client: Arc<dyn ModelClient>,
    ) -> Self {
        Self {
            model,
            tools,
            system_prompt: system_prompt.into(),
            client,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Run the prompt to completion, executing tool calls until the model
    /// answers without requesting any.
    pub async fn invoke(&self, prompt: &str) -> Result<AgentResponse> {
        let mut messages = vec![Message::user(prompt)];
        let mut usage = Usage::default();

        for iteration in 1..=self.max_iterations {
            let request = self.build_request(messages.clone());
            tracing::debug!(iteration, client = self.client.name(), "calling model");

            let response = self.client.converse(request).await?;
            usage += response.usage;

            let message = response.output.message.ok_or(AgentError::EmptyResponse)?;

            if response.stop_reason != StopReason::ToolUse {
                tracing::debug!(
                    iteration,
                    stop_reason = ?response.stop_reason,
                    total_tokens = usage.total_tokens,
                    "model finished"
                );
                return Ok(AgentResponse {
                    message,
                    stop_reason: response.stop_reason,
                    usage,
                });
            }

            let results = self.run_tools(&message);
            if results.is_empty() {
                tracing::warn!(iteration, "tool_use stop without tool calls, treating as final answer");
                return Ok(AgentResponse {
                    message,
                    stop_reason: response.stop_reason,
                    usage,
                });
            }

            messages.push(message);
            messages.push(Message {
                role: Role::User,
                content: results,
            });
        }

        Err(AgentError::MaxIterations(self.max_iterations))
    }

    fn build_request(&self, messages: Vec<Message>) -> ConverseRequest {
        let tool_config = if self.tools.is_empty() {
            None
        } else {
            Some(ToolConfig {
                tools: self.tools.definitions(),
            })
        };

        ConverseRequest {
            model_id: self.model.clone(),
            messages,
            system: vec![SystemContent {
                text: self.system_prompt.clone(),
            }],
            tool_config,
        }
    }

    /// Tool failures go back to the model as error results.
    fn run_tools(&self, message: &Message) -> Vec<ContentBlock> {
        message
            .tool_uses()
            .map(|call| {
                tracing::info!(tool = %call.name, args = %call.input, "calling tool");

                let result = match self.tools.invoke(&call.name, &call.input) {
                    Ok(output) => ToolResult::success(&call.tool_use_id, output),
                    Err(e) => {
                        tracing::warn!(tool = %call.name, error = %e, "tool failed");
                        ToolResult::error(&call.tool_use_id, format!("Error: {}", e))
                    }
                };
                ContentBlock::ToolResult(result)
            })
            .collect()
    }
}
