use std::sync::Arc;

use anyhow::Result;
use parv_shared::ToolRegistry;

use crate::agent::{Agent, BedrockClient, ModelClient};
use crate::config::Config;

/// Immutable state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tools: Arc<ToolRegistry>,
    pub client: Arc<dyn ModelClient>,
}

impl AppState {
    pub fn new(config: Config, tools: ToolRegistry, client: Arc<dyn ModelClient>) -> Self {
        Self {
            config: Arc::new(config),
            tools: Arc::new(tools),
            client,
        }
    }

    /// Built-in tools talking to Bedrock.
    pub async fn from_config(config: Config) -> Result<Self> {
        let tools = ToolRegistry::builtin()?;
        let client = Arc::new(BedrockClient::from_config(&config).await?);
        Ok(Self::new(config, tools, client))
    }

    /// Fresh agent for one invocation.
    pub fn build_agent(&self) -> Agent {
        Agent::new(
            self.config.model_id.clone(),
            Arc::clone(&self.tools),
            self.config.system_prompt.clone(),
            Arc::clone(&self.client),
        )
        .with_max_iterations(self.config.max_iterations)
    }
}
