use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::agent::client::ModelClient;
use crate::agent::signing::SigV4Signer;
use crate::agent::types::{ConverseRequest, ConverseResponse};
use crate::config::Config;
use crate::error::{AgentError, Result};

/// Model used when no id is configured.
pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

/// How requests to the Bedrock runtime are authenticated.
pub enum BedrockAuth {
    /// Bedrock API key sent as a bearer token.
    Bearer(String),
    /// SigV4 with credentials from the AWS provider chain.
    SigV4(SigV4Signer),
    Anonymous,
}

/// Bedrock runtime client for the Converse API.
pub struct BedrockClient {
    client: Client,
    endpoint: String,
    auth: BedrockAuth,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "Message")]
    message: Option<String>,
}

impl BedrockClient {
    pub fn new(endpoint: impl Into<String>, auth: BedrockAuth) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("parv/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            auth,
        })
    }

    /// A configured API key wins; otherwise requests are signed with the
    /// default AWS credential chain (env, profile, container, instance role).
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let auth = match &config.api_key {
            Some(key) => BedrockAuth::Bearer(key.clone()),
            None => {
                let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(config.region.clone()))
                    .load()
                    .await;

                match sdk_config.credentials_provider() {
                    Some(provider) => BedrockAuth::SigV4(SigV4Signer::new(provider, config.region.clone())),
                    None => {
                        tracing::warn!("No AWS credential provider found, Bedrock requests will be unsigned");
                        BedrockAuth::Anonymous
                    }
                }
            }
        };

        Self::new(config.endpoint(), auth)
    }

    pub fn converse_url(&self, model_id: &str) -> String {
        format!("{}/model/{}/converse", self.endpoint, urlencoding::encode(model_id))
    }
}

#[async_trait]
impl ModelClient for BedrockClient {
    async fn converse(&self, request: ConverseRequest) -> Result<ConverseResponse> {
        let model_id = request
            .model_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_MODEL_ID);

        let url = self.converse_url(model_id);
        let body = serde_json::to_vec(&request)?;

        let mut builder = self.client.post(&url).header(CONTENT_TYPE, "application/json");
        match &self.auth {
            BedrockAuth::Bearer(key) => builder = builder.bearer_auth(key),
            BedrockAuth::SigV4(signer) => {
                let signed = signer
                    .sign("POST", &url, &[("content-type", "application/json")], &body)
                    .await?;
                for (name, value) in signed {
                    builder = builder.header(name, value);
                }
            }
            BedrockAuth::Anonymous => {}
        }

        let response = builder.body(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            return Err(AgentError::api(status, message));
        }

        Ok(response.json::<ConverseResponse>().await?)
    }

    fn name(&self) -> &str {
        "bedrock"
    }
}
