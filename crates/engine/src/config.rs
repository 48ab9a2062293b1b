use anyhow::{Context, Result};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";
pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Bedrock model id. Passed through untouched, `None` when unset.
    pub model_id: Option<String>,
    pub region: String,
    /// Overrides the regional Bedrock runtime endpoint.
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub system_prompt: String,
    pub max_iterations: usize,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_id: None,
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            api_key: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
            None => defaults.port,
        };

        let max_iterations = match lookup("AGENT_MAX_ITERATIONS") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("AGENT_MAX_ITERATIONS must be a positive integer, got '{}'", raw))?,
            None => defaults.max_iterations,
        };
        if max_iterations == 0 {
            anyhow::bail!("AGENT_MAX_ITERATIONS must be at least 1");
        }

        let region = lookup("AWS_REGION")
            .or_else(|| lookup("AWS_DEFAULT_REGION"))
            .unwrap_or(defaults.region);

        Ok(Self {
            model_id: lookup("BEDROCK_MODEL_ID"),
            region,
            endpoint: lookup("BEDROCK_ENDPOINT").filter(|s| !s.is_empty()),
            api_key: lookup("AWS_BEARER_TOKEN_BEDROCK").filter(|s| !s.is_empty()),
            system_prompt: defaults.system_prompt,
            max_iterations,
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn endpoint(&self) -> String {
        match &self.endpoint {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }
}
