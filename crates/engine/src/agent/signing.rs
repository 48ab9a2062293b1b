use std::time::{Duration, SystemTime};

use aws_credential_types::Credentials;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningParams, SigningSettings};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use tokio::sync::RwLock;

use crate::error::{AgentError, Result};

const SERVICE: &str = "bedrock";
/// Credentials this close to expiry are fetched again.
const REFRESH_WINDOW: Duration = Duration::from_secs(300);

/// SigV4 signer backed by an AWS credential provider.
pub struct SigV4Signer {
    provider: SharedCredentialsProvider,
    region: String,
    cached: RwLock<Option<Credentials>>,
}

impl SigV4Signer {
    pub fn new(provider: SharedCredentialsProvider, region: impl Into<String>) -> Self {
        Self {
            provider,
            region: region.into(),
            cached: RwLock::new(None),
        }
    }

    pub fn with_credentials(credentials: Credentials, region: impl Into<String>) -> Self {
        Self::new(SharedCredentialsProvider::new(credentials), region)
    }

    async fn credentials(&self) -> Result<Credentials> {
        if let Some(credentials) = self.cached.read().await.as_ref() {
            if is_fresh(credentials) {
                return Ok(credentials.clone());
            }
        }

        let fresh = self
            .provider
            .provide_credentials()
            .await
            .map_err(|e| AgentError::Credentials(e.to_string()))?;
        tracing::debug!(expiry = ?fresh.expiry(), "refreshed AWS credentials");

        *self.cached.write().await = Some(fresh.clone());
        Ok(fresh)
    }

    /// Headers (`authorization`, `x-amz-date`, optionally
    /// `x-amz-security-token`) to add to the request.
    pub async fn sign(
        &self,
        method: &str,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<Vec<(String, String)>> {
        let identity: Identity = self.credentials().await?.into();

        let params: SigningParams<'_> = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(SERVICE)
            .time(SystemTime::now())
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| AgentError::Signing(e.to_string()))?
            .into();

        let signable = SignableRequest::new(method, url, headers.iter().copied(), SignableBody::Bytes(body))
            .map_err(|e| AgentError::Signing(e.to_string()))?;

        let (instructions, _signature) = sign(signable, &params)
            .map_err(|e| AgentError::Signing(e.to_string()))?
            .into_parts();

        Ok(instructions
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect())
    }
}

fn is_fresh(credentials: &Credentials) -> bool {
    match credentials.expiry() {
        Some(expiry) => expiry
            .duration_since(SystemTime::now())
            .map(|left| left > REFRESH_WINDOW)
            .unwrap_or(false),
        None => true,
    }
}
