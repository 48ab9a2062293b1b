use async_trait::async_trait;

use crate::agent::types::{ConverseRequest, ConverseResponse};
use crate::error::Result;

/// A model endpoint speaking the Converse request/response shape.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn converse(&self, request: ConverseRequest) -> Result<ConverseResponse>;

    fn name(&self) -> &str;
}
