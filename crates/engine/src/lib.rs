pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;

pub use agent::{Agent, AgentResponse, ModelClient};
pub use config::Config;
pub use error::AgentError;
pub use state::AppState;
