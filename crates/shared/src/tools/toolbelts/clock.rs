// crates/shared/src/tools/toolbelts/clock.rs

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::register_toolbelt;

#[derive(Default)]
pub struct Clock;

register_toolbelt! {
    Clock {
        description: "Read the system clock",
        tools: {
            "get_current_time" => get_current_time {
                description: "Get the current UTC time.",
                params: []
            }
        }
    }
}

impl Clock {
    fn get_current_time(&self, _args: &Value) -> Result<String> {
        Ok(current_time())
    }
}

/// Current UTC instant as ISO-8601 with an explicit `+00:00` offset.
pub fn current_time() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}
