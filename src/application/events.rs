//! Build events delivered to the caller's observer

/// Progress of a build or watch session, for NDJSON or human output
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BuildEvent {
    /// A one-shot compile of a unit began
    UnitStarted { label: String, files: usize },
    /// A unit (or one asset file) compiled successfully
    UnitBuilt { label: String, output: String },
    /// A unit (or one asset file) failed to compile
    UnitFailed { label: String, message: String },
    /// A continuous compiler was started
    WatchStarted { label: String, pid: u32 },
    /// A tracked process exited on its own
    ProcessExited { label: String, code: Option<i32> },
    /// Type-checking was skipped because the config file is absent
    TypeCheckSkipped { config: String },
    /// The type-checker was started or run
    TypeCheckStarted { config: String },
}

impl BuildEvent {
    /// Convert to JSON string with a "command" field included
    pub fn to_json(&self, command: &str) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!(command));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
