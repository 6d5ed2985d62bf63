//! Trigger actions invoked by the host.
//!
//! The host calls into the extension with a string identifier.  Only two
//! identifiers mean anything; every other value is ignored.

use serde::Serialize;

/// A workflow the host can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerAction {
    /// Ask for a free-text instruction and apply it to the document.
    Format,
    /// Edit the backend preset and API key.
    Setting,
}

impl TriggerAction {
    /// Parses a host action identifier.
    ///
    /// Matching is exact; `None` means the action is not handled.
    pub fn parse(action_id: &str) -> Option<Self> {
        match action_id {
            "format" => Some(TriggerAction::Format),
            "setting" => Some(TriggerAction::Setting),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TriggerAction::Format => "format",
            TriggerAction::Setting => "setting",
        }
    }
}

impl std::fmt::Display for TriggerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
