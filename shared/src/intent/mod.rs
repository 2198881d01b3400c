//! Order modification intents
//!
//! Transient commands produced by the phrase extractor or by assistant
//! directives, consumed by the command applicator. Names are raw user or
//! model text; they are resolved against the menu only when applied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One requested item: quantity plus the name as it was written
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRequest {
    /// Always ≥ 1
    pub quantity: u32,
    pub raw_name: String,
}

impl ItemRequest {
    pub fn new(quantity: u32, raw_name: impl Into<String>) -> Self {
        Self {
            quantity,
            raw_name: raw_name.into(),
        }
    }

    /// Quantity 1
    pub fn one(raw_name: impl Into<String>) -> Self {
        Self::new(1, raw_name)
    }
}

/// Cart modification command
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModificationCommand {
    Add {
        items: Vec<ItemRequest>,
    },
    /// Removal is per unit; `quantity` on each request is informational
    Remove {
        items: Vec<ItemRequest>,
    },
    /// Evict every `remove` line, then add `add`
    Replace {
        remove: Vec<String>,
        add: ItemRequest,
    },
}

impl ModificationCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Add { .. } => CommandKind::Add,
            Self::Remove { .. } => CommandKind::Remove,
            Self::Replace { .. } => CommandKind::Replace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Add,
    Remove,
    Replace,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Replace => "replace",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_tagged_serde() {
        let cmd = ModificationCommand::Add {
            items: vec![ItemRequest::new(2, "Bruschetta")],
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "add");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][0]["raw_name"], "Bruschetta");
    }

    #[test]
    fn test_replace_kind() {
        let cmd = ModificationCommand::Replace {
            remove: vec!["Bruschetta".into()],
            add: ItemRequest::one("Calamari"),
        };
        assert_eq!(cmd.kind(), CommandKind::Replace);
        assert_eq!(cmd.kind().to_string(), "replace");
    }
}
