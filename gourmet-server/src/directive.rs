//! `ACTION:` directive scanner
//!
//! Assistant replies may embed cart instructions:
//!
//! ```text
//! ACTION: ADD_ITEM <qty> <name>
//! ACTION: REMOVE_ITEM <name>
//! ACTION: REPLACE_ITEM <old> <new>
//! ```
//!
//! A directive may start mid-line and runs to the end of that line. The
//! keyword is case-insensitive and may be wrapped in `**` or `_` emphasis. A keyword with no payload, or an unknown
//! keyword, is left alone as plain text. Parsing and stripping are separate
//! pure functions over the same pattern.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use shared::intent::{ItemRequest, ModificationCommand};

use crate::catalog::Catalog;
use crate::intent::parse_item;
use crate::resolver::{resolve, resolve_exact};

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:[*_]+[ \t]*|\b)ACTION:[ \t]*(ADD_ITEM|REMOVE_ITEM|REPLACE_ITEM)[ \t]+([^\r\n]*[^\s])",
    )
    .unwrap()
});

static LEADING_QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(.+)$").unwrap());

static REPLACE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+with\s+|\s*->\s*|\s*=>\s*|\s*\|\s*|\s*,\s*").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Directive {
    /// `quantity` is 0 when the written number was 0 or unparseable
    AddItem { quantity: u32, name: String },
    /// Quantity is informational; removal is one unit
    RemoveItem { quantity: u32, name: String },
    ReplaceItem { payload: ReplacePayload },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacePayload {
    /// Explicit separator found
    Split { old: String, new: String },
    /// No separator; split point is chosen against the catalog
    Unsplit(String),
}

/// All directives in order of appearance
pub fn parse_directives(text: &str) -> Vec<Directive> {
    DIRECTIVE
        .captures_iter(text)
        .filter_map(|caps| {
            let keyword = caps.get(1)?.as_str().to_ascii_uppercase();
            let payload = clean_payload(caps.get(2)?.as_str());
            if payload.is_empty() {
                return None;
            }
            let directive = match keyword.as_str() {
                "ADD_ITEM" => {
                    let (quantity, name) = split_quantity(&payload);
                    Directive::AddItem { quantity, name }
                }
                "REMOVE_ITEM" => {
                    let (quantity, name) = split_quantity(&payload);
                    Directive::RemoveItem { quantity, name }
                }
                _ => Directive::ReplaceItem {
                    payload: split_replace(&payload),
                },
            };
            Some(directive)
        })
        .collect()
}

/// Remove every directive, drop lines left empty, collapse runs of blank
/// lines and trim the result. Text without directives is returned unchanged.
pub fn strip_directives(text: &str) -> String {
    if !DIRECTIVE.is_match(text) {
        return text.to_string();
    }

    let mut kept: Vec<String> = Vec::new();
    for line in text.split('\n') {
        if DIRECTIVE.is_match(line) {
            let stripped = DIRECTIVE.replace_all(line, "");
            let stripped = stripped.trim_end();
            if !stripped.trim().is_empty() {
                kept.push(stripped.to_string());
            }
        } else if line.trim().is_empty() {
            if kept.last().is_some_and(|prev| !prev.trim().is_empty()) {
                kept.push(String::new());
            }
        } else {
            kept.push(line.to_string());
        }
    }
    kept.join("\n").trim().to_string()
}

/// Convert directives into commands. Unsplittable replace payloads are dropped.
pub fn to_commands(directives: &[Directive], catalog: &Catalog) -> Vec<ModificationCommand> {
    directives
        .iter()
        .filter_map(|directive| match directive {
            Directive::AddItem { quantity, name } => {
                if *quantity == 0 {
                    tracing::info!(target: "assistant", item = %name, "Dropped ADD_ITEM with zero quantity");
                    return None;
                }
                Some(ModificationCommand::Add {
                    items: vec![ItemRequest::new(*quantity, name.clone())],
                })
            }
            Directive::RemoveItem { quantity, name } => Some(ModificationCommand::Remove {
                items: vec![ItemRequest::new((*quantity).max(1), name.clone())],
            }),
            Directive::ReplaceItem { payload } => {
                let (old, new) = match payload {
                    ReplacePayload::Split { old, new } => (old.clone(), new.clone()),
                    ReplacePayload::Unsplit(raw) => match choose_split(raw, catalog) {
                        Some(pair) => pair,
                        None => {
                            tracing::info!(target: "assistant", payload = %raw, "Dropped unsplittable REPLACE_ITEM");
                            return None;
                        }
                    },
                };
                let old = parse_item(&old).map_or(old, |r| r.raw_name);
                let add = parse_item(&new).unwrap_or_else(|| ItemRequest::one(new));
                Some(ModificationCommand::Replace {
                    remove: vec![old],
                    add,
                })
            }
        })
        .collect()
}

/// First whitespace split whose halves both resolve exactly, else both fuzzily
fn choose_split(raw: &str, catalog: &Catalog) -> Option<(String, String)> {
    let words: Vec<&str> = raw.split_whitespace().collect();
    let splits: Vec<(String, String)> = (1..words.len())
        .map(|i| (words[..i].join(" "), words[i..].join(" ")))
        .collect();

    splits
        .iter()
        .find(|(old, new)| {
            resolve_exact(old, catalog).is_some() && resolve_exact(new, catalog).is_some()
        })
        .or_else(|| {
            splits.iter().find(|(old, new)| {
                resolve(old, catalog).is_found() && resolve(new, catalog).is_found()
            })
        })
        .cloned()
}

fn clean_payload(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '[' | ']' | '"' | '`' | '*' | '_'))
        .collect::<String>()
        .trim()
        .trim_end_matches(['.', '!', ';'])
        .trim()
        .to_string()
}

fn split_quantity(payload: &str) -> (u32, String) {
    match LEADING_QUANTITY.captures(payload) {
        Some(caps) => (
            caps[1].parse().unwrap_or(0),
            caps[2].trim().to_string(),
        ),
        None => (1, payload.to_string()),
    }
}

fn split_replace(payload: &str) -> ReplacePayload {
    match REPLACE_SEPARATOR.find(payload) {
        Some(m) if m.start() > 0 && m.end() < payload.len() => ReplacePayload::Split {
            old: payload[..m.start()].trim().to_string(),
            new: payload[m.end()..].trim().to_string(),
        },
        _ => ReplacePayload::Unsplit(payload.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    #[test]
    fn test_mid_line_directive_parse_and_strip() {
        let reply = "Sure! ACTION: ADD_ITEM 1 Tiramisu\nEnjoy!";
        assert_eq!(
            parse_directives(reply),
            vec![Directive::AddItem {
                quantity: 1,
                name: "Tiramisu".into()
            }]
        );
        assert_eq!(strip_directives(reply), "Sure!\nEnjoy!");

        let commands = to_commands(&parse_directives(reply), &create_test_catalog());
        assert_eq!(
            commands,
            vec![ModificationCommand::Add {
                items: vec![ItemRequest::new(1, "Tiramisu")]
            }]
        );
    }

    #[test]
    fn test_no_directives_is_verbatim() {
        let reply = "  Our salmon is wonderful today.\n\nWould you like some?  ";
        assert!(parse_directives(reply).is_empty());
        assert_eq!(strip_directives(reply), reply);
    }

    #[test]
    fn test_all_three_kinds_in_any_order() {
        let reply = "ACTION: REMOVE_ITEM Cheesecake\n\
                     action: replace_item French Fries with Caesar Salad\n\
                     ACTION: ADD_ITEM 2 Grilled Salmon\n\
                     Done!";
        assert_eq!(
            parse_directives(reply),
            vec![
                Directive::RemoveItem {
                    quantity: 1,
                    name: "Cheesecake".into()
                },
                Directive::ReplaceItem {
                    payload: ReplacePayload::Split {
                        old: "French Fries".into(),
                        new: "Caesar Salad".into()
                    }
                },
                Directive::AddItem {
                    quantity: 2,
                    name: "Grilled Salmon".into()
                },
            ]
        );
        assert_eq!(strip_directives(reply), "Done!");
    }

    #[test]
    fn test_add_quantity_optional() {
        assert_eq!(
            parse_directives("ACTION: ADD_ITEM Chocolate Cake"),
            vec![Directive::AddItem {
                quantity: 1,
                name: "Chocolate Cake".into()
            }]
        );
    }

    #[test]
    fn test_bracketed_payload() {
        assert_eq!(
            parse_directives("ACTION: ADD_ITEM [2] [Mozzarella Sticks]"),
            vec![Directive::AddItem {
                quantity: 2,
                name: "Mozzarella Sticks".into()
            }]
        );
    }

    #[test]
    fn test_empty_payload_and_unknown_keyword_stay_as_text() {
        let reply = "ACTION: ADD_ITEM   \nACTION: DANCE now\nok";
        assert!(parse_directives(reply).is_empty());
        assert_eq!(strip_directives(reply), reply);
    }

    #[test]
    fn test_zero_quantity_add_dropped_on_conversion() {
        let directives = parse_directives("ACTION: ADD_ITEM 0 Tiramisu");
        assert_eq!(directives.len(), 1);
        assert!(to_commands(&directives, &create_test_catalog()).is_empty());
        assert_eq!(strip_directives("ACTION: ADD_ITEM 0 Tiramisu"), "");
    }

    #[test]
    fn test_replace_separators() {
        for payload in [
            "Bruschetta with Calamari",
            "Bruschetta -> Calamari",
            "Bruschetta => Calamari",
            "Bruschetta | Calamari",
            "Bruschetta, Calamari",
        ] {
            let text = format!("ACTION: REPLACE_ITEM {payload}");
            assert_eq!(
                parse_directives(&text),
                vec![Directive::ReplaceItem {
                    payload: ReplacePayload::Split {
                        old: "Bruschetta".into(),
                        new: "Calamari".into()
                    }
                }],
                "payload {payload:?}"
            );
        }
    }

    #[test]
    fn test_unsplit_replace_resolved_against_catalog() {
        let catalog = create_test_catalog();
        let directives = parse_directives("ACTION: REPLACE_ITEM French Fries Steamed Rice");
        assert_eq!(
            directives,
            vec![Directive::ReplaceItem {
                payload: ReplacePayload::Unsplit("French Fries Steamed Rice".into())
            }]
        );
        assert_eq!(
            to_commands(&directives, &catalog),
            vec![ModificationCommand::Replace {
                remove: vec!["French Fries".into()],
                add: ItemRequest::one("Steamed Rice"),
            }]
        );
    }

    #[test]
    fn test_unsplit_replace_falls_back_to_fuzzy() {
        let catalog = create_test_catalog();
        let directives = parse_directives("ACTION: REPLACE_ITEM fries salmon");
        assert_eq!(
            to_commands(&directives, &catalog),
            vec![ModificationCommand::Replace {
                remove: vec!["fries".into()],
                add: ItemRequest::one("salmon"),
            }]
        );
    }

    #[test]
    fn test_unsplittable_replace_dropped() {
        let catalog = create_test_catalog();
        let directives = parse_directives("ACTION: REPLACE_ITEM Unicorn Dragon");
        assert_eq!(directives.len(), 1);
        assert!(to_commands(&directives, &catalog).is_empty());
    }

    #[test]
    fn test_remove_with_quantity_is_informational() {
        assert_eq!(
            parse_directives("ACTION: REMOVE_ITEM 2 Calamari."),
            vec![Directive::RemoveItem {
                quantity: 2,
                name: "Calamari".into()
            }]
        );
    }

    #[test]
    fn test_strip_keeps_other_lines() {
        let reply = "Great choice!\n\nACTION: ADD_ITEM 1 Calamari\nACTION: ADD_ITEM 1 Tiramisu\n\nAnything else?";
        assert_eq!(strip_directives(reply), "Great choice!\n\nAnything else?");
    }

    #[test]
    fn test_strip_collapses_blank_lines_around_directive() {
        let reply = "Great!\n\nACTION: ADD_ITEM 1 Tiramisu\n\nAnything else?";
        assert_eq!(strip_directives(reply), "Great!\n\nAnything else?");
    }

    #[test]
    fn test_emphasized_directive() {
        let reply = "Added it for you.\n**ACTION: ADD_ITEM 1 Tiramisu**\nEnjoy!";
        assert_eq!(
            parse_directives(reply),
            vec![Directive::AddItem {
                quantity: 1,
                name: "Tiramisu".into()
            }]
        );
        assert_eq!(strip_directives(reply), "Added it for you.\nEnjoy!");

        assert_eq!(
            parse_directives("Sure! __ACTION: REMOVE_ITEM *Calamari*__"),
            vec![Directive::RemoveItem {
                quantity: 1,
                name: "Calamari".into()
            }]
        );
        assert_eq!(strip_directives("Sure! __ACTION: REMOVE_ITEM *Calamari*__"), "Sure!");
    }
}
