//! Phrase-template intent extraction
//!
//! The utterance is cut into clauses at each modification verb, so
//! "add fries and remove the cake" yields two commands. Each clause is
//! matched against an ordered template list; the first template that
//! produces a command wins for that clause.

use std::sync::LazyLock;

use regex::Regex;
use shared::intent::{CommandKind, ModificationCommand};

use super::list::{parse_item_list, trim_noise};

static VERB_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:add|remove|delete|take\s+out|replace|swap|change)\b").unwrap()
});

static ORDER_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|\s+)(?:to|in|into|on|onto|from|off|out\s+of|of)\s+(?:my|the|our|this)\s+(?:order|cart|bill|meal)$",
    )
    .unwrap()
});

/// Request phrasing that leads into the next clause ("..., can you")
static TRAILING_LEAD_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[\s.,!?;:]+)(?:(?:and|then|also|so)\s+)?(?:(?:can|could|would|will)\s+you(?:\s+please)?|please|(?:i|we)(?:['’]d|\s+would)\s+(?:also\s+)?like\s+to|(?:i|we)\s+(?:also\s+)?(?:want|need)\s+to|i\s+wanna|let['’]?s)$",
    )
    .unwrap()
});

struct Template {
    kind: CommandKind,
    regex: Regex,
}

impl Template {
    fn new(kind: CommandKind, pattern: &str) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).unwrap(),
        }
    }
}

/// Priority-ordered templates, anchored at the clause start
static TEMPLATES: LazyLock<Vec<Template>> = LazyLock::new(|| {
    vec![
        Template::new(CommandKind::Add, r"(?i)^add\s+(?P<items>.+)$"),
        Template::new(CommandKind::Remove, r"(?i)^(?:remove|delete)\s+(?P<items>.+)$"),
        Template::new(CommandKind::Remove, r"(?i)^take\s+out\s+(?P<items>.+)$"),
        Template::new(
            CommandKind::Replace,
            r"(?i)^replace\s+(?P<old>.+?)\s+with\s+(?P<new>.+)$",
        ),
        Template::new(
            CommandKind::Replace,
            r"(?i)^swap\s+(?:out\s+)?(?P<old>.+?)\s+(?:for|with)\s+(?P<new>.+)$",
        ),
        Template::new(
            CommandKind::Replace,
            r"(?i)^change\s+(?P<old>.+?)\s+(?:to|into|for)\s+(?P<new>.+)$",
        ),
    ]
});

/// Extract cart modification commands from a customer utterance.
///
/// Pure and offline. Identical commands are returned once, in first-seen order.
pub fn extract(utterance: &str) -> Vec<ModificationCommand> {
    let mut commands: Vec<ModificationCommand> = Vec::new();

    for clause in clauses(utterance) {
        if let Some(command) = match_clause(clause)
            && !commands.contains(&command)
        {
            commands.push(command);
        }
    }

    if !commands.is_empty() {
        tracing::debug!(target: "intent", count = commands.len(), "Extracted modification commands");
    }
    commands
}

/// Substrings starting at each verb and running to the next one
fn clauses(utterance: &str) -> Vec<&str> {
    let starts: Vec<usize> = VERB_START.find_iter(utterance).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(utterance.len());
            &utterance[start..end]
        })
        .collect()
}

fn match_clause(clause: &str) -> Option<ModificationCommand> {
    let clause = trim_clause_tail(clause);

    TEMPLATES.iter().find_map(|template| {
        let caps = template.regex.captures(clause)?;
        match template.kind {
            CommandKind::Add => {
                let items = parse_item_list(strip_order_phrase(&caps["items"]));
                (!items.is_empty()).then_some(ModificationCommand::Add { items })
            }
            CommandKind::Remove => {
                let items = parse_item_list(strip_order_phrase(&caps["items"]));
                (!items.is_empty()).then_some(ModificationCommand::Remove { items })
            }
            CommandKind::Replace => {
                let remove: Vec<String> = parse_item_list(strip_order_phrase(&caps["old"]))
                    .into_iter()
                    .map(|item| item.raw_name)
                    .collect();
                let add = parse_item_list(strip_order_phrase(&caps["new"]))
                    .into_iter()
                    .next()?;
                (!remove.is_empty()).then_some(ModificationCommand::Replace { remove, add })
            }
        }
    })
}

/// "add fries and can you " -> "add fries"
fn trim_clause_tail(clause: &str) -> &str {
    let mut clause = trim_noise(clause);
    while let Some(m) = TRAILING_LEAD_IN.find(clause) {
        clause = trim_noise(&clause[..m.start()]);
    }
    clause
}

/// "fries to my order" -> "fries"
fn strip_order_phrase(fragment: &str) -> &str {
    let fragment = trim_noise(fragment);
    match ORDER_PHRASE.find(fragment) {
        Some(m) => fragment[..m.start()].trim(),
        None => fragment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::intent::ItemRequest;

    fn add(items: &[(u32, &str)]) -> ModificationCommand {
        ModificationCommand::Add {
            items: items
                .iter()
                .map(|(q, n)| ItemRequest::new(*q, *n))
                .collect(),
        }
    }

    fn remove(items: &[(u32, &str)]) -> ModificationCommand {
        ModificationCommand::Remove {
            items: items
                .iter()
                .map(|(q, n)| ItemRequest::new(*q, *n))
                .collect(),
        }
    }

    fn replace(old: &[&str], quantity: u32, new: &str) -> ModificationCommand {
        ModificationCommand::Replace {
            remove: old.iter().map(|s| s.to_string()).collect(),
            add: ItemRequest::new(quantity, new),
        }
    }

    #[test]
    fn test_add_with_quantity() {
        assert_eq!(extract("add 2 Bruschetta"), vec![add(&[(2, "Bruschetta")])]);
    }

    #[test]
    fn test_polite_add_with_order_suffix() {
        assert_eq!(
            extract("Can you add 2 Bruschetta to my order?"),
            vec![add(&[(2, "Bruschetta")])]
        );
        assert_eq!(
            extract("I would like to add a Caesar Salad and two French Fries please"),
            vec![add(&[(1, "Caesar Salad"), (2, "French Fries")])]
        );
        assert_eq!(
            extract("please ADD the tiramisu"),
            vec![add(&[(1, "tiramisu")])]
        );
    }

    #[test]
    fn test_remove_variants() {
        assert_eq!(extract("remove Bruschetta"), vec![remove(&[(1, "Bruschetta")])]);
        assert_eq!(
            extract("take out the fries from my order"),
            vec![remove(&[(1, "fries")])]
        );
        assert_eq!(
            extract("could you delete 2 cheesecake"),
            vec![remove(&[(2, "cheesecake")])]
        );
    }

    #[test]
    fn test_replace_variants() {
        assert_eq!(
            extract("replace Bruschetta with Calamari"),
            vec![replace(&["Bruschetta"], 1, "Calamari")]
        );
        assert_eq!(
            extract("swap the fries for a Caesar Salad"),
            vec![replace(&["fries"], 1, "Caesar Salad")]
        );
        assert_eq!(
            extract("change my steak to 2 Grilled Salmon in my order"),
            vec![replace(&["steak"], 2, "Grilled Salmon")]
        );
    }

    #[test]
    fn test_replace_uses_first_new_item_only() {
        assert_eq!(
            extract("replace fries and rice with salad and wings"),
            vec![replace(&["fries", "rice"], 1, "salad")]
        );
    }

    #[test]
    fn test_multiple_clauses() {
        assert_eq!(
            extract("add fries and then remove the cake"),
            vec![add(&[(1, "fries")]), remove(&[(1, "cake")])]
        );
        assert_eq!(
            extract("replace the wings with calamari, add 2 rice"),
            vec![
                replace(&["wings"], 1, "calamari"),
                add(&[(2, "rice")]),
            ]
        );
    }

    #[test]
    fn test_request_phrasing_before_next_verb_is_dropped() {
        assert_eq!(
            extract("I'd like to add fries and can you remove the cake"),
            vec![add(&[(1, "fries")]), remove(&[(1, "cake")])]
        );
        assert_eq!(
            extract("add the salad, could you please also delete the wings"),
            vec![add(&[(1, "salad")]), remove(&[(1, "wings")])]
        );
        assert_eq!(
            extract("add 2 rice. I want to remove the cheesecake"),
            vec![add(&[(2, "rice")]), remove(&[(1, "cheesecake")])]
        );
    }

    #[test]
    fn test_identical_commands_deduplicated() {
        assert_eq!(extract("add fries, add fries!"), vec![add(&[(1, "fries")])]);
    }

    #[test]
    fn test_verbs_need_word_boundaries() {
        assert!(extract("What's your address?").is_empty());
        assert!(extract("I already added everything").is_empty());
        assert!(extract("the changes look good").is_empty());
    }

    #[test]
    fn test_no_intent() {
        assert!(extract("What do you recommend?").is_empty());
        assert!(extract("").is_empty());
        assert!(extract("can I change my mind").is_empty());
    }

    #[test]
    fn test_empty_or_placeholder_payload() {
        assert!(extract("what can I add to my order?").is_empty());
        assert!(extract("remove it").is_empty());
        assert!(extract("add 0 fries").is_empty());
        assert!(extract("replace fries with").is_empty());
    }
}
