//! 偏好提取
//!
//! 从单条顾客消息中识别人数、饮食限制、预算和过敏源。
//! 每条消息重新计算；人数由会话记住 (见 `Session::party_size`)。

use std::sync::LazyLock;

use regex::Regex;
use shared::preferences::{DietaryRestriction, Preferences};

const NUMBER_WORDS: [&str; 12] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve",
];

static PEOPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d+|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve)\s*(?:people|persons?|guests|diners|ppl|individuals|folks|friends)\b",
    )
    .unwrap()
});

static PARTY_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:party|group|family|table)\s+of\s+(\d+|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve)\b",
    )
    .unwrap()
});

static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*[.!]?\s*$").unwrap());

static PARTY_OF_TWO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:couple|date|me and|myself and|both of us|the two of us)\b").unwrap()
});

static PARTY_OF_ONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:just me|only me|myself|solo|just for me)\b").unwrap()
});

static BUDGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \$\s*(?P<dollar>\d+(?:\.\d{1,2})?)
        | \b(?P<worded>\d+(?:\.\d{1,2})?)\s*(?:dollars|bucks|usd)\b
        | \bbudget\s+(?:of|is|around|about)\s+(?P<budget>\d+(?:\.\d{1,2})?)\b
        | \b(?:under|below|less\s+than|up\s+to)\s+(?P<cap>\d+(?:\.\d{1,2})?)\b(?:\s*(?:people|persons?|guests|items))?
        ",
    )
    .unwrap()
});

static ALLERGY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:allergic\s+to|allerg(?:y|ies)\s+to|can'?t\s+eat|can’t\s+eat|cannot\s+eat)\s+(.+)")
        .unwrap()
});

static ALLERGY_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*,\s*|\s+and\s+|\s+or\s+").unwrap());

/// 识别一条消息中的全部偏好
pub fn extract_preferences(utterance: &str) -> Preferences {
    Preferences {
        people_count: people_count(utterance),
        dietary_restriction: dietary_restriction(utterance),
        budget: budget(utterance),
        allergies: allergies(utterance),
    }
}

fn people_count(utterance: &str) -> Option<u32> {
    let explicit = PEOPLE
        .captures(utterance)
        .or_else(|| PARTY_OF.captures(utterance))
        .or_else(|| BARE_NUMBER.captures(utterance))
        .and_then(|caps| parse_count(&caps[1]));
    if explicit.is_some() {
        return explicit;
    }

    if PARTY_OF_TWO.is_match(utterance) {
        Some(2)
    } else if PARTY_OF_ONE.is_match(utterance) {
        Some(1)
    } else {
        None
    }
}

fn parse_count(raw: &str) -> Option<u32> {
    let lower = raw.to_ascii_lowercase();
    let count = match NUMBER_WORDS.iter().position(|w| *w == lower) {
        Some(index) => index as u32 + 1,
        None => lower.parse().ok()?,
    };
    (count > 0).then_some(count)
}

fn dietary_restriction(utterance: &str) -> Option<DietaryRestriction> {
    let lower = utterance.to_lowercase();
    DietaryRestriction::ALL
        .into_iter()
        .find(|restriction| mentions(&lower, restriction))
}

/// "gluten-free", "gluten free" and "glutenfree" all count
fn mentions(lower: &str, restriction: &DietaryRestriction) -> bool {
    let name = restriction.as_str();
    [name.to_string(), name.replace('-', " "), name.replace('-', "")]
        .iter()
        .any(|variant| contains_word(lower, variant))
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack.match_indices(word).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + word.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn budget(utterance: &str) -> Option<f64> {
    BUDGET.captures_iter(utterance).find_map(|caps| {
        // "under 4 people" is a head count, not money
        if caps.name("cap").is_some() && caps[0].trim_end().ends_with(char::is_alphabetic) {
            return None;
        }
        ["dollar", "worded", "budget", "cap"]
            .iter()
            .find_map(|group| caps.name(group))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|amount| *amount > 0.0)
    })
}

fn allergies(utterance: &str) -> Vec<String> {
    let Some(caps) = ALLERGY.captures(utterance) else {
        return Vec::new();
    };
    let mut out: Vec<String> = Vec::new();
    for term in ALLERGY_SEPARATOR.split(&caps[1]) {
        let term = term
            .trim()
            .trim_end_matches(['.', '!', '?', ';'])
            .trim()
            .to_lowercase();
        if !term.is_empty() && !out.contains(&term) {
            out.push(term);
        }
    }
    out
}
