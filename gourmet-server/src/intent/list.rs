//! Item list parsing: "2 Bruschetta, the Calamari and three fries"

use std::sync::LazyLock;

use regex::Regex;
use shared::intent::ItemRequest;

static LIST_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*,\s*(?:and\s+)?|\s+(?:and|or)\s+|\s*&\s*").unwrap()
});

static LEADING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*x?\s+(.+)$").unwrap());

static LEADING_NUMBER_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(a|an|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve)\s+(.+)$",
    )
    .unwrap()
});

static LEADING_FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:the|some|my|our|more|another|extra|(?:orders?|servings?|portions?|plates?|pieces?)\s+of)\s+",
    )
    .unwrap()
});

static TRAILING_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:[\s.,!?;:]+|\s+(?:please|thanks|thank\s+you|and|then|also|too|instead|now|as\s+well|plus))$",
    )
    .unwrap()
});

/// Names that refer to nothing in particular
const PLACEHOLDERS: &[&str] = &[
    "it", "that", "this", "them", "those", "these", "one", "something", "anything", "more",
    "please",
];

/// Split a captured fragment into item requests. Tokens without a usable
/// name or with a zero / unparseable quantity are dropped.
pub fn parse_item_list(fragment: &str) -> Vec<ItemRequest> {
    let fragment = trim_noise(fragment);
    LIST_SEPARATOR
        .split(fragment)
        .filter_map(parse_item)
        .collect()
}

/// One token: optional leading quantity, then the name
pub fn parse_item(token: &str) -> Option<ItemRequest> {
    let token = trim_noise(token);
    if token.is_empty() {
        return None;
    }

    let (quantity, rest) = if let Some(caps) = LEADING_DIGITS.captures(token) {
        let quantity = caps[1].parse::<u32>().ok()?;
        (quantity, caps.get(2).map_or("", |m| m.as_str()))
    } else if let Some(caps) = LEADING_NUMBER_WORD.captures(token) {
        (
            number_word(&caps[1])?,
            caps.get(2).map_or("", |m| m.as_str()),
        )
    } else {
        (1, token)
    };

    if quantity == 0 {
        return None;
    }

    let mut name = rest.trim();
    while let Some(m) = LEADING_FILLER.find(name) {
        name = name[m.end()..].trim_start();
    }
    let name = name.split_whitespace().collect::<Vec<_>>().join(" ");

    if name.is_empty() || PLACEHOLDERS.contains(&name.to_lowercase().as_str()) {
        return None;
    }
    Some(ItemRequest::new(quantity, name))
}

/// Strip trailing punctuation, courtesy words and dangling connectors
pub fn trim_noise(text: &str) -> &str {
    let mut text = text.trim();
    while let Some(m) = TRAILING_NOISE.find(text) {
        if m.start() == text.len() {
            break;
        }
        text = text[..m.start()].trim();
    }
    text
}

fn number_word(word: &str) -> Option<u32> {
    let n = match word.to_lowercase().as_str() {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        _ => return None,
    };
    Some(n)
}
