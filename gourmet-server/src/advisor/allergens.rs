//! Allergen summary over the current order

use serde::Serialize;
use shared::models::{Allergen, CartSnapshot};

use crate::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllergenEntry {
    pub allergen: Allergen,
    /// Display names of cart items containing the allergen, in cart order
    pub items: Vec<String>,
}

/// Allergens present in the order. Allergens absent from every line are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllergenSummary {
    pub entries: Vec<AllergenEntry>,
}

impl AllergenSummary {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn items_with(&self, allergen: Allergen) -> &[String] {
        self.entries
            .iter()
            .find(|e| e.allergen == allergen)
            .map(|e| e.items.as_slice())
            .unwrap_or_default()
    }

    pub fn render(&self) -> String {
        if self.is_empty() {
            return "Your current order doesn't contain any common allergens. However, please \
                    inform your server about any allergies as kitchen cross-contamination is possible."
                .to_string();
        }

        let mut out = String::from("Here's an allergen summary for your current order:\n\n");
        for entry in &self.entries {
            out.push_str(&format!(
                "{}: {}\n",
                capitalize(entry.allergen.as_str()),
                entry.items.join(", ")
            ));
        }
        out.push_str(
            "\nPlease inform your server about any allergies as kitchen cross-contamination is possible.",
        );
        out
    }
}

/// Map each allergen to the cart items containing it.
///
/// Food information is read from the catalog; lines whose item has none are ignored.
pub fn allergen_summary(cart: &CartSnapshot, catalog: &Catalog) -> AllergenSummary {
    let entries = Allergen::ALL
        .into_iter()
        .filter_map(|allergen| {
            let items: Vec<String> = cart
                .lines
                .iter()
                .filter_map(|line| catalog.get(&line.item_id))
                .filter(|item| item.contains_allergen(allergen))
                .map(|item| item.name.clone())
                .collect();
            (!items.is_empty()).then_some(AllergenEntry { allergen, items })
        })
        .collect();
    AllergenSummary { entries }
}

/// Map a customer's own wording ("peanuts", "milk") onto a tracked allergen
pub fn match_allergen(term: &str) -> Option<Allergen> {
    let term = term.to_lowercase();
    const KEYWORDS: [(Allergen, &[&str]); 6] = [
        (Allergen::Gluten, &["gluten", "wheat", "bread", "flour", "celiac"]),
        (Allergen::Dairy, &["dairy", "milk", "lactose", "cheese", "cream", "butter"]),
        (Allergen::Nuts, &["nut", "almond", "cashew", "pecan", "walnut"]),
        (
            Allergen::Shellfish,
            &["shellfish", "shrimp", "crab", "lobster", "squid", "seafood"],
        ),
        (Allergen::Soy, &["soy", "tofu"]),
        (Allergen::Eggs, &["egg"]),
    ];
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| term.contains(w)))
        .map(|(allergen, _)| *allergen)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
