//! System prompt rendered from the per-turn context

use std::fmt::Write;

use shared::models::MenuItem;

use super::completion::AssistantContext;
use crate::advisor::match_allergen;
use crate::utils::money::{format_money, to_decimal};

const ROLE: &str = "You are a helpful AI assistant for a restaurant ordering system called Gourmet Delights. \
Your role is to help customers with their food orders, answer questions about the menu, and provide personalized recommendations.";

const GUIDELINES: &str = "ORDER QUANTITY GUIDELINES:
- For 1 person: 1-2 appetizers, 1 main course, 1-2 sides, and optionally 1 dessert
- For 2 people: 1-2 appetizers to share, 1-2 main courses, 2-3 sides, and optionally 1-2 desserts
- For larger groups: scale proportionally, considering shared items";

const INSTRUCTIONS: &str = "INSTRUCTIONS:
1. ONLY use action commands (ADD_ITEM, REMOVE_ITEM, REPLACE_ITEM) when the user EXPLICITLY asks to modify their order (e.g. \"add\", \"remove\", \"delete\", \"replace\", \"change\", \"update\").
2. For questions, recommendations, or general inquiries, DO NOT use action commands.
3. To add items, write \"ACTION: ADD_ITEM <quantity> <item_name>\" on its own line.
4. To remove items, write \"ACTION: REMOVE_ITEM <item_name>\" on its own line.
5. To replace an item, write \"ACTION: REPLACE_ITEM <old_item_name> with <new_item_name>\" on its own line.
6. For multiple items, write a separate action command for each item.
7. Use the exact menu item names listed above.
8. Provide a natural, conversational response after the action commands.
9. Consider the customer's party size, dietary restrictions, allergies, and budget when making recommendations.
10. Keep your responses concise, friendly, and focused on helping with the order.";

/// Build the system message for one turn
pub fn system_prompt(context: &AssistantContext) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(ROLE);
    out.push_str("\n\nCURRENT ORDER:\n");

    if context.cart.is_empty() {
        out.push_str("- (empty)\n");
    } else {
        for line in &context.cart.lines {
            let _ = writeln!(
                out,
                "- {}x {} ({})",
                line.quantity,
                line.name,
                format_money(to_decimal(line.line_total))
            );
        }
        let _ = writeln!(
            out,
            "Subtotal: {}",
            format_money(to_decimal(context.cart.subtotal))
        );
    }

    out.push_str("\nMENU:\n");
    for category in context.catalog.categories() {
        let _ = writeln!(out, "{}:", category.label);
        for item in &category.items {
            let _ = writeln!(out, "{}", menu_line(item));
        }
    }

    let preferences = preference_lines(context);
    if !preferences.is_empty() {
        out.push_str("\nCUSTOMER PREFERENCES:\n");
        for line in preferences {
            let _ = writeln!(out, "- {line}");
        }
    }

    out.push('\n');
    out.push_str(GUIDELINES);
    out.push_str("\n\n");
    out.push_str(INSTRUCTIONS);
    out
}

/// "- Calamari ($12.00): Crispy fried squid... [allergens: gluten, shellfish; dietary: -]"
fn menu_line(item: &MenuItem) -> String {
    let mut line = format!(
        "- {} ({}): {}",
        item.name,
        format_money(to_decimal(item.price)),
        item.description
    );
    if let Some(info) = &item.food_info {
        let allergens: Vec<&str> = info.allergens.iter().map(|a| a.as_str()).collect();
        let dietary: Vec<&str> = info.dietary.iter().map(|d| d.as_str()).collect();
        let _ = write!(
            line,
            " [allergens: {}; dietary: {}]",
            or_none(&allergens),
            or_none(&dietary)
        );
    }
    line
}

fn preference_lines(context: &AssistantContext) -> Vec<String> {
    let prefs = &context.preferences;
    let mut lines = Vec::new();

    if let Some(people) = prefs.people_count.or(context.party_size) {
        lines.push(format!("Number of people: {people}"));
    }
    if let Some(diet) = prefs.dietary_restriction {
        lines.push(format!("Dietary restriction: {diet}"));
    }
    if let Some(budget) = prefs.budget {
        lines.push(format!("Budget: {}", format_money(to_decimal(budget))));
    }
    if !prefs.allergies.is_empty() {
        lines.push(format!("Allergies: {}", prefs.allergies.join(", ")));

        let conflicts: Vec<String> = prefs
            .allergies
            .iter()
            .filter_map(|term| match_allergen(term))
            .flat_map(|allergen| context.allergens.items_with(allergen).iter().cloned())
            .fold(Vec::new(), |mut acc, name| {
                if !acc.contains(&name) {
                    acc.push(name);
                }
                acc
            });
        if !conflicts.is_empty() {
            lines.push(format!(
                "Items in the order containing these allergens: {}",
                conflicts.join(", ")
            ));
        }
    }
    lines
}

fn or_none(values: &[&str]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}
