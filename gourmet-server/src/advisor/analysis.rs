//! Order sizing and budget analysis

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{CartSnapshot, Course, MenuItem};

use super::allergens::{AllergenSummary, allergen_summary};
use crate::catalog::Catalog;
use crate::utils::money::{format_money, line_total, to_decimal, to_f64};

const MAX_SUGGESTIONS: usize = 2;

/// Units per course
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CourseCounts {
    pub appetizers: u32,
    pub mains: u32,
    pub sides: u32,
    pub desserts: u32,
}

impl CourseCounts {
    fn tally(cart: &CartSnapshot) -> Self {
        let mut counts = Self::default();
        for line in &cart.lines {
            let slot = match Course::from_item_id(&line.item_id) {
                Course::Appetizer => &mut counts.appetizers,
                Course::Main => &mut counts.mains,
                Course::Side => &mut counts.sides,
                Course::Dessert => &mut counts.desserts,
                Course::Other => continue,
            };
            *slot += line.quantity;
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub item_id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl From<&MenuItem> for Suggestion {
    fn from(item: &MenuItem) -> Self {
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            description: item.description.clone(),
        }
    }
}

/// Cheaper same-course alternative for a cart line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSwap {
    pub replace_id: String,
    pub replace_name: String,
    pub with_id: String,
    pub with_name: String,
    /// (old price - new price) × line quantity
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderAnalysis {
    pub people: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub counts: CourseCounts,
    pub total_items: u32,
    pub total: f64,
    pub cost_per_person: f64,
    pub has_enough_mains: bool,
    pub has_enough_food: bool,
    pub over_budget: bool,
    pub missing_mains: u32,
    pub missing_sides: u32,
    pub suggested_mains: Vec<Suggestion>,
    pub suggested_sides: Vec<Suggestion>,
    pub suggested_appetizers: Vec<Suggestion>,
    pub budget_swaps: Vec<BudgetSwap>,
    pub allergens: AllergenSummary,
}

/// Analyse the order for `people` diners. `people` must be at least 1.
pub fn analyze_order(
    cart: &CartSnapshot,
    people: u32,
    budget: Option<f64>,
    catalog: &Catalog,
) -> OrderAnalysis {
    let people = people.max(1);
    let budget = budget.filter(|b| *b > 0.0);
    let counts = CourseCounts::tally(cart);
    let total = to_decimal(cart.subtotal);
    let remaining = budget.map(|b| to_decimal(b) - total);

    let over_budget = remaining.is_some_and(|r| r < Decimal::ZERO);
    let missing_mains = people.saturating_sub(counts.mains);
    let missing_sides = people.div_ceil(2).saturating_sub(counts.sides);
    let missing_appetizers = people.div_ceil(3).saturating_sub(counts.appetizers);

    let suggest = |course: Course, wanted: u32| -> Vec<Suggestion> {
        if wanted == 0 {
            return Vec::new();
        }
        catalog
            .items()
            .filter(|item| item.course() == course)
            .filter(|item| cart.quantity_of(&item.id) == 0)
            .filter(|item| remaining.is_none_or(|r| to_decimal(item.price) <= r))
            .take(MAX_SUGGESTIONS)
            .map(Suggestion::from)
            .collect()
    };

    OrderAnalysis {
        people,
        budget,
        counts,
        total_items: cart.item_count,
        total: cart.subtotal,
        cost_per_person: to_f64(total / Decimal::from(people)),
        has_enough_mains: missing_mains == 0,
        has_enough_food: cart.item_count >= people * 2,
        over_budget,
        missing_mains,
        missing_sides,
        suggested_mains: suggest(Course::Main, missing_mains),
        suggested_sides: suggest(Course::Side, missing_sides),
        suggested_appetizers: suggest(Course::Appetizer, missing_appetizers),
        budget_swaps: if over_budget {
            budget_swaps(cart, catalog)
        } else {
            Vec::new()
        },
        allergens: allergen_summary(cart, catalog),
    }
}

fn budget_swaps(cart: &CartSnapshot, catalog: &Catalog) -> Vec<BudgetSwap> {
    cart.lines
        .iter()
        .filter_map(|line| {
            let course = Course::from_item_id(&line.item_id);
            let alternative = catalog
                .items()
                .filter(|item| item.course() == course && item.price < line.unit_price)
                .fold(None::<&MenuItem>, |best, item| match best {
                    Some(b) if b.price >= item.price => Some(b),
                    _ => Some(item),
                })?;
            let savings = line_total(line.unit_price, line.quantity)
                - line_total(alternative.price, line.quantity);
            Some(BudgetSwap {
                replace_id: line.item_id.clone(),
                replace_name: line.name.clone(),
                with_id: alternative.id.clone(),
                with_name: alternative.name.clone(),
                savings: to_f64(savings),
            })
        })
        .collect()
}

impl OrderAnalysis {
    /// Customer-facing text
    pub fn render(&self) -> String {
        let party = format!(
            "{} {}",
            self.people,
            if self.people == 1 { "person" } else { "people" }
        );
        let mut out = format!("Here's my analysis of your order for {party}");
        if let Some(budget) = self.budget {
            out.push_str(&format!(" with a budget of {}", format_money(to_decimal(budget))));
        }
        out.push_str(":\n\nYour current order has:\n");

        for (count, label) in [
            (self.counts.appetizers, "appetizer(s)"),
            (self.counts.mains, "main course(s)"),
            (self.counts.sides, "side dish(es)"),
            (self.counts.desserts, "dessert(s)"),
        ] {
            if count > 0 {
                out.push_str(&format!("- {count} {label}\n"));
            }
        }

        out.push_str(&format!(
            "\nTotal cost: {} (about {} per person)\n",
            format_money(to_decimal(self.total)),
            format_money(to_decimal(self.cost_per_person))
        ));

        if !self.has_enough_mains {
            out.push_str(&format!(
                "\nI notice you have {} main courses for {party}. Usually, each person would have their own main course.\n",
                self.counts.mains
            ));
        }
        if !self.has_enough_food {
            out.push_str(&format!(
                "\nYour order might not have enough food for {party}. I'd recommend adding more items.\n"
            ));
        }
        if self.over_budget
            && let Some(budget) = self.budget
        {
            out.push_str(&format!(
                "\nYour order total ({}) exceeds your budget of {}.\n",
                format_money(to_decimal(self.total)),
                format_money(to_decimal(budget))
            ));
        }

        let mut recommendations = Vec::new();
        if self.missing_mains > 0 {
            recommendations.push(format!(
                "Consider adding {} more main course(s){}",
                self.missing_mains,
                listing(&self.suggested_mains)
            ));
        }
        if self.missing_sides > 0 {
            recommendations.push(format!(
                "Adding {} more side dish(es) would enhance the meal{}",
                self.missing_sides,
                listing(&self.suggested_sides)
            ));
        }
        if !self.suggested_appetizers.is_empty() {
            recommendations.push(format!(
                "Shared appetizers would be a nice addition{}",
                listing(&self.suggested_appetizers)
            ));
        }
        for swap in &self.budget_swaps {
            recommendations.push(format!(
                "Consider replacing {} with {} to save {}",
                swap.replace_name,
                swap.with_name,
                format_money(to_decimal(swap.savings))
            ));
        }

        if !recommendations.is_empty() {
            out.push_str("\nRecommendations:\n");
            for r in recommendations {
                out.push_str(&format!("- {r}\n"));
            }
        }
        out.trim_end().to_string()
    }
}

/// " (e.g. Grilled Salmon $22.00, Ribeye Steak $28.00)"
fn listing(suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }
    let names: Vec<String> = suggestions
        .iter()
        .map(|s| format!("{} {}", s.name, format_money(to_decimal(s.price))))
        .collect();
    format!(" (e.g. {})", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;

    fn create_test_cart(lines: &[(&str, u32)], catalog: &Catalog) -> CartSnapshot {
        let mut cart = Cart::new();
        for (id, qty) in lines {
            cart.add_item(catalog.get(id).unwrap(), *qty).unwrap();
        }
        cart.snapshot()
    }

    #[test]
    fn test_balanced_order_for_two() {
        let catalog = Catalog::embedded().unwrap();
        let cart = create_test_cart(&[("main1", 1), ("main3", 1), ("side4", 1), ("app1", 1)], &catalog);

        let analysis = analyze_order(&cart, 2, None, &catalog);

        assert_eq!(analysis.counts.mains, 2);
        assert_eq!(analysis.total_items, 4);
        assert!(analysis.has_enough_mains);
        assert!(analysis.has_enough_food);
        assert!(!analysis.over_budget);
        assert_eq!(analysis.missing_sides, 0);
        assert!(analysis.suggested_mains.is_empty());
        assert!(analysis.suggested_appetizers.is_empty());
        // (22 + 28 + 5 + 8) / 2
        assert_eq!(analysis.cost_per_person, 31.5);
    }

    #[test]
    fn test_missing_mains_suggests_items_not_in_cart() {
        let catalog = Catalog::embedded().unwrap();
        let cart = create_test_cart(&[("main1", 1)], &catalog);

        let analysis = analyze_order(&cart, 4, None, &catalog);

        assert!(!analysis.has_enough_mains);
        assert!(!analysis.has_enough_food);
        assert_eq!(analysis.missing_mains, 3);
        assert_eq!(analysis.missing_sides, 2);
        let ids: Vec<&str> = analysis
            .suggested_mains
            .iter()
            .map(|s| s.item_id.as_str())
            .collect();
        assert_eq!(ids, ["main2", "main3"]);
        assert_eq!(analysis.suggested_sides.len(), 2);
        assert_eq!(analysis.suggested_appetizers[0].item_id, "app1");
    }

    #[test]
    fn test_suggestions_respect_remaining_budget() {
        let catalog = Catalog::embedded().unwrap();
        let cart = create_test_cart(&[("main1", 1)], &catalog);

        // 40 - 22 leaves 18: Chicken Parmesan fits, Ribeye does not
        let analysis = analyze_order(&cart, 2, Some(40.0), &catalog);
        let ids: Vec<&str> = analysis
            .suggested_mains
            .iter()
            .map(|s| s.item_id.as_str())
            .collect();
        assert_eq!(ids, ["main2", "main4"]);
    }

    #[test]
    fn test_over_budget_swaps_pick_most_expensive_cheaper_item() {
        let catalog = Catalog::embedded().unwrap();
        let cart = create_test_cart(&[("main3", 2), ("side5", 1)], &catalog);

        let analysis = analyze_order(&cart, 2, Some(30.0), &catalog);

        assert!(analysis.over_budget);
        assert_eq!(
            analysis.budget_swaps,
            vec![BudgetSwap {
                replace_id: "main3".into(),
                replace_name: "Ribeye Steak".into(),
                with_id: "main1".into(),
                with_name: "Grilled Salmon".into(),
                savings: 12.0,
            }]
        );
        let text = analysis.render();
        assert!(text.contains("exceeds your budget of $30.00"));
        assert!(text.contains("Consider replacing Ribeye Steak with Grilled Salmon to save $12.00"));
    }

    #[test]
    fn test_render_for_one_person() {
        let catalog = Catalog::embedded().unwrap();
        let cart = create_test_cart(&[("main5", 1), ("side2", 1)], &catalog);

        let text = analyze_order(&cart, 1, None, &catalog).render();
        assert!(text.starts_with("Here's my analysis of your order for 1 person:"));
        assert!(text.contains("- 1 main course(s)\n- 1 side dish(es)"));
        assert!(text.contains("Total cost: $24.00 (about $24.00 per person)"));
        assert!(text.ends_with(
            "Recommendations:\n- Shared appetizers would be a nice addition (e.g. Bruschetta $8.00, Mozzarella Sticks $9.00)"
        ));
    }

    #[test]
    fn test_zero_people_treated_as_one() {
        let catalog = Catalog::embedded().unwrap();
        let analysis = analyze_order(&CartSnapshot::default(), 0, None, &catalog);
        assert_eq!(analysis.people, 1);
        assert_eq!(analysis.cost_per_person, 0.0);
    }
}
