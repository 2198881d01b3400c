use super::*;
use crate::intent::extract;
use rust_decimal::Decimal;

fn create_test_catalog() -> Catalog {
    Catalog::embedded().unwrap()
}

fn run(utterance: &str, cart: &mut Cart, catalog: &Catalog) -> ApplyReport {
    apply(&extract(utterance), cart, catalog)
}

#[test]
fn test_add_two_bruschetta_to_empty_cart() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();

    let report = run("add 2 Bruschetta", &mut cart, &catalog);

    assert_eq!(cart.line_count(), 1);
    assert_eq!(cart.quantity_of("app1"), 2);
    assert_eq!(cart.total(), Decimal::from(16));
    assert_eq!(
        report.confirmation().as_deref(),
        Some("I've added 2 Bruschetta to your order.")
    );
    assert!(report.skipped.is_empty());
}

#[test]
fn test_add_twice_doubles_quantity() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();

    run("add 3 fries", &mut cart, &catalog);
    run("add 3 fries", &mut cart, &catalog);
    assert_eq!(cart.quantity_of("side4"), 6);
}

#[test]
fn test_remove_decrements_by_one() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();

    run("add 3 Bruschetta", &mut cart, &catalog);
    let report = run("remove Bruschetta", &mut cart, &catalog);
    assert_eq!(cart.quantity_of("app1"), 2);
    assert_eq!(
        report.confirmation().as_deref(),
        Some("I've removed Bruschetta from your order.")
    );

    let mut single = Cart::new();
    run("add Bruschetta", &mut single, &catalog);
    run("remove Bruschetta", &mut single, &catalog);
    assert!(single.is_empty());
}

#[test]
fn test_remove_quantity_is_informational() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();

    run("add 3 Calamari", &mut cart, &catalog);
    run("remove 2 Calamari", &mut cart, &catalog);
    assert_eq!(cart.quantity_of("app4"), 2);
}

#[test]
fn test_add_n_then_remove_n_restores_cart() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();
    run("add Grilled Salmon", &mut cart, &catalog);
    let before = cart.clone();

    run("add Tiramisu", &mut cart, &catalog);
    run("add Tiramisu", &mut cart, &catalog);
    run("remove Tiramisu", &mut cart, &catalog);
    run("remove Tiramisu", &mut cart, &catalog);
    assert_eq!(cart, before);
}

#[test]
fn test_replace_bruschetta_with_calamari() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();
    run("add Bruschetta", &mut cart, &catalog);

    let report = run("replace Bruschetta with Calamari", &mut cart, &catalog);

    assert_eq!(cart.quantity_of("app1"), 0);
    assert_eq!(cart.quantity_of("app4"), 1);
    assert_eq!(cart.line_count(), 1);
    assert_eq!(
        report.confirmation().as_deref(),
        Some("I've replaced Bruschetta with 1 Calamari in your order.")
    );
}

#[test]
fn test_replace_evicts_whole_line() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();
    run("add 4 wings", &mut cart, &catalog);

    run("swap the wings for 2 Mozzarella Sticks", &mut cart, &catalog);
    assert_eq!(cart.quantity_of("app5"), 0);
    assert_eq!(cart.quantity_of("app2"), 2);
}

#[test]
fn test_replace_when_old_item_absent_still_adds() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();

    let report = run("replace the cheesecake with Tiramisu", &mut cart, &catalog);

    assert_eq!(cart.quantity_of("dessert3"), 1);
    assert_eq!(
        report.applied,
        vec![AppliedChange::Added {
            items: vec![AppliedItem {
                item_id: "dessert3".into(),
                name: "Tiramisu".into(),
                quantity: 1,
            }]
        }]
    );
    assert_eq!(report.skipped[0].reason, SkipReason::NotInCart);
}

#[test]
fn test_unknown_item_leaves_cart_unchanged() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();
    run("add Bruschetta", &mut cart, &catalog);
    let before = cart.clone();

    let report = run("add Unicorn Steak", &mut cart, &catalog);

    assert_eq!(cart, before);
    assert!(report.is_noop());
    assert!(report.confirmation().is_none());
    assert_eq!(
        report.skipped,
        vec![SkippedItem {
            raw_name: "Unicorn Steak".into(),
            command: CommandKind::Add,
            reason: SkipReason::NotFound,
        }]
    );
    assert_eq!(
        report.reply_text(),
        "Sorry, I couldn't find Unicorn Steak on our menu."
    );
}

#[test]
fn test_partial_application_lists_only_applied_items() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();

    let report = run("add 2 Tiramisu and a Unicorn Steak", &mut cart, &catalog);

    assert_eq!(
        report.confirmation().as_deref(),
        Some("I've added 2 Tiramisu to your order.")
    );
    assert_eq!(
        report.reply_text(),
        "I've added 2 Tiramisu to your order. Sorry, I couldn't find Unicorn Steak on our menu."
    );
}

#[test]
fn test_multiple_commands_confirmation() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();
    run("add Cheesecake", &mut cart, &catalog);

    let report = run(
        "add 2 Bruschetta, 1 Calamari and remove the Cheesecake",
        &mut cart,
        &catalog,
    );

    assert_eq!(
        report.confirmation().as_deref(),
        Some("I've added 2 Bruschetta, 1 Calamari and removed Cheesecake in your order.")
    );
    assert_eq!(cart.quantity_of("dessert2"), 0);
}

#[test]
fn test_uses_catalog_display_names() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();

    let report = run("add 2 FRIES", &mut cart, &catalog);
    assert_eq!(
        report.confirmation().as_deref(),
        Some("I've added 2 French Fries to your order.")
    );
}

#[test]
fn test_remove_item_not_in_cart() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();

    let report = run("remove the steak", &mut cart, &catalog);
    assert!(report.is_noop());
    assert_eq!(report.reply_text(), "steak is not in your order.");
}

#[test]
fn test_quantity_limit_is_skipped() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();
    run("add 9999 rice", &mut cart, &catalog);

    let report = run("add rice", &mut cart, &catalog);
    assert_eq!(cart.quantity_of("side5"), 9999);
    assert_eq!(report.skipped[0].reason, SkipReason::QuantityLimit);
}

#[test]
fn test_empty_commands_fallback_text() {
    let catalog = create_test_catalog();
    let mut cart = Cart::new();

    let report = apply(&[], &mut cart, &catalog);
    assert!(report.is_noop());
    assert_eq!(
        report.reply_text(),
        "Sorry, I couldn't find those items on our menu."
    );
}
