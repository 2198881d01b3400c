//! Cart Model
//!
//! Wire views of a session cart. Amounts are currency units rounded to 2 dp;
//! the server computes them from the live cart at snapshot time.

use serde::{Deserialize, Serialize};

/// One cart line as seen by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineView {
    pub item_id: String,
    pub name: String,
    /// Unit price in currency unit
    pub unit_price: f64,
    pub quantity: u32,
    /// unit_price × quantity
    pub line_total: f64,
}

/// Point-in-time cart view
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Lines in insertion order
    pub lines: Vec<CartLineView>,
    pub subtotal: f64,
    /// Sum of quantities over all lines
    pub item_count: u32,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity held for an item id (0 when absent)
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.item_id == item_id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }
}

/// Checkout receipt (no payment is taken)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub order_number: String,
    pub lines: Vec<CartLineView>,
    pub subtotal: f64,
    /// Tax rate in percentage (e.g., 8 = 8%)
    pub tax_rate: f64,
    pub tax: f64,
    pub total: f64,
    /// Unix milliseconds
    pub issued_at: i64,
}
