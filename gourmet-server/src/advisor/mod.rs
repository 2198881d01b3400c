//! 点单顾问
//!
//! - [`analyze_order`] - 按人数/预算分析订单并给出建议
//! - [`allergen_summary`] - 订单中各过敏源对应的菜品

mod allergens;
mod analysis;

pub use allergens::{AllergenEntry, AllergenSummary, allergen_summary, match_allergen};
pub use analysis::{BudgetSwap, CourseCounts, OrderAnalysis, Suggestion, analyze_order};
