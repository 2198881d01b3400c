//! 命令执行器
//!
//! 将 [`ModificationCommand`] 解析到目录菜品并应用到购物车：
//!
//! | 命令 | 效果 |
//! |------|------|
//! | Add | 按请求数量增加或插入 |
//! | Remove | 每个条目数量减 1 (请求数量仅供参考) |
//! | Replace | 整行移除旧菜品，再按数量加入新菜品 |
//!
//! 无法解析的名称不会报错，而是记录到 [`ApplyReport::skipped`] 并输出日志。

use serde::Serialize;
use shared::intent::{CommandKind, ItemRequest, ModificationCommand};
use shared::models::MenuItem;

use crate::cart::{Cart, CartError};
use crate::catalog::Catalog;
use crate::resolver::resolve;

/// 实际生效的菜品
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedItem {
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
}

impl AppliedItem {
    fn new(item: &MenuItem, quantity: u32) -> Self {
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            quantity,
        }
    }
}

/// 一条命令实际产生的变更
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppliedChange {
    Added {
        items: Vec<AppliedItem>,
    },
    Removed {
        items: Vec<AppliedItem>,
    },
    Replaced {
        removed: Vec<AppliedItem>,
        added: AppliedItem,
    },
}

impl AppliedChange {
    /// "added 2 Bruschetta" / "removed Cheesecake" / "replaced Fries with 1 Rice"
    fn phrase(&self) -> String {
        match self {
            AppliedChange::Added { items } => format!("added {}", with_quantities(items)),
            AppliedChange::Removed { items } => format!("removed {}", names(items)),
            AppliedChange::Replaced { removed, added } => format!(
                "replaced {} with {} {}",
                names(removed),
                added.quantity,
                added.name
            ),
        }
    }

    fn suffix(&self) -> &'static str {
        match self {
            AppliedChange::Added { .. } => "to your order",
            AppliedChange::Removed { .. } => "from your order",
            AppliedChange::Replaced { .. } => "in your order",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// 名称无法匹配任何菜品
    NotFound,
    /// 菜品存在但不在购物车中
    NotInCart,
    /// 超过单行数量上限
    QuantityLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub raw_name: String,
    pub command: CommandKind,
    pub reason: SkipReason,
}

/// 执行结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub applied: Vec<AppliedChange>,
    pub skipped: Vec<SkippedItem>,
}

impl ApplyReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }

    /// 只描述实际生效的变更；没有变更时返回 None
    pub fn confirmation(&self) -> Option<String> {
        match self.applied.as_slice() {
            [] => None,
            [single] => Some(format!("I've {} {}.", single.phrase(), single.suffix())),
            many => {
                let actions: Vec<String> = many.iter().map(AppliedChange::phrase).collect();
                Some(format!("I've {} in your order.", actions.join(" and ")))
            }
        }
    }

    /// 跳过项提示
    pub fn skip_notice(&self) -> Option<String> {
        let mut sentences = Vec::new();

        let not_found = self.skipped_names(SkipReason::NotFound);
        if !not_found.is_empty() {
            sentences.push(format!(
                "Sorry, I couldn't find {} on our menu.",
                not_found.join(", ")
            ));
        }

        let not_in_cart = self.skipped_names(SkipReason::NotInCart);
        if !not_in_cart.is_empty() {
            sentences.push(format!(
                "{} {} not in your order.",
                not_in_cart.join(", "),
                if not_in_cart.len() == 1 { "is" } else { "are" }
            ));
        }

        let at_limit = self.skipped_names(SkipReason::QuantityLimit);
        if !at_limit.is_empty() {
            sentences.push(format!(
                "{} already at the maximum quantity.",
                at_limit.join(", ")
            ));
        }

        (!sentences.is_empty()).then(|| sentences.join(" "))
    }

    /// 面向顾客的完整回复
    pub fn reply_text(&self) -> String {
        match (self.confirmation(), self.skip_notice()) {
            (Some(c), Some(n)) => format!("{} {}", c, n),
            (Some(c), None) => c,
            (None, Some(n)) => n,
            (None, None) => COULD_NOT_FIND.to_string(),
        }
    }

    fn skipped_names(&self, reason: SkipReason) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for s in self.skipped.iter().filter(|s| s.reason == reason) {
            if !out.contains(&s.raw_name.as_str()) {
                out.push(&s.raw_name);
            }
        }
        out
    }

    fn skip(&mut self, raw_name: &str, command: CommandKind, reason: SkipReason) {
        tracing::info!(
            target: "intent",
            item = %raw_name,
            command = %command,
            reason = ?reason,
            "Skipped item"
        );
        self.skipped.push(SkippedItem {
            raw_name: raw_name.to_string(),
            command,
            reason,
        });
    }
}

const COULD_NOT_FIND: &str = "Sorry, I couldn't find those items on our menu.";

/// 依次执行命令
pub fn apply(commands: &[ModificationCommand], cart: &mut Cart, catalog: &Catalog) -> ApplyReport {
    let mut report = ApplyReport::default();

    for command in commands {
        tracing::debug!(target: "intent", command = %command.kind(), "Applying command");
        let change = match command {
            ModificationCommand::Add { items } => apply_add(items, cart, catalog, &mut report),
            ModificationCommand::Remove { items } => {
                apply_remove(items, cart, catalog, &mut report)
            }
            ModificationCommand::Replace { remove, add } => {
                apply_replace(remove, add, cart, catalog, &mut report)
            }
        };
        if let Some(change) = change {
            report.applied.push(change);
        }
    }

    report
}

fn apply_add(
    items: &[ItemRequest],
    cart: &mut Cart,
    catalog: &Catalog,
    report: &mut ApplyReport,
) -> Option<AppliedChange> {
    let added: Vec<AppliedItem> = items
        .iter()
        .filter_map(|request| add_one(request, CommandKind::Add, cart, catalog, report))
        .collect();
    (!added.is_empty()).then_some(AppliedChange::Added { items: added })
}

fn apply_remove(
    items: &[ItemRequest],
    cart: &mut Cart,
    catalog: &Catalog,
    report: &mut ApplyReport,
) -> Option<AppliedChange> {
    let mut removed = Vec::new();
    for request in items {
        let Some(item) = resolve(&request.raw_name, catalog).item() else {
            report.skip(&request.raw_name, CommandKind::Remove, SkipReason::NotFound);
            continue;
        };
        match cart.remove_one(&item.id) {
            Ok(_) => removed.push(AppliedItem::new(item, 1)),
            Err(_) => report.skip(&request.raw_name, CommandKind::Remove, SkipReason::NotInCart),
        }
    }
    (!removed.is_empty()).then_some(AppliedChange::Removed { items: removed })
}

fn apply_replace(
    old_names: &[String],
    replacement: &ItemRequest,
    cart: &mut Cart,
    catalog: &Catalog,
    report: &mut ApplyReport,
) -> Option<AppliedChange> {
    let mut removed = Vec::new();
    for raw in old_names {
        let Some(item) = resolve(raw, catalog).item() else {
            report.skip(raw, CommandKind::Replace, SkipReason::NotFound);
            continue;
        };
        match cart.evict(&item.id) {
            Some(line) => removed.push(AppliedItem::new(item, line.quantity)),
            None => report.skip(raw, CommandKind::Replace, SkipReason::NotInCart),
        }
    }

    let added = add_one(replacement, CommandKind::Replace, cart, catalog, report);

    match (removed.is_empty(), added) {
        (false, Some(added)) => Some(AppliedChange::Replaced { removed, added }),
        (true, Some(added)) => Some(AppliedChange::Added { items: vec![added] }),
        (false, None) => Some(AppliedChange::Removed { items: removed }),
        (true, None) => None,
    }
}

fn add_one(
    request: &ItemRequest,
    command: CommandKind,
    cart: &mut Cart,
    catalog: &Catalog,
    report: &mut ApplyReport,
) -> Option<AppliedItem> {
    let Some(item) = resolve(&request.raw_name, catalog).item() else {
        report.skip(&request.raw_name, command, SkipReason::NotFound);
        return None;
    };
    match cart.add_item(item, request.quantity) {
        Ok(_) => Some(AppliedItem::new(item, request.quantity)),
        Err(CartError::QuantityLimit { .. }) => {
            report.skip(&request.raw_name, command, SkipReason::QuantityLimit);
            None
        }
        Err(e) => {
            tracing::warn!(target: "intent", item = %item.id, error = %e, "Add rejected");
            None
        }
    }
}

fn with_quantities(items: &[AppliedItem]) -> String {
    items
        .iter()
        .map(|i| format!("{} {}", i.quantity, i.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn names(items: &[AppliedItem]) -> String {
    items
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests;
