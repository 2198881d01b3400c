//! 本地意图提取
//!
//! 同步、离线的短语模板解析器，在任何外部调用之前运行。
//!
//! - [`extract`] - 话语 → [`ModificationCommand`] 列表
//! - [`parse_item_list`] - "2 Bruschetta and a Calamari" → [`ItemRequest`] 列表
//!
//! [`ModificationCommand`]: shared::intent::ModificationCommand
//! [`ItemRequest`]: shared::intent::ItemRequest

mod extractor;
mod list;

pub use extractor::extract;
pub use list::{parse_item, parse_item_list, trim_noise};
