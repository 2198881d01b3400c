//! 菜品名称解析
//!
//! 先做大小写不敏感的精确匹配，再做双向包含匹配。
//! 模糊匹配按目录迭代顺序取第一个命中项。

use shared::models::MenuItem;

use crate::catalog::Catalog;

/// 解析结果。找不到不是错误，调用方跳过即可
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a MenuItem),
    NotFound,
}

impl<'a> Resolution<'a> {
    pub fn item(self) -> Option<&'a MenuItem> {
        match self {
            Resolution::Found(item) => Some(item),
            Resolution::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// 名称 → 目录菜品
pub fn resolve<'a>(raw_name: &str, catalog: &'a Catalog) -> Resolution<'a> {
    let query = normalize(raw_name);
    if query.is_empty() {
        return Resolution::NotFound;
    }

    if let Some(item) = find_exact(&query, catalog) {
        return Resolution::Found(item);
    }

    catalog
        .items()
        .find(|item| {
            let name = item.name.to_lowercase();
            name.contains(&query) || query.contains(&name)
        })
        .map_or(Resolution::NotFound, Resolution::Found)
}

/// 仅精确匹配 (大小写不敏感)
pub fn resolve_exact<'a>(raw_name: &str, catalog: &'a Catalog) -> Option<&'a MenuItem> {
    let query = normalize(raw_name);
    if query.is_empty() {
        return None;
    }
    find_exact(&query, catalog)
}

fn find_exact<'a>(query: &str, catalog: &'a Catalog) -> Option<&'a MenuItem> {
    catalog
        .items()
        .find(|item| item.name.to_lowercase() == query)
}

/// 小写并折叠空白
fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
