//! 菜单目录 (Catalog)
//!
//! 启动时加载一次的只读菜单表。默认使用编译期嵌入的 `data/menu.json`，
//! 设置 `MENU_PATH` 时从文件加载。加载后不再修改。
//!
//! 迭代顺序 = 分类声明顺序 + 分类内顺序，名称模糊匹配依赖此顺序。

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use shared::models::{MenuCategory, MenuItem};
use thiserror::Error;

use crate::utils::AppError;

const EMBEDDED_MENU: &str = include_str!("../../data/menu.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read menu file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid menu JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("menu has no items")]
    Empty,

    #[error("duplicate menu item id: {0}")]
    DuplicateItem(String),

    #[error("menu item {id} has invalid price {price}")]
    InvalidPrice { id: String, price: f64 },

    #[error("menu item {0} has an empty name")]
    EmptyName(String),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::config(err.to_string())
    }
}

#[derive(Deserialize)]
struct MenuFile {
    categories: Vec<MenuCategory>,
}

/// 只读菜单目录
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<MenuCategory>,
}

impl Catalog {
    /// 按配置加载：有路径则读文件，否则使用嵌入菜单
    pub fn load(menu_path: Option<&str>) -> Result<Self, CatalogError> {
        match menu_path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    /// 编译期嵌入的默认菜单
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_MENU)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let file: MenuFile = serde_json::from_str(raw)?;
        Self::from_categories(file.categories)
    }

    /// 校验并构建目录
    pub fn from_categories(categories: Vec<MenuCategory>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for item in categories.iter().flat_map(|c| c.items.iter()) {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateItem(item.id.clone()));
            }
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(CatalogError::InvalidPrice {
                    id: item.id.clone(),
                    price: item.price,
                });
            }
            if item.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(item.id.clone()));
            }
        }
        if seen.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&MenuCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// 全部菜品，按目录顺序
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
