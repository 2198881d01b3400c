//! Menu Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Menu item entity (read-only, loaded once at startup)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Stable id, prefix encodes the course (`app1`, `main3`, `side2`, `dessert1`)
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in currency unit
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_info: Option<FoodInfo>,
}

impl MenuItem {
    /// Course derived from the id prefix
    pub fn course(&self) -> Course {
        Course::from_item_id(&self.id)
    }

    pub fn contains_allergen(&self, allergen: Allergen) -> bool {
        self.food_info
            .as_ref()
            .is_some_and(|info| info.allergens.contains(&allergen))
    }
}

/// Menu category with its items in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    /// Category key (`appetizers`, `mains`, `sides`, `desserts`)
    pub id: String,
    /// Display label ("Main Courses")
    pub label: String,
    pub items: Vec<MenuItem>,
}

/// Course of a menu item, read from its id prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Course {
    Appetizer,
    Main,
    Side,
    Dessert,
    Other,
}

impl Course {
    pub fn from_item_id(id: &str) -> Self {
        if id.starts_with("app") {
            Self::Appetizer
        } else if id.starts_with("main") {
            Self::Main
        } else if id.starts_with("side") {
            Self::Side
        } else if id.starts_with("dessert") {
            Self::Dessert
        } else {
            Self::Other
        }
    }
}

/// Ingredient / allergen / dietary information of one item
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FoodInfo {
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<Allergen>,
    #[serde(default)]
    pub dietary: Vec<DietaryTag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Allergen {
    Gluten,
    Dairy,
    Nuts,
    Shellfish,
    Soy,
    Eggs,
}

impl Allergen {
    pub const ALL: [Allergen; 6] = [
        Allergen::Gluten,
        Allergen::Dairy,
        Allergen::Nuts,
        Allergen::Shellfish,
        Allergen::Soy,
        Allergen::Eggs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gluten => "gluten",
            Self::Dairy => "dairy",
            Self::Nuts => "nuts",
            Self::Shellfish => "shellfish",
            Self::Soy => "soy",
            Self::Eggs => "eggs",
        }
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryTag {
    Vegetarian,
    Vegan,
    Keto,
    Halal,
    Kosher,
}

impl DietaryTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::Keto => "keto",
            Self::Halal => "halal",
            Self::Kosher => "kosher",
        }
    }
}

impl fmt::Display for DietaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_from_id_prefix() {
        assert_eq!(Course::from_item_id("app3"), Course::Appetizer);
        assert_eq!(Course::from_item_id("main1"), Course::Main);
        assert_eq!(Course::from_item_id("side5"), Course::Side);
        assert_eq!(Course::from_item_id("dessert2"), Course::Dessert);
        assert_eq!(Course::from_item_id("drink1"), Course::Other);
    }

    #[test]
    fn test_menu_item_deserialize_without_optional_fields() {
        let json = r#"{"id":"app1","name":"Bruschetta","description":"Toast","price":8.0}"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.course(), Course::Appetizer);
        assert!(item.image.is_none());
        assert!(item.food_info.is_none());
        assert!(!item.contains_allergen(Allergen::Gluten));
    }

    #[test]
    fn test_food_info_serde_names() {
        let info = FoodInfo {
            ingredients: vec!["Squid".into()],
            allergens: vec![Allergen::Shellfish, Allergen::Eggs],
            dietary: vec![DietaryTag::Keto],
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"shellfish\""));
        assert!(json.contains("\"keto\""));
    }
}
