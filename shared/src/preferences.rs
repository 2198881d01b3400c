//! Customer preferences stated in conversation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Preferences recomputed from every utterance
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restriction: Option<DietaryRestriction>,
    /// Budget in currency unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergies: Vec<String>,
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.people_count.is_none()
            && self.dietary_restriction.is_none()
            && self.budget.is_none()
            && self.allergies.is_empty()
    }
}

/// Fixed dietary restriction set, in detection priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryRestriction {
    Vegan,
    Vegetarian,
    GlutenFree,
    DairyFree,
    Keto,
    Halal,
    Kosher,
    LowCarb,
    Paleo,
}

impl DietaryRestriction {
    pub const ALL: [DietaryRestriction; 9] = [
        Self::Vegan,
        Self::Vegetarian,
        Self::GlutenFree,
        Self::DairyFree,
        Self::Keto,
        Self::Halal,
        Self::Kosher,
        Self::LowCarb,
        Self::Paleo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vegan => "vegan",
            Self::Vegetarian => "vegetarian",
            Self::GlutenFree => "gluten-free",
            Self::DairyFree => "dairy-free",
            Self::Keto => "keto",
            Self::Halal => "halal",
            Self::Kosher => "kosher",
            Self::LowCarb => "low-carb",
            Self::Paleo => "paleo",
        }
    }
}

impl fmt::Display for DietaryRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(Preferences::default().is_empty());
        let prefs = Preferences {
            budget: Some(50.0),
            ..Default::default()
        };
        assert!(!prefs.is_empty());
    }

    #[test]
    fn test_restriction_serde_kebab() {
        let json = serde_json::to_string(&DietaryRestriction::GlutenFree).unwrap();
        assert_eq!(json, "\"gluten-free\"");
        assert_eq!(DietaryRestriction::LowCarb.to_string(), "low-carb");
    }
}
