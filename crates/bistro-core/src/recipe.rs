//! # Recipe Catalog
//!
//! Maps a meal to its per-unit ingredient requirements.
//!
//! ## Rate Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │          Per-unit rate for an ingredient of a meal                  │
//! │                                                                     │
//! │  1. Explicit amount on the recipe line          (preferred)         │
//! │         │ absent?                                                   │
//! │         ▼                                                           │
//! │  2. Global default-ingredient-rate table        (configured)        │
//! │         │ absent?                                                   │
//! │         ▼                                                           │
//! │  3. General fallback: 0.1 unit per item         (documented const)  │
//! │                                                                     │
//! │  The fallback exists so unknown ingredients never block an          │
//! │  otherwise valid order - consumption is never silently zero.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A meal with no recipe at all yields an **empty** requirement set: the
//! meal is assumed to consume nothing. This is a conscious permissive
//! default rather than a hard error.
//!
//! The catalog is read-only to every other component; it is built once and
//! shared behind an `Arc`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Fallback Rate
// =============================================================================

/// General fallback consumption rate: 0.1 unit per ingredient per item.
///
/// Applied only when an ingredient has neither an explicit recipe amount
/// nor an entry in the default-rate table.
pub fn general_fallback_rate() -> Decimal {
    // Decimal::new(mantissa, scale): 1 with scale 1 = 0.1
    Decimal::new(1, 1)
}

// =============================================================================
// Recipe Types
// =============================================================================

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    /// Ingredient name; matched against inventory item names.
    pub ingredient: String,

    /// Explicit per-unit amount. When absent, the default-rate table and
    /// then the general fallback apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_per_unit: Option<Decimal>,
}

impl RecipeLine {
    /// A line with an explicit per-unit amount.
    pub fn new(ingredient: impl Into<String>, amount_per_unit: Decimal) -> Self {
        RecipeLine {
            ingredient: ingredient.into(),
            amount_per_unit: Some(amount_per_unit),
        }
    }

    /// A line whose rate resolves through the default table / fallback.
    pub fn unrated(ingredient: impl Into<String>) -> Self {
        RecipeLine {
            ingredient: ingredient.into(),
            amount_per_unit: None,
        }
    }
}

/// A meal's recipe: an ordered list of ingredient lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub meal_name: String,
    pub lines: Vec<RecipeLine>,
}

/// A resolved requirement: `quantity × per-unit-rate` for one ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredIngredient {
    pub ingredient: String,
    pub amount: Decimal,
}

// =============================================================================
// Recipe Catalog
// =============================================================================

/// Static/configurable mapping from meals to per-unit ingredient
/// requirements.
///
/// ## Failure Modes
/// None beyond "meal not found", which yields an empty requirement set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeCatalog {
    /// Explicit recipes, keyed by meal name.
    recipes: HashMap<String, Recipe>,

    /// Default per-unit rates, keyed by ingredient name. Consulted for
    /// recipe lines without an explicit amount.
    default_rates: HashMap<String, Decimal>,
}

impl RecipeCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a meal's recipe. Builder-style, used at
    /// construction time; the catalog is immutable afterwards.
    pub fn with_recipe(mut self, meal_name: impl Into<String>, lines: Vec<RecipeLine>) -> Self {
        let meal_name = meal_name.into();
        self.recipes.insert(
            meal_name.clone(),
            Recipe { meal_name, lines },
        );
        self
    }

    /// Adds a default per-unit rate for an ingredient.
    pub fn with_default_rate(mut self, ingredient: impl Into<String>, rate: Decimal) -> Self {
        self.default_rates.insert(ingredient.into(), rate);
        self
    }

    /// Looks up a meal's recipe.
    pub fn recipe(&self, meal: &str) -> Option<&Recipe> {
        self.recipes.get(meal)
    }

    /// Whether the catalog knows this meal.
    pub fn contains_meal(&self, meal: &str) -> bool {
        self.recipes.contains_key(meal)
    }

    /// Iterates all recipes (for snapshots).
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    /// Computes the total ingredient requirements for `quantity` units of
    /// `meal`, preserving recipe line order.
    ///
    /// Each amount is `quantity × per-unit-rate`, with the rate resolved
    /// through the three tiers documented at module level. An unknown meal
    /// yields an empty list.
    pub fn requirements(&self, meal: &str, quantity: i64) -> Vec<RequiredIngredient> {
        let Some(recipe) = self.recipes.get(meal) else {
            return Vec::new();
        };

        let qty = Decimal::from(quantity);
        recipe
            .lines
            .iter()
            .map(|line| {
                let rate = line
                    .amount_per_unit
                    .or_else(|| self.default_rates.get(&line.ingredient).copied())
                    .unwrap_or_else(general_fallback_rate);
                RequiredIngredient {
                    ingredient: line.ingredient.clone(),
                    amount: rate * qty,
                }
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn noodle_catalog() -> RecipeCatalog {
        RecipeCatalog::new().with_recipe(
            "TomatoBeefNoodles",
            vec![
                RecipeLine::new("Tomato", dec!(0.2)),
                RecipeLine::new("Beef", dec!(0.15)),
            ],
        )
    }

    #[test]
    fn test_requirements_scale_with_quantity() {
        let catalog = noodle_catalog();
        let reqs = catalog.requirements("TomatoBeefNoodles", 2);

        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].ingredient, "Tomato");
        assert_eq!(reqs[0].amount, dec!(0.4));
        assert_eq!(reqs[1].ingredient, "Beef");
        assert_eq!(reqs[1].amount, dec!(0.3));
    }

    #[test]
    fn test_unknown_meal_yields_empty_requirements() {
        let catalog = noodle_catalog();
        assert!(catalog.requirements("Pizza", 3).is_empty());
    }

    #[test]
    fn test_default_rate_table_fills_missing_amounts() {
        let catalog = RecipeCatalog::new()
            .with_recipe(
                "HouseSoup",
                vec![RecipeLine::unrated("Salt"), RecipeLine::new("Carrot", dec!(0.3))],
            )
            .with_default_rate("Salt", dec!(0.01));

        let reqs = catalog.requirements("HouseSoup", 10);
        assert_eq!(reqs[0].amount, dec!(0.1)); // 10 × 0.01 from default table
        assert_eq!(reqs[1].amount, dec!(3)); // 10 × 0.3 explicit
    }

    #[test]
    fn test_general_fallback_never_yields_zero() {
        let catalog =
            RecipeCatalog::new().with_recipe("MysteryDish", vec![RecipeLine::unrated("Saffron")]);

        let reqs = catalog.requirements("MysteryDish", 5);
        // 5 × 0.1 fallback; unknown ingredients never silently consume zero
        assert_eq!(reqs[0].amount, dec!(0.5));
    }

    #[test]
    fn test_line_order_is_preserved() {
        let catalog = noodle_catalog();
        let names: Vec<_> = catalog
            .requirements("TomatoBeefNoodles", 1)
            .into_iter()
            .map(|r| r.ingredient)
            .collect();
        assert_eq!(names, vec!["Tomato", "Beef"]);
    }
}
