use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::images::CacheBuster;

/// Listing projection of a recipe, as shown on the home and search pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub recipe_id: String,
    pub name: String,
    pub snippet: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl RecipeSummary {
    /// First image, which listings use as the card thumbnail.
    pub fn cover_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Image URLs with the cache buster applied, in their original order.
    pub fn busted_image_urls(&self, buster: &CacheBuster) -> Vec<String> {
        self.image_urls.iter().map(|url| buster.apply(url)).collect()
    }
}

/// An ingredient line: quantity then name, e.g. `["2 cups", "flour"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient(pub String, pub String);

impl Ingredient {
    pub fn quantity(&self) -> &str {
        &self.0
    }

    pub fn name(&self) -> &str {
        &self.1
    }
}

/// Nutrition facts per serving.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: f64,
    pub carbohydrate_content: f64,
    pub cholesterol_content: f64,
    pub fat_content: f64,
    pub fiber_content: f64,
    pub protein_content: f64,
    pub sugar_content: f64,
}

/// Timing fields, kept as the duration strings the data source sends (e.g. `PT15M`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeTiming {
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
}

/// Full recipe as shown on the recipe page.
///
/// The wire shape is a single flat object; summary, nutrition and timing
/// fields are flattened into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub nutrition: NutritionFacts,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub author_name: String,
    pub recipe_category: String,
    pub recipe_servings: f64,
    #[serde(flatten)]
    pub timing: RecipeTiming,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
}

impl RecipeDetail {
    /// Project the detail down to its listing summary.
    pub fn summary(&self) -> RecipeSummary {
        self.summary.clone()
    }

    pub fn recipe_id(&self) -> &str {
        &self.summary.recipe_id
    }

    pub fn name(&self) -> &str {
        &self.summary.name
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }
}
