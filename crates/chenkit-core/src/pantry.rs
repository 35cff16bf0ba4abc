//! Ingredient availability scoring.
//!
//! Matches recipe ingredient lines against the inventory on key nouns,
//! ignoring quantities, units and common adjectives, and scores each recipe
//! by the percentage of its ingredients currently on hand.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::SourceRecord;

/// Words ignored when matching ingredients: adjectives, units, quantities.
pub const IGNORE_WORDS: &[&str] = &[
    "swieze", "swiezy", "swieza", "mielony", "mielona", "mielone",
    "suszone", "suszony", "suszona", "cale", "caly", "cala",
    "male", "maly", "mala", "duze", "duzy", "duza",
    "czerwone", "czerwony", "czerwona", "biale", "bialy", "biala",
    "zolte", "zolty", "zolta", "czarne", "czarny", "czarna",
    "lyzka", "lyzki", "lyzek", "szklanka", "szklanki",
    "gram", "sztuk", "sztuki", "opakowanie", "puszka", "sloik",
    "okolo", "kilka", "garsc", "troche", "duzo", "malo",
    "wedzone", "wedzony", "wedzona", "prazone", "prazony", "prazona",
    "naturalne", "naturalny", "naturalna", "ekologiczne", "bio",
    "pelnoziarniste", "pelnoziarnisty", "razowe", "razowy",
    "zimnotloczony", "nierafinowany", "extra", "virgin",
    "fresh", "dried", "ground", "whole", "small", "large", "chopped",
    "sliced", "grams", "cups", "tablespoon", "teaspoon", "pinch", "handful",
];

/// Inventory words shorter than this never match by reverse containment.
const MIN_REVERSE_MATCH_CHARS: usize = 5;

/// Availability of one recipe's ingredients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeAvailability {
    pub name: String,
    pub title: String,
    /// Percentage of ingredients on hand, `0..=100`.
    pub percent: u8,
    pub available: usize,
    pub total: usize,
    /// Ingredient lines not covered by the inventory, in recipe order.
    pub missing: Vec<String>,
}

/// Union of checklist items across inventory records.
pub fn inventory_items(records: &[SourceRecord]) -> BTreeSet<String> {
    records
        .iter()
        .flat_map(|r| r.items.iter().cloned())
        .collect()
}

/// Extract the meaningful words of an ingredient or inventory line.
pub fn extract_key_words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase().replace([',', '(', ')'], " ");
    lower
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .filter(|w| !IGNORE_WORDS.contains(w))
        .filter(|w| !w.chars().all(|c| c.is_numeric()))
        .map(strip_quantity_suffix)
        .filter(|w| w.chars().count() > 3)
        .map(str::to_string)
        .collect()
}

/// Strip a trailing quantity such as `400g` or `2` from a word.
fn strip_quantity_suffix(word: &str) -> &str {
    let body = word.strip_suffix('g').unwrap_or(word);
    let trimmed = body.trim_end_matches(|c: char| c.is_ascii_digit());
    if trimmed.len() < body.len() {
        trimmed
    } else {
        word
    }
}

/// Whether an ingredient line is covered by any inventory line.
pub fn ingredient_match<'a, I>(item: &str, inventory: I) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    let item_words = extract_key_words(item);
    if item_words.is_empty() {
        return false;
    }
    let item_lower = item.to_lowercase();

    inventory.into_iter().any(|inv| {
        let inv_lower = inv.to_lowercase();
        if item_words.iter().any(|w| inv_lower.contains(w.as_str())) {
            return true;
        }
        extract_key_words(inv).iter().any(|inv_word| {
            inv_word.chars().count() >= MIN_REVERSE_MATCH_CHARS && item_lower.contains(inv_word.as_str())
        })
    })
}

/// Percentage (`0..=100`, floored) of a recipe's ingredients on hand.
pub fn score_recipe(recipe: &SourceRecord, inventory: &BTreeSet<String>) -> u8 {
    availability(recipe, inventory).percent
}

fn availability(recipe: &SourceRecord, inventory: &BTreeSet<String>) -> RecipeAvailability {
    let total = recipe.items.len();
    let missing: Vec<String> = recipe
        .items
        .iter()
        .filter(|item| !ingredient_match(item, inventory))
        .cloned()
        .collect();
    let available = total - missing.len();
    let percent = if total == 0 {
        0
    } else {
        (available * 100 / total) as u8
    };

    RecipeAvailability {
        name: recipe.name.clone(),
        title: recipe.display_title().to_string(),
        percent,
        available,
        total,
        missing,
    }
}

/// Rank recipes with ingredients by availability, best first.
///
/// Recipes without ingredient items are skipped. Equal scores keep input
/// order.
pub fn rank_recipes(
    recipes: &[SourceRecord],
    inventory: &BTreeSet<String>,
    limit: usize,
) -> Vec<RecipeAvailability> {
    let mut ranked: Vec<RecipeAvailability> = recipes
        .iter()
        .filter(|r| !r.items.is_empty())
        .map(|r| availability(r, inventory))
        .collect();
    ranked.sort_by(|a, b| b.percent.cmp(&a.percent));
    ranked.truncate(limit);
    ranked
}
