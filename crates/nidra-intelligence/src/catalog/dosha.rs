// ABOUTME: Dosha x sleep-state diet matrix for the standalone recommendation path
// ABOUTME: Unknown doshas default to Vata, unknown sleep-state labels to index 0
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

use super::to_owned_list;
use nidra_core::models::{Condition, DietRecommendation, Dosha, RecommendationEntry};
use tracing::debug;

/// Foods for one dosha and sleep state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DietEntry {
    /// Foods to favour
    pub eat: &'static [&'static str],
    /// Foods to avoid
    pub avoid: &'static [&'static str],
}

impl DietEntry {
    /// Owned food lists
    #[must_use]
    pub fn entry(&self) -> RecommendationEntry {
        RecommendationEntry {
            foods_to_eat: to_owned_list(self.eat),
            foods_to_avoid: to_owned_list(self.avoid),
        }
    }
}

// Rows follow `Dosha::index`, columns follow `Condition::state_index`
static DIET_MATRIX: [[DietEntry; 5]; 3] = [
    // Vata
    [
        DietEntry {
            eat: &[
                "Warm milk",
                "ghee",
                "rice",
                "wheat chapati",
                "cooked vegetables",
                "moong dal",
                "dates",
                "figs",
                "soaked almonds",
            ],
            avoid: &[
                "Cold food",
                "raw salad",
                "popcorn",
                "soda",
                "ice cream",
                "cold milk",
                "packaged snacks",
                "dry cereals",
            ],
        },
        DietEntry {
            eat: &[
                "Vegetable soup",
                "khichdi",
                "milk + ashwagandha",
                "stewed apple",
                "ghee rice",
                "warm herbal tea",
            ],
            avoid: &[
                "Tea",
                "coffee",
                "biscuits",
                "chips",
                "bakery items",
                "fasting",
                "cold water",
                "reheated food",
            ],
        },
        DietEntry {
            eat: &[
                "Milk + nutmeg",
                "porridge",
                "oats",
                "banana",
                "dates",
                "pumpkin",
                "rice gruel",
                "cooked carrot",
            ],
            avoid: &[
                "Dry snacks",
                "toast",
                "crackers",
                "caffeine",
                "frozen food",
                "cornflakes",
                "night tea",
            ],
        },
        DietEntry {
            eat: &[
                "Warm milk",
                "ghee",
                "soft rice",
                "vegetable broth",
                "moong dal soup",
                "boiled vegetables",
            ],
            avoid: &[
                "Cold drinks",
                "fried food",
                "raw vegetables",
                "heavy meat",
                "cheese",
                "curd at night",
            ],
        },
        DietEntry {
            eat: &[
                "Warm milk",
                "banana",
                "figs",
                "soaked almonds",
                "rice porridge",
                "herbal tea",
            ],
            avoid: &[
                "Skipping dinner",
                "caffeine",
                "spicy snacks",
                "energy drinks",
                "cold desserts",
            ],
        },
    ],
    // Pitta
    [
        DietEntry {
            eat: &[
                "Coconut water",
                "milk",
                "sweet fruits",
                "rice",
                "cucumber",
                "pumpkin",
                "bottle gourd",
                "ghee",
            ],
            avoid: &[
                "Chili",
                "fried food",
                "pickles",
                "vinegar",
                "garlic excess",
                "salty snacks",
                "sauces",
            ],
        },
        DietEntry {
            eat: &[
                "Fennel tea",
                "coriander water",
                "rose milk",
                "soaked raisins",
                "barley",
            ],
            avoid: &[
                "Spicy food",
                "fried snacks",
                "sour fruits",
                "packaged sauces",
                "excess salt",
            ],
        },
        DietEntry {
            eat: &[
                "Aloe vera juice",
                "rose milk",
                "coconut milk",
                "oats",
                "bottle gourd",
                "ash gourd",
            ],
            avoid: &[
                "Alcohol",
                "chili",
                "fermented food",
                "onion excess",
                "tomatoes",
                "curd at night",
            ],
        },
        DietEntry {
            eat: &[
                "Turmeric milk",
                "barley",
                "oats",
                "rice gruel",
                "steamed vegetables",
                "coriander soup",
            ],
            avoid: &[
                "Late dinner",
                "oily food",
                "red meat",
                "spicy curries",
                "cheese",
                "packaged food",
            ],
        },
        DietEntry {
            eat: &["Coconut water", "grapes", "watermelon", "pear", "apple"],
            avoid: &[
                "Heavy meals",
                "spicy food",
                "tea",
                "coffee",
                "chocolate",
                "junk food",
            ],
        },
    ],
    // Kapha
    [
        DietEntry {
            eat: &[
                "Light dinner",
                "vegetable soup",
                "steamed vegetables",
                "millet",
                "barley",
                "warm water",
            ],
            avoid: &[
                "Dairy at night",
                "sweets",
                "rice excess",
                "curd",
                "banana at night",
                "oily food",
            ],
        },
        DietEntry {
            eat: &["Ginger tea", "moong dal", "steamed food", "vegetable broth"],
            avoid: &["Cheese", "cold drinks", "ice cream", "sugar", "bakery items"],
        },
        DietEntry {
            eat: &[
                "Herbal tea",
                "millet porridge",
                "barley soup",
                "roasted vegetables",
            ],
            avoid: &[
                "Rice at night",
                "potatoes",
                "sweets",
                "chocolate",
                "deep-fried snacks",
            ],
        },
        DietEntry {
            eat: &[
                "Very light dinner",
                "ginger",
                "black pepper",
                "turmeric",
                "vegetable soup",
            ],
            avoid: &[
                "Dairy",
                "sugar",
                "fried food",
                "heavy grains",
                "alcohol",
                "late meals",
            ],
        },
        DietEntry {
            eat: &["Warm water", "light soup", "steamed vegetables"],
            avoid: &["Heavy dinner", "dairy", "sweets", "rice", "oily snacks"],
        },
    ],
];

/// Dosha x sleep-state diet table
pub struct DietMatrix;

impl DietMatrix {
    /// Sleep-state index of an exact label; unrecognized labels map to 0
    #[must_use]
    pub fn sleep_state_index(label: &str) -> usize {
        Condition::from_label(label).map_or(0, Condition::state_index)
    }

    /// Entry for a dosha and sleep-state index
    ///
    /// An index with no entry for the dosha falls back to Vata's index 0.
    #[must_use]
    pub fn lookup(dosha: Dosha, index: usize) -> &'static DietEntry {
        DIET_MATRIX
            .get(dosha.index())
            .and_then(|row| row.get(index))
            .unwrap_or(&DIET_MATRIX[Dosha::Vata.index()][0])
    }

    /// Standalone recommendation for a raw dosha and disorder label
    ///
    /// Never fails: the dosha is normalized (defaulting to Vata) and unknown
    /// disorders use the index-0 entry. The `condition` field echoes the raw
    /// disorder label.
    #[must_use]
    pub fn recommend(dosha: Option<&str>, disorder: &str) -> DietRecommendation {
        let dosha = Dosha::normalize_or_default(dosha);
        let index = Self::sleep_state_index(disorder);
        let entry = Self::lookup(dosha, index).entry();

        debug!(dosha = %dosha, disorder, index, "Resolved dosha diet entry");

        DietRecommendation {
            condition: format!("{disorder} ({dosha})"),
            foods_to_eat: entry.foods_to_eat,
            foods_to_avoid: entry.foods_to_avoid,
            recommendation_text: format!(
                "Based on your {dosha} Dosha and {disorder} pattern, we recommend these specific dietary adjustments."
            ),
        }
    }
}
