// ABOUTME: Condition-keyed diet and lifestyle guidance used by the model-driven prediction path
// ABOUTME: Unknown conditions fall back to the Normal sleep entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

use super::to_owned_list;
use nidra_core::models::{Condition, RecommendationEntry, ResolvedCondition};

/// Static guidance for one condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionGuidance {
    /// General lifestyle recommendations
    pub recommendations: &'static [&'static str],
    /// Foods to favour
    pub foods_to_eat: &'static [&'static str],
    /// Foods to avoid
    pub foods_to_avoid: &'static [&'static str],
}

impl ConditionGuidance {
    /// Owned food lists
    #[must_use]
    pub fn entry(&self) -> RecommendationEntry {
        RecommendationEntry {
            foods_to_eat: to_owned_list(self.foods_to_eat),
            foods_to_avoid: to_owned_list(self.foods_to_avoid),
        }
    }

    /// Owned lifestyle recommendations
    #[must_use]
    pub fn recommendations(&self) -> Vec<String> {
        to_owned_list(self.recommendations)
    }
}

static NORMAL_SLEEP: ConditionGuidance = ConditionGuidance {
    recommendations: &[
        "Maintain a balanced diet",
        "Stay hydrated",
        "Regular exercise",
        "Limit screen time before bed",
    ],
    foods_to_eat: &["Balanced Mix of Carbs/Protein", "Fresh Fruits", "Nuts", "Yogurt"],
    foods_to_avoid: &[
        "Excessive Sugar",
        "Heavy Late-Night Snacks",
        "Caffeine late in the day",
    ],
};

static DISTURBED_SLEEP: ConditionGuidance = ConditionGuidance {
    recommendations: &[
        "Establish a calming bedtime routine",
        "Avoid stimulants in the evening",
        "Manage stress through relaxation techniques",
        "Ensure a comfortable sleep environment",
    ],
    foods_to_eat: &["Chamomile Tea", "Almonds", "Warm Milk", "Bananas"],
    foods_to_avoid: &["Spicy Foods", "Alcohol", "Caffeine", "Heavy Meals"],
};

static INSOMNIA_LIKE: ConditionGuidance = ConditionGuidance {
    recommendations: &[
        "Avoid caffeine after 2 PM",
        "Drink warm milk before bed",
        "Limit alcohol consumption",
        "Maintain a consistent sleep schedule",
    ],
    foods_to_eat: &["Kiwi", "Walnuts", "Tart Cherry Juice", "Fatty Fish"],
    foods_to_avoid: &["Coffee", "Spicy Foods", "Aged Cheese", "Chocolate"],
};

static APNEA_LIKE: ConditionGuidance = ConditionGuidance {
    recommendations: &[
        "Maintain a healthy weight",
        "Avoid heavy meals before bed",
        "Limit alcohol and sedatives",
        "Sleep on your side",
    ],
    foods_to_eat: &["Vegetables", "Fruits", "Whole Grains", "Lean Proteins"],
    foods_to_avoid: &[
        "High-Fat Dairy",
        "Processed Meats",
        "Sugary Drinks",
        "Fried Foods",
    ],
};

static AWAKE: ConditionGuidance = ConditionGuidance {
    recommendations: &[
        "Engage in relaxing activities if unable to sleep",
        "Avoid checking the clock",
        "Keep the room dark and cool",
        "Only go to bed when tired",
    ],
    foods_to_eat: &["Magnesium-rich foods", "Herbal Teas", "Light Snacks", "Turkey"],
    foods_to_avoid: &["Caffeine", "Sugar", "Alcohol", "Large Meals"],
};

/// Condition-keyed guidance table
pub struct ConditionCatalog;

impl ConditionCatalog {
    /// Guidance for a known condition
    #[must_use]
    pub fn for_condition(condition: Condition) -> &'static ConditionGuidance {
        match condition {
            Condition::NormalSleep => &NORMAL_SLEEP,
            Condition::DisturbedSleep => &DISTURBED_SLEEP,
            Condition::InsomniaLike => &INSOMNIA_LIKE,
            Condition::ApneaLike => &APNEA_LIKE,
            Condition::Awake => &AWAKE,
        }
    }

    /// Guidance for a resolved condition; `Unknown` gets the Normal sleep entry
    #[must_use]
    pub fn by_condition(condition: ResolvedCondition) -> &'static ConditionGuidance {
        match condition {
            ResolvedCondition::Known(known) => Self::for_condition(known),
            ResolvedCondition::Unknown => &NORMAL_SLEEP,
        }
    }

    /// Guidance by wire label; unrecognized labels get the Normal sleep entry
    #[must_use]
    pub fn by_label(label: &str) -> &'static ConditionGuidance {
        Self::by_condition(ResolvedCondition::from_label(label))
    }
}
