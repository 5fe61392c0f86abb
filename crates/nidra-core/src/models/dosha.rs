// ABOUTME: Ayurvedic dosha categories used as the secondary key of the diet matrix
// ABOUTME: Normalization capitalizes input and defaults anything unrecognized to Vata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Constitutional category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dosha {
    /// Air and space; also the documented default
    #[default]
    Vata,
    /// Fire and water
    Pitta,
    /// Earth and water
    Kapha,
}

impl Dosha {
    /// All doshas in diet-matrix order
    pub const ALL: [Self; 3] = [Self::Vata, Self::Pitta, Self::Kapha];

    /// Canonical capitalized name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vata => "Vata",
            Self::Pitta => "Pitta",
            Self::Kapha => "Kapha",
        }
    }

    /// Row of this dosha in the diet matrix
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Vata => 0,
            Self::Pitta => 1,
            Self::Kapha => 2,
        }
    }

    /// Normalize free-form input, falling back to [`Dosha::Vata`]
    ///
    /// The input is capitalized (first character upper-cased, the rest
    /// lower-cased) and matched against the canonical names. Missing, empty,
    /// and unrecognized values all yield `Vata`.
    #[must_use]
    pub fn normalize_or_default(input: Option<&str>) -> Self {
        let Some(raw) = input.filter(|s| !s.is_empty()) else {
            return Self::default();
        };
        let capitalized = capitalize(raw);
        Self::ALL
            .into_iter()
            .find(|dosha| dosha.name() == capitalized)
            .unwrap_or_default()
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}
