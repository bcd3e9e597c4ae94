use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::config::PhraseSets;

const SHORT_PHRASES: &[&str] = &[
    "JavaScript rocks!",
    "Type fast, stay sharp.",
    "Practice daily.",
];

const MEDIUM_PHRASES: &[&str] = &[
    "JavaScript makes typing tests fun!",
    "Practice every day to improve your typing speed.",
    "Coding challenges help sharpen your problem solving skills.",
    "Frontend development combines logic and creativity.",
    "Learning never stops in the world of technology.",
];

const LONG_PHRASES: &[&str] = &[
    "Consistent practice and mindful repetition are the most reliable ways to increase both typing speed and accuracy over time.",
    "When you focus on proper technique and avoid looking at the keyboard, your fingers learn the layout naturally and your speed improves.",
    "Building projects and typing real code or text will train your brain to type patterns common to programming and technical writing.",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Short,
    #[default]
    Medium,
    Long,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Short, Difficulty::Medium, Difficulty::Long];

    /// Unknown names fall back to `Medium`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "short" => Difficulty::Short,
            "medium" => Difficulty::Medium,
            "long" => Difficulty::Long,
            _ => Difficulty::default(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Short => "short",
            Difficulty::Medium => "medium",
            Difficulty::Long => "long",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Short => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Long,
            Difficulty::Long => Difficulty::Short,
        }
    }

    fn builtin(self) -> &'static [&'static str] {
        match self {
            Difficulty::Short => SHORT_PHRASES,
            Difficulty::Medium => MEDIUM_PHRASES,
            Difficulty::Long => LONG_PHRASES,
        }
    }
}

/// Target text for one session. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Phrase {
    text: String,
    chars: Vec<char>,
    difficulty: Difficulty,
}

impl Phrase {
    pub fn new(text: &str, difficulty: Difficulty) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            chars: text.chars().collect(),
            difficulty,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

/// Candidate phrases per tier. Every tier holds at least one phrase once
/// constructed, so sampling has no failure path.
pub struct PhraseBank {
    short: Vec<Phrase>,
    medium: Vec<Phrase>,
    long: Vec<Phrase>,
    rng: SmallRng,
}

impl PhraseBank {
    pub fn from_config(sets: &PhraseSets) -> Self {
        Self::with_rng(sets, SmallRng::from_entropy())
    }

    pub fn with_rng(sets: &PhraseSets, rng: SmallRng) -> Self {
        Self {
            short: build_tier(Difficulty::Short, sets.short.as_deref()),
            medium: build_tier(Difficulty::Medium, sets.medium.as_deref()),
            long: build_tier(Difficulty::Long, sets.long.as_deref()),
            rng,
        }
    }

    pub fn candidates(&self, difficulty: Difficulty) -> &[Phrase] {
        match difficulty {
            Difficulty::Short => &self.short,
            Difficulty::Medium => &self.medium,
            Difficulty::Long => &self.long,
        }
    }

    pub fn sample(&mut self, difficulty: Difficulty) -> Phrase {
        let candidates = match difficulty {
            Difficulty::Short => &self.short,
            Difficulty::Medium => &self.medium,
            Difficulty::Long => &self.long,
        };
        let idx = self.rng.gen_range(0..candidates.len());
        candidates[idx].clone()
    }
}

impl Default for PhraseBank {
    fn default() -> Self {
        Self::from_config(&PhraseSets::default())
    }
}

/// Blank entries are dropped; a tier left empty gets the built-in set.
fn build_tier(difficulty: Difficulty, custom: Option<&[String]>) -> Vec<Phrase> {
    let phrases: Vec<Phrase> = custom
        .unwrap_or_default()
        .iter()
        .filter(|text| !text.trim().is_empty())
        .filter_map(|text| Phrase::new(text, difficulty))
        .collect();

    if !phrases.is_empty() {
        return phrases;
    }
    if custom.is_some() {
        tracing::warn!(
            tier = difficulty.as_str(),
            "configured phrase set is empty, using built-in phrases"
        );
    }
    difficulty
        .builtin()
        .iter()
        .filter_map(|text| Phrase::new(text, difficulty))
        .collect()
}
