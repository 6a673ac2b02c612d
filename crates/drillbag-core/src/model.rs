//! Core data model types for drillbag.
//!
//! These are the fundamental types the sampling pipeline moves around:
//! pool identities, generated items, and the envelope handed to consumers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::fingerprint::Fingerprint;

/// Difficulty band of a practice pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Applied,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Applied => write!(f, "applied"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "applied" | "word" => Ok(Difficulty::Applied),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Identity of a sampling pool: one skill at one difficulty.
///
/// Equality is value-based, so any two keys built from the same pair address
/// the same pool state. Renders and parses as `skill@difficulty`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolKey {
    /// Skill identifier, e.g. `"quad.graph.vertex"`.
    pub skill_id: String,
    /// Difficulty band within the skill.
    pub difficulty: Difficulty,
}

impl PoolKey {
    pub fn new(skill_id: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            skill_id: skill_id.into(),
            difficulty,
        }
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.skill_id, self.difficulty)
    }
}

impl FromStr for PoolKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (skill, difficulty) = s
            .rsplit_once('@')
            .ok_or_else(|| format!("expected skill@difficulty, got: {s}"))?;
        if skill.is_empty() {
            return Err(format!("empty skill in pool key: {s}"));
        }
        Ok(PoolKey {
            skill_id: skill.to_string(),
            difficulty: difficulty.parse()?,
        })
    }
}

/// One answer choice presented with an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// Choice identifier, e.g. `"a"`.
    pub id: String,
    /// Rendered choice text.
    pub text: String,
}

/// Number of answer choices every generated item carries.
pub const CHOICE_COUNT: usize = 4;

/// A generated practice item as returned by the item service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Server-assigned identifier. Ephemeral: the service mints a fresh one
    /// per response, so it plays no part in duplicate detection.
    #[serde(default)]
    pub item_id: Option<String>,
    /// The question stem shown to the learner.
    pub stem: String,
    /// Answer choices, exactly [`CHOICE_COUNT`] of them.
    pub choices: Vec<Choice>,
    /// Id of the correct choice.
    pub solution_choice_id: String,
    /// Optional worked explanation, carried opaquely for the consumer.
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Item {
    /// Check the generation contract: non-empty stem, exactly four choices
    /// with distinct ids, and a solution id that names one of them.
    /// Sources report violations as protocol errors.
    pub fn validate(&self) -> Result<(), String> {
        if self.stem.trim().is_empty() {
            return Err("item has an empty stem".to_string());
        }
        if self.choices.len() != CHOICE_COUNT {
            return Err(format!(
                "expected {CHOICE_COUNT} choices, got {}",
                self.choices.len()
            ));
        }
        for (i, choice) in self.choices.iter().enumerate() {
            if self.choices[..i].iter().any(|c| c.id == choice.id) {
                return Err(format!("duplicate choice id: {}", choice.id));
            }
        }
        if !self.choices.iter().any(|c| c.id == self.solution_choice_id) {
            return Err(format!(
                "solution choice id {} not among the choices",
                self.solution_choice_id
            ));
        }
        Ok(())
    }
}

/// An accepted item together with the sampling context it was drawn in.
///
/// Consumers get this envelope rather than a bare [`Item`] so a UI can show
/// bag progress without reaching back into sampler state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivered {
    /// The accepted item.
    pub item: Item,
    /// Fingerprint under which the item was recorded.
    pub fingerprint: Fingerprint,
    /// Pool the item was drawn from.
    pub pool: PoolKey,
    /// True when this delivery started a fresh bag (the pool was reset
    /// before or during the call).
    pub new_bag: bool,
    /// Duplicate responses discarded before this item was accepted.
    pub duplicates_skipped: u32,
    /// Distinct items seen in the current bag, this one included.
    pub seen_count: usize,
}

/// Read-only snapshot of one pool's bag progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BagProgress {
    /// Distinct items seen in the current bag.
    pub seen: usize,
    /// Configured pool-size hint, when one exists.
    pub known_size: Option<usize>,
}
