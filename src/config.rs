//! Knobs that tune how strict the compliance gates and the final letter
//! case of a comparison are.

use serde::{Deserialize, Serialize};

use crate::model::{lower_char, upper_char};

/// A quantity of characters expressed either as an absolute count or as a
/// coefficient of some length, plus two sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CharQuantity {
    /// An absolute number of characters.
    Count(u32),
    /// A fraction in `[0.0, 1.0]` of some reference length.
    Coefficient(f64),
    /// Always resolves to zero.
    Zero,
    /// The quantity is not configured; gates that check it are skipped.
    Unset,
}

impl Default for CharQuantity {
    fn default() -> Self {
        Self::Unset
    }
}

impl CharQuantity {
    pub const fn all() -> Self {
        Self::Coefficient(1.0)
    }

    pub const fn high() -> Self {
        Self::Coefficient(0.75)
    }

    pub const fn half() -> Self {
        Self::Coefficient(0.5)
    }

    pub const fn low() -> Self {
        Self::Coefficient(0.25)
    }

    pub const fn one() -> Self {
        Self::Count(1)
    }

    pub const fn two() -> Self {
        Self::Count(2)
    }

    pub const fn three() -> Self {
        Self::Count(3)
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Resolve against a reference `length`. `Coefficient` is always
    /// clamped into `[0, length]`; `Count` is clamped into `[0, length]`
    /// only when `clamped` is true.
    pub fn count(&self, length: usize, clamped: bool) -> usize {
        match self {
            Self::Unset | Self::Zero => 0,
            Self::Coefficient(c) => {
                let c = c.clamp(0.0, 1.0);
                ((length as f64) * c).round() as usize
            }
            Self::Count(n) => {
                let n = *n as usize;
                if clamped { n.min(length) } else { n }
            }
        }
    }
}

/// A target case to normalize text into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseVersion {
    Capitalized,
    Uppercase,
    Lowercase,
}

impl CaseVersion {
    pub fn apply(&self, s: &str) -> String {
        match self {
            Self::Uppercase => s.chars().map(upper_char).collect(),
            Self::Lowercase => s.chars().map(lower_char).collect(),
            Self::Capitalized => s
                .chars()
                .enumerate()
                .map(|(i, c)| if i == 0 { upper_char(c) } else { lower_char(c) })
                .collect(),
        }
    }
}

/// How letter case is treated when comparing `compared` against `accurate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterCasePolicy {
    /// Case-fold for matching, but track case mismatches via `correct_case`.
    Compare,
    /// Normalize both inputs to `version` before comparing; `correct_case`
    /// is always `None`.
    Make(CaseVersion),
    /// Case-fold for matching; don't track case mismatches at all.
    Unset,
}

impl Default for LetterCasePolicy {
    fn default() -> Self {
        Self::Unset
    }
}

/// Tuning knobs for a single `analyze` call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum amount of `accurate`'s characters that must be recovered as
    /// `Correct` for the comparison to be considered compliant.
    pub required_correct: CharQuantity,
    /// Maximum amount of wrong (missing/extra/unmatched) characters
    /// tolerated for the comparison to be considered compliant.
    pub acceptable_wrong: CharQuantity,
    /// Letter-case handling for this comparison.
    pub case_mode: LetterCasePolicy,
    /// Upper bound on the number of raw index-assignment sequences the
    /// math core will enumerate before settling for the best candidate
    /// found so far. `None` means unbounded.
    pub max_raw_sequences: Option<usize>,
}
