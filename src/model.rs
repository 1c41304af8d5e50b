//! Typed character model shared by every stage of the pipeline.
//!
//! A [`Text`] is an ordered sequence of [`TypedChar`]s — the only shape the
//! math core, the text former and the text editor ever hand to each other
//! or to a caller (an embedding UI layer, see the crate root docs).

use serde::{Deserialize, Serialize};

/// Which half of a transposed pair a [`CharacterType::Swapped`] character is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// The five ways a single character of the compared text can be classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterType {
    /// Present in both texts at matching positions.
    Correct,
    /// Present only in the accurate text.
    Missing,
    /// Present only in the compared text.
    Extra,
    /// One half of a correct adjacent pair that appears transposed.
    Swapped { side: Side },
    /// The compared character stands in for a different intended character.
    Misspell { intended: char },
}

/// A single character together with its classification and (optionally)
/// whether its letter case matched the accurate text.
///
/// `correct_case = None` means "letter case does not matter here" — either
/// because the comparison normalized case away, or because the position
/// isn't a `Correct` character at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedChar {
    pub raw: char,
    pub kind: CharacterType,
    pub correct_case: Option<bool>,
}

impl TypedChar {
    pub fn new(raw: char, kind: CharacterType) -> Self {
        Self {
            raw,
            kind,
            correct_case: None,
        }
    }
}

/// An ordered sequence of typed characters — the output of every stage of
/// the pipeline, and the type renderers consume (see the crate root docs).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Text {
    chars: Vec<TypedChar>,
}

impl Text {
    pub fn from_chars(chars: Vec<TypedChar>) -> Self {
        Self { chars }
    }

    /// Build a text where every character of `raw` has the same `kind`.
    pub fn all_of(raw: &str, kind: CharacterType) -> Self {
        let chars = raw
            .chars()
            .map(|c| TypedChar::new(c, kind.clone()))
            .collect();
        Self { chars }
    }

    pub fn chars(&self) -> &[TypedChar] {
        &self.chars
    }

    pub fn chars_mut(&mut self) -> &mut Vec<TypedChar> {
        &mut self.chars
    }

    pub fn into_chars(self) -> Vec<TypedChar> {
        self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Concatenation of every character's `raw`, plus, for every
    /// `Misspell(intended)`, its `intended` character immediately after.
    /// This is what a renderer reconstructs the accurate-text line from,
    /// not a round-trip of the original `compared` input.
    pub fn raw_value(&self) -> String {
        let mut out = String::with_capacity(self.chars.len());
        for c in &self.chars {
            out.push(c.raw);
            if let CharacterType::Misspell { intended } = &c.kind {
                out.push(*intended);
            }
        }
        out
    }

    /// True iff every character is `Correct` and no character's case was wrong.
    pub fn is_absolutely_right(&self) -> bool {
        self.chars
            .iter()
            .all(|c| matches!(c.kind, CharacterType::Correct) && c.correct_case != Some(false))
    }

    /// True iff every character is `Missing`, `Extra`, or `Misspell`.
    pub fn is_completely_wrong(&self) -> bool {
        self.chars.iter().all(|c| {
            matches!(
                c.kind,
                CharacterType::Missing | CharacterType::Extra | CharacterType::Misspell { .. }
            )
        })
    }

    /// Count of (extra + missing + misspell) + floor(count(swapped) / 2).
    pub fn count_of_typos_and_mistakes(&self) -> usize {
        let mut mistakes = 0usize;
        let mut swapped = 0usize;
        for c in &self.chars {
            match c.kind {
                CharacterType::Extra | CharacterType::Missing | CharacterType::Misspell { .. } => {
                    mistakes += 1;
                }
                CharacterType::Swapped { .. } => swapped += 1,
                CharacterType::Correct => {}
            }
        }
        mistakes + swapped / 2
    }

    /// Count of characters with `correct_case = Some(false)`.
    pub fn count_of_wrong_letter_cases(&self) -> usize {
        self.chars
            .iter()
            .filter(|c| c.correct_case == Some(false))
            .count()
    }

    pub fn uppercased(&self) -> Self {
        self.with_case_transform(upper_char)
    }

    pub fn lowercased(&self) -> Self {
        self.with_case_transform(lower_char)
    }

    /// First character upper-case, every other character lower-case.
    pub fn capitalized(&self) -> Self {
        let mut out = self.clone();
        for (i, c) in out.chars.iter_mut().enumerate() {
            let f = if i == 0 { upper_char } else { lower_char };
            c.raw = f(c.raw);
            if let CharacterType::Misspell { intended } = &mut c.kind {
                *intended = f(*intended);
            }
            c.correct_case = None;
        }
        out
    }

    fn with_case_transform(&self, f: fn(char) -> char) -> Self {
        let mut out = self.clone();
        for c in out.chars.iter_mut() {
            c.raw = f(c.raw);
            if let CharacterType::Misspell { intended } = &mut c.kind {
                *intended = f(*intended);
            }
            c.correct_case = None;
        }
        out
    }
}

/// Single-scalar case folding used for case-insensitive matching everywhere
/// in the math core and the text editor. Never alters stored raw characters.
pub fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

pub(crate) fn upper_char(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

pub(crate) fn lower_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_value_keeps_missing_raw_and_appends_intended_after_misspells() {
        let text = Text::from_chars(vec![
            TypedChar::new('H', CharacterType::Correct),
            TypedChar::new('x', CharacterType::Missing),
            TypedChar {
                raw: 'o',
                kind: CharacterType::Misspell { intended: 'e' },
                correct_case: None,
            },
        ]);
        assert_eq!(text.raw_value(), "Hxoe");
    }

    #[test]
    fn absolutely_right_requires_all_correct_and_no_bad_case() {
        let text = Text::from_chars(vec![TypedChar {
            raw: 'a',
            kind: CharacterType::Correct,
            correct_case: Some(false),
        }]);
        assert!(!text.is_absolutely_right());

        let text = Text::from_chars(vec![TypedChar {
            raw: 'a',
            kind: CharacterType::Correct,
            correct_case: Some(true),
        }]);
        assert!(text.is_absolutely_right());
    }

    #[test]
    fn completely_wrong_rejects_any_correct_or_swap() {
        let text = Text::all_of("abc", CharacterType::Extra);
        assert!(text.is_completely_wrong());

        let mut chars = text.into_chars();
        chars[0].kind = CharacterType::Correct;
        assert!(!Text::from_chars(chars).is_completely_wrong());
    }

    #[test]
    fn typo_count_treats_swap_pairs_as_one_mistake() {
        let text = Text::from_chars(vec![
            TypedChar::new('a', CharacterType::Swapped { side: Side::Left }),
            TypedChar::new('b', CharacterType::Swapped { side: Side::Right }),
            TypedChar::new('c', CharacterType::Extra),
        ]);
        assert_eq!(text.count_of_typos_and_mistakes(), 2);
    }

    #[test]
    fn case_transform_propagates_through_misspell_and_clears_correct_case() {
        let text = Text::from_chars(vec![TypedChar {
            raw: 'a',
            kind: CharacterType::Misspell { intended: 'b' },
            correct_case: None,
        }]);
        let upper = text.uppercased();
        assert_eq!(upper.chars()[0].raw, 'A');
        assert_eq!(
            upper.chars()[0].kind,
            CharacterType::Misspell { intended: 'B' }
        );
    }

    #[test]
    fn capitalized_only_uppercases_first_char() {
        let text = Text::all_of("hELLO", CharacterType::Correct);
        assert_eq!(text.capitalized().raw_value(), "Hello");
    }
}
