//! The text editor: three passes over a [`Text`] that turn raw
//! correct/missing/extra runs into the more legible `Misspell` and
//! `Swapped` classifications a reader actually wants to see.

use std::collections::VecDeque;

use crate::config::AnalysisConfig;
use crate::model::{fold, CharacterType, Side, Text, TypedChar};

/// Run all three editing passes over a freshly formed text.
pub fn make_user_friendly(text: Text, _config: &AnalysisConfig) -> Text {
    let chars = adjust(text.into_chars());
    let chars = add_misspells(chars);
    let chars = add_swaps(chars);
    Text::from_chars(chars)
}

fn flip_if_different(correct_case: Option<bool>, same_raw: bool) -> Option<bool> {
    match correct_case {
        None => None,
        Some(b) => {
            if same_raw {
                Some(b)
            } else {
                Some(!b)
            }
        }
    }
}

/// Rotate `correct`-`missing`-`extra` runs around identical characters so
/// that a matching `extra` ends up adjacent to the `missing` it displaced,
/// setting the two up for [`add_misspells`] to fuse.
fn adjust(mut chars: Vec<TypedChar>) -> Vec<TypedChar> {
    let mut missing_count: usize = 0;
    // (first_idx, last_idx, folded char) of the currently tracked run of
    // equal `Correct` characters.
    let mut tracker: Option<(usize, usize, char)> = None;
    let mut i = 0usize;

    while i < chars.len() {
        match chars[i].kind {
            CharacterType::Missing => {
                missing_count += 1;
                tracker = None;
                i += 1;
            }
            CharacterType::Correct => {
                if missing_count == 0 {
                    tracker = None;
                } else {
                    let folded = fold(chars[i].raw);
                    tracker = match tracker {
                        None => Some((i, i, folded)),
                        Some((first, _, ch)) if ch == folded => Some((first, i, ch)),
                        Some(_) => {
                            missing_count = 0;
                            None
                        }
                    };
                }
                i += 1;
            }
            CharacterType::Extra => {
                let folded = fold(chars[i].raw);
                let rotated = match tracker {
                    Some((first, last, ch)) if missing_count > 0 && ch == folded => {
                        for p in (first + 1)..=(last + 1) {
                            let prev_raw = chars[p - 1].raw;
                            let prev_cc = chars[p - 1].correct_case;
                            let same_raw = chars[p].raw == prev_raw;
                            chars[p].kind = CharacterType::Correct;
                            chars[p].correct_case = flip_if_different(prev_cc, same_raw);
                        }
                        chars[first].kind = CharacterType::Extra;
                        chars[first].correct_case = None;
                        tracker = Some((first + 1, last + 1, ch));
                        missing_count -= 1;
                        tracing::trace!(at = first, ch = %ch, "adjust: rotated a correct run by one position");
                        true
                    }
                    _ => false,
                };
                if !rotated {
                    tracker = None;
                    missing_count = 0;
                }
                i += 1;
            }
            CharacterType::Swapped { .. } | CharacterType::Misspell { .. } => {
                // Never produced before this pass runs; reset defensively.
                tracker = None;
                missing_count = 0;
                i += 1;
            }
        }
    }

    chars
}

/// Fuse adjacent `missing`/`extra` pairs (in either order, within an
/// uninterrupted run) into a single `Misspell`, deleting the `missing`
/// half.
fn add_misspells(mut chars: Vec<TypedChar>) -> Vec<TypedChar> {
    let mut pending_missing: VecDeque<usize> = VecDeque::new();
    let mut pending_extra: VecDeque<usize> = VecDeque::new();
    let mut deleted = vec![false; chars.len()];

    for i in 0..chars.len() {
        match chars[i].kind {
            CharacterType::Missing => {
                if let Some(extra_idx) = pending_extra.pop_front() {
                    let intended = chars[i].raw;
                    chars[extra_idx].kind = CharacterType::Misspell { intended };
                    deleted[i] = true;
                } else {
                    pending_missing.push_back(i);
                }
            }
            CharacterType::Extra => {
                if let Some(missing_idx) = pending_missing.pop_front() {
                    let intended = chars[missing_idx].raw;
                    chars[i].kind = CharacterType::Misspell { intended };
                    deleted[missing_idx] = true;
                } else {
                    pending_extra.push_back(i);
                }
            }
            _ => {
                pending_missing.clear();
                pending_extra.clear();
            }
        }
    }

    chars
        .into_iter()
        .zip(deleted)
        .filter(|(_, deleted)| !deleted)
        .map(|(c, _)| c)
        .collect()
}

/// Right-to-left scan for `extra`-`correct`-`missing` triples with equal
/// raw characters (case-insensitively) either side of the `correct` —
/// these are transposed adjacent characters, not independent mistakes.
fn add_swaps(mut chars: Vec<TypedChar>) -> Vec<TypedChar> {
    if chars.len() < 3 {
        return chars;
    }
    let mut i = chars.len() as isize - 2;
    while i >= 1 {
        let idx = i as usize;
        let is_swap = matches!(chars[idx - 1].kind, CharacterType::Extra)
            && matches!(chars[idx].kind, CharacterType::Correct)
            && matches!(chars[idx + 1].kind, CharacterType::Missing)
            && fold(chars[idx - 1].raw) == fold(chars[idx + 1].raw);
        if is_swap {
            chars[idx - 1].kind = CharacterType::Swapped { side: Side::Left };
            chars[idx - 1].correct_case = None;
            chars[idx].kind = CharacterType::Swapped { side: Side::Right };
            chars[idx].correct_case = None;
            chars.remove(idx + 1);
            tracing::debug!(at = idx - 1, ch = %chars[idx - 1].raw, "add_swaps: detected a transposed pair");
        }
        i -= 1;
    }
    chars
}
