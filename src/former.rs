//! The text former: turns a basis into a first-pass [`Text`], gated by two
//! compliance checks that bail out to an all-`Extra` text when the
//! comparison isn't close enough to be worth aligning in detail.

use crate::basis::{calculate_basis_capped, count_common_chars, Basis};
use crate::config::{AnalysisConfig, LetterCasePolicy};
use crate::model::{CharacterType, Text, TypedChar};

fn normalize_inputs(compared: &str, accurate: &str, case_mode: LetterCasePolicy) -> (String, String) {
    match case_mode {
        LetterCasePolicy::Make(version) => (version.apply(compared), version.apply(accurate)),
        LetterCasePolicy::Compare | LetterCasePolicy::Unset => {
            (compared.to_string(), accurate.to_string())
        }
    }
}

fn quick_compliance(compared: &str, accurate: &str, config: &AnalysisConfig) -> bool {
    let common = count_common_chars(compared, accurate);
    if common == 0 {
        return false;
    }
    let accurate_len = accurate.chars().count();
    if config.required_correct.is_set() {
        let need = config.required_correct.count(accurate_len, false);
        if common < need {
            return false;
        }
    }
    if config.acceptable_wrong.is_set() {
        let compared_len = compared.chars().count();
        let wrong = compared_len
            .saturating_sub(common)
            .max(accurate_len.saturating_sub(common));
        let allowed = config.acceptable_wrong.count(accurate_len, false);
        if wrong > allowed {
            return false;
        }
    }
    true
}

fn exact_compliance(basis: &Basis, accurate_len: usize, config: &AnalysisConfig) -> bool {
    if basis.subsequence.is_empty() {
        return false;
    }
    if config.required_correct.is_set() {
        let need = config.required_correct.count(accurate_len, true);
        if basis.subsequence.len() < need {
            return false;
        }
    }
    if config.acceptable_wrong.is_set() {
        let wrong = basis.sequence.len() - basis.subsequence.len() + basis.missing_elements.len();
        let allowed = config.acceptable_wrong.count(accurate_len, false);
        if wrong.max(basis.missing_elements.len()) > allowed {
            return false;
        }
    }
    true
}

/// Produce the first-pass typed text from `compared` against `accurate`.
///
/// This is the text editor's raw material: every character is one of
/// `Correct`, `Missing`, or `Extra`. `Misspell` and `Swapped` only appear
/// after [`crate::editor::make_user_friendly`] has run.
pub fn form_text(compared: &str, accurate: &str, config: &AnalysisConfig) -> Text {
    let (compared, accurate) = normalize_inputs(compared, accurate, config.case_mode);

    if compared.is_empty() {
        return Text::all_of(&accurate, CharacterType::Missing);
    }
    if accurate.is_empty() {
        return Text::all_of(&compared, CharacterType::Extra);
    }
    if !quick_compliance(&compared, &accurate, config) {
        return Text::all_of(&compared, CharacterType::Extra);
    }

    let basis = calculate_basis_capped(&compared, &accurate, config.max_raw_sequences);
    let accurate_len = accurate.chars().count();
    if !exact_compliance(&basis, accurate_len, config) {
        return Text::all_of(&compared, CharacterType::Extra);
    }

    build_from_basis(&compared, &accurate, &basis, config)
}

fn build_from_basis(compared: &str, accurate: &str, basis: &Basis, config: &AnalysisConfig) -> Text {
    let cmp_chars: Vec<char> = compared.chars().collect();
    let acc_chars: Vec<char> = accurate.chars().collect();

    let mut chars: Vec<TypedChar> = cmp_chars
        .iter()
        .map(|&c| TypedChar::new(c, CharacterType::Extra))
        .collect();

    // Step: relabel matched positions as Correct, walking the subsequence
    // in lockstep with the sequence.
    let mut sub_cursor = 0usize;
    for (pos, slot) in basis.sequence.iter().enumerate() {
        if let Some(idx) = slot {
            if sub_cursor < basis.subsequence.len() && *idx == basis.subsequence[sub_cursor] {
                chars[pos].kind = CharacterType::Correct;
                if config.case_mode == LetterCasePolicy::Compare {
                    chars[pos].correct_case = Some(acc_chars[*idx] == cmp_chars[pos]);
                }
                sub_cursor += 1;
            }
        }
    }

    // Step: interleave Missing characters, copied from accurate, right
    // before the matched position they belong before.
    let mut output: Vec<TypedChar> = Vec::with_capacity(chars.len() + basis.missing_elements.len());
    let mut missing_cursor = 0usize;
    let mut sub_cursor = 0usize;
    for (pos, _) in basis.sequence.iter().enumerate() {
        if matches!(chars[pos].kind, CharacterType::Correct) {
            let head = basis.subsequence[sub_cursor];
            while missing_cursor < basis.missing_elements.len()
                && basis.missing_elements[missing_cursor] < head
            {
                let acc_idx = basis.missing_elements[missing_cursor];
                output.push(TypedChar::new(acc_chars[acc_idx], CharacterType::Missing));
                missing_cursor += 1;
            }
            sub_cursor += 1;
        }
        output.push(chars[pos].clone());
    }
    while missing_cursor < basis.missing_elements.len() {
        let acc_idx = basis.missing_elements[missing_cursor];
        output.push(TypedChar::new(acc_chars[acc_idx], CharacterType::Missing));
        missing_cursor += 1;
    }

    // Final letter-case policy: already applied up front by normalizing
    // the inputs before any of the above ran, so the raw characters in
    // `output` already reflect it.
    Text::from_chars(output)
}
