//! End-to-end scenarios over the full pipeline (`form_text` + `make_user_friendly`).
//!
//! These mirror worked examples a reader can check by hand: short
//! accurate/compared pairs where the expected annotation is unambiguous.

use typocore::{analyze, calculate_basis, AnalysisConfig, CharacterType, Side};

fn kinds(text: &typocore::Text) -> Vec<CharacterType> {
    text.chars().iter().map(|c| c.kind.clone()).collect()
}

fn raws(text: &typocore::Text) -> Vec<char> {
    text.chars().iter().map(|c| c.raw).collect()
}

#[test]
fn hello_vs_hola_collapses_into_two_misspells_and_a_trailing_missing() {
    let text = analyze("Hola", "Hello", &AnalysisConfig::default());
    assert_eq!(raws(&text), vec!['H', 'o', 'l', 'a', 'o']);
    assert_eq!(
        kinds(&text),
        vec![
            CharacterType::Correct,
            CharacterType::Misspell { intended: 'e' },
            CharacterType::Correct,
            CharacterType::Misspell { intended: 'l' },
            CharacterType::Missing,
        ]
    );
}

#[test]
fn hello_vs_halol_fuses_a_misspell_then_detects_a_trailing_swap() {
    let text = analyze("Halol", "Hello", &AnalysisConfig::default());
    assert_eq!(raws(&text), vec!['H', 'a', 'l', 'o', 'l']);
    assert_eq!(
        kinds(&text),
        vec![
            CharacterType::Correct,
            CharacterType::Misspell { intended: 'e' },
            CharacterType::Correct,
            CharacterType::Swapped { side: Side::Left },
            CharacterType::Swapped { side: Side::Right },
        ]
    );
}

#[test]
fn day_vs_dyy_fuses_the_missing_a_into_a_misspell() {
    let text = analyze("dyy", "day", &AnalysisConfig::default());
    assert_eq!(raws(&text), vec!['d', 'y', 'y']);
    assert_eq!(
        kinds(&text),
        vec![
            CharacterType::Correct,
            CharacterType::Misspell { intended: 'a' },
            CharacterType::Correct,
        ]
    );
    // The fused misspell's `intended` payload surfaces the dropped "a".
    assert_eq!(text.raw_value(), "dyay");
}

#[test]
fn day_vs_dya_is_a_clean_transposition() {
    let text = analyze("dya", "day", &AnalysisConfig::default());
    assert_eq!(raws(&text), vec!['d', 'y', 'a']);
    assert_eq!(
        kinds(&text),
        vec![
            CharacterType::Correct,
            CharacterType::Swapped { side: Side::Left },
            CharacterType::Swapped { side: Side::Right },
        ]
    );
}

#[test]
fn bye_vs_hi_has_no_common_characters_and_fails_compliance() {
    let text = analyze("hi!", "bye", &AnalysisConfig::default());
    assert!(text.is_completely_wrong());
    assert_eq!(
        kinds(&text),
        vec![
            CharacterType::Extra,
            CharacterType::Extra,
            CharacterType::Extra,
        ]
    );
}

#[test]
fn robot_vs_gotob_best_pair_has_the_smallest_element_sum() {
    // Three raw sequences are reachable here: [_,1,4,1,2], [_,1,4,3,2] and
    // [_,3,4,3,2]. The first two share the minimal subsequence [1, 2]; the
    // third's best subsequence [3, 4] sums higher and must lose.
    let basis = calculate_basis("gotob", "robot");
    assert_eq!(basis.subsequence, vec![1, 2]);
}

#[test]
fn identical_strings_are_absolutely_right() {
    let text = analyze("hello world", "hello world", &AnalysisConfig::default());
    assert!(text.is_absolutely_right());
    assert_eq!(text.raw_value(), "hello world");
}

#[test]
fn running_make_user_friendly_twice_is_idempotent() {
    let config = AnalysisConfig::default();
    let once = analyze("Hola", "Hello", &config);
    let twice = typocore::make_user_friendly(once.clone(), &config);
    assert_eq!(once, twice);
}
