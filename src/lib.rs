//! Typo comparison engine — classifies how a user-entered *compared* text
//! differs from a known-*accurate* reference at single-character
//! granularity.
//!
//! The crate is a pure, single-threaded, allocation-only pipeline with no
//! shared state and no I/O:
//!
//! ```text
//! (accurate, compared, config)
//!     -> basis::calculate_basis    -> Basis
//!     -> former::form_text         -> Text (correct | missing | extra)
//!     -> editor::make_user_friendly -> Text (+ misspell + swapped)
//! ```
//!
//! Callers that embed this engine behind a background queue, an FFI
//! boundary, or a UI renderer own that scheduling themselves — nothing
//! here spawns threads or assumes an executor. Long inputs should be
//! pre-split by the caller (words, sentences) since the math core's
//! enumeration cost is combinatorial in the count of identical characters
//! within a single comparison; see [`basis`] and [`config::AnalysisConfig::max_raw_sequences`].

pub mod basis;
pub mod config;
pub mod editor;
pub mod former;
pub mod model;

pub use basis::{calculate_basis, count_common_chars, Basis};
pub use config::{AnalysisConfig, CaseVersion, CharQuantity, LetterCasePolicy};
pub use editor::make_user_friendly;
pub use former::form_text;
pub use model::{fold, CharacterType, Side, Text, TypedChar};

/// Run the full pipeline: [`form_text`] followed by [`make_user_friendly`].
///
/// This is the crate's single entry point — equivalent to composing the
/// text former and the text editor by hand, provided for callers who don't
/// need the intermediate (pre-misspell/swap) text.
pub fn analyze(compared: &str, accurate: &str, config: &AnalysisConfig) -> Text {
    let formed = form_text(compared, accurate, config);
    make_user_friendly(formed, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_composes_former_and_editor() {
        let text = analyze("Hola", "Hello", &AnalysisConfig::default());
        // H:correct, o:misspell('e'), l:correct, a:misspell('l'), o:missing —
        // raw_value interleaves each misspell's intended char after its raw
        // and keeps the trailing missing "o", reconstructing "Hoealo".
        assert_eq!(text.raw_value(), "Hoealo");
        assert!(!text.is_absolutely_right());
    }

    #[test]
    fn analyze_on_identical_inputs_is_absolutely_right() {
        let text = analyze("hello", "hello", &AnalysisConfig::default());
        assert!(text.is_absolutely_right());
        assert_eq!(text.raw_value(), "hello");
    }
}
