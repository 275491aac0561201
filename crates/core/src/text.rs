/// Separator between sentences of a project's long description.
pub const SENTENCE_SEPARATOR: &str = ". ";

/// Split a long description into paragraph texts.
///
/// Splits strictly on `". "`; each fragment except the last keeps its
/// terminating period. Abbreviations such as `"e.g. "` split as well.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut fragments: Vec<String> = text.split(SENTENCE_SEPARATOR).map(str::to_owned).collect();
    let last = fragments.len() - 1;
    for fragment in &mut fragments[..last] {
        fragment.push('.');
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_into_sentences_keeping_periods() {
        assert_eq!(split_sentences("A. B. C"), vec!["A.", "B.", "C"]);
    }

    #[test]
    fn text_without_separator_is_one_paragraph() {
        assert_eq!(split_sentences("No split here."), vec!["No split here."]);
        assert_eq!(split_sentences(""), vec![""]);
    }

    #[test]
    fn abbreviations_split_too() {
        assert_eq!(
            split_sentences("Tools e.g. Rust and Go"),
            vec!["Tools e.g.", "Rust and Go"]
        );
    }

    #[test]
    fn decimal_numbers_do_not_split() {
        assert_eq!(split_sentences("Runs at 1.5x speed"), vec!["Runs at 1.5x speed"]);
    }

    proptest! {
        /// Joining the paragraphs with a space gives back the description.
        #[test]
        fn paragraphs_rejoin_to_the_original(text in "[a-zA-Z .]{0,80}") {
            let paragraphs = split_sentences(&text);
            prop_assert_eq!(paragraphs.join(" "), text.clone());
            prop_assert_eq!(paragraphs.len(), text.matches(SENTENCE_SEPARATOR).count() + 1);
        }
    }
}
