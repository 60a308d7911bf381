use super::dictionary::{self, MAX_KEY_WORDS};

/// Translates a free-text query into Dutch search terms.
///
/// Whole predefined prompts win; otherwise terms are matched longest-first,
/// filler words are dropped and unknown words are kept as typed.
pub fn translate_query(text: &str) -> String {
    let normalized = dictionary::normalize(text);
    if let Some(nl) = dictionary::phrase(&normalized) {
        return nl.to_string();
    }

    let words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();
    let mut out: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < words.len() {
        if let Some((len, nl)) = longest_match(&words[i..], dictionary::lookup) {
            push_unique(&mut out, nl);
            i += len;
            continue;
        }
        if !dictionary::is_filler(words[i]) {
            push_unique(&mut out, words[i]);
        }
        i += 1;
    }

    if out.is_empty() {
        return normalized;
    }
    out.join(" ")
}

/// Tries the longest key first, shrinking down to a single word.
pub(crate) fn longest_match<T>(
    words: &[&str],
    lookup: impl Fn(&str) -> Option<T>,
) -> Option<(usize, T)> {
    for len in (1..=MAX_KEY_WORDS.min(words.len())).rev() {
        let key = words[..len].join(" ");
        if let Some(hit) = lookup(&key) {
            return Some((len, hit));
        }
    }
    None
}

fn push_unique<'a>(out: &mut Vec<&'a str>, term: &'a str) {
    if !out.contains(&term) {
        out.push(term);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("mid century chair", "teak stoel")]
    #[case("Mid Century Table", "teak tafel")]
    #[case("vintage chair", "vintage stoel")]
    #[case("design lamp", "lamp design")]
    #[case("industrial style", "industrieel metaal")]
    #[case("scandinavian wood", "licht hout")]
    fn predefined_prompts(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(translate_query(input), expected);
    }

    #[rstest]
    #[case("cool retro couch", "vintage bank")]
    #[case("oak dining table", "eiken eettafel")]
    #[case("vintage leather armchair", "vintage leer fauteuil")]
    #[case("mid-century sofa", "teak bank")]
    #[case("black chest of drawers", "zwart ladekast")]
    #[case("mid century teak sideboard", "teak dressoir")]
    fn term_by_term(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(translate_query(input), expected);
    }

    #[test]
    fn dutch_passes_through() {
        assert_eq!(translate_query("teak stoel"), "teak stoel");
        assert_eq!(translate_query("eettafel"), "eettafel");
    }

    #[test]
    fn unknown_words_are_kept() {
        assert_eq!(translate_query("eames chair"), "eames stoel");
        assert_eq!(translate_query("Gispen 116"), "gispen 116");
    }

    #[test]
    fn filler_only_query_is_left_alone() {
        assert_eq!(translate_query("the"), "the");
        assert_eq!(translate_query(""), "");
    }

    #[test]
    fn longest_key_wins() {
        let words = ["dining", "table", "oak"];
        let hit = longest_match(&words, dictionary::lookup);
        assert_eq!(hit, Some((2, "eettafel")));
    }
}
