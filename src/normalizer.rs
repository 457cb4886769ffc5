use regex::Regex;
use std::sync::OnceLock;

/// Word-like tokens (letters/digits, with internal hyphens or apostrophes
/// kept attached so contractions and hyphenated compounds survive as one
/// token) or maximal runs of anything else, which is always punctuation
/// in the documents this pipeline indexes.
fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9]+(?:['\u{2019}-][A-Za-z0-9]+)*|[^\sA-Za-z0-9]+").unwrap()
    })
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || c == '\u{2014}' // em dash, not covered by is_ascii_punctuation
}

/// Removes the longest prefix made up entirely of punctuation characters.
fn strip_leading_punctuation(token: &str) -> &str {
    token.trim_start_matches(is_punctuation)
}

/// Splits raw document text into word-like tokens, per a Penn-Treebank-style
/// cascade: word runs (with internal hyphen/apostrophe) are emitted as one
/// token, everything else as a separate punctuation-only token.
fn tokenize(text: &str) -> Vec<&str> {
    token_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Tokenize, strip leading punctuation, drop all-punctuation tokens,
/// case-fold, and Porter-stem. Returns terms in occurrence order with
/// duplicates retained.
pub fn normalize_document(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter_map(|raw| {
            let stripped = strip_leading_punctuation(raw);
            if stripped.is_empty() {
                return None;
            }
            let lowered = stripped.to_ascii_lowercase();
            Some(porter_stemmer::stem(&lowered))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s1_hello_world() {
        let terms = normalize_document("Hello, world! Hello.");
        assert_eq!(terms, vec!["hello", "world", "hello"]);
    }

    #[test]
    fn s2_cats_running() {
        assert_eq!(normalize_document("cats running"), vec!["cat", "run"]);
        assert_eq!(normalize_document("running dogs"), vec!["run", "dog"]);
    }

    #[test]
    fn s3_punctuation_only() {
        assert!(normalize_document("--- !!! ,,,").is_empty());
    }

    #[test]
    fn s4_the_the_the() {
        assert_eq!(normalize_document("The THE the."), vec!["the", "the", "the"]);
    }

    #[test]
    fn preserves_intra_word_hyphen() {
        let terms = normalize_document("well-known facts");
        assert_eq!(terms[0], porter_stemmer::stem("well-known"));
    }

    #[test]
    fn preserves_contraction_apostrophe() {
        let terms = normalize_document("don't stop");
        assert_eq!(terms[0], porter_stemmer::stem("don't"));
    }

    #[test]
    fn strips_leading_punctuation_but_keeps_word() {
        let terms = normalize_document("(parenthetical)");
        assert_eq!(terms, vec![porter_stemmer::stem("parenthetical")]);
    }

    #[test]
    fn idempotent_on_already_normalized_terms() {
        let once = normalize_document("Running cats are running.");
        let joined = once.join(" ");
        let twice = normalize_document(&joined);
        assert_eq!(once, twice);
    }
}
