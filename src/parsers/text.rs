//! Plain-text helpers shared by the extractor and the scoring engine.

/// Collapses every whitespace run to a single space and trims both ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Elements whose boundaries separate words; text on either side of an
/// inline element is joined as written
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "details", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "html", "li", "main", "nav", "ol", "p", "pre", "section", "summary",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

pub fn is_block_element(name: &str) -> bool {
    BLOCK_ELEMENTS.contains(&name)
}

/// Counts whitespace-delimited tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Splits text into sentences on runs of `.`, `!` and `?`
///
/// Pieces holding no word are dropped, so a trailing terminator does not
/// produce an empty sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Mean number of words per sentence, zero for text without sentences
pub fn mean_sentence_length(text: &str) -> f64 {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return 0.0;
    }
    let words: usize = sentences.iter().map(|s| word_count(s)).sum();
    words as f64 / sentences.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b   c "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace("\u{a0}x\u{a0}"), "x");
    }

    #[test]
    fn test_is_block_element() {
        assert!(is_block_element("p"));
        assert!(is_block_element("li"));
        assert!(is_block_element("br"));
        assert!(!is_block_element("b"));
        assert!(!is_block_element("sub"));
        assert!(!is_block_element("a"));
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("One two. Three! Four?? "),
            vec!["One two", "Three", "Four"]
        );
        assert!(split_sentences("...").is_empty());
    }

    #[test]
    fn test_mean_sentence_length() {
        assert_eq!(mean_sentence_length(""), 0.0);
        assert_eq!(mean_sentence_length("a b c. d e f g h."), 4.0);
    }
}
