//! Tokenizer that splits text on whitespace.

use super::{TokenSpan, Tokenizer};
use crate::analysis::token_attributes::DEFAULT_TYPE;
use crate::error::Result;

/// Emits every maximal run of non-whitespace characters as a token.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn segment(&self, text: &str) -> Result<Vec<TokenSpan>> {
        let mut spans = Vec::new();
        let mut start = None;

        for (i, c) in text.char_indices() {
            match (c.is_whitespace(), start) {
                (true, Some(s)) => {
                    spans.push(TokenSpan::new(s, i, DEFAULT_TYPE));
                    start = None;
                }
                (false, None) => start = Some(i),
                _ => {}
            }
        }
        if let Some(s) = start {
            spans.push(TokenSpan::new(s, text.len(), DEFAULT_TYPE));
        }

        Ok(spans)
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::collect_tokens;

    #[test]
    fn test_whitespace_tokenizer() {
        let tokenizer = WhitespaceTokenizer::new();
        let mut stream = tokenizer.tokenize("  hello\tworld \n test ").unwrap();
        let tokens = collect_tokens(stream.as_mut()).unwrap();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "world", "test"]);
        assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (2, 7));
        assert!(tokens.iter().all(|t| t.position_increment == 1));
    }

    #[test]
    fn test_empty_text() {
        let tokenizer = WhitespaceTokenizer::new();
        assert!(tokenizer.segment("").unwrap().is_empty());
        assert!(tokenizer.segment(" \t ").unwrap().is_empty());
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(WhitespaceTokenizer::new().name(), "whitespace");
    }
}
