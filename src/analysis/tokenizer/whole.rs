//! Tokenizer that emits the entire input as a single token.

use super::{TokenSpan, Tokenizer};
use crate::analysis::token_attributes::DEFAULT_TYPE;
use crate::error::Result;

/// Emits the whole text as one token, or nothing for empty text.
#[derive(Clone, Debug, Default)]
pub struct WholeTokenizer;

impl WholeTokenizer {
    pub fn new() -> Self {
        WholeTokenizer
    }
}

impl Tokenizer for WholeTokenizer {
    fn segment(&self, text: &str) -> Result<Vec<TokenSpan>> {
        if text.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(vec![TokenSpan::new(0, text.len(), DEFAULT_TYPE)])
        }
    }

    fn name(&self) -> &'static str {
        "whole"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::collect_tokens;

    #[test]
    fn test_whole_tokenizer() {
        let tokenizer = WholeTokenizer::new();
        let mut stream = tokenizer.tokenize("hello world").unwrap();
        let tokens = collect_tokens(stream.as_mut()).unwrap();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "hello world");
        assert_eq!(tokens[0].end_offset, 11);
    }

    #[test]
    fn test_empty_text() {
        let mut stream = WholeTokenizer::new().tokenize("").unwrap();
        assert!(collect_tokens(stream.as_mut()).unwrap().is_empty());
    }
}
