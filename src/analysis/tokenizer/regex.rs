//! Regex-based tokenizer.

use std::sync::Arc;

use regex::Regex;

use super::{TokenSpan, Tokenizer};
use crate::analysis::token_attributes::DEFAULT_TYPE;
use crate::error::{LexisError, Result};

/// Emits the matches of a pattern, or with `gaps` the text between matches.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    pattern: Arc<Regex>,
    gaps: bool,
}

impl RegexTokenizer {
    /// Create a tokenizer matching runs of word characters (`\w+`).
    pub fn new() -> Result<Self> {
        Self::with_pattern(r"\w+")
    }

    /// Create a tokenizer whose tokens are the matches of `pattern`.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(RegexTokenizer {
            pattern: Arc::new(compile(pattern)?),
            gaps: false,
        })
    }

    /// Create a tokenizer whose tokens are the text between matches of `pattern`.
    pub fn with_gaps(pattern: &str) -> Result<Self> {
        Ok(RegexTokenizer {
            pattern: Arc::new(compile(pattern)?),
            gaps: true,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn gaps(&self) -> bool {
        self.gaps
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| LexisError::analysis(format!("Invalid regex pattern: {e}")))
}

impl Tokenizer for RegexTokenizer {
    fn segment(&self, text: &str) -> Result<Vec<TokenSpan>> {
        if !self.gaps {
            return Ok(self
                .pattern
                .find_iter(text)
                .filter(|m| !m.is_empty())
                .map(|m| TokenSpan::new(m.start(), m.end(), DEFAULT_TYPE))
                .collect());
        }

        let mut spans = Vec::new();
        let mut last_end = 0;
        for m in self.pattern.find_iter(text) {
            if m.start() > last_end {
                spans.push(TokenSpan::new(last_end, m.start(), DEFAULT_TYPE));
            }
            last_end = m.end();
        }
        if last_end < text.len() {
            spans.push(TokenSpan::new(last_end, text.len(), DEFAULT_TYPE));
        }
        Ok(spans)
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::collect_tokens;

    fn texts(tokenizer: &RegexTokenizer, text: &str) -> Vec<String> {
        let mut stream = tokenizer.tokenize(text).unwrap();
        collect_tokens(stream.as_mut())
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_regex_tokenizer() {
        let tokenizer = RegexTokenizer::new().unwrap();
        assert_eq!(texts(&tokenizer, "Hello, world! 42"), vec!["Hello", "world", "42"]);
    }

    #[test]
    fn test_regex_tokenizer_with_gaps() {
        let tokenizer = RegexTokenizer::with_gaps(r"\s*,\s*").unwrap();
        assert!(tokenizer.gaps());
        assert_eq!(texts(&tokenizer, "red , green,blue"), vec!["red", "green", "blue"]);
    }

    #[test]
    fn test_non_ascii_offsets() {
        let tokenizer = RegexTokenizer::new().unwrap();
        let mut stream = tokenizer.tokenize("Ünïcode text").unwrap();
        let tokens = collect_tokens(stream.as_mut()).unwrap();
        assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (8, 12));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(RegexTokenizer::with_pattern("[unclosed").is_err());
    }
}
