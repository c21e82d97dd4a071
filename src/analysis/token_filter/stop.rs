//! Stop word filter.
//!
//! Removes common words from the stream. The positions of removed tokens are
//! not lost: they are added to the position increment of the next kept token,
//! or to the final increment reported by `end` when the stream ends on stop
//! words, so phrase queries do not match across the holes.
//!
//! # Examples
//!
//! ```
//! use lexis::analysis::token::collect_tokens;
//! use lexis::analysis::token_filter::Filter;
//! use lexis::analysis::token_filter::stop::StopFilter;
//! use lexis::analysis::tokenizer::Tokenizer;
//! use lexis::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let stream = WhitespaceTokenizer::new().tokenize("the quick fox").unwrap();
//! let mut filtered = StopFilter::new().filter(stream).unwrap();
//! let tokens = collect_tokens(filtered.as_mut()).unwrap();
//!
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "quick");
//! assert_eq!(tokens[0].position_increment, 2);
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::attribute::{AttrRef, AttributeSource};
use crate::analysis::token_attributes::{CharTermAttribute, PositionIncrementAttribute};
use crate::analysis::token_filter::Filter;
use crate::analysis::token_stream::TokenStream;
use crate::error::Result;

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// Filter that removes stop words.
///
/// Matching is exact, so place a [`LowercaseFilter`](super::lowercase::LowercaseFilter)
/// before it when the input is mixed case.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of stop words to remove
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a new stop filter with the default English stop words.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexis::analysis::token_filter::stop::StopFilter;
    ///
    /// let filter = StopFilter::new();
    /// assert!(filter.is_stop_word("the"));
    /// assert!(!filter.is_stop_word("hello"));
    /// ```
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_ENGLISH_STOP_WORDS_SET.clone())
    }

    /// Create a stop filter with a custom set of stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a stop filter from a list of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_words(words.into_iter().map(Into::into).collect())
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, mut input: Box<dyn TokenStream>) -> Result<Box<dyn TokenStream>> {
        let attrs = input.attributes_mut();
        let term = attrs.add_attribute::<dyn CharTermAttribute>()?;
        let pos_inc = attrs.add_attribute::<dyn PositionIncrementAttribute>()?;
        Ok(Box::new(StopStream {
            input,
            term,
            pos_inc,
            stop_words: Arc::clone(&self.stop_words),
            skipped_positions: 0,
            scratch: String::new(),
        }))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

struct StopStream {
    input: Box<dyn TokenStream>,
    term: AttrRef<dyn CharTermAttribute>,
    pos_inc: AttrRef<dyn PositionIncrementAttribute>,
    stop_words: Arc<HashSet<String>>,
    skipped_positions: i32,
    scratch: String,
}

impl StopStream {
    fn is_stopped(&mut self) -> Result<bool> {
        let term = self.input.attributes().get(self.term)?;
        self.scratch.clear();
        self.scratch.extend(term.as_chars());
        Ok(self.stop_words.contains(&self.scratch))
    }
}

impl TokenStream for StopStream {
    fn attributes(&self) -> &AttributeSource {
        self.input.attributes()
    }

    fn attributes_mut(&mut self) -> &mut AttributeSource {
        self.input.attributes_mut()
    }

    fn increment_token(&mut self) -> Result<bool> {
        self.skipped_positions = 0;
        while self.input.increment_token()? {
            let increment = self
                .input
                .attributes()
                .get(self.pos_inc)?
                .position_increment();
            if !self.is_stopped()? {
                if self.skipped_positions != 0 {
                    self.input
                        .attributes_mut()
                        .get_mut(self.pos_inc)?
                        .set_position_increment(increment + self.skipped_positions)?;
                }
                return Ok(true);
            }
            self.skipped_positions += increment;
        }
        Ok(false)
    }

    fn reset(&mut self) -> Result<()> {
        self.skipped_positions = 0;
        self.input.reset()
    }

    fn end(&mut self) -> Result<()> {
        self.input.end()?;
        let pos_inc = self.input.attributes_mut().get_mut(self.pos_inc)?;
        let increment = pos_inc.position_increment();
        pos_inc.set_position_increment(increment + self.skipped_positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::{IntoTokenStream, Token, collect_tokens};

    fn run(filter: &StopFilter, words: &[&str]) -> Box<dyn TokenStream> {
        let tokens: Vec<Token> = words
            .iter()
            .map(|w| Token::new(*w, 0, w.chars().count() as i32))
            .collect();
        filter.filter(tokens.into_token_stream().unwrap()).unwrap()
    }

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::from_words(vec!["the", "and"]);
        let mut stream = run(&filter, &["the", "quick", "and", "the", "fox"]);
        let result = collect_tokens(stream.as_mut()).unwrap();

        let texts: Vec<&str> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["quick", "fox"]);
        assert_eq!(result[0].position_increment, 2);
        assert_eq!(result[1].position_increment, 3);
    }

    #[test]
    fn test_trailing_stop_words_reported_at_end() {
        let filter = StopFilter::new();
        let mut stream = run(&filter, &["fox", "of", "the"]);
        let result = collect_tokens(stream.as_mut()).unwrap();
        assert_eq!(result.len(), 1);

        let pos_inc = stream
            .attributes()
            .attribute::<dyn PositionIncrementAttribute>()
            .unwrap();
        assert_eq!(pos_inc.position_increment(), 2);
    }

    #[test]
    fn test_default_stop_words() {
        let filter = StopFilter::new();
        assert_eq!(filter.len(), DEFAULT_ENGLISH_STOP_WORDS.len());
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StopFilter::new().name(), "stop");
    }
}
