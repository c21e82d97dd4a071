//! Stemming token filter and stemmer implementations.

use std::fmt;
use std::sync::Arc;

use super::Filter;
use crate::analysis::attribute::{AttrRef, AttributeSource};
use crate::analysis::token_attributes::{CharTermAttribute, KeywordAttribute};
use crate::analysis::token_stream::TokenStream;
use crate::error::Result;

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// Suffix-stripping stemmer.
///
/// Removes the longest matching suffix as long as at least three characters
/// remain. Words of three characters or fewer are left alone.
#[derive(Debug, Clone)]
pub struct SimpleStemmer {
    /// Suffixes, longest first.
    suffixes: Vec<String>,
}

impl SimpleStemmer {
    pub fn new() -> Self {
        Self::with_suffixes(
            [
                "ing", "ed", "er", "est", "ly", "s", "es", "ies", "ied", "tion", "sion", "able",
                "ible", "ment", "ness", "ful",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }

    pub fn with_suffixes(mut suffixes: Vec<String>) -> Self {
        suffixes.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));
        SimpleStemmer { suffixes }
    }
}

impl Default for SimpleStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for SimpleStemmer {
    fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();
        let len = word.chars().count();
        if len <= 3 {
            return word;
        }

        for suffix in &self.suffixes {
            if len <= suffix.chars().count() + 2 {
                continue;
            }
            if let Some(stem) = word.strip_suffix(suffix.as_str()) {
                return stem.to_string();
            }
        }

        word
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}

/// Filter that applies stemming to tokens not marked as keywords.
#[derive(Clone)]
pub struct StemFilter {
    /// The stemmer to use.
    stemmer: Arc<dyn Stemmer>,
}

impl fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl StemFilter {
    /// Create a new stem filter with the simple stemmer.
    pub fn new() -> Self {
        Self::with_stemmer(Arc::new(SimpleStemmer::new()))
    }

    /// Create a stem filter with a custom stemmer.
    pub fn with_stemmer(stemmer: Arc<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StemFilter {
    fn filter(&self, mut input: Box<dyn TokenStream>) -> Result<Box<dyn TokenStream>> {
        let attrs = input.attributes_mut();
        let term = attrs.add_attribute::<dyn CharTermAttribute>()?;
        let keyword = attrs.add_attribute::<dyn KeywordAttribute>()?;
        Ok(Box::new(StemStream {
            input,
            term,
            keyword,
            stemmer: Arc::clone(&self.stemmer),
            scratch: Vec::new(),
        }))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}

struct StemStream {
    input: Box<dyn TokenStream>,
    term: AttrRef<dyn CharTermAttribute>,
    keyword: AttrRef<dyn KeywordAttribute>,
    stemmer: Arc<dyn Stemmer>,
    scratch: Vec<char>,
}

impl TokenStream for StemStream {
    fn attributes(&self) -> &AttributeSource {
        self.input.attributes()
    }

    fn attributes_mut(&mut self) -> &mut AttributeSource {
        self.input.attributes_mut()
    }

    fn increment_token(&mut self) -> Result<bool> {
        if !self.input.increment_token()? {
            return Ok(false);
        }
        let attrs = self.input.attributes_mut();
        if attrs.get(self.keyword)?.is_keyword() {
            return Ok(true);
        }

        let term = attrs.get_mut(self.term)?;
        let stemmed = self.stemmer.stem(&term.term());
        self.scratch.clear();
        self.scratch.extend(stemmed.chars());
        term.copy_buffer(&self.scratch, 0, self.scratch.len())?;
        Ok(true)
    }

    fn reset(&mut self) -> Result<()> {
        self.input.reset()
    }

    fn end(&mut self) -> Result<()> {
        self.input.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::{IntoTokenStream, Token, collect_tokens};

    #[test]
    fn test_simple_stemmer() {
        let stemmer = SimpleStemmer::new();

        assert_eq!(stemmer.stem("running"), "runn");
        assert_eq!(stemmer.stem("flies"), "fli");
        assert_eq!(stemmer.stem("beautiful"), "beauti");
        assert_eq!(stemmer.stem("agreement"), "agree");
        assert_eq!(stemmer.stem("happiness"), "happi");
        assert_eq!(stemmer.stem("cat"), "cat");
    }

    #[test]
    fn test_stem_filter_skips_keywords() {
        let tokens = vec![
            Token::new("jumping", 0, 7),
            Token::new("running", 8, 15).with_keyword(true),
        ];
        let mut stream = StemFilter::new()
            .filter(tokens.into_token_stream().unwrap())
            .unwrap();
        let result = collect_tokens(stream.as_mut()).unwrap();

        assert_eq!(result[0].text, "jump");
        assert_eq!(result[1].text, "running");
    }
}
