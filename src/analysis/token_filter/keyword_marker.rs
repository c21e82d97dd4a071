//! Marks protected terms as keywords.

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::attribute::{AttrRef, AttributeSource};
use crate::analysis::token_attributes::{CharTermAttribute, KeywordAttribute};
use crate::analysis::token_filter::Filter;
use crate::analysis::token_stream::TokenStream;
use crate::error::Result;

/// Sets the keyword flag on every token whose term is in the protected set.
///
/// Rewriting filters later in the chain, such as
/// [`StemFilter`](super::stem::StemFilter), leave keyword tokens unchanged.
#[derive(Clone, Debug)]
pub struct KeywordMarkerFilter {
    keywords: Arc<HashSet<String>>,
}

impl KeywordMarkerFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeywordMarkerFilter {
            keywords: Arc::new(keywords.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }
}

impl Filter for KeywordMarkerFilter {
    fn filter(&self, mut input: Box<dyn TokenStream>) -> Result<Box<dyn TokenStream>> {
        let attrs = input.attributes_mut();
        let term = attrs.add_attribute::<dyn CharTermAttribute>()?;
        let keyword = attrs.add_attribute::<dyn KeywordAttribute>()?;
        Ok(Box::new(KeywordMarkerStream {
            input,
            term,
            keyword,
            keywords: Arc::clone(&self.keywords),
            scratch: String::new(),
        }))
    }

    fn name(&self) -> &'static str {
        "keyword_marker"
    }
}

struct KeywordMarkerStream {
    input: Box<dyn TokenStream>,
    term: AttrRef<dyn CharTermAttribute>,
    keyword: AttrRef<dyn KeywordAttribute>,
    keywords: Arc<HashSet<String>>,
    scratch: String,
}

impl TokenStream for KeywordMarkerStream {
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
        self.scratch.clear();
        self.scratch.extend(attrs.get(self.term)?.as_chars());
        if self.keywords.contains(&self.scratch) {
            attrs.get_mut(self.keyword)?.set_keyword(true);
        }
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
    fn test_marks_listed_terms() {
        let tokens = vec![Token::new("running", 0, 7), Token::new("jumping", 8, 15)];
        let filter = KeywordMarkerFilter::new(["running"]);
        let mut stream = filter.filter(tokens.into_token_stream().unwrap()).unwrap();
        let result = collect_tokens(stream.as_mut()).unwrap();

        assert!(result[0].keyword);
        assert!(!result[1].keyword);
    }
}
