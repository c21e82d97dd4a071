//! Lowercase filter.

use super::Filter;
use crate::analysis::attribute::{AttrRef, AttributeSource};
use crate::analysis::token_attributes::CharTermAttribute;
use crate::analysis::token_stream::TokenStream;
use crate::error::Result;

/// Lowercases every term using Unicode case mapping.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, mut input: Box<dyn TokenStream>) -> Result<Box<dyn TokenStream>> {
        let term = input.attributes_mut().add_attribute::<dyn CharTermAttribute>()?;
        Ok(Box::new(LowercaseStream {
            input,
            term,
            scratch: Vec::new(),
        }))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

struct LowercaseStream {
    input: Box<dyn TokenStream>,
    term: AttrRef<dyn CharTermAttribute>,
    scratch: Vec<char>,
}

impl TokenStream for LowercaseStream {
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

        let term = self.input.attributes_mut().get_mut(self.term)?;
        if term.as_chars().iter().all(|c| !c.is_uppercase()) {
            return Ok(true);
        }
        self.scratch.clear();
        self.scratch
            .extend(term.as_chars().iter().flat_map(|c| c.to_lowercase()));
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
    use crate::analysis::token::{Token, collect_tokens, IntoTokenStream};

    #[test]
    fn test_lowercase_filter() {
        let tokens = vec![Token::new("Hello", 0, 5), Token::new("WÖRLD", 6, 11)];
        let mut stream = LowercaseFilter::new()
            .filter(tokens.into_token_stream().unwrap())
            .unwrap();
        let result = collect_tokens(stream.as_mut()).unwrap();

        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "wörld");
        assert_eq!(result[1].start_offset, 6);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseFilter::new().name(), "lowercase");
    }
}
