//! Token count limit filter.

use super::Filter;
use crate::analysis::attribute::AttributeSource;
use crate::analysis::token_stream::TokenStream;
use crate::error::Result;

/// Stops the stream after `limit` tokens.
#[derive(Clone, Debug)]
pub struct LimitFilter {
    limit: usize,
}

impl LimitFilter {
    pub fn new(limit: usize) -> Self {
        LimitFilter { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Filter for LimitFilter {
    fn filter(&self, input: Box<dyn TokenStream>) -> Result<Box<dyn TokenStream>> {
        Ok(Box::new(LimitStream {
            input,
            limit: self.limit,
            count: 0,
        }))
    }

    fn name(&self) -> &'static str {
        "limit"
    }
}

struct LimitStream {
    input: Box<dyn TokenStream>,
    limit: usize,
    count: usize,
}

impl TokenStream for LimitStream {
    fn attributes(&self) -> &AttributeSource {
        self.input.attributes()
    }

    fn attributes_mut(&mut self) -> &mut AttributeSource {
        self.input.attributes_mut()
    }

    fn increment_token(&mut self) -> Result<bool> {
        if self.count >= self.limit || !self.input.increment_token()? {
            return Ok(false);
        }
        self.count += 1;
        Ok(true)
    }

    fn reset(&mut self) -> Result<()> {
        self.count = 0;
        self.input.reset()
    }

    fn end(&mut self) -> Result<()> {
        self.input.end()
    }
}
