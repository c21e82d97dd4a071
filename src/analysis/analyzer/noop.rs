//! Analyzer that produces no tokens.

use std::io::Read;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token_stream::TokenStream;
use crate::analysis::tokenizer::SpanTokenStream;
use crate::error::Result;

#[derive(Clone, Debug, Default)]
pub struct NoOpAnalyzer;

impl NoOpAnalyzer {
    pub fn new() -> Self {
        NoOpAnalyzer
    }
}

impl Analyzer for NoOpAnalyzer {
    fn token_stream(
        &self,
        _field_name: &str,
        _reader: &mut dyn Read,
    ) -> Result<Box<dyn TokenStream>> {
        Ok(Box::new(SpanTokenStream::new("", &[])?))
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
