//! Simple analyzer: a tokenizer without filters.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token_stream::TokenStream;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

#[derive(Clone)]
pub struct SimpleAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
}

impl SimpleAnalyzer {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        SimpleAnalyzer { tokenizer }
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }
}

impl Analyzer for SimpleAnalyzer {
    fn token_stream(
        &self,
        _field_name: &str,
        reader: &mut dyn Read,
    ) -> Result<Box<dyn TokenStream>> {
        self.tokenizer.token_stream(reader)
    }

    fn analyze(&self, _field_name: &str, text: &str) -> Result<Box<dyn TokenStream>> {
        self.tokenizer.tokenize(text)
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}

impl fmt::Debug for SimpleAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}
