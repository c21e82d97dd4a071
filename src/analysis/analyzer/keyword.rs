//! Keyword analyzer: the whole value as a single token.

use std::io::Read;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::simple::SimpleAnalyzer;
use crate::analysis::token_stream::TokenStream;
use crate::analysis::tokenizer::whole::WholeTokenizer;
use crate::error::Result;

#[derive(Debug)]
pub struct KeywordAnalyzer {
    inner: SimpleAnalyzer,
}

impl KeywordAnalyzer {
    pub fn new() -> Self {
        KeywordAnalyzer {
            inner: SimpleAnalyzer::new(Arc::new(WholeTokenizer::new())),
        }
    }
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for KeywordAnalyzer {
    fn token_stream(
        &self,
        field_name: &str,
        reader: &mut dyn Read,
    ) -> Result<Box<dyn TokenStream>> {
        self.inner.token_stream(field_name, reader)
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::collect_tokens;

    #[test]
    fn test_keyword_analyzer() {
        let analyzer = KeywordAnalyzer::new();
        let mut stream = analyzer.analyze("id", "Hello World Test").unwrap();
        let tokens = collect_tokens(stream.as_mut()).unwrap();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Hello World Test");
    }
}
