//! Standard analyzer: word tokens, lowercased, stop words removed.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::token_stream::TokenStream;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    pub fn new() -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::new()?);
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .with_name("standard");
        debug!("built standard analyzer: {analyzer:?}");

        Ok(StandardAnalyzer { inner: analyzer })
    }

    pub fn without_stop_words() -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::new()?);
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("standard_no_stop");

        Ok(StandardAnalyzer { inner: analyzer })
    }

    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for StandardAnalyzer {
    fn token_stream(
        &self,
        field_name: &str,
        reader: &mut dyn Read,
    ) -> Result<Box<dyn TokenStream>> {
        self.inner.token_stream(field_name, reader)
    }

    fn analyze(&self, field_name: &str, text: &str) -> Result<Box<dyn TokenStream>> {
        self.inner.analyze(field_name, text)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

impl fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
