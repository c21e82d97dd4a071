//! Pipeline analyzer: a tokenizer followed by a list of filters.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use log::trace;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_stream::TokenStream;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Runs a tokenizer and applies filters in the order they were added.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use lexis::analysis::analyzer::Analyzer;
/// use lexis::analysis::analyzer::pipeline::PipelineAnalyzer;
/// use lexis::analysis::token::collect_tokens;
/// use lexis::analysis::token_filter::lowercase::LowercaseFilter;
/// use lexis::analysis::tokenizer::whitespace::WhitespaceTokenizer;
///
/// let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
///     .add_filter(Arc::new(LowercaseFilter::new()));
///
/// let mut stream = analyzer.analyze("title", "Hello World").unwrap();
/// let tokens = collect_tokens(stream.as_mut()).unwrap();
/// assert_eq!(tokens[1].text, "world");
/// ```
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// The configured name, e.g. `pipeline_whitespace`.
    pub fn pipeline_name(&self) -> &str {
        &self.name
    }

    fn apply_filters(&self, mut stream: Box<dyn TokenStream>) -> Result<Box<dyn TokenStream>> {
        for filter in &self.filters {
            stream = filter.filter(stream)?;
        }
        Ok(stream)
    }
}

impl Analyzer for PipelineAnalyzer {
    fn token_stream(
        &self,
        field_name: &str,
        reader: &mut dyn Read,
    ) -> Result<Box<dyn TokenStream>> {
        trace!("{}: building token stream for field {field_name}", self.name);
        self.apply_filters(self.tokenizer.token_stream(reader)?)
    }

    fn analyze(&self, field_name: &str, text: &str) -> Result<Box<dyn TokenStream>> {
        trace!("{}: analyzing text for field {field_name}", self.name);
        self.apply_filters(self.tokenizer.tokenize(text)?)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
