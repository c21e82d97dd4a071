//! Serializable analyzer configuration.
//!
//! An [`AnalyzerConfig`] names a tokenizer and an ordered list of filters and
//! builds them into a [`PipelineAnalyzer`].
//!
//! # Examples
//!
//! ```
//! use lexis::analysis::analyzer::Analyzer;
//! use lexis::analysis::config::AnalyzerConfig;
//! use lexis::analysis::token::collect_tokens;
//!
//! let config = AnalyzerConfig::from_json(
//!     r#"{
//!         "tokenizer": {"type": "whitespace"},
//!         "filters": [{"type": "lowercase"}, {"type": "stop", "words": ["a"]}]
//!     }"#,
//! )
//! .unwrap();
//!
//! let analyzer = config.build().unwrap();
//! let mut stream = analyzer.analyze("body", "A Cat").unwrap();
//! let tokens = collect_tokens(stream.as_mut()).unwrap();
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "cat");
//! ```

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::keyword_marker::KeywordMarkerFilter;
use crate::analysis::token_filter::limit::LimitFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::StemFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::analysis::tokenizer::whole::WholeTokenizer;
use crate::error::Result;

/// Tokenizer selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenizerConfig {
    Whitespace,
    Whole,
    Regex {
        pattern: String,
        /// Treat matches as separators instead of tokens.
        #[serde(default)]
        gaps: bool,
    },
    UnicodeWord,
}

impl TokenizerConfig {
    pub fn build(&self) -> Result<Arc<dyn Tokenizer>> {
        Ok(match self {
            TokenizerConfig::Whitespace => Arc::new(WhitespaceTokenizer::new()),
            TokenizerConfig::Whole => Arc::new(WholeTokenizer::new()),
            TokenizerConfig::Regex {
                pattern,
                gaps: false,
            } => Arc::new(RegexTokenizer::with_pattern(pattern)?),
            TokenizerConfig::Regex {
                pattern,
                gaps: true,
            } => Arc::new(RegexTokenizer::with_gaps(pattern)?),
            TokenizerConfig::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
        })
    }
}

/// Filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterConfig {
    Lowercase,
    /// Removes stop words; the English default list when `words` is absent.
    Stop {
        #[serde(default)]
        words: Option<Vec<String>>,
    },
    KeywordMarker {
        words: Vec<String>,
    },
    Stem,
    Limit {
        max_tokens: usize,
    },
}

impl FilterConfig {
    pub fn build(&self) -> Arc<dyn Filter> {
        match self {
            FilterConfig::Lowercase => Arc::new(LowercaseFilter::new()),
            FilterConfig::Stop { words: None } => Arc::new(StopFilter::new()),
            FilterConfig::Stop { words: Some(words) } => {
                Arc::new(StopFilter::from_words(words.iter().map(String::as_str)))
            }
            FilterConfig::KeywordMarker { words } => {
                Arc::new(KeywordMarkerFilter::new(words.iter().map(String::as_str)))
            }
            FilterConfig::Stem => Arc::new(StemFilter::new()),
            FilterConfig::Limit { max_tokens } => Arc::new(LimitFilter::new(*max_tokens)),
        }
    }
}

/// A tokenizer followed by filters, applied in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub tokenizer: TokenizerConfig,
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
}

impl AnalyzerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn build(&self) -> Result<PipelineAnalyzer> {
        let mut analyzer = PipelineAnalyzer::new(self.tokenizer.build()?);
        for filter in &self.filters {
            analyzer = analyzer.add_filter(filter.build());
        }
        debug!(
            "built analyzer {} with {} filter(s)",
            analyzer.pipeline_name(),
            self.filters.len()
        );
        Ok(analyzer)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            tokenizer: TokenizerConfig::UnicodeWord,
            filters: vec![FilterConfig::Lowercase],
        }
    }
}
