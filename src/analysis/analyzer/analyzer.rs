//! Core analyzer trait.

use std::io::{Cursor, Read};

use crate::analysis::token_stream::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert field text into token streams.
///
/// # Examples
///
/// ```
/// use lexis::analysis::analyzer::Analyzer;
/// use lexis::analysis::analyzer::standard::StandardAnalyzer;
/// use lexis::analysis::token::collect_tokens;
///
/// let analyzer = StandardAnalyzer::new().unwrap();
/// let mut stream = analyzer.analyze("body", "The Quick fox").unwrap();
/// let tokens = collect_tokens(stream.as_mut()).unwrap();
///
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[0].text, "quick");
/// ```
pub trait Analyzer: Send + Sync {
    /// Build a token stream over the text read from `reader`.
    ///
    /// The reader may be consumed entirely before the first token is emitted.
    fn token_stream(&self, field_name: &str, reader: &mut dyn Read)
    -> Result<Box<dyn TokenStream>>;

    /// Build a token stream over `text`.
    fn analyze(&self, field_name: &str, text: &str) -> Result<Box<dyn TokenStream>> {
        self.token_stream(field_name, &mut Cursor::new(text.as_bytes()))
    }

    /// Get the name of this analyzer.
    fn name(&self) -> &'static str;
}
