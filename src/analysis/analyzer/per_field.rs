//! Analyzer that delegates to a different analyzer per field.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token_stream::TokenStream;
use crate::error::Result;

/// Uses the analyzer registered for the field name, or the default one.
#[derive(Clone)]
pub struct PerFieldAnalyzer {
    default_analyzer: Arc<dyn Analyzer>,
    field_analyzers: AHashMap<String, Arc<dyn Analyzer>>,
}

impl PerFieldAnalyzer {
    pub fn new(default_analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            default_analyzer,
            field_analyzers: AHashMap::new(),
        }
    }

    pub fn add_analyzer(&mut self, field: impl Into<String>, analyzer: Arc<dyn Analyzer>) {
        self.field_analyzers.insert(field.into(), analyzer);
    }

    pub fn get_analyzer(&self, field: &str) -> &Arc<dyn Analyzer> {
        self.field_analyzers
            .get(field)
            .unwrap_or(&self.default_analyzer)
    }

    pub fn default_analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.default_analyzer
    }
}

impl Analyzer for PerFieldAnalyzer {
    fn token_stream(
        &self,
        field_name: &str,
        reader: &mut dyn Read,
    ) -> Result<Box<dyn TokenStream>> {
        self.get_analyzer(field_name).token_stream(field_name, reader)
    }

    fn analyze(&self, field_name: &str, text: &str) -> Result<Box<dyn TokenStream>> {
        self.get_analyzer(field_name).analyze(field_name, text)
    }

    fn name(&self) -> &'static str {
        "per_field"
    }
}

impl fmt::Debug for PerFieldAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<_> = self
            .field_analyzers
            .iter()
            .map(|(field, analyzer)| (field.as_str(), analyzer.name()))
            .collect();
        fields.sort_unstable();
        f.debug_struct("PerFieldAnalyzer")
            .field("default", &self.default_analyzer.name())
            .field("fields", &fields)
            .finish()
    }
}
