//! Integration tests for analysis chains built from the public API.

use std::io::Cursor;
use std::sync::Arc;

use lexis::analysis::analyzer::Analyzer;
use lexis::analysis::analyzer::keyword::KeywordAnalyzer;
use lexis::analysis::analyzer::per_field::PerFieldAnalyzer;
use lexis::analysis::analyzer::pipeline::PipelineAnalyzer;
use lexis::analysis::attribute::{AttrRef, AttributeSource};
use lexis::analysis::config::AnalyzerConfig;
use lexis::analysis::token::collect_tokens;
use lexis::analysis::token_attributes::{
    CharTermAttribute, OffsetAttribute, PayloadAttribute, PositionIncrementAttribute,
    TermToBytesRefAttribute,
};
use lexis::analysis::token_filter::Filter;
use lexis::analysis::token_filter::lowercase::LowercaseFilter;
use lexis::analysis::token_filter::stop::StopFilter;
use lexis::analysis::token_stream::TokenStream;
use lexis::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use lexis::error::Result;
use lexis::util::bytes_ref::BytesRef;

/// Attaches the char length of each term as a one-byte payload.
struct LengthPayloadFilter;

impl Filter for LengthPayloadFilter {
    fn filter(&self, mut input: Box<dyn TokenStream>) -> Result<Box<dyn TokenStream>> {
        let attrs = input.attributes_mut();
        let term = attrs.add_attribute::<dyn CharTermAttribute>()?;
        let payload = attrs.add_attribute::<dyn PayloadAttribute>()?;
        Ok(Box::new(LengthPayloadStream {
            input,
            term,
            payload,
        }))
    }

    fn name(&self) -> &'static str {
        "length_payload"
    }
}

struct LengthPayloadStream {
    input: Box<dyn TokenStream>,
    term: AttrRef<dyn CharTermAttribute>,
    payload: AttrRef<dyn PayloadAttribute>,
}

impl TokenStream for LengthPayloadStream {
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
        let attrs = self.input.attributes_mut();
        let length = attrs.get(self.term)?.len();
        attrs
            .get_mut(self.payload)?
            .set_payload(Some(BytesRef::from(vec![length as u8])));
        Ok(true)
    }

    fn reset(&mut self) -> Result<()> {
        self.input.reset()
    }

    fn end(&mut self) -> Result<()> {
        self.input.end()
    }
}

fn english() -> PipelineAnalyzer {
    PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
        .add_filter(Arc::new(LowercaseFilter::new()))
        .add_filter(Arc::new(StopFilter::new()))
}

#[test]
fn test_custom_filter_shares_attributes() {
    let analyzer = english().add_filter(Arc::new(LengthPayloadFilter));
    let mut stream = analyzer.analyze("body", "The Tokenizer and the Filter").unwrap();
    let tokens = collect_tokens(stream.as_mut()).unwrap();

    let summary: Vec<(&str, u8, i32)> = tokens
        .iter()
        .map(|t| {
            let payload = t.payload.as_ref().map(|p| p.as_slice()[0]).unwrap_or(0);
            (t.text.as_str(), payload, t.position_increment)
        })
        .collect();
    assert_eq!(summary, vec![("tokenizer", 9, 2), ("filter", 6, 3)]);
}

#[test]
fn test_trailing_stop_words_count_at_end() {
    let mut stream = english().analyze("body", "quick the a").unwrap();
    stream.reset().unwrap();
    while stream.increment_token().unwrap() {}
    stream.end().unwrap();

    let attrs = stream.attributes();
    let pos_inc = attrs.attribute::<dyn PositionIncrementAttribute>().unwrap();
    assert_eq!(pos_inc.position_increment(), 2);
    let offset = attrs.attribute::<dyn OffsetAttribute>().unwrap();
    assert_eq!((offset.start_offset(), offset.end_offset()), (11, 11));
}

#[test]
fn test_consumer_reads_utf8_term_bytes() {
    let mut stream = english().analyze("body", "Grüße Welt").unwrap();
    let bytes = stream
        .attributes_mut()
        .add_attribute::<dyn TermToBytesRefAttribute>()
        .unwrap();

    let mut terms = Vec::new();
    stream.reset().unwrap();
    while stream.increment_token().unwrap() {
        let attrs = stream.attributes_mut();
        let term_bytes = attrs.get_mut(bytes).unwrap();
        term_bytes.fill_bytes_ref().unwrap();
        terms.push(term_bytes.bytes_ref().deep_copy());
    }
    stream.end().unwrap();

    assert_eq!(
        terms,
        vec![BytesRef::from("grüße"), BytesRef::from("welt")]
    );
}

#[test]
fn test_capture_and_restore_state_mid_stream() {
    let mut stream = english().analyze("body", "alpha beta").unwrap();
    stream.reset().unwrap();

    assert!(stream.increment_token().unwrap());
    let first = stream.attributes().capture_state();
    assert!(stream.increment_token().unwrap());

    stream.attributes_mut().restore_state(&first).unwrap();
    let attrs = stream.attributes();
    assert_eq!(attrs.attribute::<dyn CharTermAttribute>().unwrap().term(), "alpha");
    let offset = attrs.attribute::<dyn OffsetAttribute>().unwrap();
    assert_eq!((offset.start_offset(), offset.end_offset()), (0, 5));

    let reflected = attrs.reflect_as_string(false);
    assert!(reflected.contains("term=alpha"));
    assert!(reflected.contains("startOffset=0"));
}

#[test]
fn test_cloned_attributes_are_independent() {
    let mut stream = english().analyze("body", "alpha").unwrap();
    stream.reset().unwrap();
    assert!(stream.increment_token().unwrap());

    let mut copy = stream.attributes().clone_attributes();
    assert_eq!(&copy, stream.attributes());

    copy.attribute_mut::<dyn CharTermAttribute>()
        .unwrap()
        .append_str("-copy");
    assert_eq!(
        stream
            .attributes()
            .attribute::<dyn CharTermAttribute>()
            .unwrap()
            .term(),
        "alpha"
    );
    assert_ne!(&copy, stream.attributes());
}

#[test]
fn test_per_field_analyzer_with_reader() {
    let mut analyzer = PerFieldAnalyzer::new(Arc::new(english()));
    analyzer.add_analyzer("id", Arc::new(KeywordAnalyzer::new()));

    let mut reader = Cursor::new("SKU-42 Blue");
    let mut id = analyzer.token_stream("id", &mut reader).unwrap();
    let id_tokens = collect_tokens(id.as_mut()).unwrap();
    assert_eq!(id_tokens.len(), 1);
    assert_eq!(id_tokens[0].text, "SKU-42 Blue");

    let mut reader = Cursor::new("SKU-42 Blue");
    let mut body = analyzer.token_stream("body", &mut reader).unwrap();
    let body_tokens = collect_tokens(body.as_mut()).unwrap();
    let texts: Vec<&str> = body_tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["sku", "42", "blue"]);
}

#[test]
fn test_configured_analyzer_matches_hand_built() {
    let config = AnalyzerConfig::from_json(
        r#"{
            "tokenizer": {"type": "unicode_word"},
            "filters": [{"type": "lowercase"}, {"type": "stop"}]
        }"#,
    )
    .unwrap();
    let configured = config.build().unwrap();

    let text = "The Quick Brown Fox";
    let mut a = configured.analyze("f", text).unwrap();
    let mut b = english().analyze("f", text).unwrap();
    assert_eq!(
        collect_tokens(a.as_mut()).unwrap(),
        collect_tokens(b.as_mut()).unwrap()
    );
}
