//! Drives documents through a minimal inverted-index consumer, the way an
//! index writer walks the fields of each document it receives.

use lexis::analysis::analyzer::Analyzer;
use lexis::analysis::analyzer::standard::StandardAnalyzer;
use lexis::analysis::token_attributes::{PositionIncrementAttribute, TermToBytesRefAttribute};
use lexis::document::doc_values::{
    BinaryDocValuesField, DoubleDocValuesField, NumericDocValuesField, SortedDocValuesField,
    SortedSetDocValuesField,
};
use lexis::document::document::Document;
use lexis::document::field::{Field, IndexableField, Store};
use lexis::document::field_type::{DocValuesType, FieldType, IndexOptions};
use lexis::document::field_value::{FieldShape, NumericValue};
use lexis::document::fields::{StringField, TextField};
use lexis::error::{LexisError, Result};
use lexis::util::bytes_ref::BytesRef;

#[derive(Debug, Default)]
struct Consumed {
    postings: Vec<(String, BytesRef, i32)>,
    stored: Vec<(String, String)>,
    doc_values: Vec<(String, DocValuesType, Option<NumericValue>)>,
}

impl Consumed {
    fn terms(&self, field: &str) -> Vec<String> {
        self.postings
            .iter()
            .filter(|(name, _, _)| name == field)
            .map(|(_, term, _)| term.utf8_to_string().unwrap())
            .collect()
    }

    fn positions(&self, field: &str) -> Vec<i32> {
        self.postings
            .iter()
            .filter(|(name, _, _)| name == field)
            .map(|(_, _, position)| *position)
            .collect()
    }
}

fn consume(doc: &mut Document, analyzer: &dyn Analyzer) -> Result<Consumed> {
    let mut consumed = Consumed::default();
    for field in doc.fields_mut() {
        let name = field.name().to_string();
        let field_type = *field.field_type();

        if field_type.stored() {
            let value = match field.binary_value() {
                Some(bytes) => bytes.to_string(),
                None => field.string_value().map(|v| v.into_owned()).unwrap_or_default(),
            };
            consumed.stored.push((name.clone(), value));
        }

        if field_type.doc_values_type() != DocValuesType::None {
            consumed.doc_values.push((
                name.clone(),
                field_type.doc_values_type(),
                field.numeric_value(),
            ));
        }

        let Some(stream) = field.token_stream(analyzer)? else {
            continue;
        };
        let bytes = stream
            .attributes_mut()
            .add_attribute::<dyn TermToBytesRefAttribute>()?;
        let pos_inc = stream
            .attributes_mut()
            .add_attribute::<dyn PositionIncrementAttribute>()?;

        let mut position = -1;
        stream.reset()?;
        while stream.increment_token()? {
            let attrs = stream.attributes_mut();
            position += attrs.get(pos_inc)?.position_increment();
            let term = attrs.get_mut(bytes)?;
            term.fill_bytes_ref()?;
            consumed
                .postings
                .push((name.clone(), term.bytes_ref().deep_copy(), position));
        }
        stream.end()?;
    }
    Ok(consumed)
}

fn sample_document() -> Document {
    Document::builder()
        .add_string("id", "BOOK-1", Store::Yes)
        .add_text("title", "The Rust Search Library", Store::Yes)
        .add_text("body", "Fields are analyzed before indexing", Store::No)
        .add_double("price", 24.5, Store::Yes)
        .add_stored("note", "first edition")
        .add_field(SortedDocValuesField::new("category", "books"))
        .add_field(NumericDocValuesField::new("pages", 312))
        .build()
}

#[test]
fn test_fields_are_routed_by_type() {
    let analyzer = StandardAnalyzer::new().unwrap();
    let mut doc = sample_document();
    let consumed = consume(&mut doc, &analyzer).unwrap();

    assert_eq!(consumed.terms("id"), vec!["BOOK-1"]);
    assert_eq!(consumed.terms("title"), vec!["rust", "search", "library"]);
    assert_eq!(consumed.positions("title"), vec![1, 2, 3]);
    assert_eq!(
        consumed.terms("body"),
        vec!["fields", "analyzed", "before", "indexing"]
    );
    assert_eq!(consumed.positions("body"), vec![0, 2, 3, 4]);

    // One trie term per 4-bit shift of the 64-bit sortable value.
    assert_eq!(consumed.positions("price"), vec![0; 16]);
    assert!(consumed.terms("note").is_empty());
    assert!(consumed.terms("category").is_empty());

    let stored: Vec<&str> = consumed.stored.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(stored, vec!["id", "title", "price", "note"]);
    assert_eq!(consumed.stored[2].1, "24.5");

    assert_eq!(
        consumed.doc_values,
        vec![
            ("category".to_string(), DocValuesType::Sorted, None),
            (
                "pages".to_string(),
                DocValuesType::Numeric,
                Some(NumericValue::Long(312))
            ),
        ]
    );
}

#[test]
fn test_doc_values_kinds() {
    let mut doc = Document::new();
    doc.add(BinaryDocValuesField::new("thumb", vec![0xffu8, 0x00]));
    doc.add(SortedSetDocValuesField::new("tag", "rust"));
    doc.add(SortedSetDocValuesField::new("tag", "search"));
    doc.add(DoubleDocValuesField::new("score", 0.75));

    let consumed = consume(&mut doc, &StandardAnalyzer::new().unwrap()).unwrap();
    assert!(consumed.postings.is_empty());
    assert!(consumed.stored.is_empty());

    let kinds: Vec<DocValuesType> = consumed.doc_values.iter().map(|(_, t, _)| *t).collect();
    assert_eq!(
        kinds,
        vec![
            DocValuesType::Binary,
            DocValuesType::SortedSet,
            DocValuesType::SortedSet,
            DocValuesType::Numeric,
        ]
    );
    assert_eq!(
        consumed.doc_values[3].2,
        Some(NumericValue::Long(0.75f64.to_bits() as i64))
    );
    assert_eq!(doc.get_binary_values("tag").len(), 2);
}

#[test]
fn test_reused_fields_across_documents() {
    let analyzer = StandardAnalyzer::new().unwrap();
    let mut doc = Document::new();
    doc.add(StringField::new("id", "", Store::Yes));
    doc.add(TextField::new("body", "", Store::No));

    let inputs = [("1", "alpha beta"), ("2", "gamma"), ("3", "delta epsilon zeta")];
    let mut counts = Vec::new();
    for (id, body) in inputs {
        doc.get_field_mut("id").unwrap().set_string_value(id).unwrap();
        doc.get_field_mut("body").unwrap().set_string_value(body).unwrap();

        let consumed = consume(&mut doc, &analyzer).unwrap();
        assert_eq!(consumed.terms("id"), vec![id]);
        counts.push(consumed.terms("body").len());
    }
    assert_eq!(counts, vec![2, 1, 3]);
}

#[test]
fn test_value_shape_is_fixed() {
    let mut field = TextField::new("body", "text", Store::No);
    match field.set_int_value(3) {
        Err(LexisError::ShapeMismatch {
            existing,
            requested,
        }) => {
            assert_eq!(existing, FieldShape::String);
            assert_eq!(requested, FieldShape::Int);
        }
        other => panic!("expected shape mismatch, got {other:?}"),
    }
    assert_eq!(field.string_value().as_deref(), Some("text"));
}

#[test]
fn test_field_type_from_configuration() {
    let field_type = FieldType::from_json(
        r#"{
            "indexed": true,
            "stored": true,
            "tokenized": true,
            "store_term_vectors": true,
            "store_term_vector_positions": true,
            "index_options": "docs_and_freqs"
        }"#,
    )
    .unwrap();
    assert_eq!(field_type.index_options(), IndexOptions::DocsAndFreqs);
    assert_eq!(
        field_type.to_string(),
        "stored,indexed,tokenized,termVector,termVectorPosition,indexOptions=DOCS_AND_FREQS"
    );

    let mut field = Field::new("summary", "Stored and indexed", field_type).unwrap();
    let mut doc = Document::new();
    doc.add(Field::new("other", "x", field_type).unwrap());
    let analyzer = StandardAnalyzer::new().unwrap();
    let tokens = field.token_stream(&analyzer).unwrap();
    assert!(tokens.is_some());

    doc.add(field);
    assert_eq!(doc.get("summary").as_deref(), Some("Stored and indexed"));
    assert_eq!(doc.to_string(), "Document<\
        stored,indexed,tokenized,termVector,termVectorPosition,indexOptions=DOCS_AND_FREQS<other:x> \
        stored,indexed,tokenized,termVector,termVectorPosition,indexOptions=DOCS_AND_FREQS<summary:Stored and indexed>>");
}
