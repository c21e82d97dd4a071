//! Document: an ordered collection of fields.

use std::borrow::Cow;
use std::fmt;

use crate::document::field::{Field, IndexableField, Store};
use crate::document::fields::{
    DoubleField, FloatField, IntField, LongField, StoredField, StringField, TextField,
};
use crate::util::bytes_ref::BytesRef;

/// A document represents a single record to be indexed.
///
/// Fields keep their insertion order, and a name may appear any number of
/// times (multi-valued fields). Lookups by a missing name return `None` or an
/// empty `Vec`, never an error.
///
/// # Examples
///
/// ```
/// use lexis::document::document::Document;
/// use lexis::document::field::Store;
/// use lexis::document::fields::StringField;
///
/// let mut doc = Document::new();
/// doc.add(StringField::new("tag", "rust", Store::Yes));
/// doc.add(StringField::new("tag", "search", Store::Yes));
///
/// assert_eq!(doc.get("tag").as_deref(), Some("rust"));
/// assert_eq!(doc.get_values("tag"), vec!["rust", "search"]);
/// assert!(doc.get("missing").is_none());
/// ```
#[derive(Debug, Default)]
pub struct Document {
    fields: Vec<Field>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Document { fields: Vec::new() }
    }

    /// Create a builder for constructing documents.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    /// Append a field after the existing ones.
    pub fn add<F: Into<Field>>(&mut self, field: F) {
        self.fields.push(field.into());
    }

    /// Remove the first field with the given name.
    pub fn remove_field(&mut self, name: &str) -> Option<Field> {
        let index = self.fields.iter().position(|f| f.name() == name)?;
        Some(self.fields.remove(index))
    }

    /// Remove every field with the given name, returning how many went.
    pub fn remove_fields(&mut self, name: &str) -> usize {
        let before = self.fields.len();
        self.fields.retain(|f| f.name() != name);
        before - self.fields.len()
    }

    /// The text of the first field with this name that has a text value.
    ///
    /// Numeric fields count as text in their decimal rendering.
    pub fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        self.fields
            .iter()
            .filter(|f| f.name() == name)
            .find_map(|f| f.string_value())
    }

    /// The text of every field with this name, in insertion order.
    pub fn get_values(&self, name: &str) -> Vec<Cow<'_, str>> {
        self.fields
            .iter()
            .filter(|f| f.name() == name)
            .filter_map(|f| f.string_value())
            .collect()
    }

    /// The bytes of the first binary field with this name.
    pub fn get_binary_value(&self, name: &str) -> Option<&BytesRef> {
        self.fields
            .iter()
            .filter(|f| f.name() == name)
            .find_map(|f| f.binary_value())
    }

    /// The bytes of every binary field with this name, in insertion order.
    pub fn get_binary_values(&self, name: &str) -> Vec<&BytesRef> {
        self.fields
            .iter()
            .filter(|f| f.name() == name)
            .filter_map(|f| f.binary_value())
            .collect()
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    pub fn get_fields(&self, name: &str) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.name() == name).collect()
    }

    /// Check if the document has a field with this name.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name() == name)
    }

    /// All fields, in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// All fields, mutably. An index writer needs this to pull token streams.
    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Field> {
        self.fields.iter_mut()
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

impl IntoIterator for Document {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<F: Into<Field>> Extend<F> for Document {
    fn extend<I: IntoIterator<Item = F>>(&mut self, iter: I) {
        self.fields.extend(iter.into_iter().map(Into::into));
    }
}

impl<F: Into<Field>> FromIterator<F> for Document {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut document = Document::new();
        document.extend(iter);
        document
    }
}

/// Renders as `Document<field field ...>`.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Document<")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{field}")?;
        }
        write!(f, ">")
    }
}

/// A builder for constructing documents in a fluent manner.
///
/// # Examples
///
/// ```
/// use lexis::document::document::Document;
/// use lexis::document::field::Store;
///
/// let doc = Document::builder()
///     .add_text("title", "Rust Programming Guide", Store::Yes)
///     .add_string("isbn", "978-0", Store::Yes)
///     .add_int("year", 2024, Store::Yes)
///     .add_double("price", 39.99, Store::No)
///     .build();
///
/// assert_eq!(doc.len(), 4);
/// assert_eq!(doc.get("year").as_deref(), Some("2024"));
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Create a new document builder.
    pub fn new() -> Self {
        DocumentBuilder {
            document: Document::new(),
        }
    }

    /// Add an analyzed text field.
    pub fn add_text<S: Into<String>, T: Into<String>>(
        mut self,
        name: S,
        value: T,
        store: Store,
    ) -> Self {
        self.document.add(TextField::new(name, value, store));
        self
    }

    /// Add a single-token string field.
    pub fn add_string<S: Into<String>, T: Into<String>>(
        mut self,
        name: S,
        value: T,
        store: Store,
    ) -> Self {
        self.document.add(StringField::new(name, value, store));
        self
    }

    /// Add a stored-only string field.
    pub fn add_stored<S: Into<String>, T: Into<String>>(mut self, name: S, value: T) -> Self {
        self.document.add(StoredField::new(name, value));
        self
    }

    /// Add a stored-only binary field.
    pub fn add_binary<S: Into<String>, B: Into<BytesRef>>(mut self, name: S, value: B) -> Self {
        self.document.add(StoredField::from_bytes(name, value));
        self
    }

    pub fn add_int<S: Into<String>>(mut self, name: S, value: i32, store: Store) -> Self {
        self.document.add(IntField::new(name, value, store));
        self
    }

    pub fn add_long<S: Into<String>>(mut self, name: S, value: i64, store: Store) -> Self {
        self.document.add(LongField::new(name, value, store));
        self
    }

    pub fn add_float<S: Into<String>>(mut self, name: S, value: f32, store: Store) -> Self {
        self.document.add(FloatField::new(name, value, store));
        self
    }

    pub fn add_double<S: Into<String>>(mut self, name: S, value: f64, store: Store) -> Self {
        self.document.add(DoubleField::new(name, value, store));
        self
    }

    /// Add any field, including doc-values fields.
    pub fn add_field<F: Into<Field>>(mut self, field: F) -> Self {
        self.document.add(field);
        self
    }

    /// Build the final document.
    pub fn build(self) -> Document {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::doc_values::{NumericDocValuesField, SortedSetDocValuesField};

    fn sample() -> Document {
        Document::builder()
            .add_string("tag", "a", Store::Yes)
            .add_binary("blob", vec![1u8, 2])
            .add_string("tag", "b", Store::Yes)
            .add_binary("blob", vec![3u8])
            .add_field(NumericDocValuesField::new("rank", 7))
            .build()
    }

    #[test]
    fn test_multi_valued_lookup() {
        let doc = sample();
        assert_eq!(doc.get("tag").as_deref(), Some("a"));
        assert_eq!(doc.get_values("tag"), vec!["a", "b"]);
        assert_eq!(doc.get_fields("tag").len(), 2);
        assert_eq!(doc.get_binary_value("blob"), Some(&BytesRef::from(vec![1u8, 2])));
        assert_eq!(doc.get_binary_values("blob").len(), 2);
        assert_eq!(doc.get("rank").as_deref(), Some("7"));
    }

    #[test]
    fn test_missing_names() {
        let doc = sample();
        assert!(doc.get("nope").is_none());
        assert!(doc.get_values("nope").is_empty());
        assert!(doc.get_binary_value("tag").is_none());
        assert!(doc.get_field("nope").is_none());
        assert!(doc.get_binary_values("nope").is_empty());
    }

    #[test]
    fn test_remove_field_removes_first_only() {
        let mut doc = sample();
        let removed = doc.remove_field("tag").unwrap();
        assert_eq!(removed.string_value().as_deref(), Some("a"));
        assert_eq!(doc.get_values("tag"), vec!["b"]);
        assert!(doc.remove_field("nope").is_none());
    }

    #[test]
    fn test_remove_fields_removes_all() {
        let mut doc = sample();
        assert_eq!(doc.remove_fields("blob"), 2);
        assert_eq!(doc.remove_fields("blob"), 0);
        assert_eq!(doc.len(), 3);
        let names: Vec<&str> = doc.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["tag", "tag", "rank"]);
    }

    #[test]
    fn test_collect_and_display() {
        let doc: Document = vec![
            SortedSetDocValuesField::new("cat", "x"),
            SortedSetDocValuesField::new("cat", "y"),
        ]
        .into_iter()
        .collect();
        assert_eq!(doc.len(), 2);
        assert_eq!(
            doc.to_string(),
            "Document<docValueType=SORTED_SET<cat:[78]> docValueType=SORTED_SET<cat:[79]>>"
        );
    }

    #[test]
    fn test_edit_in_place() {
        let mut doc = sample();
        doc.get_field_mut("tag").unwrap().set_string_value("z").unwrap();
        assert_eq!(doc.get("tag").as_deref(), Some("z"));
    }
}
