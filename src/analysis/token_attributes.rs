//! The standard token attributes.
//!
//! Each capability is a trait (`dyn CharTermAttribute`, `dyn OffsetAttribute`,
//! ...) together with its default implementation. Register capabilities on an
//! [`AttributeSource`](crate::analysis::attribute::AttributeSource) with
//! `add_attribute::<dyn CharTermAttribute>()`.

pub mod char_term;
pub mod flags;
pub mod keyword;
pub mod offset;
pub mod payload;
pub mod position_increment;
pub mod position_length;
pub mod term_to_bytes_ref;
pub mod type_attribute;

pub use char_term::{CharTermAttribute, CharTermAttributeImpl};
pub use flags::{FlagsAttribute, FlagsAttributeImpl};
pub use keyword::{KeywordAttribute, KeywordAttributeImpl};
pub use offset::{OffsetAttribute, OffsetAttributeImpl};
pub use payload::{PayloadAttribute, PayloadAttributeImpl};
pub use position_increment::{PositionIncrementAttribute, PositionIncrementAttributeImpl};
pub use position_length::{PositionLengthAttribute, PositionLengthAttributeImpl};
pub use term_to_bytes_ref::TermToBytesRefAttribute;
pub use type_attribute::{DEFAULT_TYPE, TypeAttribute, TypeAttributeImpl};
