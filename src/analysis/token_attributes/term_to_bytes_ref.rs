//! Binary form of the current term, as consumed by the indexer.

use crate::analysis::attribute::{Attribute, AttributeImpl};
use crate::analysis::numeric_token_stream::NumericTermAttributeImpl;
use crate::analysis::token_attributes::CharTermAttributeImpl;
use crate::error::Result;
use crate::util::bytes_ref::BytesRef;

/// Exposes the current term as bytes.
///
/// Textual terms are UTF-8 encoded, numeric terms are prefix coded. The
/// returned [`BytesRef`] is reused for every token: callers must call
/// [`fill_bytes_ref`](TermToBytesRefAttribute::fill_bytes_ref) after each
/// `increment_token` and copy the bytes if they need to keep them.
pub trait TermToBytesRefAttribute {
    /// Encode the current term into the shared buffer.
    fn fill_bytes_ref(&mut self) -> Result<()>;

    /// The buffer written by the last [`fill_bytes_ref`](TermToBytesRefAttribute::fill_bytes_ref).
    fn bytes_ref(&self) -> &BytesRef;
}

impl Attribute for dyn TermToBytesRefAttribute {
    const NAME: &'static str = "TermToBytesRefAttribute";

    fn create_default() -> Box<dyn AttributeImpl> {
        Box::new(CharTermAttributeImpl::new())
    }

    fn view(imp: &dyn AttributeImpl) -> Option<&Self> {
        let any = imp.as_any();
        if let Some(term) = any.downcast_ref::<CharTermAttributeImpl>() {
            return Some(term as &dyn TermToBytesRefAttribute);
        }
        any.downcast_ref::<NumericTermAttributeImpl>()
            .map(|numeric| numeric as &dyn TermToBytesRefAttribute)
    }

    fn view_mut(imp: &mut dyn AttributeImpl) -> Option<&mut Self> {
        let any = imp.as_any_mut();
        if any.is::<CharTermAttributeImpl>() {
            return any
                .downcast_mut::<CharTermAttributeImpl>()
                .map(|term| term as &mut dyn TermToBytesRefAttribute);
        }
        any.downcast_mut::<NumericTermAttributeImpl>()
            .map(|numeric| numeric as &mut dyn TermToBytesRefAttribute)
    }
}
