//! Arbitrary per-token bytes.

use crate::analysis::attribute::{Attribute, AttributeImpl, Capability, downcast_target};
use crate::error::Result;
use crate::util::bytes_ref::BytesRef;

/// Optional payload bytes stored with each position of a token.
pub trait PayloadAttribute {
    fn payload(&self) -> Option<&BytesRef>;

    fn set_payload(&mut self, payload: Option<BytesRef>);
}

impl Attribute for dyn PayloadAttribute {
    const NAME: &'static str = "PayloadAttribute";

    fn create_default() -> Box<dyn AttributeImpl> {
        Box::new(PayloadAttributeImpl::default())
    }

    fn view(imp: &dyn AttributeImpl) -> Option<&Self> {
        imp.as_any()
            .downcast_ref::<PayloadAttributeImpl>()
            .map(|a| a as &dyn PayloadAttribute)
    }

    fn view_mut(imp: &mut dyn AttributeImpl) -> Option<&mut Self> {
        imp.as_any_mut()
            .downcast_mut::<PayloadAttributeImpl>()
            .map(|a| a as &mut dyn PayloadAttribute)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PayloadAttributeImpl {
    payload: Option<BytesRef>,
}

impl PayloadAttribute for PayloadAttributeImpl {
    fn payload(&self) -> Option<&BytesRef> {
        self.payload.as_ref()
    }

    fn set_payload(&mut self, payload: Option<BytesRef>) {
        self.payload = payload;
    }
}

impl AttributeImpl for PayloadAttributeImpl {
    fn capabilities(&self) -> Vec<Capability> {
        vec![Capability::of::<dyn PayloadAttribute>()]
    }

    fn clear(&mut self) {
        self.payload = None;
    }

    fn copy_to(&self, target: &mut dyn AttributeImpl) -> Result<()> {
        let target = downcast_target::<Self>(target, <dyn PayloadAttribute>::NAME)?;
        target.payload = self.payload.as_ref().map(BytesRef::deep_copy);
        Ok(())
    }

    fn reflect(&self, reflector: &mut dyn FnMut(&'static str, String)) {
        let value = self
            .payload
            .as_ref()
            .map_or_else(|| "null".to_string(), BytesRef::to_string);
        reflector("payload", value);
    }
}
