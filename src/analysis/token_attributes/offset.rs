//! Character offsets of a token in the original text.

use crate::analysis::attribute::{Attribute, AttributeImpl, Capability, downcast_target};
use crate::error::{LexisError, Result};

/// Start and end character offsets of a token.
///
/// `end_offset - start_offset` may differ from the term length, for example
/// when a filter rewrote the term.
pub trait OffsetAttribute {
    fn start_offset(&self) -> i32;

    fn end_offset(&self) -> i32;

    /// Set both offsets. Requires `0 <= start_offset <= end_offset`.
    fn set_offset(&mut self, start_offset: i32, end_offset: i32) -> Result<()>;
}

impl Attribute for dyn OffsetAttribute {
    const NAME: &'static str = "OffsetAttribute";

    fn create_default() -> Box<dyn AttributeImpl> {
        Box::new(OffsetAttributeImpl::default())
    }

    fn view(imp: &dyn AttributeImpl) -> Option<&Self> {
        imp.as_any()
            .downcast_ref::<OffsetAttributeImpl>()
            .map(|a| a as &dyn OffsetAttribute)
    }

    fn view_mut(imp: &mut dyn AttributeImpl) -> Option<&mut Self> {
        imp.as_any_mut()
            .downcast_mut::<OffsetAttributeImpl>()
            .map(|a| a as &mut dyn OffsetAttribute)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OffsetAttributeImpl {
    start_offset: i32,
    end_offset: i32,
}

impl OffsetAttribute for OffsetAttributeImpl {
    fn start_offset(&self) -> i32 {
        self.start_offset
    }

    fn end_offset(&self) -> i32 {
        self.end_offset
    }

    fn set_offset(&mut self, start_offset: i32, end_offset: i32) -> Result<()> {
        if start_offset < 0 || end_offset < start_offset {
            return Err(LexisError::out_of_range(format!(
                "startOffset must be non-negative, and endOffset must be >= startOffset, \
                 startOffset={start_offset},endOffset={end_offset}"
            )));
        }
        self.start_offset = start_offset;
        self.end_offset = end_offset;
        Ok(())
    }
}

impl AttributeImpl for OffsetAttributeImpl {
    fn capabilities(&self) -> Vec<Capability> {
        vec![Capability::of::<dyn OffsetAttribute>()]
    }

    fn clear(&mut self) {
        self.start_offset = 0;
        self.end_offset = 0;
    }

    fn copy_to(&self, target: &mut dyn AttributeImpl) -> Result<()> {
        *downcast_target::<Self>(target, <dyn OffsetAttribute>::NAME)? = *self;
        Ok(())
    }

    fn reflect(&self, reflector: &mut dyn FnMut(&'static str, String)) {
        reflector("startOffset", self.start_offset.to_string());
        reflector("endOffset", self.end_offset.to_string());
    }
}
