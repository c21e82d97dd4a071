//! Number of positions a token spans.

use crate::analysis::attribute::{Attribute, AttributeImpl, Capability, downcast_target};
use crate::error::{LexisError, Result};

/// Number of positions spanned by a token; above one for multi-word synonyms.
pub trait PositionLengthAttribute {
    fn position_length(&self) -> i32;

    /// Set the length. Values below one are rejected.
    fn set_position_length(&mut self, position_length: i32) -> Result<()>;
}

impl Attribute for dyn PositionLengthAttribute {
    const NAME: &'static str = "PositionLengthAttribute";

    fn create_default() -> Box<dyn AttributeImpl> {
        Box::new(PositionLengthAttributeImpl::default())
    }

    fn view(imp: &dyn AttributeImpl) -> Option<&Self> {
        imp.as_any()
            .downcast_ref::<PositionLengthAttributeImpl>()
            .map(|a| a as &dyn PositionLengthAttribute)
    }

    fn view_mut(imp: &mut dyn AttributeImpl) -> Option<&mut Self> {
        imp.as_any_mut()
            .downcast_mut::<PositionLengthAttributeImpl>()
            .map(|a| a as &mut dyn PositionLengthAttribute)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionLengthAttributeImpl {
    position_length: i32,
}

impl Default for PositionLengthAttributeImpl {
    fn default() -> Self {
        PositionLengthAttributeImpl { position_length: 1 }
    }
}

impl PositionLengthAttribute for PositionLengthAttributeImpl {
    fn position_length(&self) -> i32 {
        self.position_length
    }

    fn set_position_length(&mut self, position_length: i32) -> Result<()> {
        if position_length < 1 {
            return Err(LexisError::out_of_range(format!(
                "Position length must be 1 or greater: got {position_length}"
            )));
        }
        self.position_length = position_length;
        Ok(())
    }
}

impl AttributeImpl for PositionLengthAttributeImpl {
    fn capabilities(&self) -> Vec<Capability> {
        vec![Capability::of::<dyn PositionLengthAttribute>()]
    }

    fn clear(&mut self) {
        self.position_length = 1;
    }

    fn copy_to(&self, target: &mut dyn AttributeImpl) -> Result<()> {
        *downcast_target::<Self>(target, <dyn PositionLengthAttribute>::NAME)? = *self;
        Ok(())
    }

    fn reflect(&self, reflector: &mut dyn FnMut(&'static str, String)) {
        reflector("positionLength", self.position_length.to_string());
    }
}
