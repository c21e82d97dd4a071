//! Position of a token relative to the previous one.

use crate::analysis::attribute::{Attribute, AttributeImpl, Capability, downcast_target};
use crate::error::{LexisError, Result};

/// Distance from the previous token's position.
///
/// `1` is the next position, `0` stacks the token on the previous one (e.g.
/// synonyms) and values above one leave holes (e.g. removed stop words).
pub trait PositionIncrementAttribute {
    fn position_increment(&self) -> i32;

    /// Set the increment. Negative values are rejected.
    fn set_position_increment(&mut self, position_increment: i32) -> Result<()>;
}

impl Attribute for dyn PositionIncrementAttribute {
    const NAME: &'static str = "PositionIncrementAttribute";

    fn create_default() -> Box<dyn AttributeImpl> {
        Box::new(PositionIncrementAttributeImpl::default())
    }

    fn view(imp: &dyn AttributeImpl) -> Option<&Self> {
        imp.as_any()
            .downcast_ref::<PositionIncrementAttributeImpl>()
            .map(|a| a as &dyn PositionIncrementAttribute)
    }

    fn view_mut(imp: &mut dyn AttributeImpl) -> Option<&mut Self> {
        imp.as_any_mut()
            .downcast_mut::<PositionIncrementAttributeImpl>()
            .map(|a| a as &mut dyn PositionIncrementAttribute)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionIncrementAttributeImpl {
    position_increment: i32,
}

impl Default for PositionIncrementAttributeImpl {
    fn default() -> Self {
        PositionIncrementAttributeImpl {
            position_increment: 1,
        }
    }
}

impl PositionIncrementAttribute for PositionIncrementAttributeImpl {
    fn position_increment(&self) -> i32 {
        self.position_increment
    }

    fn set_position_increment(&mut self, position_increment: i32) -> Result<()> {
        if position_increment < 0 {
            return Err(LexisError::out_of_range(format!(
                "Increment must be zero or greater: got {position_increment}"
            )));
        }
        self.position_increment = position_increment;
        Ok(())
    }
}

impl AttributeImpl for PositionIncrementAttributeImpl {
    fn capabilities(&self) -> Vec<Capability> {
        vec![Capability::of::<dyn PositionIncrementAttribute>()]
    }

    fn clear(&mut self) {
        self.position_increment = 1;
    }

    // Trailing holes are added on top of zero by the stages that removed tokens.
    fn end(&mut self) {
        self.position_increment = 0;
    }

    fn copy_to(&self, target: &mut dyn AttributeImpl) -> Result<()> {
        *downcast_target::<Self>(target, <dyn PositionIncrementAttribute>::NAME)? = *self;
        Ok(())
    }

    fn reflect(&self, reflector: &mut dyn FnMut(&'static str, String)) {
        reflector("positionIncrement", self.position_increment.to_string());
    }
}
