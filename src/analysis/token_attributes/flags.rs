//! Application-defined bit flags carried between analysis stages.

use crate::analysis::attribute::{Attribute, AttributeImpl, Capability, downcast_target};
use crate::error::Result;

/// Free-form flag bits. Not stored in the index.
pub trait FlagsAttribute {
    fn flags(&self) -> i32;

    fn set_flags(&mut self, flags: i32);
}

impl Attribute for dyn FlagsAttribute {
    const NAME: &'static str = "FlagsAttribute";

    fn create_default() -> Box<dyn AttributeImpl> {
        Box::new(FlagsAttributeImpl::default())
    }

    fn view(imp: &dyn AttributeImpl) -> Option<&Self> {
        imp.as_any()
            .downcast_ref::<FlagsAttributeImpl>()
            .map(|a| a as &dyn FlagsAttribute)
    }

    fn view_mut(imp: &mut dyn AttributeImpl) -> Option<&mut Self> {
        imp.as_any_mut()
            .downcast_mut::<FlagsAttributeImpl>()
            .map(|a| a as &mut dyn FlagsAttribute)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FlagsAttributeImpl {
    flags: i32,
}

impl FlagsAttribute for FlagsAttributeImpl {
    fn flags(&self) -> i32 {
        self.flags
    }

    fn set_flags(&mut self, flags: i32) {
        self.flags = flags;
    }
}

impl AttributeImpl for FlagsAttributeImpl {
    fn capabilities(&self) -> Vec<Capability> {
        vec![Capability::of::<dyn FlagsAttribute>()]
    }

    fn clear(&mut self) {
        self.flags = 0;
    }

    fn copy_to(&self, target: &mut dyn AttributeImpl) -> Result<()> {
        *downcast_target::<Self>(target, <dyn FlagsAttribute>::NAME)? = *self;
        Ok(())
    }

    fn reflect(&self, reflector: &mut dyn FnMut(&'static str, String)) {
        reflector("flags", self.flags.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::analysis::token_attributes::KeywordAttributeImpl;
    use crate::error::LexisError;

    #[test]
    fn test_copy_to() {
        let mut source = FlagsAttributeImpl::default();
        source.set_flags(0b1010);

        let mut target = FlagsAttributeImpl::default();
        source.copy_to(&mut target).unwrap();
        assert_eq!(target.flags(), 0b1010);
        assert_eq!(target, source);
    }

    #[test]
    fn test_copy_to_wrong_type() {
        let flags = FlagsAttributeImpl::default();
        let mut keyword = KeywordAttributeImpl::default();
        assert!(matches!(
            flags.copy_to(&mut keyword),
            Err(LexisError::CapabilityMismatch { .. })
        ));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut flags = FlagsAttributeImpl::default();
        flags.set_flags(7);
        flags.clear();
        let once = flags;
        flags.clear();
        assert_eq!(flags, once);
        assert_eq!(flags.flags(), 0);
    }

    #[test]
    fn test_equality_and_hash() {
        let mut a = FlagsAttributeImpl::default();
        let mut b = FlagsAttributeImpl::default();
        a.set_flags(3);
        b.set_flags(3);
        assert_eq!(a, b);
        assert_eq!(HashSet::from([a, b]).len(), 1);

        b.set_flags(4);
        assert_ne!(a, b);
    }
}
