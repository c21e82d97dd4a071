//! Marks tokens that later stages must not modify.

use crate::analysis::attribute::{Attribute, AttributeImpl, Capability, downcast_target};
use crate::error::Result;

/// When set, stemmers and similar rewriting filters leave the term alone.
pub trait KeywordAttribute {
    fn is_keyword(&self) -> bool;

    fn set_keyword(&mut self, keyword: bool);
}

impl Attribute for dyn KeywordAttribute {
    const NAME: &'static str = "KeywordAttribute";

    fn create_default() -> Box<dyn AttributeImpl> {
        Box::new(KeywordAttributeImpl::default())
    }

    fn view(imp: &dyn AttributeImpl) -> Option<&Self> {
        imp.as_any()
            .downcast_ref::<KeywordAttributeImpl>()
            .map(|a| a as &dyn KeywordAttribute)
    }

    fn view_mut(imp: &mut dyn AttributeImpl) -> Option<&mut Self> {
        imp.as_any_mut()
            .downcast_mut::<KeywordAttributeImpl>()
            .map(|a| a as &mut dyn KeywordAttribute)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeywordAttributeImpl {
    keyword: bool,
}

impl KeywordAttribute for KeywordAttributeImpl {
    fn is_keyword(&self) -> bool {
        self.keyword
    }

    fn set_keyword(&mut self, keyword: bool) {
        self.keyword = keyword;
    }
}

impl AttributeImpl for KeywordAttributeImpl {
    fn capabilities(&self) -> Vec<Capability> {
        vec![Capability::of::<dyn KeywordAttribute>()]
    }

    fn clear(&mut self) {
        self.keyword = false;
    }

    fn copy_to(&self, target: &mut dyn AttributeImpl) -> Result<()> {
        *downcast_target::<Self>(target, <dyn KeywordAttribute>::NAME)? = *self;
        Ok(())
    }

    fn reflect(&self, reflector: &mut dyn FnMut(&'static str, String)) {
        reflector("keyword", self.keyword.to_string());
    }
}
