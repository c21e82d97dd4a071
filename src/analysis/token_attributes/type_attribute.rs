//! Lexical type of a token.

use crate::analysis::attribute::{Attribute, AttributeImpl, Capability, downcast_target};
use crate::error::Result;

/// Type assigned to tokens that no stage classified.
pub const DEFAULT_TYPE: &str = "word";

/// Lexical type of a token, e.g. `"word"` or `"<NUM>"`.
pub trait TypeAttribute {
    fn token_type(&self) -> &str;

    fn set_type(&mut self, token_type: &str);
}

impl Attribute for dyn TypeAttribute {
    const NAME: &'static str = "TypeAttribute";

    fn create_default() -> Box<dyn AttributeImpl> {
        Box::new(TypeAttributeImpl::default())
    }

    fn view(imp: &dyn AttributeImpl) -> Option<&Self> {
        imp.as_any()
            .downcast_ref::<TypeAttributeImpl>()
            .map(|a| a as &dyn TypeAttribute)
    }

    fn view_mut(imp: &mut dyn AttributeImpl) -> Option<&mut Self> {
        imp.as_any_mut()
            .downcast_mut::<TypeAttributeImpl>()
            .map(|a| a as &mut dyn TypeAttribute)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeAttributeImpl {
    token_type: String,
}

impl Default for TypeAttributeImpl {
    fn default() -> Self {
        TypeAttributeImpl {
            token_type: DEFAULT_TYPE.to_string(),
        }
    }
}

impl TypeAttribute for TypeAttributeImpl {
    fn token_type(&self) -> &str {
        &self.token_type
    }

    fn set_type(&mut self, token_type: &str) {
        self.token_type.clear();
        self.token_type.push_str(token_type);
    }
}

impl AttributeImpl for TypeAttributeImpl {
    fn capabilities(&self) -> Vec<Capability> {
        vec![Capability::of::<dyn TypeAttribute>()]
    }

    fn clear(&mut self) {
        self.set_type(DEFAULT_TYPE);
    }

    fn copy_to(&self, target: &mut dyn AttributeImpl) -> Result<()> {
        let target = downcast_target::<Self>(target, <dyn TypeAttribute>::NAME)?;
        target.set_type(&self.token_type);
        Ok(())
    }

    fn reflect(&self, reflector: &mut dyn FnMut(&'static str, String)) {
        reflector("type", self.token_type.clone());
    }
}
