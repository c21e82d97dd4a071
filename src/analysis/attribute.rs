//! Typed per-token state shared between the stages of an analysis chain.
//!
//! A token stream does not hand out token values. Instead every stage of a
//! chain reads and writes the same set of attribute instances, held by one
//! [`AttributeSource`]. Each attribute instance is an [`AttributeImpl`] that
//! provides one or more capabilities (marker traits such as
//! [`CharTermAttribute`](crate::analysis::token_attributes::CharTermAttribute)).
//! Registering a capability twice returns the instance that is already there,
//! so a tokenizer and the filters on top of it all mutate the same term
//! buffer.
//!
//! Lookups by capability are resolved once, when a stage is built, into an
//! [`AttrRef`] handle. Per-token access through a handle is a vector index
//! and a downcast.
//!
//! # Examples
//!
//! ```
//! use lexis::analysis::attribute::AttributeSource;
//! use lexis::analysis::token_attributes::{CharTermAttribute, OffsetAttribute};
//!
//! let mut source = AttributeSource::new();
//! let term = source.add_attribute::<dyn CharTermAttribute>().unwrap();
//! let offset = source.add_attribute::<dyn OffsetAttribute>().unwrap();
//!
//! source.get_mut(term).unwrap().append_str("hello");
//! source.get_mut(offset).unwrap().set_offset(0, 5).unwrap();
//!
//! assert_eq!(source.get(term).unwrap().term(), "hello");
//! assert_eq!(
//!     source.reflect_as_string(false),
//!     "term=hello,bytes=[68 65 6c 6c 6f],startOffset=0,endOffset=5"
//! );
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use ahash::AHashMap;

use crate::error::{LexisError, Result};

/// Identity of a capability: the `TypeId` of its `dyn` trait plus a name for messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Capability {
    id: TypeId,
    name: &'static str,
}

impl Capability {
    /// The capability described by the attribute trait `A`.
    pub fn of<A: Attribute + ?Sized>() -> Self {
        Capability {
            id: TypeId::of::<A>(),
            name: A::NAME,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A capability: a `dyn` trait that attribute implementations can provide.
///
/// This is implemented for trait objects such as `dyn CharTermAttribute`, and
/// knows how to view an erased [`AttributeImpl`] as that trait and how to
/// create the default implementation.
pub trait Attribute: 'static {
    /// Capability name used in messages and reflection.
    const NAME: &'static str;

    /// Instantiate the default implementation of this capability.
    fn create_default() -> Box<dyn AttributeImpl>;

    /// View `imp` through this capability, if it provides it.
    fn view(imp: &dyn AttributeImpl) -> Option<&Self>;

    /// Mutable counterpart of [`Attribute::view`].
    fn view_mut(imp: &mut dyn AttributeImpl) -> Option<&mut Self>;
}

/// Object plumbing every attribute implementation gets for free.
///
/// Blanket-implemented for any `AttributeImpl + Clone + PartialEq`.
pub trait AttributeBase: Any + Send + fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Deep copy into a new box.
    fn clone_box(&self) -> Box<dyn AttributeImpl>;

    /// Value equality with another erased implementation of the same type.
    fn eq_dyn(&self, other: &dyn AttributeImpl) -> bool;

    /// Short type name of the implementation, e.g. `OffsetAttributeImpl`.
    fn impl_name(&self) -> &'static str;
}

impl<T: AttributeImpl + Clone + PartialEq> AttributeBase for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn AttributeImpl> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn AttributeImpl) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn impl_name(&self) -> &'static str {
        let full = std::any::type_name::<T>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// A concrete attribute instance stored in an [`AttributeSource`].
pub trait AttributeImpl: AttributeBase {
    /// Capabilities this implementation provides.
    fn capabilities(&self) -> Vec<Capability>;

    /// Reset to the type-specific default.
    fn clear(&mut self);

    /// Set the end-of-stream value. Defaults to [`AttributeImpl::clear`].
    fn end(&mut self) {
        self.clear();
    }

    /// Copy the semantic value into `target`, which must be of the same type.
    fn copy_to(&self, target: &mut dyn AttributeImpl) -> Result<()>;

    /// Report every `(key, value)` pair of this attribute.
    fn reflect(&self, reflector: &mut dyn FnMut(&'static str, String));
}

/// Downcast the target of a `copy_to` call, failing with a capability mismatch.
pub fn downcast_target<'a, T: AttributeImpl>(
    target: &'a mut dyn AttributeImpl,
    expected: &'static str,
) -> Result<&'a mut T> {
    let found = target.impl_name();
    target
        .as_any_mut()
        .downcast_mut::<T>()
        .ok_or_else(|| LexisError::capability_mismatch(expected, found))
}

/// A resolved handle to the instance providing capability `A` in one source.
///
/// Handles are only meaningful for the source that produced them (and for
/// sources cloned from it).
pub struct AttrRef<A: ?Sized> {
    slot: usize,
    _marker: PhantomData<fn() -> *const A>,
}

impl<A: ?Sized> AttrRef<A> {
    fn new(slot: usize) -> Self {
        AttrRef {
            slot,
            _marker: PhantomData,
        }
    }
}

impl<A: ?Sized> Clone for AttrRef<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: ?Sized> Copy for AttrRef<A> {}

impl<A: ?Sized> fmt::Debug for AttrRef<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttrRef").field("slot", &self.slot).finish()
    }
}

/// Creates attribute implementations for an [`AttributeSource`].
pub trait AttributeFactory: Send + Sync + fmt::Debug {
    /// Create the implementation that will provide `capability`.
    ///
    /// `default` builds the standard implementation for that capability.
    fn create_attribute_impl(
        &self,
        capability: Capability,
        default: fn() -> Box<dyn AttributeImpl>,
    ) -> Result<Box<dyn AttributeImpl>>;
}

/// Factory that always uses the default implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultAttributeFactory;

impl AttributeFactory for DefaultAttributeFactory {
    fn create_attribute_impl(
        &self,
        _capability: Capability,
        default: fn() -> Box<dyn AttributeImpl>,
    ) -> Result<Box<dyn AttributeImpl>> {
        Ok(default())
    }
}

/// Snapshot of all attribute values of a source, see [`AttributeSource::capture_state`].
#[derive(Debug)]
pub struct State {
    impls: Vec<Box<dyn AttributeImpl>>,
}

impl Clone for State {
    fn clone(&self) -> Self {
        State {
            impls: self.impls.iter().map(|imp| imp.clone_box()).collect(),
        }
    }
}

/// Registry of the attribute instances shared by one analysis chain.
pub struct AttributeSource {
    impls: Vec<Box<dyn AttributeImpl>>,
    slots: AHashMap<TypeId, usize>,
    factory: Arc<dyn AttributeFactory>,
}

impl AttributeSource {
    /// Create an empty source using the [`DefaultAttributeFactory`].
    pub fn new() -> Self {
        Self::with_factory(Arc::new(DefaultAttributeFactory))
    }

    /// Create an empty source using `factory` for new instances.
    pub fn with_factory(factory: Arc<dyn AttributeFactory>) -> Self {
        AttributeSource {
            impls: Vec::new(),
            slots: AHashMap::new(),
            factory,
        }
    }

    pub fn factory(&self) -> &Arc<dyn AttributeFactory> {
        &self.factory
    }

    /// Register capability `A`, creating its implementation if needed.
    ///
    /// Returns the handle of the existing instance when `A` is already present.
    pub fn add_attribute<A: Attribute + ?Sized>(&mut self) -> Result<AttrRef<A>> {
        let capability = Capability::of::<A>();
        if let Some(&slot) = self.slots.get(&capability.id) {
            return Ok(AttrRef::new(slot));
        }

        let imp = self
            .factory
            .create_attribute_impl(capability, A::create_default)?;
        if A::view(imp.as_ref()).is_none() {
            return Err(LexisError::capability_mismatch(A::NAME, imp.impl_name()));
        }
        self.add_attribute_impl(imp);

        self.attr_ref::<A>().ok_or_else(|| {
            LexisError::invalid_operation(format!("{} was not registered", A::NAME))
        })
    }

    /// Register an explicit implementation.
    ///
    /// The instance is registered under every capability it provides that is
    /// not yet present. If all of them are already present it is dropped.
    pub fn add_attribute_impl(&mut self, imp: Box<dyn AttributeImpl>) {
        let missing: Vec<Capability> = imp
            .capabilities()
            .into_iter()
            .filter(|capability| !self.slots.contains_key(&capability.id))
            .collect();
        if missing.is_empty() {
            return;
        }

        let slot = self.impls.len();
        self.impls.push(imp);
        for capability in missing {
            self.slots.insert(capability.id, slot);
        }
    }

    /// Handle of capability `A`, if registered.
    pub fn attr_ref<A: Attribute + ?Sized>(&self) -> Option<AttrRef<A>> {
        self.slots
            .get(&TypeId::of::<A>())
            .map(|&slot| AttrRef::new(slot))
    }

    pub fn has_attribute<A: Attribute + ?Sized>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<A>())
    }

    /// Check if any attribute is registered.
    pub fn has_attributes(&self) -> bool {
        !self.impls.is_empty()
    }

    /// Resolve a handle.
    pub fn get<A: Attribute + ?Sized>(&self, handle: AttrRef<A>) -> Result<&A> {
        let imp = self.impls.get(handle.slot).ok_or_else(|| {
            LexisError::out_of_range(format!("no attribute in slot {}", handle.slot))
        })?;
        let found = imp.impl_name();
        A::view(imp.as_ref()).ok_or_else(|| LexisError::capability_mismatch(A::NAME, found))
    }

    /// Resolve a handle for mutation.
    pub fn get_mut<A: Attribute + ?Sized>(&mut self, handle: AttrRef<A>) -> Result<&mut A> {
        let imp = self.impls.get_mut(handle.slot).ok_or_else(|| {
            LexisError::out_of_range(format!("no attribute in slot {}", handle.slot))
        })?;
        let found = imp.impl_name();
        A::view_mut(imp.as_mut()).ok_or_else(|| LexisError::capability_mismatch(A::NAME, found))
    }

    /// Look up capability `A` without a handle.
    pub fn attribute<A: Attribute + ?Sized>(&self) -> Option<&A> {
        let slot = *self.slots.get(&TypeId::of::<A>())?;
        A::view(self.impls[slot].as_ref())
    }

    /// Mutable counterpart of [`AttributeSource::attribute`].
    pub fn attribute_mut<A: Attribute + ?Sized>(&mut self) -> Option<&mut A> {
        let slot = *self.slots.get(&TypeId::of::<A>())?;
        A::view_mut(self.impls[slot].as_mut())
    }

    /// Registered implementations in registration order.
    pub fn impls(&self) -> impl Iterator<Item = &dyn AttributeImpl> {
        self.impls.iter().map(|imp| imp.as_ref())
    }

    /// Reset every attribute to its default.
    pub fn clear_attributes(&mut self) {
        for imp in &mut self.impls {
            imp.clear();
        }
    }

    /// Set every attribute to its end-of-stream value.
    pub fn end_attributes(&mut self) {
        for imp in &mut self.impls {
            imp.end();
        }
    }

    /// Snapshot the values of all attributes.
    pub fn capture_state(&self) -> State {
        State {
            impls: self.impls.iter().map(|imp| imp.clone_box()).collect(),
        }
    }

    /// Restore values captured by [`AttributeSource::capture_state`].
    ///
    /// Every captured instance must have a counterpart in this source.
    pub fn restore_state(&mut self, state: &State) -> Result<()> {
        for captured in &state.impls {
            let slot = self.slot_of(captured.as_ref()).ok_or_else(|| {
                LexisError::invalid_argument(format!(
                    "State contains {} which is not in this AttributeSource",
                    captured.impl_name()
                ))
            })?;
            captured.copy_to(self.impls[slot].as_mut())?;
        }
        Ok(())
    }

    /// Copy all values into `target`, which must contain the same implementations.
    pub fn copy_to(&self, target: &mut AttributeSource) -> Result<()> {
        for imp in &self.impls {
            let slot = target.slot_of(imp.as_ref()).ok_or_else(|| {
                LexisError::invalid_argument(format!(
                    "target AttributeSource does not contain {}",
                    imp.impl_name()
                ))
            })?;
            imp.copy_to(target.impls[slot].as_mut())?;
        }
        Ok(())
    }

    /// Deep copy of this source with independent instances and the same factory.
    ///
    /// Handles resolved against this source stay valid for the clone.
    pub fn clone_attributes(&self) -> AttributeSource {
        AttributeSource {
            impls: self.impls.iter().map(|imp| imp.clone_box()).collect(),
            slots: self.slots.clone(),
            factory: Arc::clone(&self.factory),
        }
    }

    /// Render all attribute values as `key=value` pairs separated by commas.
    ///
    /// With `prepend_type` every pair is prefixed with the capability name and `#`.
    pub fn reflect_as_string(&self, prepend_type: bool) -> String {
        let mut out = String::new();
        for imp in &self.impls {
            let prefix = imp
                .capabilities()
                .first()
                .map(|capability| capability.name)
                .unwrap_or_else(|| imp.impl_name());
            imp.reflect(&mut |key, value| {
                if !out.is_empty() {
                    out.push(',');
                }
                if prepend_type {
                    out.push_str(prefix);
                    out.push('#');
                }
                out.push_str(key);
                out.push('=');
                out.push_str(&value);
            });
        }
        out
    }

    fn slot_of(&self, imp: &dyn AttributeImpl) -> Option<usize> {
        imp.capabilities()
            .iter()
            .find_map(|capability| self.slots.get(&capability.id).copied())
    }
}

impl Default for AttributeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for AttributeSource {
    fn eq(&self, other: &Self) -> bool {
        self.impls.len() == other.impls.len()
            && self
                .impls
                .iter()
                .zip(&other.impls)
                .all(|(a, b)| a.eq_dyn(b.as_ref()))
    }
}

impl fmt::Debug for AttributeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSource")
            .field("attributes", &self.reflect_as_string(true))
            .finish()
    }
}
