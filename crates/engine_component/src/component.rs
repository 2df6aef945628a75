//! Core [`Component`] trait and its type identity.
//!
//! Every piece of data attached to an entity implements [`Component`]. A
//! component identifies itself by a **type tag** string (e.g.
//! `"SpaceComponent"`); the tag is the key under which an entity stores at
//! most one instance of that component.
//!
//! ## Type Identity
//!
//! [`ComponentTypeId`] is derived from the tag using the FNV-1a 64-bit hash.
//! It is deterministic across runs and builds, so ids can be logged and
//! compared between processes without a registration step.

use std::any::Any;

/// A unique identifier for a component type, derived from its type tag
/// using the FNV-1a 64-bit hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentTypeId`] for a type tag.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`ComponentTypeId`] for a Rust component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        T::component_type_id()
    }
}

impl std::fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// The core component trait.
///
/// Components are plain data records owned by exactly one entity. They must
/// be `Send + Sync + 'static` so a world can be built on one thread and
/// handed to the update thread before the frame loop starts.
///
/// # Examples
///
/// ```rust
/// use engine_component::Component;
///
/// #[derive(Debug, Clone)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: Any + Send + Sync {
    /// The type tag of this component.
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Returns the [`ComponentTypeId`] for this component.
    ///
    /// The default implementation hashes [`Component::type_name()`] with
    /// FNV-1a 64-bit.
    fn component_type_id() -> ComponentTypeId
    where
        Self: Sized,
    {
        ComponentTypeId::from_name(Self::type_name())
    }
}
