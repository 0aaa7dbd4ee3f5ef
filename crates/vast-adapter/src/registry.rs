//! View holder registry.
//!
//! Maps each [`TypeKey`] to the pair of host callbacks that create
//! (`inflate`) and fill (`bind`) a holder for rows of that type. The
//! registry is assembled once through [`HolderRegistryBuilder`] and is
//! immutable once handed to the adapter.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unregistered key | Row type never registered | [`resolve`](HolderRegistry::resolve) panics; [`try_resolve`](HolderRegistry::try_resolve) returns `UnregisteredType` |
//! | Duplicate key | Same key registered twice | Last registration wins (logged) |

use ahash::AHashMap;

use crate::error::AdapterError;
use crate::type_key::TypeKey;

type InflateFn<H> = Box<dyn Fn(&TypeKey) -> H>;
type BindFn<T, H> = Box<dyn Fn(&mut H, &T, usize)>;

/// Inflate and bind callbacks for one view type.
pub struct HolderBinding<T, H> {
    inflate: InflateFn<H>,
    bind: BindFn<T, H>,
}

impl<T, H> HolderBinding<T, H> {
    /// Create a fresh holder for `key`.
    pub fn inflate(&self, key: &TypeKey) -> H {
        (self.inflate)(key)
    }

    /// Fill `holder` with `item`, displayed at `position`.
    pub fn bind(&self, holder: &mut H, item: &T, position: usize) {
        (self.bind)(holder, item, position);
    }
}

impl<T, H> std::fmt::Debug for HolderBinding<T, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolderBinding").finish_non_exhaustive()
    }
}

/// Immutable `TypeKey -> HolderBinding` table.
pub struct HolderRegistry<T, H> {
    bindings: AHashMap<TypeKey, HolderBinding<T, H>>,
}

impl<T, H> std::fmt::Debug for HolderRegistry<T, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.bindings.keys().collect();
        keys.sort();
        f.debug_struct("HolderRegistry")
            .field("keys", &keys)
            .finish()
    }
}

impl<T, H> HolderRegistry<T, H> {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> HolderRegistryBuilder<T, H> {
        HolderRegistryBuilder {
            bindings: AHashMap::new(),
        }
    }

    /// Look up the binding for `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` was never registered. An unknown view type is a
    /// configuration error, not a runtime condition.
    #[must_use]
    pub fn resolve(&self, key: &TypeKey) -> &HolderBinding<T, H> {
        match self.try_resolve(key) {
            Ok(binding) => binding,
            Err(err) => panic!("{err}"),
        }
    }

    /// Look up the binding for `key`, reporting unknown keys as an error.
    pub fn try_resolve(&self, key: &TypeKey) -> Result<&HolderBinding<T, H>, AdapterError> {
        self.bindings
            .get(key)
            .ok_or_else(|| AdapterError::UnregisteredType(key.clone()))
    }

    #[must_use]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.bindings.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Registered keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.bindings.keys()
    }
}

/// Builder for [`HolderRegistry`].
pub struct HolderRegistryBuilder<T, H> {
    bindings: AHashMap<TypeKey, HolderBinding<T, H>>,
}

impl<T, H> HolderRegistryBuilder<T, H> {
    /// Register the inflate/bind pair for `key`.
    #[must_use]
    pub fn register(
        mut self,
        key: impl Into<TypeKey>,
        inflate: impl Fn(&TypeKey) -> H + 'static,
        bind: impl Fn(&mut H, &T, usize) + 'static,
    ) -> Self {
        let key = key.into();
        let binding = HolderBinding {
            inflate: Box::new(inflate),
            bind: Box::new(bind),
        };
        if self.bindings.insert(key.clone(), binding).is_some() {
            tracing::warn!(%key, "holder binding registered twice; keeping the last one");
        }
        self
    }

    /// Register a key whose rows only need inflating, e.g. an empty view or
    /// a divider.
    #[must_use]
    pub fn register_static(
        self,
        key: impl Into<TypeKey>,
        inflate: impl Fn(&TypeKey) -> H + 'static,
    ) -> Self {
        self.register(key, inflate, |_, _, _| {})
    }

    #[must_use]
    pub fn build(self) -> HolderRegistry<T, H> {
        HolderRegistry {
            bindings: self.bindings,
        }
    }
}
