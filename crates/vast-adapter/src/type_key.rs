//! View type discriminator.
//!
//! A [`TypeKey`] selects which inflate/bind pair in the
//! [`HolderRegistry`](crate::HolderRegistry) applies to a row. It must be
//! stable for a given logical item class: the diff engine also treats rows
//! with different keys as different items.

use core::fmt;
use std::sync::Arc;

/// String or integer discriminator for a row's view type.
///
/// Names are stored as `Arc<str>` so cloning a key (done once per query from
/// the host) never allocates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TypeKey {
    /// Integer key, e.g. a layout resource id.
    Id(u32),
    /// Named key, e.g. `"person"`.
    Name(Arc<str>),
}

impl TypeKey {
    /// Create a named key.
    #[must_use]
    pub fn name(name: impl AsRef<str>) -> Self {
        Self::Name(Arc::from(name.as_ref()))
    }

    /// Create an integer key.
    #[must_use]
    pub const fn id(id: u32) -> Self {
        Self::Id(id)
    }

    /// The integer value, if this is an `Id` key.
    #[must_use]
    pub fn as_id(&self) -> Option<u32> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Name(_) => None,
        }
    }

    /// The name, if this is a `Name` key.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Name(name) => Some(name),
        }
    }
}

impl From<u32> for TypeKey {
    fn from(id: u32) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self::Name(Arc::from(name))
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(TypeKey::from(7u32), TypeKey::Id(7));
        assert_eq!(TypeKey::from("row"), TypeKey::name("row"));
        assert_eq!(TypeKey::from(String::from("row")), TypeKey::name("row"));
    }

    #[test]
    fn id_and_name_never_collide() {
        assert_ne!(TypeKey::from(1u32), TypeKey::from("1"));
    }

    #[test]
    fn accessors() {
        assert_eq!(TypeKey::id(3).as_id(), Some(3));
        assert_eq!(TypeKey::id(3).as_name(), None);
        assert_eq!(TypeKey::name("x").as_name(), Some("x"));
        assert_eq!(TypeKey::name("x").as_id(), None);
    }

    #[test]
    fn display() {
        assert_eq!(TypeKey::id(42).to_string(), "#42");
        assert_eq!(TypeKey::name("person").to_string(), "person");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_untagged() {
        let keys: Vec<TypeKey> = serde_json::from_str(r#"[5, "card"]"#).unwrap();
        assert_eq!(keys, vec![TypeKey::id(5), TypeKey::name("card")]);
    }
}
