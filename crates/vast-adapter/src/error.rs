//! Adapter errors.
//!
//! Most misuse of the adapter is a programming defect and panics at the
//! call site (see the `# Panics` sections on [`ListAdapter`]). The `try_*`
//! variants and the manual mutation methods report the same conditions as
//! an [`AdapterError`] instead.
//!
//! [`ListAdapter`]: crate::ListAdapter

use crate::type_key::TypeKey;

/// Errors from adapter operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// A row's type key has no registered holder binding.
    UnregisteredType(TypeKey),
    /// A position outside the current snapshot.
    OutOfBounds { position: usize, len: usize },
    /// A background diff is in flight; manual edits would race it.
    Busy { pending: usize },
}

impl std::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnregisteredType(key) => {
                write!(f, "no holder binding registered for type key '{key}'")
            }
            Self::OutOfBounds { position, len } => {
                write!(f, "position {position} out of bounds for {len} rows")
            }
            Self::Busy { pending } => {
                write!(f, "{pending} list submission(s) still pending")
            }
        }
    }
}

impl std::error::Error for AdapterError {}
