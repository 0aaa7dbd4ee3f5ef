#![forbid(unsafe_code)]

//! Polymorphic list adapter core.
//!
//! `vast-adapter` maps a heterogeneous, ordered sequence of items onto
//! host-side view holders. A host UI (a `RecyclerView`-style list, a TUI list
//! widget, a virtualized grid) supplies the holder type and a notification
//! sink; the adapter owns the displayed snapshot, diffs successive
//! submissions into a minimal edit script, and routes row interactions to
//! listeners.
//!
//! # Modules
//!
//! - [`type_key`]: discriminator selecting a view-binding strategy.
//! - [`item`]: [`ItemWrapper`], the uniform envelope around one row.
//! - [`diff`]: comparators, the Myers engine and [`EditScript`].
//! - [`registry`]: [`HolderRegistry`], `TypeKey -> (inflate, bind)`.
//! - [`events`]: listener table and click dispatch.
//! - [`adapter`]: [`ListAdapter`], which ties everything together.
//! - [`config`]: [`AdapterConfig`].
//!
//! # Example
//!
//! ```
//! use vast_adapter::{HolderRegistry, KeyDiff, ListAdapter};
//!
//! #[derive(Clone, PartialEq)]
//! struct Person { id: u32, name: String }
//!
//! let registry = HolderRegistry::builder()
//!     .register("person", |_| String::new(), |holder: &mut String, p: &Person, _| {
//!         holder.clone_from(&p.name);
//!     })
//!     .build();
//!
//! let mut adapter = ListAdapter::builder(registry, KeyDiff::new(|p: &Person| p.id))
//!     .type_key_of(|_| "person".into())
//!     .build();
//!
//! adapter.submit_list(vec![
//!     Person { id: 1, name: "Ada".into() },
//!     Person { id: 2, name: "Grace".into() },
//! ]);
//! assert_eq!(adapter.item_count(), 2);
//!
//! let mut holder = adapter.create_view_holder(&adapter.item_type_key(1));
//! adapter.bind_view_holder(1, &mut holder);
//! assert_eq!(holder, "Grace");
//! ```

pub mod adapter;
pub mod config;
pub mod diff;
pub mod error;
pub mod events;
pub mod item;
pub mod registry;
pub mod type_key;
mod worker;

pub use adapter::{ListAdapter, ListAdapterBuilder, Snapshot, SubmitReceipt, Ticket};
pub use config::AdapterConfig;
pub use diff::{
    DiffResult, EditOp, EditScript, EqDiff, FnDiff, ItemDiff, KeyDiff, ListUpdateSink, NoopSink,
    PtrDiff, WrapperComparator, calculate_diff,
};
pub use error::AdapterError;
pub use events::{ChildId, ClickId, ItemEvent, ListenerTable, LongClickId};
pub use item::ItemWrapper;
pub use registry::{HolderBinding, HolderRegistry, HolderRegistryBuilder};
pub use type_key::TypeKey;
