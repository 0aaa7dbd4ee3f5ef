#![forbid(unsafe_code)]

//! Test harness for `vast-adapter`.
//!
//! - [`sinks`]: a [`RecordingSink`] that keeps every notification and a
//!   [`MirrorSink`] that replays them against a model of the host list,
//!   flagging out-of-range ops.
//! - [`fixtures`]: a two-type feed (people and pictures) with a ready
//!   registry, plus helpers that render an adapter through its bindings.
//! - [`strategies`]: `proptest` strategies for keyed lists and mixed feeds.

pub mod fixtures;
pub mod sinks;
pub mod strategies;

pub use fixtures::{Feed, Person, Picture, feed_adapter, feed_key, feed_registry, render};
pub use sinks::{MirrorRow, MirrorSink, RecordingSink};
pub use strategies::{Keyed, feed_rows, keyed_adapter, keyed_rows, wrap_keyed};
