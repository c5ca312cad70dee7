//! agenda-core library.
//!
//! Answers two questions about a set of timed events: which events overlap a
//! query window, and which events conflict with each other.
//!
//! ## Modules
//!
//! - [`interval`]: interval items and the augmented interval tree.
//! - [`event`]: the event value type with structural equality.
//! - [`conflict`]: eager and tree-backed conflict resolvers.
//! - [`buckets`]: day-bucket index for sectioned presentation.
//! - [`agenda`]: presentation facade tying resolver and buckets together.
//! - [`loader`]: JSON decoding/encoding of event lists.
//! - [`format`]: the textual timestamp formats.
//! - [`config`]: project/user configuration resolution.
//! - [`error`]: error types and machine-readable codes.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums for library errors; `anyhow::Result` at
//!   the configuration edge.
//! - **Logging**: `tracing` macros in the loader and config only. Tree and
//!   resolver code never logs.

pub mod agenda;
pub mod buckets;
pub mod config;
pub mod conflict;
pub mod error;
pub mod event;
pub mod format;
pub mod interval;
pub mod loader;

pub use agenda::Agenda;
pub use buckets::{DayBucket, DayBuckets};
pub use conflict::{ConflictResolver, EagerResolver, Strategy, TreeResolver};
pub use error::{ErrorCode, InvalidInterval, LoadError};
pub use event::Event;
pub use interval::{IntervalItem, IntervalTree, NodeId, NodeShape, TraverseOrder};
