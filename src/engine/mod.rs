//! The resource-generation engine.
//!
//! Takes a validated [`EngineConfig`](crate::config::EngineConfig), renders
//! each well-known resource's wire format, enforces the safe-write-target
//! policy, and idempotently links generated files into the public root.
//!
//! - [`resolver`] - reference resolution against the public root
//! - [`safety`] - write-target policy
//! - [`expiry`] - `security.txt` expiry resolution
//! - [`render`] - per-resource body renderers
//! - [`alias`] - public-root symlink publishing
//! - [`pipeline`] - per-resource orchestration and the `publish_all` entry
//!
//! The engine is synchronous, shares no mutable state across resources,
//! and emits no logging; progress reporting belongs to the caller.

pub mod alias;
pub mod error;
pub mod expiry;
pub mod pipeline;
pub mod render;
pub mod resolver;
pub mod safety;

pub use alias::{AliasLinker, AliasSlot};
pub use error::{Error, Result};
pub use pipeline::{GeneratedResource, Outcome, PublishReport, Publisher, ResourceKind};
pub use resolver::{PathResolver, Resolved};
pub use safety::SafetyGuard;
