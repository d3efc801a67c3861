//! Dynamic object runtime for strata.
//!
//! This crate provides:
//! - Type descriptors with single-parent inheritance (`RuntimeType`)
//! - Per-type method tables keyed by interned selectors
//! - Method type signatures and return-ABI classification
//! - The global type registry and dispatch walk
//! - Instance headers (`ObjectHeader`) carrying the type id
//!
//! Dispatch here is resolved per call against live, mutable method tables;
//! nothing about the hierarchy is baked in at compile time. Consumers that
//! patch tables at runtime (the trampoline crate) go through the table API
//! on `RuntimeType` rather than touching storage directly.

#![deny(unsafe_op_in_unsafe_fn)]

pub mod object;
pub mod registry;
pub mod signature;
pub mod type_obj;

// Re-export commonly used items
pub use object::{ObjectHeader, RawImp};
pub use registry::{TypeDefError, TypeRegistry, global_registry};
pub use signature::{
    AggregateLayout, HomogeneousFloat, MethodSignature, ReturnClass, TypeEncoding,
};
pub use type_obj::{MethodEntry, MethodTableError, RuntimeType, TypeId};
