//! Instance headers and raw method implementations.
//!
//! Every instance managed by the runtime starts with an [`ObjectHeader`];
//! dispatch reads the type id out of it to find the receiver's method
//! tables. Instance payloads follow the header in memory, so concrete
//! instance structs are `#[repr(C)]` with the header as their first field.
//!
//! # Implementation calling convention
//!
//! A [`RawImp`] is a type-erased C-ABI function pointer. Every method
//! implementation, whatever its declared signature, receives the receiver
//! (`*mut ObjectHeader`) and the [`Selector`](strata_core::Selector) it was
//! invoked under as its two leading arguments, followed by the method's own
//! arguments. Methods returning aggregates too large for the return
//! registers use the platform's ordinary indirect-return convention (a
//! hidden caller-supplied buffer). Call sites recover the concrete signature
//! from the method's recorded [`MethodSignature`](crate::MethodSignature)
//! before transmuting and invoking the pointer.

use crate::type_obj::TypeId;

/// Type-erased method implementation pointer.
///
/// The pointee follows the implementation calling convention described in
/// the module docs; the unit signature exists only so the pointer has a
/// nameable type. Calling one requires transmuting to the concrete
/// signature first.
pub type RawImp = unsafe extern "C" fn();

/// Leading header of every runtime-managed instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHeader {
    type_id: TypeId,
}

impl ObjectHeader {
    /// Create a header for an instance of the given type.
    #[inline]
    pub const fn new(type_id: TypeId) -> Self {
        Self { type_id }
    }

    /// The instance's type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}
