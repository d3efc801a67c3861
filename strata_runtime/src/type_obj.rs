//! Runtime type descriptors and per-type method tables.
//!
//! A [`RuntimeType`] is a node in a single-parent inheritance graph: an
//! identity, an optional parent reference, and a mutable selector→entry
//! table. The table maps each selector to the implementation the type
//! defines *itself*; inherited behavior comes from the dispatch walk in
//! [`registry`](crate::registry), never from copied-down entries.
//!
//! Table mutation is guarded by a per-type read-write lock, and
//! [`RuntimeType::add_method`] is insert-if-vacant under the write lock:
//! of two racing registrations for one selector, exactly one lands and the
//! other observes [`MethodTableError::SlotOccupied`]. Callers that need
//! check-then-install semantics rely on that final write being the
//! serialization point.

use crate::object::RawImp;
use crate::signature::MethodSignature;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use strata_core::Selector;

// =============================================================================
// Type Id
// =============================================================================

/// Identity of a runtime type, allocated by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// Construct from a raw id.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw id value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

// =============================================================================
// Method Entries
// =============================================================================

/// One slot of a method table: the implementation pointer and the type
/// signature recorded for introspection.
#[derive(Debug, Clone)]
pub struct MethodEntry {
    pub imp: RawImp,
    pub signature: MethodSignature,
}

/// Errors from method-table mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodTableError {
    /// The selector already has an entry in this type's own table.
    SlotOccupied,
}

impl fmt::Display for MethodTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlotOccupied => write!(f, "method slot already occupied"),
        }
    }
}

impl std::error::Error for MethodTableError {}

// =============================================================================
// Runtime Type
// =============================================================================

/// A type descriptor: name, parent link, and the type's own method table.
///
/// # Thread Safety
///
/// The method table uses a read-write lock for safe concurrent access.
/// Name, identity, and parent are immutable after construction.
pub struct RuntimeType {
    name: Box<str>,
    type_id: TypeId,
    parent: Option<TypeId>,
    methods: RwLock<FxHashMap<Selector, MethodEntry>>,
}

impl RuntimeType {
    pub(crate) fn new(name: &str, type_id: TypeId, parent: Option<TypeId>) -> Self {
        Self {
            name: name.into(),
            type_id,
            parent,
            methods: RwLock::new(FxHashMap::default()),
        }
    }

    /// The type's name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type's identity.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The parent type, if any.
    #[inline]
    pub fn parent(&self) -> Option<TypeId> {
        self.parent
    }

    /// Whether this type is a hierarchy root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    // =========================================================================
    // Method Table
    // =========================================================================

    /// The entry this type defines itself for `selector`, if any.
    /// Inherited implementations are not consulted.
    #[inline]
    pub fn own_method(&self, selector: Selector) -> Option<MethodEntry> {
        self.methods.read().get(&selector).cloned()
    }

    /// Whether this type's own table has an entry for `selector`.
    #[inline]
    pub fn defines_directly(&self, selector: Selector) -> bool {
        self.methods.read().contains_key(&selector)
    }

    /// Register an implementation for `selector` on this type, recording
    /// `signature` for later introspection.
    ///
    /// Insert-if-vacant: fails with [`MethodTableError::SlotOccupied`] if
    /// the slot is non-empty, leaving the table untouched. The check and
    /// the write happen under one write-lock acquisition.
    ///
    /// # Safety
    ///
    /// `imp` must follow the implementation calling convention described in
    /// [`object`](crate::object), and `signature` must describe `imp`'s
    /// actual argument and return types; dispatch trusts the recorded
    /// signature when the pointer is later transmuted and invoked.
    pub unsafe fn add_method(
        &self,
        selector: Selector,
        imp: RawImp,
        signature: MethodSignature,
    ) -> Result<(), MethodTableError> {
        let mut methods = self.methods.write();
        match methods.entry(selector) {
            std::collections::hash_map::Entry::Occupied(_) => Err(MethodTableError::SlotOccupied),
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(MethodEntry { imp, signature });
                Ok(())
            }
        }
    }

    /// Remove this type's own entry for `selector`, returning it.
    ///
    /// This is the host-side unregistration path; after removal the slot is
    /// empty again and a fresh registration may succeed.
    pub fn remove_method(&self, selector: Selector) -> Option<MethodEntry> {
        self.methods.write().remove(&selector)
    }

    /// Number of methods this type defines itself.
    pub fn method_count(&self) -> usize {
        self.methods.read().len()
    }

    /// Selectors this type defines itself.
    pub fn selectors(&self) -> Vec<Selector> {
        self.methods.read().keys().copied().collect()
    }
}

impl fmt::Debug for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeType")
            .field("name", &self.name)
            .field("type_id", &self.type_id)
            .field("parent", &self.parent)
            .field("methods", &self.method_count())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
