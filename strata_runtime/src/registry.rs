//! Type registry: id allocation, definition, lookup, and dispatch walk.
//!
//! Holds references to all defined types. The registry is the only owner of
//! [`RuntimeType`] values; everything else holds `TypeId`s and borrows
//! through [`TypeRegistry::get`].

use crate::type_obj::{MethodEntry, RuntimeType, TypeId};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};
use strata_core::Selector;

// =============================================================================
// Errors
// =============================================================================

/// Errors from type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDefError {
    /// The named parent is not registered.
    UnknownParent { parent: TypeId },
}

impl fmt::Display for TypeDefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownParent { parent } => {
                write!(f, "unknown parent {parent}")
            }
        }
    }
}

impl std::error::Error for TypeDefError {}

// =============================================================================
// Type Registry
// =============================================================================

/// Registry of all defined runtime types.
pub struct TypeRegistry {
    /// Map from TypeId to type descriptor.
    types: RwLock<FxHashMap<TypeId, Arc<RuntimeType>>>,
    /// Counter for generating new TypeIds.
    next_id: AtomicU32,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            types: RwLock::new(FxHashMap::default()),
            next_id: AtomicU32::new(1),
        }
    }

    /// Define a new type under an optional parent.
    ///
    /// Allocates a fresh [`TypeId`], registers the descriptor, and returns
    /// it. Fails if `parent` names a type this registry does not know.
    pub fn define_type(
        &self,
        name: &str,
        parent: Option<TypeId>,
    ) -> Result<Arc<RuntimeType>, TypeDefError> {
        if let Some(parent_id) = parent {
            if !self.contains(parent_id) {
                return Err(TypeDefError::UnknownParent { parent: parent_id });
            }
        }

        let type_id = TypeId::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed));
        let ty = Arc::new(RuntimeType::new(name, type_id, parent));
        self.types.write().insert(type_id, ty.clone());
        tracing::trace!(name, %type_id, parent = ?parent, "defined type");
        Ok(ty)
    }

    /// Look up a type by id.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<Arc<RuntimeType>> {
        self.types.read().get(&type_id).cloned()
    }

    /// Whether a type is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.types.read().contains_key(&type_id)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatch walk: the entry invoked for `selector` on an instance of
    /// `type_id`, found on the type itself or the nearest ancestor defining
    /// it.
    pub fn lookup_implementation(
        &self,
        type_id: TypeId,
        selector: Selector,
    ) -> Option<MethodEntry> {
        let mut cursor = Some(type_id);
        while let Some(current) = cursor {
            let ty = self.get(current)?;
            if let Some(entry) = ty.own_method(selector) {
                return Some(entry);
            }
            cursor = ty.parent();
        }
        None
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Global Registry Access
// =============================================================================

/// Global type registry singleton.
static GLOBAL_REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();

/// Get the global type registry.
pub fn global_registry() -> &'static TypeRegistry {
    GLOBAL_REGISTRY.get_or_init(TypeRegistry::new)
}

// =============================================================================
// Tests
// =============================================================================
