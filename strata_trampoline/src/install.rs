//! Trampoline installation.
//!
//! `install_trampoline` turns a resolution into a method-table write: it
//! rejects occupied slots up front, resolves the ancestor implementation,
//! picks the forwarder matching the resolved return-ABI category, and
//! registers that entry on the target type carrying the resolved signature
//! forward. Either the slot ends up holding a matching forwarder or the
//! table is left exactly as found.

use std::fmt;

use strata_core::Selector;
use strata_runtime::{TypeId, global_registry};

use crate::forwarder::descriptor_for;
use crate::resolve::resolve_super_implementation;

// =============================================================================
// Errors
// =============================================================================

/// Errors from [`install_trampoline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallError {
    /// The target type has no parent in the hierarchy.
    NoSuperClass {
        type_id: TypeId,
        type_name: String,
        selector: Selector,
    },

    /// No ancestor of the target type defines the requested method.
    NoDynamicallyDispatchedMethodAvailable {
        type_id: TypeId,
        type_name: String,
        selector: Selector,
    },

    /// The target type's own table already has an entry for the method, or
    /// the runtime rejected the table write (including a type id it does
    /// not know).
    FailedToAddMethod { type_id: TypeId, selector: Selector },
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuperClass {
                type_name,
                selector,
                ..
            } => {
                write!(f, "no superclass of '{type_name}' to forward '{selector}' to")
            }
            Self::NoDynamicallyDispatchedMethodAvailable {
                type_name,
                selector,
                ..
            } => {
                write!(
                    f,
                    "no dynamically dispatched implementation of '{selector}' \
                     available above '{type_name}'"
                )
            }
            Self::FailedToAddMethod { type_id, selector } => {
                write!(f, "failed to add '{selector}' to {type_id}")
            }
        }
    }
}

impl std::error::Error for InstallError {}

/// Result type for installation.
pub type InstallResult<T> = Result<T, InstallError>;

// =============================================================================
// Installation
// =============================================================================

/// Install a super-call forwarder as `type_id`'s own implementation of
/// `selector`.
///
/// Succeeds only when the type's own slot for `selector` is empty and an
/// ancestor provides an implementation to forward to; the installed entry
/// is the process-wide forwarder matching the ancestor method's return-ABI
/// category, recorded under the ancestor's signature so introspection of
/// the type's method stays accurate. Repeating the call without the host
/// runtime removing the entry fails with
/// [`InstallError::FailedToAddMethod`]; this subsystem never overwrites or
/// removes.
///
/// Concurrent installs on the same (type, selector) pair serialize on the
/// final table write: exactly one succeeds.
pub fn install_trampoline(type_id: TypeId, selector: Selector) -> InstallResult<()> {
    let registry = global_registry();
    let Some(ty) = registry.get(type_id) else {
        return Err(InstallError::FailedToAddMethod { type_id, selector });
    };

    // Occupied slots are rejected before any resolution work; the installer
    // never overwrites, whatever the slot holds.
    if ty.defines_directly(selector) {
        tracing::trace!(%selector, ty = ty.name(), "install rejected: slot occupied");
        return Err(InstallError::FailedToAddMethod { type_id, selector });
    }

    let resolved = resolve_super_implementation(registry, &ty, selector)?;
    let descriptor = descriptor_for(resolved.entry.signature.return_class());

    // SAFETY: the forwarder entry redirects a call unchanged into an
    // implementation registered under this same selector and signature, so
    // the signature recorded here stays accurate for the installed pointer.
    unsafe { ty.add_method(selector, descriptor.entry, resolved.entry.signature.clone()) }
        .map_err(|_| InstallError::FailedToAddMethod { type_id, selector })?;

    tracing::debug!(
        %selector,
        ty = ty.name(),
        forwards_to = %resolved.defining_type,
        return_class = ?descriptor.return_class,
        "installed super-call trampoline"
    );
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
