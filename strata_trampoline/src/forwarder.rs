//! Fixed forwarding entry points and call-time target resolution.
//!
//! The two forwarder addresses are process-wide constants: every
//! installation of either return-ABI category shares the same machine
//! entry point. That is why the thunks carry no per-installation state and
//! resolve their target on every call — from the receiver's type, walking
//! toward the root and skipping any slot that holds a forwarder entry
//! itself, so stacked installations fall through to the nearest real
//! implementation. The walk takes only registry and table read locks; the
//! entries are reentrant and safe to invoke from any number of threads.

use std::fmt;
use std::ptr;

use strata_core::Selector;
use strata_runtime::{ObjectHeader, RawImp, ReturnClass, TypeId, global_registry};

use crate::arch;

// =============================================================================
// Forwarder Descriptors
// =============================================================================

/// One of the two process-wide forwarding entry points, tagged with the
/// return-ABI category it serves.
#[derive(Clone, Copy)]
pub struct ForwarderDescriptor {
    /// The fixed machine entry point.
    pub entry: RawImp,
    /// The return-ABI category this entry forwards correctly.
    pub return_class: ReturnClass,
}

impl fmt::Debug for ForwarderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwarderDescriptor")
            .field("entry", &(self.entry as usize as *const ()))
            .field("return_class", &self.return_class)
            .finish()
    }
}

/// Entry for methods returning in the standard return register(s).
static SCALAR_FORWARDER: ForwarderDescriptor = ForwarderDescriptor {
    entry: arch::forward_scalar,
    return_class: ReturnClass::ScalarRegister,
};

/// Entry for methods returning through a caller-supplied buffer.
static AGGREGATE_FORWARDER: ForwarderDescriptor = ForwarderDescriptor {
    entry: arch::forward_aggregate,
    return_class: ReturnClass::AggregateIndirect,
};

/// The two forwarder singletons.
pub fn forwarders() -> [&'static ForwarderDescriptor; 2] {
    [&SCALAR_FORWARDER, &AGGREGATE_FORWARDER]
}

/// The forwarder serving the given return-ABI category.
pub(crate) fn descriptor_for(return_class: ReturnClass) -> &'static ForwarderDescriptor {
    match return_class {
        ReturnClass::ScalarRegister => &SCALAR_FORWARDER,
        ReturnClass::AggregateIndirect => &AGGREGATE_FORWARDER,
    }
}

/// Whether `imp` is one of the two forwarder entry points.
pub(crate) fn is_forwarder_entry(imp: RawImp) -> bool {
    ptr::fn_addr_eq(imp, SCALAR_FORWARDER.entry) || ptr::fn_addr_eq(imp, AGGREGATE_FORWARDER.entry)
}

// =============================================================================
// Call-Time Resolution
// =============================================================================

/// Resolve the implementation an in-flight forwarded call should land in.
///
/// Called from the naked entries with the original receiver and selector;
/// the returned pointer is tail-jumped to with all argument registers
/// restored. A call that cannot be forwarded anywhere is unrecoverable at
/// this point — the argument and return types are opaque, so there is no
/// error value to materialize — and aborts the process with a diagnostic.
///
/// # Safety
///
/// `receiver` must be a valid instance pointer whose header names a
/// registered type, as is the case for any dispatch that reached an
/// installed forwarder.
pub(crate) unsafe extern "C" fn resolve_forward_target(
    receiver: *mut ObjectHeader,
    selector: Selector,
) -> RawImp {
    if receiver.is_null() {
        missing_target(None, selector);
    }
    let type_id = unsafe { (*receiver).type_id() };
    match forward_target(type_id, selector) {
        Some(imp) => imp,
        None => missing_target(Some(type_id), selector),
    }
}

/// Nearest non-forwarder implementation of `selector` at or above `start`.
///
/// Starts at the receiver's own type: dispatch only reaches a forwarder
/// through a slot at or below the installation site, so every forwarder
/// entry on the way up is skipped and the first real implementation is
/// exactly the one the installation forwards to.
fn forward_target(start: TypeId, selector: Selector) -> Option<RawImp> {
    let registry = global_registry();
    let mut cursor = Some(start);
    while let Some(type_id) = cursor {
        let ty = registry.get(type_id)?;
        if let Some(entry) = ty.own_method(selector) {
            if !is_forwarder_entry(entry.imp) {
                tracing::trace!(%selector, receiver_type = %start, target_type = %type_id, "forwarding to ancestor implementation");
                return Some(entry.imp);
            }
        }
        cursor = ty.parent();
    }
    None
}

fn missing_target(type_id: Option<TypeId>, selector: Selector) -> ! {
    match type_id {
        Some(type_id) => eprintln!(
            "strata_trampoline: no forwardable implementation of '{selector}' \
             remains above {type_id}; aborting"
        ),
        None => eprintln!(
            "strata_trampoline: forwarded call to '{selector}' with null receiver; aborting"
        ),
    }
    std::process::abort()
}

// =============================================================================
// Tests
// =============================================================================
