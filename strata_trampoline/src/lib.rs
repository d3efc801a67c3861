//! Runtime-synthesized super-call trampolines.
//!
//! Installs, on a live [`RuntimeType`](strata_runtime::RuntimeType), a
//! method implementation that does nothing but forward an invocation
//! unchanged to the nearest ancestor's implementation of the same method —
//! the runtime equivalent of writing
//!
//! ```text
//! fn draw(&self) { super.draw() }
//! ```
//!
//! without that override existing anywhere in source. The installed entry
//! is one of two process-wide machine entry points (one per return-ABI
//! category); it preserves every argument register, resolves the ancestor
//! implementation dynamically, and tail-jumps into it, so the forwarded
//! call is observationally identical to invoking the ancestor directly —
//! whatever the method's argument and return types.
//!
//! Three operations:
//! - [`install_trampoline`] — resolve and register a forwarder into an
//!   empty slot, all-or-nothing.
//! - [`is_trampoline`] — pointer-identity check: is the entry installed
//!   directly on a type one of ours?
//! - [`forwarders`] — the two fixed entry descriptors.
//!
//! Supported targets: x86_64 (System V) and aarch64; anything else fails
//! to build (see `arch`).

#![deny(unsafe_op_in_unsafe_fn)]

mod arch;
mod forwarder;
mod install;
mod resolve;

pub use forwarder::{ForwarderDescriptor, forwarders};
pub use install::{InstallError, InstallResult, install_trampoline};

use strata_core::Selector;
use strata_runtime::{TypeId, global_registry};

/// Whether the implementation installed directly on `type_id` for
/// `selector` is one of the two forwarding entry points.
///
/// Reads only the type's own table — an inherited trampoline does not make
/// the subtype's slot a trampoline. Never fails: unknown types, unknown
/// selectors, empty slots, and foreign forwarding implementations all
/// yield `false`.
pub fn is_trampoline(type_id: TypeId, selector: Selector) -> bool {
    global_registry()
        .get(type_id)
        .and_then(|ty| ty.own_method(selector))
        .is_some_and(|entry| forwarder::is_forwarder_entry(entry.imp))
}
