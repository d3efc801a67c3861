//! Architecture-native forwarding entry points.
//!
//! One module per supported instruction set, each exporting the same two
//! naked functions:
//!
//! - `forward_scalar` — entry for methods whose return value travels in
//!   the standard return register(s).
//! - `forward_aggregate` — entry for methods whose return value is
//!   constructed into a caller-supplied buffer.
//!
//! Both preserve every argument-carrying register across a call to
//! [`resolve_forward_target`](crate::forwarder::resolve_forward_target),
//! then tail-jump to the implementation it returns with the stack pointer
//! restored to its entry value, so the target observes the original call
//! exactly. A hand-written thunk for an architecture we have not verified
//! would forward garbage, so any other target is rejected at build time.

#[cfg(target_arch = "x86_64")]
mod x86_64;
#[cfg(target_arch = "x86_64")]
pub(crate) use x86_64::{forward_aggregate, forward_scalar};

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "aarch64")]
pub(crate) use aarch64::{forward_aggregate, forward_scalar};

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
compile_error!(
    "strata_trampoline supports only x86_64 (System V) and aarch64; \
     forwarding thunks for this architecture do not exist"
);

// The x86_64 thunks follow the System V AMD64 register assignment. The
// Microsoft convention differs in every argument register, so a Windows
// build would link thunks that scramble the arguments.
#[cfg(all(target_arch = "x86_64", target_os = "windows"))]
compile_error!(
    "strata_trampoline's x86_64 thunks implement the System V calling \
     convention and are wrong under the Windows ABI"
);
