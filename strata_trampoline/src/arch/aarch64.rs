//! AAPCS64 forwarding thunks.
//!
//! Argument registers on entry: `x0-x7` and `q0-q7`, with further
//! arguments spilled at `sp`. An aggregate-indirect return travels in `x8`
//! rather than displacing the argument list, so receiver and selector sit
//! in `x0`/`x1` for both entries and the aggregate entry only needs to keep
//! `x8` alive across the resolver call. The tail jump goes through `x16`,
//! an intra-procedure-call scratch register no argument uses, with `sp`
//! restored to its entry value so spilled arguments line up for the target.

use core::arch::naked_asm;

use crate::forwarder::resolve_forward_target;

/// Forwarding entry for scalar-register returns.
#[unsafe(naked)]
pub(crate) unsafe extern "C" fn forward_scalar() {
    naked_asm!(
        "stp x29, x30, [sp, #-16]!",
        "mov x29, sp",
        "sub sp, sp, #192",
        "stp q0, q1, [sp]",
        "stp q2, q3, [sp, #32]",
        "stp q4, q5, [sp, #64]",
        "stp q6, q7, [sp, #96]",
        "stp x0, x1, [sp, #128]",
        "stp x2, x3, [sp, #144]",
        "stp x4, x5, [sp, #160]",
        "stp x6, x7, [sp, #176]",
        "bl {resolve}",
        "mov x16, x0",
        "ldp x6, x7, [sp, #176]",
        "ldp x4, x5, [sp, #160]",
        "ldp x2, x3, [sp, #144]",
        "ldp x0, x1, [sp, #128]",
        "ldp q6, q7, [sp, #96]",
        "ldp q4, q5, [sp, #64]",
        "ldp q2, q3, [sp, #32]",
        "ldp q0, q1, [sp]",
        "mov sp, x29",
        "ldp x29, x30, [sp], #16",
        "br x16",
        resolve = sym resolve_forward_target,
    )
}

/// Forwarding entry for aggregate-indirect returns.
///
/// Identical choreography plus an `x8` save slot: the indirect-result
/// pointer is caller-saved state the resolver is free to clobber, and the
/// target must still find it in `x8`.
#[unsafe(naked)]
pub(crate) unsafe extern "C" fn forward_aggregate() {
    naked_asm!(
        "stp x29, x30, [sp, #-16]!",
        "mov x29, sp",
        "sub sp, sp, #208",
        "stp q0, q1, [sp]",
        "stp q2, q3, [sp, #32]",
        "stp q4, q5, [sp, #64]",
        "stp q6, q7, [sp, #96]",
        "stp x0, x1, [sp, #128]",
        "stp x2, x3, [sp, #144]",
        "stp x4, x5, [sp, #160]",
        "stp x6, x7, [sp, #176]",
        "str x8, [sp, #192]",
        "bl {resolve}",
        "mov x16, x0",
        "ldr x8, [sp, #192]",
        "ldp x6, x7, [sp, #176]",
        "ldp x4, x5, [sp, #160]",
        "ldp x2, x3, [sp, #144]",
        "ldp x0, x1, [sp, #128]",
        "ldp q6, q7, [sp, #96]",
        "ldp q4, q5, [sp, #64]",
        "ldp q2, q3, [sp, #32]",
        "ldp q0, q1, [sp]",
        "mov sp, x29",
        "ldp x29, x30, [sp], #16",
        "br x16",
        resolve = sym resolve_forward_target,
    )
}
