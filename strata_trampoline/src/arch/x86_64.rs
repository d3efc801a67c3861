//! System V AMD64 forwarding thunks.
//!
//! Argument registers on entry: `rdi, rsi, rdx, rcx, r8, r9` and
//! `xmm0-xmm7`, with `al` carrying the vector-register count for variadic
//! callees and further arguments spilled above the return address. The
//! thunks save every one of those registers, resolve the forward target,
//! restore them, and tail-jump through `r11` — a scratch register the
//! argument ABI leaves free — with `rsp` back at its entry value, so the
//! target sees register state and stack layout identical to a direct call.
//!
//! Frame math: the return address leaves `rsp ≡ 8 (mod 16)` at entry;
//! `push rbp` re-aligns it and the 192-byte spill area keeps it aligned, so
//! `movaps` stores and the resolver call are both legal.

use core::arch::naked_asm;

use crate::forwarder::resolve_forward_target;

/// Forwarding entry for scalar-register returns.
///
/// Receiver in `rdi`, selector in `rsi` — already the resolver's argument
/// registers, so no shuffling before the call.
#[unsafe(naked)]
pub(crate) unsafe extern "C" fn forward_scalar() {
    naked_asm!(
        "push rbp",
        "mov rbp, rsp",
        "sub rsp, 192",
        "movaps xmmword ptr [rsp], xmm0",
        "movaps xmmword ptr [rsp + 16], xmm1",
        "movaps xmmword ptr [rsp + 32], xmm2",
        "movaps xmmword ptr [rsp + 48], xmm3",
        "movaps xmmword ptr [rsp + 64], xmm4",
        "movaps xmmword ptr [rsp + 80], xmm5",
        "movaps xmmword ptr [rsp + 96], xmm6",
        "movaps xmmword ptr [rsp + 112], xmm7",
        "mov qword ptr [rsp + 128], rdi",
        "mov qword ptr [rsp + 136], rsi",
        "mov qword ptr [rsp + 144], rdx",
        "mov qword ptr [rsp + 152], rcx",
        "mov qword ptr [rsp + 160], r8",
        "mov qword ptr [rsp + 168], r9",
        "mov qword ptr [rsp + 176], rax",
        "call {resolve}",
        "mov r11, rax",
        "mov rax, qword ptr [rsp + 176]",
        "mov r9, qword ptr [rsp + 168]",
        "mov r8, qword ptr [rsp + 160]",
        "mov rcx, qword ptr [rsp + 152]",
        "mov rdx, qword ptr [rsp + 144]",
        "mov rsi, qword ptr [rsp + 136]",
        "mov rdi, qword ptr [rsp + 128]",
        "movaps xmm7, xmmword ptr [rsp + 112]",
        "movaps xmm6, xmmword ptr [rsp + 96]",
        "movaps xmm5, xmmword ptr [rsp + 80]",
        "movaps xmm4, xmmword ptr [rsp + 64]",
        "movaps xmm3, xmmword ptr [rsp + 48]",
        "movaps xmm2, xmmword ptr [rsp + 32]",
        "movaps xmm1, xmmword ptr [rsp + 16]",
        "movaps xmm0, xmmword ptr [rsp]",
        "mov rsp, rbp",
        "pop rbp",
        "jmp r11",
        resolve = sym resolve_forward_target,
    )
}

/// Forwarding entry for aggregate-indirect returns.
///
/// The hidden return-buffer pointer occupies `rdi`, pushing the receiver to
/// `rsi` and the selector to `rdx`; the resolver arguments are staged from
/// there after the save, and the restore puts the buffer pointer back in
/// first position for the target.
#[unsafe(naked)]
pub(crate) unsafe extern "C" fn forward_aggregate() {
    naked_asm!(
        "push rbp",
        "mov rbp, rsp",
        "sub rsp, 192",
        "movaps xmmword ptr [rsp], xmm0",
        "movaps xmmword ptr [rsp + 16], xmm1",
        "movaps xmmword ptr [rsp + 32], xmm2",
        "movaps xmmword ptr [rsp + 48], xmm3",
        "movaps xmmword ptr [rsp + 64], xmm4",
        "movaps xmmword ptr [rsp + 80], xmm5",
        "movaps xmmword ptr [rsp + 96], xmm6",
        "movaps xmmword ptr [rsp + 112], xmm7",
        "mov qword ptr [rsp + 128], rdi",
        "mov qword ptr [rsp + 136], rsi",
        "mov qword ptr [rsp + 144], rdx",
        "mov qword ptr [rsp + 152], rcx",
        "mov qword ptr [rsp + 160], r8",
        "mov qword ptr [rsp + 168], r9",
        "mov qword ptr [rsp + 176], rax",
        "mov rdi, rsi",
        "mov rsi, rdx",
        "call {resolve}",
        "mov r11, rax",
        "mov rax, qword ptr [rsp + 176]",
        "mov r9, qword ptr [rsp + 168]",
        "mov r8, qword ptr [rsp + 160]",
        "mov rcx, qword ptr [rsp + 152]",
        "mov rdx, qword ptr [rsp + 144]",
        "mov rsi, qword ptr [rsp + 136]",
        "mov rdi, qword ptr [rsp + 128]",
        "movaps xmm7, xmmword ptr [rsp + 112]",
        "movaps xmm6, xmmword ptr [rsp + 96]",
        "movaps xmm5, xmmword ptr [rsp + 80]",
        "movaps xmm4, xmmword ptr [rsp + 64]",
        "movaps xmm3, xmmword ptr [rsp + 48]",
        "movaps xmm2, xmmword ptr [rsp + 32]",
        "movaps xmm1, xmmword ptr [rsp + 16]",
        "movaps xmm0, xmmword ptr [rsp]",
        "mov rsp, rbp",
        "pop rbp",
        "jmp r11",
        resolve = sym resolve_forward_target,
    )
}
