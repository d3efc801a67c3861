//! Method type signatures and return-ABI classification.
//!
//! The runtime records a [`MethodSignature`] alongside every registered
//! implementation. Introspection reads it back, and the trampoline
//! machinery derives from its return encoding which of the two native
//! calling-convention categories a forwarded call belongs to:
//!
//! - **ScalarRegister**: the return value travels in the architecture's
//!   standard return register(s).
//! - **AggregateIndirect**: the return value is constructed into a
//!   caller-supplied buffer (System V AMD64 `MEMORY` class; AAPCS64 `x8`
//!   indirect result).
//!
//! Classification is target-specific. On AArch64, homogeneous
//! floating-point aggregates of up to four elements return in vector
//! registers regardless of byte size, so aggregate encodings carry enough
//! composition to make that call.

use smallvec::SmallVec;

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
compile_error!(
    "strata_runtime classifies return ABIs only for x86_64 and aarch64; \
     refusing to guess for this architecture"
);

// =============================================================================
// Return Class
// =============================================================================

/// Calling-convention category of a method's return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnClass {
    /// Returned in the standard return register(s).
    ScalarRegister,
    /// Constructed into a caller-supplied buffer.
    AggregateIndirect,
}

// =============================================================================
// Type Encodings
// =============================================================================

/// Composition of an aggregate all of whose fields are one floating-point
/// type. AAPCS64 returns these in vector registers when `count <= 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomogeneousFloat {
    /// Element width in bytes (4 or 8).
    pub elem_bytes: u8,
    /// Number of elements.
    pub count: u8,
}

/// Size and composition of an aggregate type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateLayout {
    pub size: u32,
    pub align: u32,
    /// Present when every field is the same floating-point type.
    pub homogeneous_float: Option<HomogeneousFloat>,
}

/// Encoding of a single value type in a method signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeEncoding {
    Void,
    Bool,
    Int { bytes: u8, signed: bool },
    Float { bytes: u8 },
    Pointer,
    Aggregate(AggregateLayout),
}

impl TypeEncoding {
    /// Encoding of a plain (non-homogeneous-float) aggregate.
    pub const fn aggregate(size: u32, align: u32) -> Self {
        Self::Aggregate(AggregateLayout {
            size,
            align,
            homogeneous_float: None,
        })
    }

    /// Encoding of an aggregate whose fields are all the same float type.
    pub const fn float_aggregate(elem_bytes: u8, count: u8) -> Self {
        let size = elem_bytes as u32 * count as u32;
        Self::Aggregate(AggregateLayout {
            size,
            align: elem_bytes as u32,
            homogeneous_float: Some(HomogeneousFloat { elem_bytes, count }),
        })
    }

    /// Which calling-convention category a return value of this type uses
    /// on the compilation target.
    #[cfg(target_arch = "x86_64")]
    pub fn return_class(&self) -> ReturnClass {
        // System V AMD64: aggregates larger than two eightbytes are class
        // MEMORY and return through a hidden pointer in rdi.
        match self {
            TypeEncoding::Aggregate(layout) if layout.size > 16 => ReturnClass::AggregateIndirect,
            _ => ReturnClass::ScalarRegister,
        }
    }

    /// Which calling-convention category a return value of this type uses
    /// on the compilation target.
    #[cfg(target_arch = "aarch64")]
    pub fn return_class(&self) -> ReturnClass {
        // AAPCS64: HFAs of up to four elements return in v0-v3; other
        // aggregates over 16 bytes return through the x8 indirect pointer.
        match self {
            TypeEncoding::Aggregate(layout) => {
                if let Some(hfa) = layout.homogeneous_float {
                    if hfa.count <= 4 {
                        return ReturnClass::ScalarRegister;
                    }
                }
                if layout.size > 16 {
                    ReturnClass::AggregateIndirect
                } else {
                    ReturnClass::ScalarRegister
                }
            }
            _ => ReturnClass::ScalarRegister,
        }
    }
}

// =============================================================================
// Method Signature
// =============================================================================

/// Recorded type signature of a method: return encoding plus argument
/// encodings, excluding the implicit receiver and selector arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    ret: TypeEncoding,
    args: SmallVec<[TypeEncoding; 4]>,
}

impl MethodSignature {
    /// Signature with the given return and argument encodings.
    pub fn new(ret: TypeEncoding, args: impl IntoIterator<Item = TypeEncoding>) -> Self {
        Self {
            ret,
            args: args.into_iter().collect(),
        }
    }

    /// Signature of a method taking no declared arguments.
    pub fn returning(ret: TypeEncoding) -> Self {
        Self::new(ret, [])
    }

    /// Return encoding.
    #[inline]
    pub fn ret(&self) -> &TypeEncoding {
        &self.ret
    }

    /// Argument encodings (implicit receiver/selector excluded).
    #[inline]
    pub fn args(&self) -> &[TypeEncoding] {
        &self.args
    }

    /// Declared argument count.
    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Return-ABI category of this method on the compilation target.
    #[inline]
    pub fn return_class(&self) -> ReturnClass {
        self.ret.return_class()
    }
}

// =============================================================================
// Tests
// =============================================================================
