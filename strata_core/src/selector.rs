//! Interned method selectors.
//!
//! A selector names a method slot: its name plus the number of declared
//! arguments (the receiver and the selector itself are not counted).
//! Interning the same (name, arity) pair twice yields the same `Selector`,
//! so equality and hashing on selectors are integer operations, and a
//! selector fits in a single register when passed across the dispatch ABI.
//!
//! Interned names are leaked once and live for the process lifetime, which
//! lets `name()` hand out `&'static str` without reference counting.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

// =============================================================================
// Selector
// =============================================================================

/// Opaque interned key for a method slot.
///
/// The representation is a `u32` index into the process-wide interner, so a
/// selector can travel through a register in the dispatch calling
/// convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Selector(u32);

impl Selector {
    /// Intern a (name, arity) pair, returning its process-wide key.
    pub fn intern(name: &str, arity: u8) -> Self {
        interner().intern(name, arity)
    }

    /// The selector's method name.
    #[inline]
    pub fn name(self) -> &'static str {
        interner().entry(self.0).0
    }

    /// The selector's declared argument count.
    #[inline]
    pub fn arity(self) -> u8 {
        interner().entry(self.0).1
    }

    /// Raw interner index.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name(), self.arity())
    }
}

/// Intern a (name, arity) pair.
///
/// Free-function form of [`Selector::intern`].
pub fn intern(name: &str, arity: u8) -> Selector {
    Selector::intern(name, arity)
}

// =============================================================================
// Interner
// =============================================================================

struct Interner {
    state: RwLock<InternerState>,
}

struct InternerState {
    /// name → (arity, index) pairs registered under that name.
    /// Most names carry a single arity, so the per-name list stays tiny.
    map: FxHashMap<&'static str, Vec<(u8, u32)>>,
    /// index → (name, arity).
    entries: Vec<(&'static str, u8)>,
}

impl InternerState {
    fn find(&self, name: &str, arity: u8) -> Option<u32> {
        let arities = self.map.get(name)?;
        arities.iter().find(|&&(a, _)| a == arity).map(|&(_, idx)| idx)
    }
}

impl Interner {
    fn new() -> Self {
        Self {
            state: RwLock::new(InternerState {
                map: FxHashMap::default(),
                entries: Vec::new(),
            }),
        }
    }

    fn intern(&self, name: &str, arity: u8) -> Selector {
        {
            let state = self.state.read();
            if let Some(idx) = state.find(name, arity) {
                return Selector(idx);
            }
        }

        let mut state = self.state.write();
        // A racing intern of the same pair may have won between the locks.
        if let Some(idx) = state.find(name, arity) {
            return Selector(idx);
        }
        let leaked: &'static str = Box::leak(name.to_owned().into_boxed_str());
        let idx = u32::try_from(state.entries.len()).expect("selector interner overflow");
        state.entries.push((leaked, arity));
        state.map.entry(leaked).or_default().push((arity, idx));
        Selector(idx)
    }

    fn entry(&self, idx: u32) -> (&'static str, u8) {
        self.state.read().entries[idx as usize]
    }
}

static INTERNER: OnceLock<Interner> = OnceLock::new();

fn interner() -> &'static Interner {
    INTERNER.get_or_init(Interner::new)
}

// =============================================================================
// Tests
// =============================================================================
