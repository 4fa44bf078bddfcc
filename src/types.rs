//! Shared types used across the attractor library.

use core::fmt;
use std::error;

// =============================================================================
// PRIMITIVE SELECTION
// =============================================================================

/// Integer chaotic primitives usable as cipher keystream generators.
///
/// Every primitive provides scalar, 256-bit and 512-bit state transitions
/// with identical per-lane semantics, so the keystream a lane produces is
/// bit-exact regardless of the SIMD tier that evolved it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Rotate-based tent map (1-D).
    Tent,
    /// Widening-multiply logistic map (1-D).
    Logistic,
    /// Fixed-point rational sine map (1-D).
    Sine,
    /// Square-fold Henon map (2-D).
    Henon,
    /// Shift-coupled Lorenz system (3-D).
    Lorenz,
    /// Shift-coupled Chen system (3-D).
    Chen,
}

impl Primitive {
    /// All primitives, in declaration order.
    pub const ALL: [Primitive; 6] = [
        Primitive::Tent,
        Primitive::Logistic,
        Primitive::Sine,
        Primitive::Henon,
        Primitive::Lorenz,
        Primitive::Chen,
    ];

    /// State dimensionality of the primitive.
    #[must_use]
    pub const fn dims(self) -> usize {
        match self {
            Primitive::Tent | Primitive::Logistic | Primitive::Sine => 1,
            Primitive::Henon => 2,
            Primitive::Lorenz | Primitive::Chen => 3,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Caller precondition violations surfaced by the core operations.
///
/// All errors are detected before any output mutation; the core holds no
/// internal error state and never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaosError {
    /// Multi-buffer generation was called with unequal-length outputs.
    ShapeMismatch,
    /// Key shorter than the 4 bytes needed to derive a single seed lane.
    InvalidKey,
    /// Bounded sampling was called with an empty range (`hi < lo`).
    InvalidRange,
    /// A size parameter was unusable where a positive value is required.
    InvalidArgument,
}

impl fmt::Display for ChaosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChaosError::ShapeMismatch => {
                write!(f, "output buffers must have equal lengths")
            }
            ChaosError::InvalidKey => {
                write!(f, "key must be at least 4 bytes")
            }
            ChaosError::InvalidRange => {
                write!(f, "range upper bound is below lower bound")
            }
            ChaosError::InvalidArgument => {
                write!(f, "size argument must be positive and 8-byte aligned")
            }
        }
    }
}

impl error::Error for ChaosError {}
