//! Kernel constants.
//!
//! The per-step Weyl increments are "nothing up my sleeve" numbers derived
//! from well-known irrationals, one per 1-D map plus one for the Henon
//! coupling:
//!
//! ```text
//! WEYL_TENT     = floor(2^32 / φ)        (golden ratio)
//! WEYL_LOGISTIC = floor(2^32 / φ^2)
//! WEYL_SINE     = floor(2^31 · √2)
//! WEYL_HENON    = 0x6D2B79F5             (Mulberry32 increment)
//! ```
//!
//! A nonzero additive increment prevents any lane from locking on a fixed
//! point of its map. The mixer multipliers are the Murmur3 finalizer pair;
//! the shift schedule (16, 13) is the two-round variant.

// =============================================================================
// WEYL INCREMENTS
// =============================================================================

/// Tent map increment: floor(2^32 / φ).
pub const WEYL_TENT: u32 = 0x9E37_79B9;

/// Logistic map increment: floor(2^32 / φ²).
pub const WEYL_LOGISTIC: u32 = 0x61C8_8647;

/// Sine map increment: floor(2^31 · √2).
pub const WEYL_SINE: u32 = 0xB504_F333;

/// Henon coupling increment (Mulberry32).
pub const WEYL_HENON: u32 = 0x6D2B_79F5;

// =============================================================================
// AVALANCHE MIXER
// =============================================================================

/// First mixer multiplier (Murmur3 finalizer).
pub const MIX_MUL1: u32 = 0x85EB_CA6B;

/// Second mixer multiplier (Murmur3 finalizer).
pub const MIX_MUL2: u32 = 0xC2B2_AE35;

// =============================================================================
// FIXED-POINT SINE EVALUATION
// =============================================================================

/// 1.0 in Q31 fixed point, the working format of the integer sine map.
pub const Q31_ONE: u32 = 0x8000_0000;

// =============================================================================
// SEEDING
// =============================================================================

/// Replacement for zero seed lanes; a zero lane would trap maps with a
/// fixed point at the origin.
pub const SEED_SENTINEL: u32 = 0xDEAD_BEEF;

/// Warm-up rounds diffusing key/IV bits across the seed vector. Must be at
/// least the widest flat lane count of a 1-D primitive (16) so the in-place
/// neighbor feedback reaches lane 0 even from fully symmetric seeds.
pub const WARMUP_ROUNDS: usize = 16;

/// Minimum key length able to produce one seed lane.
pub const MIN_KEY_LEN: usize = 4;

/// Keys longer than this are truncated.
pub const MAX_KEY_LEN: usize = 32;

/// Nominal IV length; the stream wrapper normalizes to this.
pub const IV_LEN: usize = 16;

// =============================================================================
// STRUCTURAL CONSTANTS
// =============================================================================

/// u32 lanes per 256-bit integer vector.
pub const LANES_W256: usize = 8;

/// u32 lanes per 512-bit integer vector.
pub const LANES_W512: usize = 16;

/// Keystream bytes per 256-bit iteration.
pub const STRIDE_W256: usize = 32;

/// Keystream bytes per 512-bit iteration.
pub const STRIDE_W512: usize = 64;

/// Keystream block size of the seekable stream and the RNG pool. Amortizes
/// seed derivation; must be a multiple of the widest stride.
pub const BLOCK_SIZE: usize = 4096;

/// Lane stagger for scientific generators: lane k starts at x0 + k·ε.
pub const LANE_EPSILON: f64 = 1e-10;

// =============================================================================
// SCIENTIFIC MAP DEFAULTS
// =============================================================================

/// Logistic growth rate (fully chaotic regime).
pub const LOGISTIC_R: f64 = 3.99;

/// Tent slope, just under the full-height limit.
pub const TENT_MU: f64 = 1.9999;

/// Sine map amplitude.
pub const SINE_AMP: f64 = 0.99;

/// Henon defaults (canonical attractor).
pub const HENON_A: f64 = 1.4;
/// Henon y-coupling.
pub const HENON_B: f64 = 0.3;

/// Lorenz defaults (canonical butterfly).
pub const LORENZ_SIGMA: f64 = 10.0;
/// Lorenz Rayleigh number.
pub const LORENZ_RHO: f64 = 28.0;
/// Lorenz geometry factor.
pub const LORENZ_BETA: f64 = 8.0 / 3.0;
/// Lorenz Euler step.
pub const LORENZ_DT: f64 = 0.01;

/// Chen defaults.
pub const CHEN_A: f64 = 35.0;
/// Chen z-damping.
pub const CHEN_B: f64 = 3.0;
/// Chen cross-coupling.
pub const CHEN_C: f64 = 28.0;
/// Chen Euler step, smaller than Lorenz's because the Chen flow is stiffer.
pub const CHEN_DT: f64 = 0.002;
