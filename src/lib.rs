//! # attractor
//!
//! Vectorized chaotic dynamical systems with a chaos-keystream stream
//! cipher. Accelerated by AVX2 / AVX-512 with a portable scalar fallback.
//!
//! Two cores share the same state engine:
//!
//! - **Scientific generators** evolve the classic chaotic maps and flows
//!   (logistic, tent, sine, Henon, Lorenz, Chen) in double precision,
//!   running several epsilon-staggered trajectories per SIMD step.
//! - **The cipher** iterates integer variants of the same maps, pushes the
//!   state through an avalanche mixer and XORs the bytes over the payload
//!   in place. Integer transitions are bit-exact across all tiers, so one
//!   machine's keystream decrypts on another.
//!
//! The cipher passes basic uniformity tests but makes no cryptographic
//! claims: there is no authentication, no nonce-misuse resistance and no
//! side-channel hardening.
//!
//! # Usage
//! ```rust
//! use attractor::{cipher, Primitive};
//!
//! // XOR-stream symmetry: processing twice restores the plaintext.
//! let mut data = *b"sensitive payload";
//! let key = [0x42u8; 32];
//! let iv = [0x07u8; 16];
//! cipher::process(Primitive::Lorenz, &mut data, &key, &iv)?;
//! assert_ne!(&data, b"sensitive payload");
//! cipher::process(Primitive::Lorenz, &mut data, &key, &iv)?;
//! assert_eq!(&data, b"sensitive payload");
//!
//! // Scientific trajectories fill caller-supplied buffers.
//! let mut xs = vec![0.0; 1000];
//! let mut ys = vec![0.0; 1000];
//! let mut zs = vec![0.0; 1000];
//! attractor::Map3d::lorenz().generate(&mut xs, &mut ys, &mut zs, 0.1, 0.1, 0.1)?;
//! # Ok::<(), attractor::ChaosError>(())
//! ```

#![warn(missing_docs)]
#![deny(clippy::all)]

// =============================================================================
// MODULES
// =============================================================================

pub mod cipher;
mod engine;
mod generator;
// Re-exported for tier-level tests and benches; not part of the stable API.
#[doc(hidden)]
pub mod kernels;
mod rng;
mod stream;
mod types;

// =============================================================================
// EXPORTS
// =============================================================================

pub use generator::{Map1d, Map2d, Map3d};
pub use rng::ChaosRng;
pub use stream::ChaosStream;
pub use types::{ChaosError, Primitive};

/// Returns the name of the SIMD tier currently selected by the dispatcher.
#[must_use]
pub fn active_tier() -> &'static str {
    engine::active_tier_name()
}
