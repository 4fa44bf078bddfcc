//! Keystream cipher core.
//!
//! Derives a vector of parallel u32 seeds from (key, IV), iterates the
//! selected integer primitive at the widest available SIMD width, pushes
//! each state vector through the avalanche mixer and XORs the resulting
//! bytes over the caller's buffer in place. XOR symmetry makes the same
//! call decrypt: `process ∘ process` is the identity.
//!
//! All transient state lives on the stack; the core allocates nothing.

use crate::engine::dispatcher::{self, Tier};
use crate::kernels::constants::{
    MAX_KEY_LEN, MIN_KEY_LEN, SEED_SENTINEL, STRIDE_W256, STRIDE_W512, WARMUP_ROUNDS,
};
use crate::kernels::scalar;
use crate::types::{ChaosError, Primitive};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use crate::kernels::{avx2, avx512};

// =============================================================================
// PUBLIC ENTRY POINT
// =============================================================================

/// XOR the chaotic keystream for `(key, iv)` over `buf` in place.
///
/// Calling twice with identical arguments restores the original buffer.
/// Keys must be at least 4 bytes; keys longer than 32 bytes are truncated.
/// IVs shorter than 4 bytes degrade to key-only seeding.
///
/// # Errors
/// [`ChaosError::InvalidKey`] when the key is shorter than 4 bytes.
pub fn process(
    primitive: Primitive,
    buf: &mut [u8],
    key: &[u8],
    iv: &[u8],
) -> Result<(), ChaosError> {
    if key.len() < MIN_KEY_LEN {
        return Err(ChaosError::InvalidKey);
    }
    process_inner(primitive, buf, key, iv);
    Ok(())
}

/// Entry point for callers that validated the key once at construction
/// (stream wrapper, RNG pool).
pub(crate) fn process_inner(primitive: Primitive, buf: &mut [u8], key: &[u8], iv: &[u8]) {
    debug_assert!(key.len() >= MIN_KEY_LEN);
    let key = &key[..key.len().min(MAX_KEY_LEN)];
    if buf.is_empty() {
        return;
    }
    match dispatcher::detect() {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        Tier::W512 => process_w512(primitive, buf, key, iv),
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        Tier::W256 => process_w256(primitive, buf, key, iv),
        _ => process_scalar(primitive, buf, key, iv),
    }
}

// =============================================================================
// SEED DERIVATION
// =============================================================================

/// Little-endian u32 read with cyclic wraparound over the slice. For
/// 32-byte keys and offsets `4·i mod 32` this is a plain aligned read.
fn read_u32_cyclic(bytes: &[u8], off: usize) -> u32 {
    let mut word = [0u8; 4];
    for (j, b) in word.iter_mut().enumerate() {
        *b = bytes[(off + j) % bytes.len()];
    }
    u32::from_le_bytes(word)
}

/// Single-scalar recurrence used to diffuse the seed vector. 1-D
/// primitives warm up with their own transition; the multi-dimensional
/// primitives have no single-scalar transition, so their flat seed vector
/// warms up with the tent step.
fn warm_step(primitive: Primitive, s: u32) -> u32 {
    match primitive {
        Primitive::Tent | Primitive::Henon | Primitive::Lorenz | Primitive::Chen => {
            scalar::int::tent(s)
        }
        Primitive::Logistic => scalar::int::logistic(s),
        Primitive::Sine => scalar::int::sine(s),
    }
}

/// Derive `seeds.len()` parallel u32 seeds from (key, IV).
///
/// Each lane reads 4 key bytes (cyclically) and XORs 4 IV bytes when the
/// IV has at least 4; zero lanes become the sentinel. 16 warm-up rounds
/// then run **in place, ascending**: lane i advances and folds in lane
/// i+1's value, so the final lane reads the already-updated lane 0. The
/// ascending order is what lets fully symmetric seeds (all-zero key and
/// IV collapse every lane to the sentinel) diverge — the asymmetry enters
/// at the wraparound lane and propagates backwards one lane per round.
pub(crate) fn derive_seeds(primitive: Primitive, key: &[u8], iv: &[u8], seeds: &mut [u32]) {
    let l = seeds.len();
    for (i, s) in seeds.iter_mut().enumerate() {
        let mut v = read_u32_cyclic(key, (4 * i) % key.len());
        if iv.len() >= 4 {
            v ^= read_u32_cyclic(iv, (4 * i) % iv.len());
        }
        *s = if v == 0 { SEED_SENTINEL } else { v };
    }
    for _ in 0..WARMUP_ROUNDS {
        for i in 0..l {
            seeds[i] = warm_step(primitive, seeds[i]);
            seeds[i] ^= seeds[(i + 1) % l] >> 1;
        }
    }
    for s in seeds.iter_mut() {
        if *s == 0 {
            *s = SEED_SENTINEL;
        }
    }
}

// =============================================================================
// TIER DRIVERS
// =============================================================================

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn process_w512(primitive: Primitive, buf: &mut [u8], key: &[u8], iv: &[u8]) {
    const L: usize = avx512::LANES;
    let dims = primitive.dims();
    let mut flat = [0u32; 3 * L];
    derive_seeds(primitive, key, iv, &mut flat[..dims * L]);

    let mut lanes = [[0u32; L]; 3];
    for (d, lane) in lanes.iter_mut().enumerate().take(dims) {
        lane.copy_from_slice(&flat[d * L..(d + 1) * L]);
    }

    let main = buf.len() - buf.len() % STRIDE_W512;
    // SAFETY: this tier is only selected when AVX-512F/BW are detected.
    unsafe { avx512::cipher_xor(primitive, &mut lanes, &mut buf[..main]) };

    let mut state = [lanes[0][0], lanes[1][0], lanes[2][0]];
    scalar_tail(primitive, &mut state, &mut buf[main..]);
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn process_w256(primitive: Primitive, buf: &mut [u8], key: &[u8], iv: &[u8]) {
    const L: usize = avx2::LANES;
    let dims = primitive.dims();
    let mut flat = [0u32; 3 * L];
    derive_seeds(primitive, key, iv, &mut flat[..dims * L]);

    let mut lanes = [[0u32; L]; 3];
    for (d, lane) in lanes.iter_mut().enumerate().take(dims) {
        lane.copy_from_slice(&flat[d * L..(d + 1) * L]);
    }

    let main = buf.len() - buf.len() % STRIDE_W256;
    // SAFETY: this tier is only selected when AVX2 is detected.
    unsafe { avx2::cipher_xor(primitive, &mut lanes, &mut buf[..main]) };

    let mut state = [lanes[0][0], lanes[1][0], lanes[2][0]];
    scalar_tail(primitive, &mut state, &mut buf[main..]);
}

fn process_scalar(primitive: Primitive, buf: &mut [u8], key: &[u8], iv: &[u8]) {
    let dims = primitive.dims();
    let mut flat = [0u32; 3];
    derive_seeds(primitive, key, iv, &mut flat[..dims]);
    scalar_tail(primitive, &mut flat, buf);
}

// =============================================================================
// SCALAR TAIL
// =============================================================================

/// Advance a one-lane state over the residual bytes, 4 keystream bytes per
/// step with a partial final step. After a vector prefix the state is lane
/// 0 of the evolved vector, so the tail continues the lane-0 trajectory.
fn scalar_tail(primitive: Primitive, state: &mut [u32; 3], buf: &mut [u8]) {
    for chunk in buf.chunks_mut(4) {
        let k = match primitive {
            Primitive::Tent => {
                state[0] = scalar::int::tent(state[0]);
                state[0]
            }
            Primitive::Logistic => {
                state[0] = scalar::int::logistic(state[0]);
                state[0]
            }
            Primitive::Sine => {
                state[0] = scalar::int::sine(state[0]);
                state[0]
            }
            Primitive::Henon => {
                let (nx, ny) = scalar::int::henon(state[0], state[1]);
                state[0] = nx;
                state[1] = ny;
                nx ^ ny
            }
            Primitive::Lorenz => {
                let (nx, ny, nz) = scalar::int::lorenz(state[0], state[1], state[2]);
                *state = [nx, ny, nz];
                nx ^ ny ^ nz
            }
            Primitive::Chen => {
                let (nx, ny, nz) = scalar::int::chen(state[0], state[1], state[2]);
                *state = [nx, ny, nz];
                nx ^ ny ^ nz
            }
        };
        let ks = scalar::mix32(k).to_le_bytes();
        for (b, m) in chunk.iter_mut().zip(ks.iter()) {
            *b ^= m;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
