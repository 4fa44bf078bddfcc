//! Seeded random number source.
//!
//! Treats the cipher as a keystream generator over a zero pool: the pool
//! is one cipher block processed under (key, IV), and on exhaustion the
//! first 8 IV bytes advance as a little-endian counter before the pool is
//! regenerated. Identical (key, IV) pairs therefore reproduce identical
//! output sequences across instances and runs.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::cipher;
use crate::kernels::constants::{BLOCK_SIZE, IV_LEN, MAX_KEY_LEN, MIN_KEY_LEN};
use crate::types::{ChaosError, Primitive};

/// Default keystream primitive. The 3-D state space (96 bits per lane)
/// gives orbits astronomically longer than any realistic pool draw even
/// on the scalar tier, which keeps the pool statistics flat.
const DEFAULT_PRIMITIVE: Primitive = Primitive::Lorenz;

// =============================================================================
// RNG
// =============================================================================

/// Chaos-keystream random number generator with a refillable pool.
pub struct ChaosRng {
    primitive: Primitive,
    key: [u8; MAX_KEY_LEN],
    key_len: usize,
    iv: [u8; IV_LEN],
    pool: Box<[u8]>,
    cursor: usize,
}

impl ChaosRng {
    /// Construct from operating-system entropy.
    #[must_use]
    pub fn new() -> Self {
        let mut key = [0u8; MAX_KEY_LEN];
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut key);
        OsRng.fill_bytes(&mut iv);
        // The key is full-length, so the only failure mode is unreachable.
        match Self::with_primitive(DEFAULT_PRIMITIVE, &key, &iv) {
            Ok(rng) => rng,
            Err(_) => unreachable!("32-byte key is always valid"),
        }
    }

    /// Construct a reproducible generator from caller-supplied key and IV.
    ///
    /// # Errors
    /// [`ChaosError::InvalidKey`] when the key is shorter than 4 bytes.
    pub fn seeded(key: &[u8], iv: &[u8]) -> Result<Self, ChaosError> {
        Self::with_primitive(DEFAULT_PRIMITIVE, key, iv)
    }

    /// Construct with an explicit keystream primitive.
    ///
    /// # Errors
    /// [`ChaosError::InvalidKey`] when the key is shorter than 4 bytes.
    pub fn with_primitive(
        primitive: Primitive,
        key: &[u8],
        iv: &[u8],
    ) -> Result<Self, ChaosError> {
        Self::build(primitive, key, iv, BLOCK_SIZE)
    }

    /// Construct with a custom pool size, which must be a positive
    /// multiple of 8 so u64 draws never straddle a refill.
    ///
    /// # Errors
    /// [`ChaosError::InvalidKey`] for short keys;
    /// [`ChaosError::InvalidArgument`] for an unusable pool size.
    pub fn seeded_with_pool(key: &[u8], iv: &[u8], pool_len: usize) -> Result<Self, ChaosError> {
        if pool_len == 0 || pool_len % 8 != 0 {
            return Err(ChaosError::InvalidArgument);
        }
        Self::build(DEFAULT_PRIMITIVE, key, iv, pool_len)
    }

    fn build(
        primitive: Primitive,
        key: &[u8],
        iv: &[u8],
        pool_len: usize,
    ) -> Result<Self, ChaosError> {
        if key.len() < MIN_KEY_LEN {
            return Err(ChaosError::InvalidKey);
        }
        let key_len = key.len().min(MAX_KEY_LEN);
        let mut key_buf = [0u8; MAX_KEY_LEN];
        key_buf[..key_len].copy_from_slice(&key[..key_len]);
        let mut iv_buf = [0u8; IV_LEN];
        let iv_len = iv.len().min(IV_LEN);
        iv_buf[..iv_len].copy_from_slice(&iv[..iv_len]);
        let mut rng = Self {
            primitive,
            key: key_buf,
            key_len,
            iv: iv_buf,
            pool: vec![0u8; pool_len].into_boxed_slice(),
            cursor: 0,
        };
        // First pool uses the caller's IV as-is; refills advance the
        // counter from there.
        rng.regenerate_pool();
        Ok(rng)
    }

    /// Fill the pool with keystream for the current IV.
    fn regenerate_pool(&mut self) {
        self.pool.fill(0);
        cipher::process_inner(
            self.primitive,
            &mut self.pool,
            &self.key[..self.key_len],
            &self.iv,
        );
        self.cursor = 0;
    }

    /// Advance the IV counter and regenerate the pool.
    fn refill(&mut self) {
        let mut ctr = [0u8; 8];
        ctr.copy_from_slice(&self.iv[..8]);
        let next = u64::from_le_bytes(ctr).wrapping_add(1);
        self.iv[..8].copy_from_slice(&next.to_le_bytes());
        self.regenerate_pool();
    }

    /// Next uniform u32.
    pub fn next_u32(&mut self) -> u32 {
        if self.cursor + 4 > self.pool.len() {
            self.refill();
        }
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.pool[self.cursor..self.cursor + 4]);
        self.cursor += 4;
        u32::from_le_bytes(word)
    }

    /// Next uniform u64.
    pub fn next_u64(&mut self) -> u64 {
        if self.cursor + 8 > self.pool.len() {
            self.refill();
        }
        let mut word = [0u8; 8];
        word.copy_from_slice(&self.pool[self.cursor..self.cursor + 8]);
        self.cursor += 8;
        u64::from_le_bytes(word)
    }

    /// Next double in `[0, 1)` with 53-bit precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform draw from the inclusive range `[lo, hi]` by modulo
    /// reduction. The modulo bias is documented and accepted; layer
    /// rejection sampling on top if unbiased draws are required.
    ///
    /// # Errors
    /// [`ChaosError::InvalidRange`] when `hi < lo`.
    pub fn next_in_range(&mut self, lo: u64, hi: u64) -> Result<u64, ChaosError> {
        if hi < lo {
            return Err(ChaosError::InvalidRange);
        }
        let span = hi - lo;
        if span == u64::MAX {
            return Ok(self.next_u64());
        }
        Ok(lo + self.next_u64() % (span + 1))
    }

    /// Fill `out` with keystream bytes.
    pub fn fill(&mut self, out: &mut [u8]) {
        let mut cur = 0usize;
        while cur < out.len() {
            if self.cursor == self.pool.len() {
                self.refill();
            }
            let n = (out.len() - cur).min(self.pool.len() - self.cursor);
            out[cur..cur + n].copy_from_slice(&self.pool[self.cursor..self.cursor + n]);
            self.cursor += n;
            cur += n;
        }
    }
}

impl Default for ChaosRng {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ChaosRng {
    fn drop(&mut self) {
        self.key.zeroize();
        self.iv.zeroize();
        self.pool.zeroize();
    }
}

// =============================================================================
// RAND_CORE INTEGRATION
// =============================================================================

#[cfg(feature = "rand-trait")]
impl rand_core::RngCore for ChaosRng {
    fn next_u32(&mut self) -> u32 {
        ChaosRng::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        ChaosRng::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fill(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill(dest);
        Ok(())
    }
}

#[cfg(feature = "rand-trait")]
impl rand_core::SeedableRng for ChaosRng {
    type Seed = [u8; 32];

    fn from_seed(seed: Self::Seed) -> Self {
        match Self::seeded(&seed, &[0u8; IV_LEN]) {
            Ok(rng) => rng,
            Err(_) => unreachable!("32-byte seed is always valid"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
