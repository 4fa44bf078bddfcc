//! Hardware dispatcher.
//!
//! Selects the widest available execution tier for the current CPU. The
//! capability query happens once per `process`/`generate` call and the
//! chosen tier handles the entire vector-aligned prefix, so a mid-buffer
//! tier switch (which would change keystream bytes) cannot occur.

/// Execution width chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// One lane per step; always available.
    Scalar,
    /// 256-bit vectors: 8 u32 lanes or 4 f64 lanes.
    W256,
    /// 512-bit vectors: 16 u32 lanes or 8 f64 lanes.
    W512,
}

/// Returns the widest tier this CPU supports.
#[must_use]
pub fn detect() -> Tier {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        if is_x86_feature_detected!("avx512f") && is_x86_feature_detected!("avx512bw") {
            return Tier::W512;
        }
        if is_x86_feature_detected!("avx2") {
            return Tier::W256;
        }
    }
    Tier::Scalar
}

/// Returns the name of the active execution tier.
#[must_use]
pub fn active_tier_name() -> &'static str {
    match detect() {
        Tier::W512 => "AVX-512",
        Tier::W256 => "AVX2",
        Tier::Scalar => "Scalar",
    }
}
