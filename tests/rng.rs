//! RNG statistical and contract tests.

#![allow(missing_docs)]

use attractor::{ChaosError, ChaosRng};

// =============================================================================
// DISTRIBUTION
// =============================================================================

/// Literal scenario: one million bytes from the zero-keyed generator must
/// be flat over 256 bins — chi-square below 290 (df = 255).
#[test]
fn chi_square_over_one_million_bytes() {
    let mut rng = ChaosRng::seeded(&[0u8; 32], &[0u8; 16]).unwrap();
    let mut bytes = vec![0u8; 1_000_000];
    rng.fill(&mut bytes);

    let mut counts = [0u64; 256];
    for &b in &bytes {
        counts[b as usize] += 1;
    }
    let expected = bytes.len() as f64 / 256.0;
    let chi2: f64 = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum();
    assert!(chi2 < 290.0, "chi-square too high: {chi2}");
}

#[test]
fn doubles_land_in_unit_interval() {
    let mut rng = ChaosRng::seeded(&[0xABu8; 32], &[0xCDu8; 16]).unwrap();
    let mut sum = 0.0;
    for _ in 0..100_000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v), "out of range: {v}");
        sum += v;
    }
    let mean = sum / 100_000.0;
    assert!((mean - 0.5).abs() < 0.01, "mean drifted: {mean}");
}

#[test]
fn pool_refills_advance_the_counter() {
    // Consecutive pool-sized draws must not repeat (the IV counter moved).
    let mut rng = ChaosRng::seeded(&[4u8; 32], &[0u8; 16]).unwrap();
    let mut first = vec![0u8; 4096];
    let mut second = vec![0u8; 4096];
    rng.fill(&mut first);
    rng.fill(&mut second);
    assert_ne!(first, second);
}

// =============================================================================
// REPRODUCIBILITY
// =============================================================================

#[test]
fn same_seed_same_sequence_across_instances() {
    let mut a = ChaosRng::seeded(&[0x77u8; 32], &[0x13u8; 16]).unwrap();
    let mut b = ChaosRng::seeded(&[0x77u8; 32], &[0x13u8; 16]).unwrap();
    // Crosses at least one refill boundary.
    for _ in 0..3000 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn different_ivs_decorrelate() {
    let mut a = ChaosRng::seeded(&[0x77u8; 32], &[0u8; 16]).unwrap();
    let mut b = ChaosRng::seeded(&[0x77u8; 32], &[1u8; 16]).unwrap();
    let draws_a: Vec<u32> = (0..64).map(|_| a.next_u32()).collect();
    let draws_b: Vec<u32> = (0..64).map(|_| b.next_u32()).collect();
    assert_ne!(draws_a, draws_b);
}

// =============================================================================
// RANGE DRAWS
// =============================================================================

#[test]
fn range_draws_respect_inclusive_bounds() {
    let mut rng = ChaosRng::seeded(&[6u8; 32], &[6u8; 16]).unwrap();
    let mut seen_lo = false;
    let mut seen_hi = false;
    for _ in 0..10_000 {
        let v = rng.next_in_range(10, 17).unwrap();
        assert!((10..=17).contains(&v));
        seen_lo |= v == 10;
        seen_hi |= v == 17;
    }
    assert!(seen_lo && seen_hi, "8-value range never hit its endpoints");
}

#[test]
fn degenerate_and_inverted_ranges() {
    let mut rng = ChaosRng::seeded(&[6u8; 32], &[6u8; 16]).unwrap();
    assert_eq!(rng.next_in_range(42, 42).unwrap(), 42);
    assert_eq!(rng.next_in_range(7, 3), Err(ChaosError::InvalidRange));
    // Full span must not overflow.
    let _ = rng.next_in_range(0, u64::MAX).unwrap();
}
