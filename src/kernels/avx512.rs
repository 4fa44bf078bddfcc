//! AVX-512 kernels (512-bit tier).
//!
//! Integer maps run 16 independent u32 lanes per step (64-byte keystream
//! stride); float maps run 8 f64 lanes. Lane semantics are identical to
//! `kernels::scalar::int` and `kernels::avx2`; only the width differs.

#![allow(clippy::cast_possible_wrap)]
#![allow(unsafe_code)]

use crate::generator::{Map1d, Map2d, Map3d};
use crate::kernels::constants::{
    MIX_MUL1, MIX_MUL2, Q31_ONE, STRIDE_W512, WEYL_HENON, WEYL_LOGISTIC, WEYL_SINE, WEYL_TENT,
};
use crate::types::Primitive;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// u32 lanes per vector at this tier.
pub const LANES: usize = 16;

/// f64 lanes per vector at this tier.
pub const FLANES: usize = 8;

/// Odd 32-bit lane positions inside the 64-bit pair layout.
const ODD_LANES: __mmask16 = 0b1010_1010_1010_1010;

// =============================================================================
// INTEGER LANE PRIMITIVES
// =============================================================================

/// Per-lane `low32((a·b) >> SHIFT)` via the even/odd widening-multiply split.
#[inline]
#[target_feature(enable = "avx512f", enable = "avx512bw")]
unsafe fn mul_shr_x16<const SHIFT: u32>(a: __m512i, b: __m512i) -> __m512i {
    let even = _mm512_srli_epi64::<SHIFT>(_mm512_mul_epu32(a, b));
    let odd = _mm512_srli_epi64::<SHIFT>(_mm512_mul_epu32(
        _mm512_srli_epi64::<32>(a),
        _mm512_srli_epi64::<32>(b),
    ));
    _mm512_mask_blend_epi32(ODD_LANES, even, _mm512_slli_epi64::<32>(odd))
}

/// Per-lane `lo32(x·x) ^ hi32(x·x)` of the widening square.
#[inline]
#[target_feature(enable = "avx512f", enable = "avx512bw")]
unsafe fn square_fold_x16(x: __m512i) -> __m512i {
    let even = _mm512_mul_epu32(x, x);
    let xo = _mm512_srli_epi64::<32>(x);
    let odd = _mm512_mul_epu32(xo, xo);
    let ef = _mm512_xor_si512(even, _mm512_srli_epi64::<32>(even));
    let of = _mm512_xor_si512(odd, _mm512_srli_epi64::<32>(odd));
    _mm512_mask_blend_epi32(ODD_LANES, ef, _mm512_slli_epi64::<32>(of))
}

/// Tent transition, 16 lanes.
#[inline]
#[target_feature(enable = "avx512f", enable = "avx512bw")]
unsafe fn tent_x16(x: __m512i) -> __m512i {
    let v = _mm512_xor_si512(x, _mm512_srai_epi32::<31>(x));
    let r = _mm512_or_si512(_mm512_slli_epi32::<1>(v), _mm512_srli_epi32::<31>(v));
    _mm512_add_epi32(r, _mm512_set1_epi32(WEYL_TENT as i32))
}

/// Logistic transition, 16 lanes.
#[inline]
#[target_feature(enable = "avx512f", enable = "avx512bw")]
unsafe fn logistic_x16(x: __m512i) -> __m512i {
    let nx = _mm512_xor_si512(x, _mm512_set1_epi32(-1));
    let y = mul_shr_x16::<30>(x, nx);
    _mm512_add_epi32(y, _mm512_set1_epi32(WEYL_LOGISTIC as i32))
}

/// Sine transition, 16 lanes (fixed-point Bhaskara, same schedule as scalar).
#[inline]
#[target_feature(enable = "avx512f", enable = "avx512bw")]
unsafe fn sine_x16(x: __m512i) -> __m512i {
    let one = _mm512_set1_epi32(Q31_ONE as i32);
    let neg = _mm512_sub_epi32(_mm512_setzero_si512(), x);
    let q = mul_shr_x16::<32>(x, neg);
    let e = _mm512_srli_epi32::<1>(_mm512_sub_epi32(_mm512_set1_epi32(0x4000_0000), q));
    let mut t = _mm512_sub_epi32(one, e);
    t = _mm512_sub_epi32(one, mul_shr_x16::<31>(e, t));
    t = _mm512_sub_epi32(one, mul_shr_x16::<31>(e, t));
    t = _mm512_sub_epi32(one, mul_shr_x16::<31>(e, t));
    let s = mul_shr_x16::<27>(q, t);
    _mm512_add_epi32(s, _mm512_set1_epi32(WEYL_SINE as i32))
}

/// Henon transition, 16 lanes.
#[inline]
#[target_feature(enable = "avx512f", enable = "avx512bw")]
unsafe fn henon_x16(x: __m512i, y: __m512i) -> (__m512i, __m512i) {
    let t = square_fold_x16(x);
    let nx = _mm512_sub_epi32(
        _mm512_add_epi32(y, _mm512_set1_epi32(WEYL_HENON as i32)),
        t,
    );
    (nx, x)
}

/// Lorenz transition, 16 lanes.
#[inline]
#[target_feature(enable = "avx512f", enable = "avx512bw")]
unsafe fn lorenz_x16(x: __m512i, y: __m512i, z: __m512i) -> (__m512i, __m512i, __m512i) {
    let dx = _mm512_srli_epi32::<2>(_mm512_sub_epi32(y, x));
    let dy = _mm512_sub_epi32(_mm512_xor_si512(x, _mm512_srli_epi32::<3>(y)), z);
    let dz = _mm512_xor_si512(_mm512_add_epi32(x, y), _mm512_slli_epi32::<1>(z));
    (
        _mm512_add_epi32(x, dx),
        _mm512_add_epi32(y, dy),
        _mm512_add_epi32(z, dz),
    )
}

/// Chen transition, 16 lanes.
#[inline]
#[target_feature(enable = "avx512f", enable = "avx512bw")]
unsafe fn chen_x16(x: __m512i, y: __m512i, z: __m512i) -> (__m512i, __m512i, __m512i) {
    let t = _mm512_sub_epi32(y, x);
    let dx = _mm512_add_epi32(t, _mm512_slli_epi32::<1>(t));
    let dy = _mm512_add_epi32(
        _mm512_xor_si512(x, _mm512_slli_epi32::<2>(y)),
        _mm512_srli_epi32::<1>(z),
    );
    let dz = _mm512_xor_si512(
        _mm512_add_epi32(x, y),
        _mm512_add_epi32(z, _mm512_slli_epi32::<1>(z)),
    );
    (
        _mm512_add_epi32(x, dx),
        _mm512_add_epi32(y, dy),
        _mm512_add_epi32(z, dz),
    )
}

/// Avalanche mixer, 16 lanes.
#[inline]
#[target_feature(enable = "avx512f", enable = "avx512bw")]
unsafe fn mix_x16(mut k: __m512i) -> __m512i {
    k = _mm512_mullo_epi32(k, _mm512_set1_epi32(MIX_MUL1 as i32));
    k = _mm512_xor_si512(k, _mm512_srli_epi32::<16>(k));
    k = _mm512_mullo_epi32(k, _mm512_set1_epi32(MIX_MUL2 as i32));
    _mm512_xor_si512(k, _mm512_srli_epi32::<13>(k))
}

/// XOR one mixed keystream vector over a 64-byte chunk.
#[inline]
#[target_feature(enable = "avx512f", enable = "avx512bw")]
unsafe fn xor_chunk(chunk: &mut [u8], k: __m512i) {
    let data = _mm512_loadu_si512(chunk.as_ptr().cast());
    _mm512_storeu_si512(chunk.as_mut_ptr().cast(), _mm512_xor_si512(data, k));
}

// =============================================================================
// CIPHER ENTRY POINTS
// =============================================================================

/// Advance the lane state by one step. Exposed for tier-equivalence tests;
/// uses the same lane primitives as [`cipher_xor`].
// SAFETY: Requires AVX-512F/BW (callers must gate on runtime detection).
#[target_feature(enable = "avx512f", enable = "avx512bw")]
pub unsafe fn step(map: Primitive, lanes: &mut [[u32; LANES]; 3]) {
    let x = _mm512_loadu_si512(lanes[0].as_ptr().cast());
    let y = _mm512_loadu_si512(lanes[1].as_ptr().cast());
    let z = _mm512_loadu_si512(lanes[2].as_ptr().cast());
    let (nx, ny, nz) = match map {
        Primitive::Tent => (tent_x16(x), y, z),
        Primitive::Logistic => (logistic_x16(x), y, z),
        Primitive::Sine => (sine_x16(x), y, z),
        Primitive::Henon => {
            let (nx, ny) = henon_x16(x, y);
            (nx, ny, z)
        }
        Primitive::Lorenz => lorenz_x16(x, y, z),
        Primitive::Chen => chen_x16(x, y, z),
    };
    _mm512_storeu_si512(lanes[0].as_mut_ptr().cast(), nx);
    _mm512_storeu_si512(lanes[1].as_mut_ptr().cast(), ny);
    _mm512_storeu_si512(lanes[2].as_mut_ptr().cast(), nz);
}

/// XOR keystream over `buf`, which must be a multiple of the 64-byte
/// stride. The evolved lane state is stored back so the scalar tail can
/// continue from lane 0.
// SAFETY: Requires AVX-512F/BW (enforced by the dispatcher). All
// loads/stores are unaligned on caller-validated slice lengths.
#[target_feature(enable = "avx512f", enable = "avx512bw")]
pub unsafe fn cipher_xor(map: Primitive, lanes: &mut [[u32; LANES]; 3], buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % STRIDE_W512, 0);
    match map {
        Primitive::Tent => {
            let mut x = _mm512_loadu_si512(lanes[0].as_ptr().cast());
            for chunk in buf.chunks_exact_mut(STRIDE_W512) {
                x = tent_x16(x);
                xor_chunk(chunk, mix_x16(x));
            }
            _mm512_storeu_si512(lanes[0].as_mut_ptr().cast(), x);
        }
        Primitive::Logistic => {
            let mut x = _mm512_loadu_si512(lanes[0].as_ptr().cast());
            for chunk in buf.chunks_exact_mut(STRIDE_W512) {
                x = logistic_x16(x);
                xor_chunk(chunk, mix_x16(x));
            }
            _mm512_storeu_si512(lanes[0].as_mut_ptr().cast(), x);
        }
        Primitive::Sine => {
            let mut x = _mm512_loadu_si512(lanes[0].as_ptr().cast());
            for chunk in buf.chunks_exact_mut(STRIDE_W512) {
                x = sine_x16(x);
                xor_chunk(chunk, mix_x16(x));
            }
            _mm512_storeu_si512(lanes[0].as_mut_ptr().cast(), x);
        }
        Primitive::Henon => {
            let mut x = _mm512_loadu_si512(lanes[0].as_ptr().cast());
            let mut y = _mm512_loadu_si512(lanes[1].as_ptr().cast());
            for chunk in buf.chunks_exact_mut(STRIDE_W512) {
                let (nx, ny) = henon_x16(x, y);
                x = nx;
                y = ny;
                xor_chunk(chunk, mix_x16(_mm512_xor_si512(x, y)));
            }
            _mm512_storeu_si512(lanes[0].as_mut_ptr().cast(), x);
            _mm512_storeu_si512(lanes[1].as_mut_ptr().cast(), y);
        }
        Primitive::Lorenz => {
            let mut x = _mm512_loadu_si512(lanes[0].as_ptr().cast());
            let mut y = _mm512_loadu_si512(lanes[1].as_ptr().cast());
            let mut z = _mm512_loadu_si512(lanes[2].as_ptr().cast());
            for chunk in buf.chunks_exact_mut(STRIDE_W512) {
                let (nx, ny, nz) = lorenz_x16(x, y, z);
                x = nx;
                y = ny;
                z = nz;
                let k = _mm512_xor_si512(_mm512_xor_si512(x, y), z);
                xor_chunk(chunk, mix_x16(k));
            }
            _mm512_storeu_si512(lanes[0].as_mut_ptr().cast(), x);
            _mm512_storeu_si512(lanes[1].as_mut_ptr().cast(), y);
            _mm512_storeu_si512(lanes[2].as_mut_ptr().cast(), z);
        }
        Primitive::Chen => {
            let mut x = _mm512_loadu_si512(lanes[0].as_ptr().cast());
            let mut y = _mm512_loadu_si512(lanes[1].as_ptr().cast());
            let mut z = _mm512_loadu_si512(lanes[2].as_ptr().cast());
            for chunk in buf.chunks_exact_mut(STRIDE_W512) {
                let (nx, ny, nz) = chen_x16(x, y, z);
                x = nx;
                y = ny;
                z = nz;
                let k = _mm512_xor_si512(_mm512_xor_si512(x, y), z);
                xor_chunk(chunk, mix_x16(k));
            }
            _mm512_storeu_si512(lanes[0].as_mut_ptr().cast(), x);
            _mm512_storeu_si512(lanes[1].as_mut_ptr().cast(), y);
            _mm512_storeu_si512(lanes[2].as_mut_ptr().cast(), z);
        }
    }
}

// =============================================================================
// SCIENTIFIC GENERATORS
// =============================================================================

/// Fill `out` (length a multiple of 8) with 8 interleaved trajectories.
// SAFETY: Requires AVX-512F/BW (enforced by the dispatcher).
#[target_feature(enable = "avx512f", enable = "avx512bw")]
pub unsafe fn generate_1d(map: &Map1d, lanes: &mut [f64; FLANES], out: &mut [f64]) {
    debug_assert_eq!(out.len() % FLANES, 0);
    let mut x = _mm512_loadu_pd(lanes.as_ptr());
    match *map {
        Map1d::Logistic { r } => {
            let rv = _mm512_set1_pd(r);
            let one = _mm512_set1_pd(1.0);
            for chunk in out.chunks_exact_mut(FLANES) {
                // Same association as the scalar step: (r·x)·(1−x).
                x = _mm512_mul_pd(_mm512_mul_pd(rv, x), _mm512_sub_pd(one, x));
                _mm512_storeu_pd(chunk.as_mut_ptr(), x);
            }
        }
        Map1d::Tent { mu } => {
            let muv = _mm512_set1_pd(mu);
            let one = _mm512_set1_pd(1.0);
            let half = _mm512_set1_pd(0.5);
            for chunk in out.chunks_exact_mut(FLANES) {
                let rise = _mm512_mul_pd(muv, x);
                let fall = _mm512_mul_pd(muv, _mm512_sub_pd(one, x));
                let lt = _mm512_cmp_pd_mask::<_CMP_LT_OQ>(x, half);
                x = _mm512_mask_blend_pd(lt, fall, rise);
                _mm512_storeu_pd(chunk.as_mut_ptr(), x);
            }
        }
        Map1d::Sine { amp } => {
            let ampv = _mm512_set1_pd(amp);
            let one = _mm512_set1_pd(1.0);
            let c16 = _mm512_set1_pd(16.0);
            let c4 = _mm512_set1_pd(4.0);
            let c5 = _mm512_set1_pd(5.0);
            for chunk in out.chunks_exact_mut(FLANES) {
                let q = _mm512_mul_pd(x, _mm512_sub_pd(one, x));
                let num = _mm512_mul_pd(c16, q);
                let den = _mm512_sub_pd(c5, _mm512_mul_pd(c4, q));
                x = _mm512_mul_pd(ampv, _mm512_div_pd(num, den));
                _mm512_storeu_pd(chunk.as_mut_ptr(), x);
            }
        }
    }
    _mm512_storeu_pd(lanes.as_mut_ptr(), x);
}

/// Fill two interleaved buffers (lengths equal, multiples of 8) from the
/// 2-D map.
// SAFETY: Requires AVX-512F/BW (enforced by the dispatcher).
#[target_feature(enable = "avx512f", enable = "avx512bw")]
pub unsafe fn generate_2d(
    map: &Map2d,
    xl: &mut [f64; FLANES],
    yl: &mut [f64; FLANES],
    xout: &mut [f64],
    yout: &mut [f64],
) {
    let Map2d::Henon { a, b } = *map;
    let av = _mm512_set1_pd(a);
    let bv = _mm512_set1_pd(b);
    let one = _mm512_set1_pd(1.0);
    let mut x = _mm512_loadu_pd(xl.as_ptr());
    let mut y = _mm512_loadu_pd(yl.as_ptr());
    for (xc, yc) in xout
        .chunks_exact_mut(FLANES)
        .zip(yout.chunks_exact_mut(FLANES))
    {
        let nx = _mm512_add_pd(
            _mm512_sub_pd(one, _mm512_mul_pd(av, _mm512_mul_pd(x, x))),
            y,
        );
        let ny = _mm512_mul_pd(bv, x);
        x = nx;
        y = ny;
        _mm512_storeu_pd(xc.as_mut_ptr(), x);
        _mm512_storeu_pd(yc.as_mut_ptr(), y);
    }
    _mm512_storeu_pd(xl.as_mut_ptr(), x);
    _mm512_storeu_pd(yl.as_mut_ptr(), y);
}

/// Fill three interleaved buffers (lengths equal, multiples of 8) from the
/// 3-D flow.
// SAFETY: Requires AVX-512F/BW (enforced by the dispatcher).
#[target_feature(enable = "avx512f", enable = "avx512bw")]
#[allow(clippy::similar_names)]
pub unsafe fn generate_3d(
    map: &Map3d,
    xl: &mut [f64; FLANES],
    yl: &mut [f64; FLANES],
    zl: &mut [f64; FLANES],
    xout: &mut [f64],
    yout: &mut [f64],
    zout: &mut [f64],
) {
    let mut x = _mm512_loadu_pd(xl.as_ptr());
    let mut y = _mm512_loadu_pd(yl.as_ptr());
    let mut z = _mm512_loadu_pd(zl.as_ptr());
    match *map {
        Map3d::Lorenz {
            sigma,
            rho,
            beta,
            dt,
        } => {
            let sv = _mm512_set1_pd(sigma);
            let rv = _mm512_set1_pd(rho);
            let bv = _mm512_set1_pd(beta);
            let dtv = _mm512_set1_pd(dt);
            for ((xc, yc), zc) in xout
                .chunks_exact_mut(FLANES)
                .zip(yout.chunks_exact_mut(FLANES))
                .zip(zout.chunks_exact_mut(FLANES))
            {
                let dx = _mm512_mul_pd(_mm512_mul_pd(sv, _mm512_sub_pd(y, x)), dtv);
                let dy = _mm512_mul_pd(
                    _mm512_sub_pd(_mm512_mul_pd(x, _mm512_sub_pd(rv, z)), y),
                    dtv,
                );
                let dz = _mm512_mul_pd(
                    _mm512_sub_pd(_mm512_mul_pd(x, y), _mm512_mul_pd(bv, z)),
                    dtv,
                );
                x = _mm512_add_pd(x, dx);
                y = _mm512_add_pd(y, dy);
                z = _mm512_add_pd(z, dz);
                _mm512_storeu_pd(xc.as_mut_ptr(), x);
                _mm512_storeu_pd(yc.as_mut_ptr(), y);
                _mm512_storeu_pd(zc.as_mut_ptr(), z);
            }
        }
        Map3d::Chen { a, b, c, dt } => {
            let av = _mm512_set1_pd(a);
            let bv = _mm512_set1_pd(b);
            let cv = _mm512_set1_pd(c);
            let cav = _mm512_set1_pd(c - a);
            let dtv = _mm512_set1_pd(dt);
            for ((xc, yc), zc) in xout
                .chunks_exact_mut(FLANES)
                .zip(yout.chunks_exact_mut(FLANES))
                .zip(zout.chunks_exact_mut(FLANES))
            {
                let dx = _mm512_mul_pd(_mm512_mul_pd(av, _mm512_sub_pd(y, x)), dtv);
                let dy = _mm512_mul_pd(
                    _mm512_add_pd(
                        _mm512_sub_pd(_mm512_mul_pd(cav, x), _mm512_mul_pd(x, z)),
                        _mm512_mul_pd(cv, y),
                    ),
                    dtv,
                );
                let dz = _mm512_mul_pd(
                    _mm512_sub_pd(_mm512_mul_pd(x, y), _mm512_mul_pd(bv, z)),
                    dtv,
                );
                x = _mm512_add_pd(x, dx);
                y = _mm512_add_pd(y, dy);
                z = _mm512_add_pd(z, dz);
                _mm512_storeu_pd(xc.as_mut_ptr(), x);
                _mm512_storeu_pd(yc.as_mut_ptr(), y);
                _mm512_storeu_pd(zc.as_mut_ptr(), z);
            }
        }
    }
    _mm512_storeu_pd(xl.as_mut_ptr(), x);
    _mm512_storeu_pd(yl.as_mut_ptr(), y);
    _mm512_storeu_pd(zl.as_mut_ptr(), z);
}
