//! Scientific chaotic generators.
//!
//! Fill caller-supplied `f64` buffers with trajectories of the classic
//! chaotic maps and flows at vector throughput. The recurrence is
//! sequentially dependent, so each SIMD step advances L *independent*
//! trajectories seeded with epsilon-staggered initial conditions and
//! stripes their outputs; sensitive dependence makes the lanes diverge
//! while the attractor geometry is preserved.
//!
//! The first `N/L·L` entries of each buffer are the L-way interleaved
//! lanes in memory order; the scalar tail then continues from the last
//! written value — the final lane of the last vector iteration, not the
//! natural continuation of any single lane. The resulting trajectory
//! discontinuity at the tail is an observable, intentionally preserved
//! property of the interface.

use crate::engine::dispatcher::{self, Tier};
use crate::kernels::constants::{
    CHEN_A, CHEN_B, CHEN_C, CHEN_DT, HENON_A, HENON_B, LANE_EPSILON, LOGISTIC_R, LORENZ_BETA,
    LORENZ_DT, LORENZ_RHO, LORENZ_SIGMA, SINE_AMP, TENT_MU,
};
use crate::kernels::scalar::float;
use crate::types::ChaosError;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use crate::kernels::{avx2, avx512};

// =============================================================================
// LANE SEEDING
// =============================================================================

/// Stagger L lanes from one initial condition: lane k starts at
/// `x0 + k·ε`, reduced modulo 1 for maps on the unit interval.
fn stagger<const L: usize>(x0: f64, unit: bool) -> [f64; L] {
    let mut lanes = [0.0f64; L];
    for (k, lane) in lanes.iter_mut().enumerate() {
        let mut v = x0 + (k as f64) * LANE_EPSILON;
        if unit {
            v = v.rem_euclid(1.0);
        }
        *lane = v;
    }
    lanes
}

fn seed_scalar(x0: f64, unit: bool) -> f64 {
    if unit {
        x0.rem_euclid(1.0)
    } else {
        x0
    }
}

// =============================================================================
// 1-D MAPS
// =============================================================================

/// One-dimensional chaotic maps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Map1d {
    /// Logistic map `x' = r·x·(1−x)`.
    Logistic {
        /// Growth rate.
        r: f64,
    },
    /// Tent map `x' = μ·x` below ½, `μ·(1−x)` above.
    Tent {
        /// Slope.
        mu: f64,
    },
    /// Sine map `x' = amp·sin(π·x)`. SIMD tiers use the Bhaskara I
    /// rational approximation, so scalar and vector output agree only
    /// statistically; pin the tier if reproducibility across machines
    /// matters.
    Sine {
        /// Amplitude.
        amp: f64,
    },
}

impl Map1d {
    /// Logistic map in the fully chaotic regime.
    #[must_use]
    pub const fn logistic() -> Self {
        Map1d::Logistic { r: LOGISTIC_R }
    }

    /// Tent map just below the full-height limit.
    #[must_use]
    pub const fn tent() -> Self {
        Map1d::Tent { mu: TENT_MU }
    }

    /// Sine map with near-unit amplitude.
    #[must_use]
    pub const fn sine() -> Self {
        Map1d::Sine { amp: SINE_AMP }
    }

    /// Whether the map's natural domain is the unit interval; staggered
    /// seeds reduce modulo 1 for these.
    const fn unit_domain(&self) -> bool {
        matches!(self, Map1d::Tent { .. } | Map1d::Sine { .. })
    }

    pub(crate) fn step(&self, x: f64) -> f64 {
        match *self {
            Map1d::Logistic { r } => float::logistic(r, x),
            Map1d::Tent { mu } => float::tent(mu, x),
            Map1d::Sine { amp } => float::sine(amp, x),
        }
    }

    /// Fill `out` with the trajectory from `x0`.
    pub fn generate(&self, out: &mut [f64], x0: f64) {
        let n = out.len();
        let unit = self.unit_domain();
        let mut main = 0usize;
        match dispatcher::detect() {
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Tier::W512 if n >= avx512::FLANES => {
                let mut lanes = stagger::<{ avx512::FLANES }>(x0, unit);
                main = n - n % avx512::FLANES;
                // SAFETY: tier selected only when AVX-512F/BW are detected.
                unsafe { avx512::generate_1d(self, &mut lanes, &mut out[..main]) };
            }
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Tier::W256 if n >= avx2::FLANES => {
                let mut lanes = stagger::<{ avx2::FLANES }>(x0, unit);
                main = n - n % avx2::FLANES;
                // SAFETY: tier selected only when AVX2 is detected.
                unsafe { avx2::generate_1d(self, &mut lanes, &mut out[..main]) };
            }
            _ => {}
        }
        let mut x = if main == 0 {
            seed_scalar(x0, unit)
        } else {
            out[main - 1]
        };
        for slot in &mut out[main..] {
            x = self.step(x);
            *slot = x;
        }
    }
}

// =============================================================================
// 2-D MAPS
// =============================================================================

/// Two-dimensional chaotic maps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Map2d {
    /// Henon map `x' = 1 − a·x² + y`, `y' = b·x`.
    Henon {
        /// Quadratic coefficient.
        a: f64,
        /// Coupling coefficient.
        b: f64,
    },
}

impl Map2d {
    /// Canonical Henon attractor parameters.
    #[must_use]
    pub const fn henon() -> Self {
        Map2d::Henon {
            a: HENON_A,
            b: HENON_B,
        }
    }

    pub(crate) fn step(&self, x: f64, y: f64) -> (f64, f64) {
        let Map2d::Henon { a, b } = *self;
        float::henon(a, b, x, y)
    }

    /// Fill `xout`/`yout` with the trajectory from `(x0, y0)`.
    ///
    /// # Errors
    /// [`ChaosError::ShapeMismatch`] when the buffers differ in length.
    pub fn generate(
        &self,
        xout: &mut [f64],
        yout: &mut [f64],
        x0: f64,
        y0: f64,
    ) -> Result<(), ChaosError> {
        if xout.len() != yout.len() {
            return Err(ChaosError::ShapeMismatch);
        }
        let n = xout.len();
        let mut main = 0usize;
        match dispatcher::detect() {
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Tier::W512 if n >= avx512::FLANES => {
                let mut xl = stagger::<{ avx512::FLANES }>(x0, false);
                let mut yl = stagger::<{ avx512::FLANES }>(y0, false);
                main = n - n % avx512::FLANES;
                // SAFETY: tier selected only when AVX-512F/BW are detected.
                unsafe {
                    avx512::generate_2d(self, &mut xl, &mut yl, &mut xout[..main], &mut yout[..main]);
                }
            }
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Tier::W256 if n >= avx2::FLANES => {
                let mut xl = stagger::<{ avx2::FLANES }>(x0, false);
                let mut yl = stagger::<{ avx2::FLANES }>(y0, false);
                main = n - n % avx2::FLANES;
                // SAFETY: tier selected only when AVX2 is detected.
                unsafe {
                    avx2::generate_2d(self, &mut xl, &mut yl, &mut xout[..main], &mut yout[..main]);
                }
            }
            _ => {}
        }
        let (mut x, mut y) = if main == 0 {
            (x0, y0)
        } else {
            (xout[main - 1], yout[main - 1])
        };
        for i in main..n {
            let (nx, ny) = self.step(x, y);
            x = nx;
            y = ny;
            xout[i] = x;
            yout[i] = y;
        }
        Ok(())
    }
}

// =============================================================================
// 3-D FLOWS
// =============================================================================

/// Three-dimensional chaotic flows, integrated with explicit Euler steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Map3d {
    /// Lorenz system.
    Lorenz {
        /// Prandtl number σ.
        sigma: f64,
        /// Rayleigh number ρ.
        rho: f64,
        /// Geometry factor β.
        beta: f64,
        /// Euler time step.
        dt: f64,
    },
    /// Chen system.
    Chen {
        /// Primary coupling a.
        a: f64,
        /// z-damping b.
        b: f64,
        /// Cross-coupling c.
        c: f64,
        /// Euler time step.
        dt: f64,
    },
}

impl Map3d {
    /// Canonical Lorenz butterfly parameters.
    #[must_use]
    pub const fn lorenz() -> Self {
        Map3d::Lorenz {
            sigma: LORENZ_SIGMA,
            rho: LORENZ_RHO,
            beta: LORENZ_BETA,
            dt: LORENZ_DT,
        }
    }

    /// Canonical Chen attractor parameters.
    #[must_use]
    pub const fn chen() -> Self {
        Map3d::Chen {
            a: CHEN_A,
            b: CHEN_B,
            c: CHEN_C,
            dt: CHEN_DT,
        }
    }

    pub(crate) fn step(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        match *self {
            Map3d::Lorenz {
                sigma,
                rho,
                beta,
                dt,
            } => float::lorenz(sigma, rho, beta, dt, x, y, z),
            Map3d::Chen { a, b, c, dt } => float::chen(a, b, c, dt, x, y, z),
        }
    }

    /// Fill `xout`/`yout`/`zout` with the trajectory from `(x0, y0, z0)`.
    ///
    /// # Errors
    /// [`ChaosError::ShapeMismatch`] when the buffers differ in length.
    pub fn generate(
        &self,
        xout: &mut [f64],
        yout: &mut [f64],
        zout: &mut [f64],
        x0: f64,
        y0: f64,
        z0: f64,
    ) -> Result<(), ChaosError> {
        if xout.len() != yout.len() || yout.len() != zout.len() {
            return Err(ChaosError::ShapeMismatch);
        }
        let n = xout.len();
        let mut main = 0usize;
        match dispatcher::detect() {
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Tier::W512 if n >= avx512::FLANES => {
                let mut xl = stagger::<{ avx512::FLANES }>(x0, false);
                let mut yl = stagger::<{ avx512::FLANES }>(y0, false);
                let mut zl = stagger::<{ avx512::FLANES }>(z0, false);
                main = n - n % avx512::FLANES;
                // SAFETY: tier selected only when AVX-512F/BW are detected.
                unsafe {
                    avx512::generate_3d(
                        self,
                        &mut xl,
                        &mut yl,
                        &mut zl,
                        &mut xout[..main],
                        &mut yout[..main],
                        &mut zout[..main],
                    );
                }
            }
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Tier::W256 if n >= avx2::FLANES => {
                let mut xl = stagger::<{ avx2::FLANES }>(x0, false);
                let mut yl = stagger::<{ avx2::FLANES }>(y0, false);
                let mut zl = stagger::<{ avx2::FLANES }>(z0, false);
                main = n - n % avx2::FLANES;
                // SAFETY: tier selected only when AVX2 is detected.
                unsafe {
                    avx2::generate_3d(
                        self,
                        &mut xl,
                        &mut yl,
                        &mut zl,
                        &mut xout[..main],
                        &mut yout[..main],
                        &mut zout[..main],
                    );
                }
            }
            _ => {}
        }
        let (mut x, mut y, mut z) = if main == 0 {
            (x0, y0, z0)
        } else {
            (xout[main - 1], yout[main - 1], zout[main - 1])
        };
        for i in main..n {
            let (nx, ny, nz) = self.step(x, y, z);
            x = nx;
            y = ny;
            z = nz;
            xout[i] = x;
            yout[i] = y;
            zout[i] = z;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
