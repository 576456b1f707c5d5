//! Adaptive Gauss–Kronrod quadrature.
//!
//! Each interval is estimated with the 15-point Kronrod rule and its embedded
//! 7-point Gauss rule; the difference is the local error estimate. The
//! interval with the largest error is bisected until the summed error meets
//! the tolerance or the subdivision budget runs out.
//!
//! Semi-infinite integrals over `[a, ∞)` are mapped onto `(0, 1]` with
//! `x = a + t / (1 - t)`. Kronrod nodes are interior, so neither endpoint is
//! ever evaluated and tails that decay fast contribute exact zeros.

use crate::types::error::{MMError, MMResult};

#[cfg(feature = "serde")]
use pretty_simple_display::{DebugPretty, DisplaySimple};

/// Kronrod abscissae on `[0, 1)`, descending. Odd indices are shared with the
/// 7-point Gauss rule.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

/// Kronrod weights matching [`XGK`].
const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

/// Gauss weights for `XGK[1]`, `XGK[3]`, `XGK[5]` and the centre.
const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// Tolerances and budget for adaptive quadrature.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(not(feature = "serde"), derive(Debug))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize, DebugPretty, DisplaySimple))]
pub struct QuadratureConfig {
    /// Absolute error target.
    pub absolute_tolerance: f64,

    /// Error target relative to the magnitude of the integral.
    pub relative_tolerance: f64,

    /// Maximum number of subintervals before giving up.
    pub max_subdivisions: usize,
}

impl QuadratureConfig {
    /// Creates a validated quadrature configuration.
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` if a tolerance is negative or
    /// non-finite, both tolerances are zero, or `max_subdivisions` is zero.
    pub fn new(
        absolute_tolerance: f64,
        relative_tolerance: f64,
        max_subdivisions: usize,
    ) -> MMResult<Self> {
        let config = Self {
            absolute_tolerance,
            relative_tolerance,
            max_subdivisions,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// See [`QuadratureConfig::new`].
    pub fn validate(&self) -> MMResult<()> {
        let valid = |t: f64| t.is_finite() && t >= 0.0;
        if !valid(self.absolute_tolerance) || !valid(self.relative_tolerance) {
            return Err(MMError::InvalidConfiguration(
                "quadrature tolerances must be non-negative and finite".to_string(),
            ));
        }
        if self.absolute_tolerance == 0.0 && self.relative_tolerance == 0.0 {
            return Err(MMError::InvalidConfiguration(
                "at least one quadrature tolerance must be positive".to_string(),
            ));
        }
        if self.max_subdivisions == 0 {
            return Err(MMError::InvalidConfiguration(
                "max_subdivisions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            absolute_tolerance: 1e-10,
            relative_tolerance: 1e-10,
            max_subdivisions: 500,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    lower: f64,
    upper: f64,
    value: f64,
    error: f64,
}

/// Adaptive integrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quadrature {
    config: QuadratureConfig,
}

impl Quadrature {
    /// Creates an integrator with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` if the configuration is invalid.
    pub fn new(config: QuadratureConfig) -> MMResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> QuadratureConfig {
        self.config
    }

    /// Integrates `f` over the finite interval `[lower, upper]`.
    ///
    /// Reversed limits negate the result.
    ///
    /// # Errors
    ///
    /// Returns `MMError::IntegrationFailed` if a limit is not finite, the
    /// integrand produces non-finite values, or the tolerance is not met
    /// within the subdivision budget.
    pub fn integrate<F>(&self, f: F, lower: f64, upper: f64) -> MMResult<f64>
    where
        F: Fn(f64) -> f64,
    {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(failure(lower, upper, "limits must be finite"));
        }
        if lower == upper {
            return Ok(0.0);
        }
        if upper < lower {
            return self.adaptive(&f, upper, lower, (lower, upper)).map(|v| -v);
        }
        self.adaptive(&f, lower, upper, (lower, upper))
    }

    /// Integrates `f` over `[lower, ∞)`.
    ///
    /// # Errors
    ///
    /// Returns `MMError::IntegrationFailed` if `lower` is not finite, the
    /// integrand produces non-finite values, or the integral does not
    /// converge within the subdivision budget.
    pub fn integrate_to_infinity<F>(&self, f: F, lower: f64) -> MMResult<f64>
    where
        F: Fn(f64) -> f64,
    {
        if !lower.is_finite() {
            return Err(failure(lower, f64::INFINITY, "lower limit must be finite"));
        }
        let mapped = |t: f64| {
            let one_minus = 1.0 - t;
            let value = f(lower + t / one_minus);
            if value == 0.0 {
                0.0
            } else {
                value / (one_minus * one_minus)
            }
        };
        self.adaptive(&mapped, 0.0, 1.0, (lower, f64::INFINITY))
    }

    fn adaptive<F>(&self, f: &F, lower: f64, upper: f64, limits: (f64, f64)) -> MMResult<f64>
    where
        F: Fn(f64) -> f64,
    {
        let mut segments = vec![kronrod(f, lower, upper)];

        loop {
            let total: f64 = segments.iter().map(|s| s.value).sum();
            let error: f64 = segments.iter().map(|s| s.error).sum();

            if !total.is_finite() || !error.is_finite() {
                return Err(failure(limits.0, limits.1, "integrand is not finite"));
            }

            let target = self
                .config
                .absolute_tolerance
                .max(self.config.relative_tolerance * total.abs());
            if error <= target {
                return Ok(total);
            }

            if segments.len() >= self.config.max_subdivisions {
                return Err(failure(
                    limits.0,
                    limits.1,
                    &format!("subdivision limit reached with error estimate {error:e}"),
                ));
            }

            let worst = segments
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.error.total_cmp(&b.1.error))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let segment = segments.swap_remove(worst);
            let mid = 0.5 * (segment.lower + segment.upper);
            if mid <= segment.lower || mid >= segment.upper {
                return Err(failure(limits.0, limits.1, "interval too small to subdivide"));
            }
            segments.push(kronrod(f, segment.lower, mid));
            segments.push(kronrod(f, mid, segment.upper));
        }
    }
}

fn kronrod<F>(f: &F, lower: f64, upper: f64) -> Segment
where
    F: Fn(f64) -> f64,
{
    let centre = 0.5 * (lower + upper);
    let half = 0.5 * (upper - lower);
    let fc = f(centre);

    let mut gauss_sum = fc * WG[3];
    let mut kronrod_sum = fc * WGK[7];

    for (j, (&node, &weight)) in XGK.iter().zip(WGK.iter()).take(7).enumerate() {
        let dx = half * node;
        let pair = f(centre - dx) + f(centre + dx);
        kronrod_sum += weight * pair;
        if j % 2 == 1 {
            gauss_sum += WG[j / 2] * pair;
        }
    }

    Segment {
        lower,
        upper,
        value: kronrod_sum * half,
        error: ((kronrod_sum - gauss_sum) * half).abs(),
    }
}

fn failure(lower: f64, upper: f64, reason: &str) -> MMError {
    MMError::IntegrationFailed {
        lower,
        upper,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_polynomial() {
        let q = Quadrature::default();
        let value = q.integrate(|x| x * x, 0.0, 1.0).unwrap();
        assert_relative_eq!(value, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sine() {
        let q = Quadrature::default();
        let value = q.integrate(f64::sin, 0.0, PI).unwrap();
        assert_relative_eq!(value, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_reversed_limits() {
        let q = Quadrature::default();
        let value = q.integrate(|x| x, 2.0, 0.0).unwrap();
        assert_relative_eq!(value, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_interval() {
        let q = Quadrature::default();
        assert_eq!(q.integrate(|_| 1.0, 3.0, 3.0).unwrap(), 0.0);
    }

    #[test]
    fn test_exponential_tail() {
        let q = Quadrature::default();
        let value = q.integrate_to_infinity(|x| (-x).exp(), 0.0).unwrap();
        assert_relative_eq!(value, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_power_tail() {
        let q = Quadrature::default();
        let value = q.integrate_to_infinity(|x| 1.0 / (x * x), 1.0).unwrap();
        assert_relative_eq!(value, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_gaussian_tail_far_from_origin() {
        let q = Quadrature::default();
        let value = q
            .integrate_to_infinity(|x| (-(x - 50.0).powi(2) / 2.0).exp(), 50.0)
            .unwrap();
        assert_relative_eq!(value, (PI / 2.0).sqrt(), epsilon = 1e-8);
    }

    #[test]
    fn test_divergent_integral_fails() {
        let q = Quadrature::default();
        let result = q.integrate_to_infinity(|x| 1.0 / x, 1.0);
        assert!(matches!(result, Err(MMError::IntegrationFailed { .. })));
    }

    #[test]
    fn test_non_finite_integrand_fails() {
        let q = Quadrature::default();
        let result = q.integrate(|_| f64::NAN, 0.0, 1.0);
        if let Err(MMError::IntegrationFailed { reason, .. }) = result {
            assert!(reason.contains("not finite"));
        } else {
            panic!("expected IntegrationFailed");
        }
    }

    #[test]
    fn test_infinite_limit_rejected() {
        let q = Quadrature::default();
        assert!(q.integrate(|x| x, 0.0, f64::INFINITY).is_err());
        assert!(q.integrate_to_infinity(|x| x, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_subdivision_budget() {
        let config = QuadratureConfig::new(1e-14, 0.0, 1).unwrap();
        let q = Quadrature::new(config).unwrap();
        let result = q.integrate(|x| x.abs().sqrt(), -1.0, 1.0);
        if let Err(MMError::IntegrationFailed { reason, .. }) = result {
            assert!(reason.contains("subdivision limit"));
        } else {
            panic!("expected IntegrationFailed");
        }
    }

    #[test]
    fn test_invalid_config() {
        assert!(QuadratureConfig::new(-1.0, 1e-8, 10).is_err());
        assert!(QuadratureConfig::new(0.0, 0.0, 10).is_err());
        assert!(QuadratureConfig::new(1e-8, 1e-8, 0).is_err());
        assert!(QuadratureConfig::new(1e-8, f64::NAN, 10).is_err());
    }
}
