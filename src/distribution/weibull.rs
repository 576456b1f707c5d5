//! Weibull price distribution.
//!
//! With shape `k` and scale `λ` the density is
//!
//! ```text
//! f(x) = (k/λ) * (x/λ)^(k-1) * exp(-(x/λ)^k),   x ≥ 0
//! ```
//!
//! Large shapes give a tight, slightly left-skewed bell around `λ`, which is
//! the regime the quoting model is calibrated for.
//!
//! Density and CDF are evaluated through `z = x/λ` in log space. Computing
//! `x^k` and `λ^-k` separately overflows to `inf * 0` once `k·log10(x)`
//! passes ~308, which happens at the mode for shapes in the low hundreds.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::Distribution as _;
use statrs::distribution::Weibull;
use statrs::statistics::Distribution as _;

use super::PriceDistribution;
use crate::types::error::{MMError, MMResult};
use crate::types::primitives::{Price, Probability, Scale, Shape};

#[cfg(feature = "serde")]
use pretty_simple_display::{DebugPretty, DisplaySimple};

/// Parameters of the Weibull price distribution.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(not(feature = "serde"), derive(Debug))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize, DebugPretty, DisplaySimple))]
pub struct WeibullParams {
    /// Shape parameter (k). Must be positive.
    pub shape: Shape,

    /// Scale parameter (λ), in price units. Must be positive.
    pub scale: Scale,
}

impl WeibullParams {
    /// Creates validated Weibull parameters.
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` if `shape` or `scale` is not
    /// strictly positive and finite.
    pub fn new(shape: Shape, scale: Scale) -> MMResult<Self> {
        if !shape.is_finite() || shape <= 0.0 {
            return Err(MMError::InvalidConfiguration(
                "shape must be positive".to_string(),
            ));
        }

        if !scale.is_finite() || scale <= 0.0 {
            return Err(MMError::InvalidConfiguration(
                "scale must be positive".to_string(),
            ));
        }

        Ok(Self { shape, scale })
    }
}

/// Weibull distribution of the true price.
#[derive(Debug, Clone)]
pub struct WeibullDistribution {
    params: WeibullParams,
    moments: Weibull,
    sampler: rand_distr::Weibull<f64>,
}

impl WeibullDistribution {
    /// Builds the distribution from validated parameters.
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` if the parameters are rejected.
    pub fn new(params: WeibullParams) -> MMResult<Self> {
        let params = WeibullParams::new(params.shape, params.scale)?;
        let moments = Weibull::new(params.shape, params.scale)
            .map_err(|e| MMError::InvalidConfiguration(e.to_string()))?;
        // rand_distr takes (scale, shape)
        let sampler = rand_distr::Weibull::new(params.scale, params.shape)
            .map_err(|e| MMError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            params,
            moments,
            sampler,
        })
    }

    /// Returns the parameters this distribution was built from.
    #[must_use]
    pub fn params(&self) -> WeibullParams {
        self.params
    }

    /// `(x/λ)^k`, possibly `+inf` far out in the upper tail.
    fn standardized_power(&self, price: Price) -> f64 {
        (price / self.params.scale).powf(self.params.shape)
    }
}

impl PriceDistribution for WeibullDistribution {
    fn density(&self, price: Price) -> f64 {
        if price.is_nan() || price < 0.0 {
            return 0.0;
        }
        let WeibullParams { shape, scale } = self.params;
        if price == 0.0 {
            return match shape.partial_cmp(&1.0) {
                Some(std::cmp::Ordering::Less) => f64::INFINITY,
                Some(std::cmp::Ordering::Equal) => 1.0 / scale,
                _ => 0.0,
            };
        }

        let power = self.standardized_power(price);
        if power.is_infinite() {
            return 0.0;
        }
        let log_kernel = (shape - 1.0) * (price / scale).ln() - power;
        (shape / scale) * log_kernel.exp()
    }

    fn cdf(&self, price: Price) -> Probability {
        if price.is_nan() || price <= 0.0 {
            return 0.0;
        }
        // 1 - exp(-z^k) without cancellation for small z^k; inf maps to 1
        -(-self.standardized_power(price)).exp_m1()
    }

    fn mean(&self) -> Price {
        self.moments.mean().unwrap_or_else(|| {
            self.params.scale * statrs::function::gamma::gamma(1.0 + 1.0 / self.params.shape)
        })
    }

    fn sample(&self, n: usize, seed: u64) -> Vec<Price> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.sampler.sample_iter(&mut rng).take(n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_distribution() -> WeibullDistribution {
        WeibullDistribution::new(WeibullParams::new(10.0, 50.0).unwrap()).unwrap()
    }

    #[test]
    fn test_invalid_shape() {
        for shape in [0.0, -1.0, f64::NAN] {
            let result = WeibullParams::new(shape, 50.0);
            if let Err(MMError::InvalidConfiguration(msg)) = result {
                assert!(msg.contains("shape must be positive"));
            } else {
                panic!("expected InvalidConfiguration for shape {shape}");
            }
        }
    }

    #[test]
    fn test_invalid_scale() {
        for scale in [0.0, -50.0, f64::INFINITY] {
            let result = WeibullParams::new(10.0, scale);
            if let Err(MMError::InvalidConfiguration(msg)) = result {
                assert!(msg.contains("scale must be positive"));
            } else {
                panic!("expected InvalidConfiguration for scale {scale}");
            }
        }
    }

    #[test]
    fn test_unvalidated_params_rejected_by_distribution() {
        let params = WeibullParams {
            shape: -1.0,
            scale: 50.0,
        };
        assert!(WeibullDistribution::new(params).is_err());
    }

    #[test]
    fn test_density_zero_below_zero() {
        let dist = default_distribution();
        assert_eq!(dist.density(-0.001), 0.0);
        assert_eq!(dist.density(-1e9), 0.0);
        assert_eq!(dist.density(f64::NAN), 0.0);
    }

    #[test]
    fn test_density_non_negative_and_finite() {
        let dist = default_distribution();
        for i in 0..=1000 {
            let x = i as f64 * 0.5;
            let d = dist.density(x);
            assert!(d.is_finite(), "density at {x} not finite");
            assert!(d >= 0.0, "density at {x} negative");
        }
    }

    #[test]
    fn test_density_far_tail() {
        let dist = default_distribution();
        assert_eq!(dist.density(1e6), 0.0);
        assert_eq!(dist.density(1e15), 0.0);
        assert!(dist.density(10.0 * 50.0).is_finite());
    }

    #[test]
    fn test_density_matches_closed_form() {
        let dist = default_distribution();
        let (k, lambda) = (10.0_f64, 50.0_f64);
        let x = 47.0_f64;
        let expected = (k / lambda) * (x / lambda).powf(k - 1.0) * (-(x / lambda).powf(k)).exp();
        assert_relative_eq!(dist.density(x), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_density_and_cdf_at_scale_for_large_shapes() {
        for k in [200.0_f64, 500.0] {
            let dist = WeibullDistribution::new(WeibullParams::new(k, 50.0).unwrap()).unwrap();
            let at_mode = (k / 50.0) * (-1.0_f64).exp();
            assert_relative_eq!(dist.density(50.0), at_mode, max_relative = 1e-12);
            assert_relative_eq!(dist.cdf(50.0), 1.0 - (-1.0_f64).exp(), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_large_shape_stays_well_defined() {
        let dist = WeibullDistribution::new(WeibullParams::new(500.0, 50.0).unwrap()).unwrap();
        for i in 0..=2000 {
            let x = i as f64 * 0.25;
            let d = dist.density(x);
            let c = dist.cdf(x);
            assert!(d.is_finite() && d >= 0.0, "density at {x} is {d}");
            assert!((0.0..=1.0).contains(&c), "cdf at {x} is {c}");
        }
        assert_eq!(dist.cdf(1e6), 1.0);
        assert_eq!(dist.density(1e6), 0.0);
    }

    #[test]
    fn test_exponential_special_case() {
        let dist = WeibullDistribution::new(WeibullParams::new(1.0, 2.0).unwrap()).unwrap();
        assert_relative_eq!(dist.density(0.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(dist.mean(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cdf_bounds() {
        let dist = default_distribution();
        assert_eq!(dist.cdf(-5.0), 0.0);
        assert_eq!(dist.cdf(0.0), 0.0);
        assert_relative_eq!(dist.cdf(50.0), 1.0 - (-1.0_f64).exp(), epsilon = 1e-12);
        assert!(dist.cdf(500.0) > 0.999_999);
    }

    #[test]
    fn test_mean() {
        let dist = default_distribution();
        // λ Γ(1 + 1/k) = 50 Γ(1.1)
        assert_relative_eq!(dist.mean(), 47.5675, epsilon = 1e-3);
    }

    #[test]
    fn test_sample_reproducible() {
        let dist = default_distribution();
        let a = dist.sample(100, 42);
        let b = dist.sample(100, 42);
        assert_eq!(a.len(), 100);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_seed_changes_draws() {
        let dist = default_distribution();
        assert_ne!(dist.sample(10, 1), dist.sample(10, 2));
    }

    #[test]
    fn test_sample_empty() {
        assert!(default_distribution().sample(0, 7).is_empty());
    }

    #[test]
    fn test_sample_statistics() {
        let dist = default_distribution();
        let draws = dist.sample(20_000, 42);
        assert!(draws.iter().all(|p| p.is_finite() && *p >= 0.0));
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        assert_relative_eq!(mean, dist.mean(), epsilon = 0.2);
    }
}
