//! Distribution helpers used by the interval and test estimators
//!
//! Thin wrappers around `statrs` that validate their arguments and map
//! construction failures onto [`Error`].

use crate::{Error, Result};

/// Distribution-related mathematical functions
pub mod distributions {
    use super::{Error, Result};

    fn check_probability(p: f64) -> Result<()> {
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::InvalidDomain(format!(
                "probability {p} must be in (0, 1)"
            )));
        }
        Ok(())
    }

    /// Standard normal distribution
    pub mod normal {
        use super::{check_probability, Error, Result};
        use statrs::distribution::{ContinuousCDF, Normal};

        /// Inverse CDF (percent point function) of N(0, 1)
        pub fn ppf(p: f64) -> Result<f64> {
            check_probability(p)?;
            let normal = Normal::new(0.0, 1.0).map_err(|e| {
                Error::Computation(format!("Failed to create normal distribution: {e}"))
            })?;
            Ok(normal.inverse_cdf(p))
        }

        /// Two-sided critical value for a confidence level, e.g. 1.96 for 0.95
        pub fn critical_value(confidence_level: f64) -> Result<f64> {
            ppf((1.0 + confidence_level) / 2.0)
        }
    }

    /// Student's t distribution
    pub mod students_t {
        use super::{check_probability, normal, Error, Result};
        use statrs::distribution::{ContinuousCDF, StudentsT};

        /// Above this many degrees of freedom the normal quantile is used;
        /// the two agree to better than 1e-4 there.
        pub const NORMAL_APPROXIMATION_DF: f64 = 1e5;

        /// Inverse CDF of a standard t distribution with `df` degrees of freedom
        pub fn ppf(p: f64, df: f64) -> Result<f64> {
            check_probability(p)?;
            if !(df > 0.0) {
                return Err(Error::InvalidDomain(format!(
                    "t distribution needs positive degrees of freedom, got {df}"
                )));
            }
            if df > NORMAL_APPROXIMATION_DF {
                return normal::ppf(p);
            }

            let t_dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
                Error::Computation(format!("Failed to create t-distribution: {e}"))
            })?;
            Ok(t_dist.inverse_cdf(p))
        }

        /// Two-sided critical value for a confidence level
        pub fn critical_value(confidence_level: f64, df: f64) -> Result<f64> {
            ppf((1.0 + confidence_level) / 2.0, df)
        }
    }

    /// Chi-squared distribution
    pub mod chi_squared {
        use super::{Error, Result};
        use statrs::distribution::{ChiSquared, ContinuousCDF};

        /// Survival function `P(X > x)` with `dof` degrees of freedom
        pub fn sf(x: f64, dof: usize) -> Result<f64> {
            if dof == 0 {
                return Err(Error::InvalidDomain(
                    "chi-squared distribution needs at least one degree of freedom".to_string(),
                ));
            }
            if x.is_nan() || x < 0.0 {
                return Err(Error::InvalidDomain(format!(
                    "chi-squared statistic must be non-negative, got {x}"
                )));
            }
            let dist = ChiSquared::new(dof as f64).map_err(|e| {
                Error::Computation(format!("Failed to create chi-squared distribution: {e}"))
            })?;
            Ok((1.0 - dist.cdf(x)).clamp(0.0, 1.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::distributions::{chi_squared, normal, students_t};

    #[test]
    fn test_normal_ppf() {
        assert!((normal::ppf(0.5).unwrap() - 0.0).abs() < 1e-10);
        assert!((normal::ppf(0.975).unwrap() - 1.959964).abs() < 1e-5);
        assert!((normal::critical_value(0.95).unwrap() - 1.959964).abs() < 1e-5);
    }

    #[test]
    fn test_normal_ppf_rejects_bounds() {
        assert!(normal::ppf(0.0).is_err());
        assert!(normal::ppf(1.0).is_err());
        assert!(normal::ppf(f64::NAN).is_err());
    }

    #[test]
    fn test_students_t_ppf() {
        // t(0.975, 4) = 2.776445
        assert!((students_t::ppf(0.975, 4.0).unwrap() - 2.776445).abs() < 1e-4);
        // t(0.975, 109) ~ 1.981967
        assert!((students_t::critical_value(0.95, 109.0).unwrap() - 1.981967).abs() < 1e-3);
    }

    #[test]
    fn test_students_t_large_df_matches_normal() {
        let t = students_t::ppf(0.975, 5e7).unwrap();
        let z = normal::ppf(0.975).unwrap();
        assert_eq!(t, z);
    }

    #[test]
    fn test_students_t_rejects_non_positive_df() {
        assert!(students_t::ppf(0.975, 0.0).is_err());
        assert!(students_t::ppf(0.975, -3.0).is_err());
    }

    #[test]
    fn test_chi_squared_sf() {
        // P(X > 3.841459) = 0.05 for one degree of freedom
        assert!((chi_squared::sf(3.841459, 1).unwrap() - 0.05).abs() < 1e-5);
        assert!((chi_squared::sf(0.0, 2).unwrap() - 1.0).abs() < 1e-12);
        assert!(chi_squared::sf(1.0, 0).is_err());
        assert!(chi_squared::sf(-1.0, 1).is_err());
    }
}
