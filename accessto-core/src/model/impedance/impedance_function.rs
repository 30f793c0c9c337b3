use crate::model::{matrix::Matrix, AccessError};
use serde::{Deserialize, Serialize};

/// decay models that turn a cost matrix into an impedance matrix of the same
/// shape, where higher impedance means more accessible.
///
/// parameters are validated by the constructors and again each time the
/// function is applied, so a value deserialized from configuration cannot skip
/// validation.
///
/// unreachable cells (`NaN`) produce `0` under [`ImpedanceFunction::WithinThreshold`]
/// and propagate as `NaN` through the decay models. `NaN` impedance contributes
/// nothing to access sums.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ImpedanceFunction {
    /// cumulative opportunities: 1 where cost <= threshold, 0 otherwise
    WithinThreshold {
        /// a real number > 0
        threshold: f64,
    },
    /// negative exponential gravity model: exp(beta * cost)
    NegativeExp {
        /// a real number < 0
        beta: f64,
    },
    /// gaussian gravity model: exp(-cost^2 / (2 * sigma^2))
    Gaussian {
        /// a real number > 0
        sigma: f64,
    },
}

impl ImpedanceFunction {
    pub fn within_threshold(threshold: f64) -> Result<ImpedanceFunction, AccessError> {
        let f = ImpedanceFunction::WithinThreshold { threshold };
        f.validate()?;
        Ok(f)
    }

    pub fn negative_exp(beta: f64) -> Result<ImpedanceFunction, AccessError> {
        let f = ImpedanceFunction::NegativeExp { beta };
        f.validate()?;
        Ok(f)
    }

    pub fn gaussian(sigma: f64) -> Result<ImpedanceFunction, AccessError> {
        let f = ImpedanceFunction::Gaussian { sigma };
        f.validate()?;
        Ok(f)
    }

    /// name given to impedance matrices built by this function
    pub fn matrix_name(&self) -> &'static str {
        match self {
            ImpedanceFunction::WithinThreshold { .. } => "within_threshold_impedance",
            ImpedanceFunction::NegativeExp { .. } => "neg_exp_impedance",
            ImpedanceFunction::Gaussian { .. } => "gaussian_impedance",
        }
    }

    pub fn validate(&self) -> Result<(), AccessError> {
        match self {
            // written as negated comparisons so that NaN parameters fail too
            ImpedanceFunction::WithinThreshold { threshold } if !(*threshold > 0.0) => {
                Err(AccessError::InvalidImpedanceParameter(format!(
                    "expecting positive `threshold` parameter, found {threshold}"
                )))
            }
            ImpedanceFunction::NegativeExp { beta } if !(*beta < 0.0) => {
                Err(AccessError::InvalidImpedanceParameter(format!(
                    "expecting negative `beta` parameter, found {beta}"
                )))
            }
            ImpedanceFunction::Gaussian { sigma } if !(*sigma > 0.0) => {
                Err(AccessError::InvalidImpedanceParameter(format!(
                    "expecting positive `sigma` parameter, found {sigma}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// impedance of a single cost value.
    pub fn impedance(&self, cost: f64) -> f64 {
        match self {
            ImpedanceFunction::WithinThreshold { threshold } => {
                if cost <= *threshold {
                    1.0
                } else {
                    0.0
                }
            }
            ImpedanceFunction::NegativeExp { beta } => (beta * cost).exp(),
            ImpedanceFunction::Gaussian { sigma } => (-(cost * cost) / (2.0 * sigma * sigma)).exp(),
        }
    }

    /// computes the impedance matrix for `cost`, keeping its origin and
    /// destination ids.
    pub fn apply(&self, cost: &Matrix) -> Result<Matrix, AccessError> {
        self.validate()?;
        let (n_rows, n_cols) = cost.shape();
        log::debug!(
            "applying {self} to {n_rows} x {n_cols} matrix '{}'",
            cost.name()
        );
        Ok(cost.map_values(|c| self.impedance(c), self.matrix_name()))
    }
}

impl std::fmt::Display for ImpedanceFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpedanceFunction::WithinThreshold { threshold } => {
                write!(f, "within_threshold(threshold={threshold})")
            }
            ImpedanceFunction::NegativeExp { beta } => write!(f, "negative_exp(beta={beta})"),
            ImpedanceFunction::Gaussian { sigma } => write!(f, "gaussian(sigma={sigma})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parameter_domains() {
        assert!(ImpedanceFunction::within_threshold(10.0).is_ok());
        assert!(ImpedanceFunction::within_threshold(0.0).is_err());
        assert!(ImpedanceFunction::within_threshold(-3.0).is_err());
        assert!(ImpedanceFunction::within_threshold(f64::NAN).is_err());

        assert!(ImpedanceFunction::negative_exp(-0.1).is_ok());
        assert!(ImpedanceFunction::negative_exp(0.0).is_err());
        assert!(ImpedanceFunction::negative_exp(0.5).is_err());

        assert!(ImpedanceFunction::gaussian(10.0).is_ok());
        assert!(ImpedanceFunction::gaussian(0.0).is_err());
        assert!(ImpedanceFunction::gaussian(-1.0).is_err());
    }

    #[test]
    fn test_apply_revalidates_unchecked_variants() {
        let cost = Matrix::new(vec![vec![1.0]], vec![1], vec![2], "m").unwrap();
        let f = ImpedanceFunction::Gaussian { sigma: -2.0 };
        assert!(matches!(
            f.apply(&cost),
            Err(AccessError::InvalidImpedanceParameter(_))
        ));
    }

    #[test]
    fn test_unreachable_cost_handling() {
        let t = ImpedanceFunction::within_threshold(10.0).unwrap();
        assert_eq!(t.impedance(f64::NAN), 0.0);
        assert_eq!(t.impedance(f64::INFINITY), 0.0);

        let n = ImpedanceFunction::negative_exp(-0.1).unwrap();
        assert!(n.impedance(f64::NAN).is_nan());
        assert_eq!(n.impedance(f64::INFINITY), 0.0);

        let g = ImpedanceFunction::gaussian(10.0).unwrap();
        assert!(g.impedance(f64::NAN).is_nan());
        assert_eq!(g.impedance(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_decay_is_bounded() {
        let n = ImpedanceFunction::negative_exp(-0.25).unwrap();
        let g = ImpedanceFunction::gaussian(3.0).unwrap();
        for cost in [0.0, 0.5, 1.0, 7.5, 20.0, 55.0] {
            for value in [n.impedance(cost), g.impedance(cost)] {
                assert!(value > 0.0 && value <= 1.0, "{value} out of (0, 1]");
            }
        }
        assert_relative_eq!(n.impedance(0.0), 1.0);
        assert_relative_eq!(g.impedance(0.0), 1.0);
    }

    #[test]
    fn test_deserialize_tagged() {
        let f: ImpedanceFunction =
            serde_json::from_str(r#"{"type": "negative_exp", "beta": -0.1}"#).unwrap();
        assert_eq!(f, ImpedanceFunction::NegativeExp { beta: -0.1 });
        let f: ImpedanceFunction =
            serde_json::from_str(r#"{"type": "within_threshold", "threshold": 30}"#).unwrap();
        assert_eq!(f, ImpedanceFunction::WithinThreshold { threshold: 30.0 });
    }
}
