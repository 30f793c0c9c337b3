use super::ImpedanceFunction;
use crate::model::{matrix::Matrix, AccessError};

/// calculates the impedance matrix for a cost matrix under some impedance function.
pub fn calc_impedance_matrix(
    cost_matrix: &Matrix,
    impedance_function: &ImpedanceFunction,
) -> Result<Matrix, AccessError> {
    impedance_function.apply(cost_matrix)
}

/// impedance matrix assuming cumulative opportunities (1 if cost is within
/// `threshold`, 0 otherwise). `threshold` must be > 0.
pub fn within_threshold(cost_matrix: &Matrix, threshold: f64) -> Result<Matrix, AccessError> {
    ImpedanceFunction::within_threshold(threshold)?.apply(cost_matrix)
}

/// impedance matrix assuming a negative exponential decay. `beta` must be < 0.
pub fn negative_exp(cost_matrix: &Matrix, beta: f64) -> Result<Matrix, AccessError> {
    ImpedanceFunction::negative_exp(beta)?.apply(cost_matrix)
}

/// impedance matrix assuming a gaussian decay. `sigma` must be > 0.
pub fn gaussian(cost_matrix: &Matrix, sigma: f64) -> Result<Matrix, AccessError> {
    ImpedanceFunction::gaussian(sigma)?.apply(cost_matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cost_matrix() -> Matrix {
        Matrix::new(
            vec![vec![5.0, 10.0, 15.0], vec![18.0, 13.0, 8.0]],
            vec![1, 2],
            vec![20, 21, 22],
            "cost_matrix",
        )
        .expect("test invariant failed: cost matrix is valid")
    }

    fn assert_matrix_close(result: &Matrix, expected: &[[f64; 3]; 2]) {
        assert_eq!(result.origins(), &[1, 2]);
        assert_eq!(result.destinations(), &[20, 21, 22]);
        for ((_, row), expected_row) in result.rows().zip(expected.iter()) {
            for (value, expected_value) in row.iter().zip(expected_row.iter()) {
                assert_relative_eq!(*value, *expected_value, max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn test_within_threshold_3() {
        let result = within_threshold(&cost_matrix(), 3.0).unwrap();
        assert_matrix_close(&result, &[[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_within_threshold_10() {
        let result = within_threshold(&cost_matrix(), 10.0).unwrap();
        assert_matrix_close(&result, &[[1.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(result.name(), "within_threshold_impedance");
    }

    #[test]
    fn test_within_threshold_25() {
        let result = within_threshold(&cost_matrix(), 25.0).unwrap();
        assert_matrix_close(&result, &[[1.0, 1.0, 1.0], [1.0, 1.0, 1.0]]);
    }

    #[test]
    fn test_within_threshold_is_monotone() {
        let cost = cost_matrix();
        let thresholds = [1.0, 5.0, 8.0, 9.5, 13.0, 15.0, 40.0];
        for pair in thresholds.windows(2) {
            let low = within_threshold(&cost, pair[0]).unwrap();
            let high = within_threshold(&cost, pair[1]).unwrap();
            for (l, h) in low.values().iter().zip(high.values()) {
                assert!(l <= h, "threshold {} exceeds threshold {}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_negative_exp() {
        let result = negative_exp(&cost_matrix(), -0.1).unwrap();
        assert_matrix_close(
            &result,
            &[
                [0.60653066, 0.36787944, 0.22313016],
                [0.16529889, 0.27253179, 0.44932896],
            ],
        );
        assert_eq!(result.name(), "neg_exp_impedance");
    }

    #[test]
    fn test_gaussian() {
        let result = gaussian(&cost_matrix(), 10.0).unwrap();
        assert_matrix_close(
            &result,
            &[
                [0.88249690, 0.60653066, 0.32465247],
                [0.19789870, 0.42955736, 0.72614904],
            ],
        );
        assert_eq!(result.name(), "gaussian_impedance");
    }

    #[test]
    fn test_invalid_parameters() {
        let cost = cost_matrix();
        assert!(within_threshold(&cost, 0.0).is_err());
        assert!(negative_exp(&cost, 0.1).is_err());
        assert!(gaussian(&cost, 0.0).is_err());
    }

    #[test]
    fn test_input_is_unchanged() {
        let cost = cost_matrix();
        let _ = gaussian(&cost, 10.0).unwrap();
        assert_eq!(cost, cost_matrix());
        assert_eq!(cost.name(), "cost_matrix");
    }
}
