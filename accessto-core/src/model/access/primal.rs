//! Primal access measures: access to opportunities summed over destinations,
//! covering cumulative opportunities and weighted gravity models.
use super::{AccessResult, Normalization};
use crate::model::{
    impedance::{calc_impedance_matrix, ImpedanceFunction},
    matrix::Matrix,
    AccessError, WeightVector,
};

/// name of the per-origin series returned by [`calc_access_to_opportunities`]
pub const ACCESS_SERIES_NAME: &str = "access";

/// calculates access to opportunities for each origin of a cost matrix.
///
/// # Arguments
///
/// * `cost_matrix` - travel costs from origins (rows) to destinations (columns)
/// * `impedance_function` - decay model applied to the costs
/// * `destination_weights` - opportunity weights per destination. when absent
///   every destination has weight 1. re-indexed onto the matrix destinations,
///   missing ids count as 0.
/// * `origin_weights` - when provided, per-origin access is summed into one
///   total weighted by these values (re-indexed the same way) and `normalize`
///   is ignored.
/// * `normalize` - scaling applied to per-origin access
///
/// # Returns
///
/// Per-origin access, or the weighted total when `origin_weights` is provided.
/// `NaN` impedance (from unreachable costs) contributes nothing to either sum.
pub fn calc_access_to_opportunities(
    cost_matrix: &Matrix,
    impedance_function: &ImpedanceFunction,
    destination_weights: Option<&WeightVector>,
    origin_weights: Option<&WeightVector>,
    normalize: Normalization,
) -> Result<AccessResult, AccessError> {
    let impedance_matrix = calc_impedance_matrix(cost_matrix, impedance_function)?;

    let destination_access = match destination_weights {
        None => impedance_matrix.reduce_rows(nan_sum, ACCESS_SERIES_NAME),
        Some(weights) => {
            let weights = weights.reindex(impedance_matrix.destinations(), "destination");
            impedance_matrix.reduce_rows(|row| weighted_sum(&weights, row), ACCESS_SERIES_NAME)
        }
    };

    match origin_weights {
        Some(weights) => {
            if normalize != Normalization::None {
                log::debug!("origin weights provided, ignoring normalize={normalize}");
            }
            let weights = weights.reindex(impedance_matrix.origins(), "origin");
            let access = destination_access.values().collect::<Vec<_>>();
            Ok(AccessResult::Aggregate(weighted_sum(&weights, &access)))
        }
        None => Ok(AccessResult::PerOrigin(normalize.apply(&destination_access))),
    }
}

fn nan_sum(values: &[f64]) -> f64 {
    values.iter().filter(|v| !v.is_nan()).sum()
}

/// dot product that skips `NaN` values.
fn weighted_sum(weights: &[f64], values: &[f64]) -> f64 {
    weights
        .iter()
        .zip(values)
        .filter(|(_, v)| !v.is_nan())
        .map(|(w, v)| w * v)
        .sum()
}
