//! Dual access measures, describing how reachable the nearest opportunities
//! are rather than summing over all of them.
//!
//! Each measure reduces along the rows of the cost matrix. For
//! [`Direction::ToDestinations`] the matrix is transposed first so the same
//! reduction runs once per destination.
use super::Direction;
use crate::model::{impedance::within_threshold, matrix::Matrix, AccessError, Series};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::borrow::Cow;

/// cost reported by [`closest_opportunity`] when every cost along a row is
/// unreachable (`NaN` or infinite).
pub const NO_OPPORTUNITY_COST: f64 = 10000.0;

/// 1 if any opportunity is within `threshold` cost, 0 otherwise.
///
/// keyed by origin, or by destination when `direction` is
/// [`Direction::ToDestinations`]. `threshold` must be > 0.
pub fn has_opportunity(
    cost_matrix: &Matrix,
    threshold: f64,
    direction: Direction,
) -> Result<Series, AccessError> {
    let impedance = within_threshold(cost_matrix, threshold)?;
    let oriented = orient(&impedance, direction);
    Ok(oriented.reduce_rows(
        |row| row.iter().copied().fold(0.0, f64::max),
        "has_opportunity",
    ))
}

/// cost to the closest opportunity, ignoring unreachable entries. rows with
/// no finite cost report [`NO_OPPORTUNITY_COST`].
pub fn closest_opportunity(cost_matrix: &Matrix, direction: Direction) -> Series {
    let oriented = orient(cost_matrix, direction);
    oriented.reduce_rows(
        |row| {
            row.iter()
                .copied()
                .filter(|c| c.is_finite())
                .reduce(f64::min)
                .unwrap_or(NO_OPPORTUNITY_COST)
        },
        "closest_opportunity",
    )
}

/// cost to the n-th closest opportunity, where `n = 1` would be the closest.
///
/// costs are ranked with a stable ascending sort in which `NaN` ranks after
/// every number, so the result is `NaN` when fewer than `n` opportunities are
/// reachable. `n` must be at least 2 (use [`closest_opportunity`] for the
/// closest) and no larger than the number of opportunities along each row.
pub fn nth_closest_opportunity(
    cost_matrix: &Matrix,
    n: usize,
    direction: Direction,
) -> Result<Series, AccessError> {
    if n < 2 {
        return Err(AccessError::InvalidNthOpportunity(n));
    }
    let oriented = orient(cost_matrix, direction);
    let (_, available) = oriented.shape();
    if n > available {
        return Err(AccessError::NthOpportunityOutOfRange { n, available });
    }
    Ok(oriented.reduce_rows(
        |row| nth_smallest(row, n).unwrap_or(f64::NAN),
        "nth_closest_opportunity",
    ))
}

/// n-th smallest value (1-indexed) under a total ordering that places `NaN` last.
fn nth_smallest(row: &[f64], n: usize) -> Option<f64> {
    row.iter()
        .copied()
        .map(OrderedFloat)
        .sorted()
        .nth(n.checked_sub(1)?)
        .map(|v| v.into_inner())
}

fn orient(matrix: &Matrix, direction: Direction) -> Cow<'_, Matrix> {
    match direction {
        Direction::FromOrigins => Cow::Borrowed(matrix),
        Direction::ToDestinations => Cow::Owned(matrix.transpose()),
    }
}
