use super::TallRecord;
use crate::model::{AccessError, Series};
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashSet;

/// name given to matrices when the caller does not provide one.
pub const DEFAULT_MATRIX_NAME: &str = "matrix";

/// value written into cells of a tall table that have no record. `NaN` reads as
/// "unreachable" to the impedance functions and contributes nothing to sums.
pub const DEFAULT_FILL_VALUE: f64 = f64::NAN;

/// A dense origin-destination matrix of travel costs or impedances.
///
/// Rows are keyed by unique integer origin ids and columns by unique integer
/// destination ids. Every constructor validates that
///
///   - the data has exactly one value per (origin, destination) pair
///   - origin ids and destination ids are each unique
///   - no value is negative (`NaN` and `+inf` are accepted as "unreachable")
///
/// so downstream operations never re-validate structure. Operations never
/// mutate a matrix, they return new ones. The name is a display label only and
/// is ignored by equality.
#[derive(Clone, Debug)]
pub struct Matrix {
    name: String,
    origins: Vec<i64>,
    destinations: Vec<i64>,
    /// row-major values, `origins.len() * destinations.len()` entries
    values: Vec<f64>,
}

impl Matrix {
    /// builds a matrix from a wide grid, one inner vector per origin.
    pub fn new<S: Into<String>>(
        data: Vec<Vec<f64>>,
        origins: Vec<i64>,
        destinations: Vec<i64>,
        name: S,
    ) -> Result<Matrix, AccessError> {
        let name = name.into();
        if data.len() != origins.len() {
            return Err(AccessError::InvalidShape {
                name,
                message: format!(
                    "{} rows of data provided for {} origin ids",
                    data.len(),
                    origins.len()
                ),
            });
        }
        let n_cols = destinations.len();
        let mut values = Vec::with_capacity(origins.len() * n_cols);
        for (origin, row) in origins.iter().zip(data) {
            if row.len() != n_cols {
                return Err(AccessError::InvalidShape {
                    name,
                    message: format!(
                        "row for origin {origin} has {} values for {n_cols} destination ids",
                        row.len()
                    ),
                });
            }
            values.extend(row);
        }
        Matrix::from_row_major(values, origins, destinations, name)
    }

    /// builds a matrix from a flat row-major buffer of values.
    pub fn from_row_major<S: Into<String>>(
        values: Vec<f64>,
        origins: Vec<i64>,
        destinations: Vec<i64>,
        name: S,
    ) -> Result<Matrix, AccessError> {
        let name = name.into();
        let expected = origins.len() * destinations.len();
        if values.len() != expected {
            return Err(AccessError::InvalidShape {
                name,
                message: format!(
                    "{} values provided for {} origins by {} destinations",
                    values.len(),
                    origins.len(),
                    destinations.len()
                ),
            });
        }
        if let Some(id) = first_duplicate(&origins) {
            return Err(AccessError::DuplicateOrigin { name, id });
        }
        if let Some(id) = first_duplicate(&destinations) {
            return Err(AccessError::DuplicateDestination { name, id });
        }
        // NaN compares false here, so only real negatives (including -inf) are rejected
        if let Some(index) = values.iter().position(|v| *v < 0.0) {
            let n_cols = destinations.len();
            return Err(AccessError::NegativeValue {
                origin: origins[index / n_cols],
                destination: destinations[index % n_cols],
                value: values[index],
                name,
            });
        }
        Ok(Matrix {
            name,
            origins,
            destinations,
            values,
        })
    }

    /// unstacks a tall table of (origin, destination, cost) records into the
    /// wide form. origin and destination ids are sorted ascending and any pair
    /// without a record receives `fill_value`.
    pub fn from_tall<I, S>(records: I, fill_value: f64, name: S) -> Result<Matrix, AccessError>
    where
        I: IntoIterator<Item = TallRecord>,
        S: Into<String>,
    {
        let name = name.into();
        let records = records.into_iter().collect_vec();
        let origins = records
            .iter()
            .map(|r| r.origin_id)
            .sorted_unstable()
            .dedup()
            .collect_vec();
        let destinations = records
            .iter()
            .map(|r| r.destination_id)
            .sorted_unstable()
            .dedup()
            .collect_vec();
        let n_cols = destinations.len();
        let mut values = vec![fill_value; origins.len() * n_cols];
        let mut assigned = vec![false; values.len()];
        for record in records.iter() {
            let (row, col) = match (
                origins.binary_search(&record.origin_id),
                destinations.binary_search(&record.destination_id),
            ) {
                (Ok(row), Ok(col)) => (row, col),
                _ => {
                    return Err(AccessError::InvalidShape {
                        name,
                        message: format!(
                            "internal error, record {record:?} is missing from the unstacked index"
                        ),
                    })
                }
            };
            let index = row * n_cols + col;
            if assigned[index] {
                return Err(AccessError::DuplicatePair {
                    name,
                    origin: record.origin_id,
                    destination: record.destination_id,
                });
            }
            assigned[index] = true;
            values[index] = record.travel_time;
        }
        log::debug!(
            "unstacked {} records into a {} x {} matrix '{name}'",
            records.len(),
            origins.len(),
            n_cols
        );
        Matrix::from_row_major(values, origins, destinations, name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// replaces the display label. has no effect on the matrix contents.
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    pub fn origins(&self) -> &[i64] {
        &self.origins
    }

    pub fn destinations(&self) -> &[i64] {
        &self.destinations
    }

    /// (number of origins, number of destinations)
    pub fn shape(&self) -> (usize, usize) {
        (self.origins.len(), self.destinations.len())
    }

    /// row-major view of every cell.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// value for one origin-destination pair, if both ids exist.
    pub fn get(&self, origin: i64, destination: i64) -> Option<f64> {
        let row = self.origins.iter().position(|o| *o == origin)?;
        let col = self.destinations.iter().position(|d| *d == destination)?;
        self.values.get(row * self.destinations.len() + col).copied()
    }

    /// iterates over (origin id, row values) pairs in row order.
    pub fn rows(&self) -> impl Iterator<Item = (i64, &[f64])> + '_ {
        let n_cols = self.destinations.len();
        self.origins
            .iter()
            .enumerate()
            .map(move |(row, origin)| (*origin, &self.values[row * n_cols..(row + 1) * n_cols]))
    }

    /// swaps the roles of origins and destinations.
    pub fn transpose(&self) -> Matrix {
        let (n_rows, n_cols) = self.shape();
        let mut values = Vec::with_capacity(self.values.len());
        for col in 0..n_cols {
            for row in 0..n_rows {
                values.push(self.values[row * n_cols + col]);
            }
        }
        Matrix {
            name: self.name.clone(),
            origins: self.destinations.clone(),
            destinations: self.origins.clone(),
            values,
        }
    }

    /// stacks the matrix into one record per cell, in row order. unreachable
    /// cells are kept so the tall form unstacks back into an identical matrix.
    pub fn to_tall(&self) -> Vec<TallRecord> {
        self.rows()
            .flat_map(|(origin, row)| {
                self.destinations
                    .iter()
                    .zip(row)
                    .map(move |(destination, value)| TallRecord::new(origin, *destination, *value))
            })
            .collect_vec()
    }

    /// applies an element-wise transform, keeping the ids. the transform must
    /// not produce negative values.
    pub(crate) fn map_values<F>(&self, op: F, name: &str) -> Matrix
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        let values = self.values.par_iter().map(|v| op(*v)).collect::<Vec<_>>();
        Matrix {
            name: name.to_string(),
            origins: self.origins.clone(),
            destinations: self.destinations.clone(),
            values,
        }
    }

    /// reduces each row to a single value, producing a series keyed by origin.
    pub(crate) fn reduce_rows<F>(&self, op: F, name: &str) -> Series
    where
        F: Fn(&[f64]) -> f64 + Sync + Send,
    {
        let n_cols = self.destinations.len();
        let reduced: Vec<f64> = if n_cols == 0 {
            self.origins.iter().map(|_| op(&[])).collect()
        } else {
            self.values.par_chunks(n_cols).map(&op).collect()
        };
        Series::new(name, self.origins.iter().copied().zip(reduced))
    }
}

impl PartialEq for Matrix {
    /// matrices are equal when ids and values match. `NaN` cells at the same
    /// position are equal and names are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.origins == other.origins
            && self.destinations == other.destinations
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }
}

fn first_duplicate(ids: &[i64]) -> Option<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().find(|id| !seen.insert(**id)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_matrix() -> Matrix {
        Matrix::new(
            vec![vec![5.0, 10.0, 15.0], vec![18.0, 13.0, 8.0]],
            vec![1, 2],
            vec![20, 21, 22],
            "cost_matrix",
        )
        .expect("test invariant failed: reference matrix is valid")
    }

    #[test]
    fn test_new_wide_matrix() {
        let m = reference_matrix();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.origins(), &[1, 2]);
        assert_eq!(m.destinations(), &[20, 21, 22]);
        assert_eq!(m.get(2, 21), Some(13.0));
        assert_eq!(m.get(3, 21), None);
        assert_eq!(m.name(), "cost_matrix");
    }

    #[test]
    fn test_negative_value_rejected() {
        let result = Matrix::new(vec![vec![1.0, -2.0]], vec![1], vec![10, 11], "m");
        match result {
            Err(AccessError::NegativeValue {
                origin,
                destination,
                value,
                ..
            }) => {
                assert_eq!(origin, 1);
                assert_eq!(destination, 11);
                assert_eq!(value, -2.0);
            }
            other => panic!("expected NegativeValue, found {other:?}"),
        }
    }

    #[test]
    fn test_negative_infinity_rejected() {
        let result = Matrix::new(vec![vec![f64::NEG_INFINITY]], vec![1], vec![10], "m");
        assert!(matches!(result, Err(AccessError::NegativeValue { .. })));
    }

    #[test]
    fn test_unreachable_values_accepted() {
        let m = Matrix::new(vec![vec![f64::NAN, f64::INFINITY]], vec![1], vec![10, 11], "m")
            .expect("NaN and +inf are valid unreachable markers");
        assert!(m.get(1, 10).unwrap().is_nan());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dup_origin = Matrix::new(vec![vec![1.0], vec![2.0]], vec![4, 4], vec![10], "m");
        assert!(matches!(
            dup_origin,
            Err(AccessError::DuplicateOrigin { id: 4, .. })
        ));
        let dup_dest = Matrix::new(vec![vec![1.0, 2.0]], vec![1], vec![7, 7], "m");
        assert!(matches!(
            dup_dest,
            Err(AccessError::DuplicateDestination { id: 7, .. })
        ));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Matrix::new(vec![vec![1.0, 2.0], vec![3.0]], vec![1, 2], vec![10, 11], "m");
        assert!(matches!(result, Err(AccessError::InvalidShape { .. })));
        let result = Matrix::new(vec![vec![1.0]], vec![1, 2], vec![10], "m");
        assert!(matches!(result, Err(AccessError::InvalidShape { .. })));
    }

    #[test]
    fn test_from_tall_sorts_and_fills() {
        let records = vec![
            TallRecord::new(2, 21, 13.0),
            TallRecord::new(1, 20, 5.0),
            TallRecord::new(1, 21, 10.0),
            TallRecord::new(2, 20, 18.0),
            TallRecord::new(1, 22, 15.0),
        ];
        let m = Matrix::from_tall(records, 999.99, "tall").expect("valid tall table");
        assert_eq!(m.origins(), &[1, 2]);
        assert_eq!(m.destinations(), &[20, 21, 22]);
        assert_eq!(m.get(1, 21), Some(10.0));
        assert_eq!(m.get(2, 22), Some(999.99));
    }

    #[test]
    fn test_from_tall_default_fill_is_nan() {
        let records = vec![TallRecord::new(1, 20, 5.0), TallRecord::new(2, 21, 6.0)];
        let m = Matrix::from_tall(records, DEFAULT_FILL_VALUE, DEFAULT_MATRIX_NAME)
            .expect("valid tall table");
        assert!(m.get(1, 21).unwrap().is_nan());
        assert!(m.get(2, 20).unwrap().is_nan());
    }

    #[test]
    fn test_from_tall_duplicate_pair_rejected() {
        let records = vec![TallRecord::new(1, 20, 5.0), TallRecord::new(1, 20, 6.0)];
        let result = Matrix::from_tall(records, DEFAULT_FILL_VALUE, "m");
        assert!(matches!(
            result,
            Err(AccessError::DuplicatePair {
                origin: 1,
                destination: 20,
                ..
            })
        ));
    }

    #[test]
    fn test_tall_wide_round_trip() {
        let mut m = reference_matrix();
        m.set_name("renamed");
        let tall = m.to_tall();
        assert_eq!(tall.len(), 6);
        assert_eq!(tall[5], TallRecord::new(2, 22, 8.0));
        let back = Matrix::from_tall(tall, DEFAULT_FILL_VALUE, "back").expect("round trip");
        assert_eq!(back, m);
    }

    #[test]
    fn test_round_trip_keeps_unreachable_cells() {
        let m = Matrix::new(vec![vec![f64::NAN, 3.0]], vec![1], vec![10, 11], "m").unwrap();
        let back = Matrix::from_tall(m.to_tall(), 0.0, "m").unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_transpose() {
        let t = reference_matrix().transpose();
        assert_eq!(t.origins(), &[20, 21, 22]);
        assert_eq!(t.destinations(), &[1, 2]);
        assert_eq!(t.get(22, 2), Some(8.0));
        assert_eq!(t.transpose(), reference_matrix());
    }

    #[test]
    fn test_equality_ignores_name() {
        let a = reference_matrix();
        let mut b = a.clone();
        b.set_name("other");
        assert_eq!(a, b);
    }

    #[test]
    fn test_reduce_rows_without_destinations() {
        let m = Matrix::new(vec![vec![], vec![]], vec![1, 2], vec![], "empty").unwrap();
        let sums = m.reduce_rows(|row| row.iter().sum(), "sum");
        assert_eq!(sums.get(1), Some(0.0));
        assert_eq!(sums.len(), 2);
    }
}
