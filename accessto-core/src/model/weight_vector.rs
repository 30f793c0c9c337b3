use crate::model::AccessError;
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::HashSet;

/// non-negative weights for a set of origin or destination ids, such as
/// population at origins or job counts at destinations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightVector {
    weights: IndexMap<i64, f64>,
}

impl WeightVector {
    /// builds a weight vector, rejecting duplicate ids and any weight that is
    /// negative or `NaN`.
    pub fn new<I>(weights: I) -> Result<WeightVector, AccessError>
    where
        I: IntoIterator<Item = (i64, f64)>,
    {
        let mut result = IndexMap::new();
        for (id, weight) in weights {
            if weight.is_nan() || weight < 0.0 {
                return Err(AccessError::InvalidWeight { id, value: weight });
            }
            if result.insert(id, weight).is_some() {
                return Err(AccessError::DuplicateWeight(id));
            }
        }
        Ok(WeightVector { weights: result })
    }

    pub fn get(&self, id: i64) -> Option<f64> {
        self.weights.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.weights.iter().map(|(k, v)| (*k, *v))
    }

    /// true when this vector holds exactly the ids found along `axis`.
    pub fn matches_axis(&self, axis: &[i64]) -> bool {
        self.weights.len() == axis.len() && axis.iter().all(|id| self.weights.contains_key(id))
    }

    /// lines the weights up with the ids of a matrix axis. ids on the axis that
    /// have no weight receive 0, and weights for ids not on the axis are
    /// dropped. either case is logged as a warning but is not an error.
    pub fn reindex(&self, axis: &[i64], axis_name: &str) -> Vec<f64> {
        if !self.matches_axis(axis) {
            let axis_ids: HashSet<&i64> = axis.iter().collect();
            let missing = axis
                .iter()
                .filter(|id| !self.weights.contains_key(*id))
                .count();
            let unused = self
                .weights
                .keys()
                .filter(|id| !axis_ids.contains(id))
                .collect_vec();
            log::warn!(
                "reindexing {axis_name} weights vector to match cost matrix {axis_name} ids: {missing} ids have no weight and are assigned 0, {} weights are unused",
                unused.len()
            );
            if !unused.is_empty() {
                log::debug!("unused {axis_name} weight ids: {unused:?}");
            }
        }
        axis.iter()
            .map(|id| self.weights.get(id).copied().unwrap_or(0.0))
            .collect_vec()
    }
}
