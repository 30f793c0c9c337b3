use crate::model::Series;
use serde::{Deserialize, Serialize};

/// result of a primal access calculation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AccessResult {
    /// access to opportunities for each origin
    PerOrigin(Series),
    /// total access across all origins, weighted by origin weights
    Aggregate(f64),
}

impl AccessResult {
    pub fn as_series(&self) -> Option<&Series> {
        match self {
            AccessResult::PerOrigin(series) => Some(series),
            AccessResult::Aggregate(_) => None,
        }
    }

    pub fn as_aggregate(&self) -> Option<f64> {
        match self {
            AccessResult::PerOrigin(_) => None,
            AccessResult::Aggregate(total) => Some(*total),
        }
    }
}
