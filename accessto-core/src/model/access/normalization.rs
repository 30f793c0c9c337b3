use crate::model::{AccessError, Series};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// how per-origin access values are scaled before being returned.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// return raw access values
    #[default]
    None,
    /// divide by the median access value
    Median,
    /// divide by the mean access value
    Average,
    /// divide by the highest access value
    Maximum,
}

impl Normalization {
    /// scales `access` by the selected statistic. a zero statistic is not
    /// special-cased, producing `inf`/`NaN` entries.
    pub fn apply(&self, access: &Series) -> Series {
        let divisor = match self {
            Normalization::None => return access.clone(),
            Normalization::Median => access.median(),
            Normalization::Average => access.mean(),
            Normalization::Maximum => access.max(),
        };
        if divisor == 0.0 {
            log::warn!("normalizing access by {self} which is 0, results will be inf or NaN");
        }
        access.divide(divisor)
    }
}

impl FromStr for Normalization {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Normalization::None),
            "median" => Ok(Normalization::Median),
            "average" => Ok(Normalization::Average),
            "maximum" => Ok(Normalization::Maximum),
            other => Err(AccessError::InvalidNormalization(other.to_string())),
        }
    }
}

impl std::fmt::Display for Normalization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = serde_json::to_string(self)
            .unwrap_or(String::from(""))
            .replace('\"', "");
        write!(f, "{s}")
    }
}
