use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// an ordered mapping from origin or destination id to a value, the output of
/// access measures. summary statistics skip `NaN` entries.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Series {
    name: String,
    values: IndexMap<i64, f64>,
}

impl Series {
    pub fn new<S, I>(name: S, values: I) -> Series
    where
        S: Into<String>,
        I: IntoIterator<Item = (i64, f64)>,
    {
        Series {
            name: name.into(),
            values: values.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    pub fn get(&self, id: i64) -> Option<f64> {
        self.values.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// middle value of the non-`NaN` entries, averaging the two middle values
    /// for an even count. `NaN` when there are no entries.
    pub fn median(&self) -> f64 {
        let mut observed = self.values().filter(|v| !v.is_nan()).collect::<Vec<_>>();
        if observed.is_empty() {
            return f64::NAN;
        }
        observed.sort_by(|a, b| a.total_cmp(b));
        let mid = observed.len() / 2;
        if observed.len() % 2 == 0 {
            (observed[mid - 1] + observed[mid]) / 2.0
        } else {
            observed[mid]
        }
    }

    /// arithmetic mean of the non-`NaN` entries, `NaN` when there are none.
    pub fn mean(&self) -> f64 {
        let (sum, count) = self
            .values()
            .filter(|v| !v.is_nan())
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            f64::NAN
        } else {
            sum / count as f64
        }
    }

    /// largest non-`NaN` entry, `NaN` when there are none.
    pub fn max(&self) -> f64 {
        self.values()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
            .unwrap_or(f64::NAN)
    }

    /// divides every entry by `divisor` following IEEE semantics, so a zero
    /// divisor yields `inf` or `NaN` entries.
    pub fn divide(&self, divisor: f64) -> Series {
        Series {
            name: self.name.clone(),
            values: self.values.iter().map(|(k, v)| (*k, v / divisor)).collect(),
        }
    }
}

impl FromIterator<(i64, f64)> for Series {
    fn from_iter<T: IntoIterator<Item = (i64, f64)>>(iter: T) -> Self {
        Series::new("", iter)
    }
}
