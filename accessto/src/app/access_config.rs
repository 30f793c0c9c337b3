use super::AccesstoAppError;
use accessto_core::model::{
    access::{Normalization, ACCESS_SERIES_NAME},
    impedance::ImpedanceFunction,
    matrix::DEFAULT_FILL_VALUE,
};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// configuration of a primal access run, read from a TOML file:
///
/// ```toml
/// name = "jobs_access"
/// normalize = "median"
/// destination_weights = "jobs.csv"
/// origin_weights = "population.csv"
///
/// [impedance]
/// type = "gaussian"
/// sigma = 10.0
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AccessConfig {
    /// label for the per-origin output column
    #[serde(default = "default_name")]
    pub name: String,
    pub impedance: ImpedanceFunction,
    #[serde(default)]
    pub normalize: Normalization,
    /// value used for origin-destination pairs missing from a tall matrix file
    #[serde(default = "default_fill_value")]
    pub fill_value: f64,
    /// CSV file of `id,weight` rows for destinations
    #[serde(default)]
    pub destination_weights: Option<String>,
    /// CSV file of `id,weight` rows for origins. when set, access is summed
    /// over all origins into one value.
    #[serde(default)]
    pub origin_weights: Option<String>,
}

impl AccessConfig {
    /// reads and validates a configuration file.
    pub fn from_file(path: &Path) -> Result<AccessConfig, AccesstoAppError> {
        let config = Config::builder()
            .add_source(File::from(path))
            .build()
            .map_err(|e| {
                let msg = format!("file '{}' produced error: {e}", path.display());
                AccesstoAppError::InvalidUserInput(msg)
            })?;
        let access_config = config.try_deserialize::<AccessConfig>().map_err(|e| {
            let msg = format!("error reading access configuration '{}': {e}", path.display());
            AccesstoAppError::InvalidUserInput(msg)
        })?;
        access_config.impedance.validate().map_err(|e| {
            let msg = format!("invalid impedance in '{}': {e}", path.display());
            AccesstoAppError::InvalidUserInput(msg)
        })?;
        Ok(access_config)
    }
}

fn default_name() -> String {
    String::from(ACCESS_SERIES_NAME)
}

fn default_fill_value() -> f64 {
    DEFAULT_FILL_VALUE
}
