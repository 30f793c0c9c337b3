use super::{AccessConfig, AccesstoAppError, DualMeasure};
use crate::io::{self, MatrixFormat};
use accessto_core::model::{
    access::{self, AccessResult, Direction},
    impedance::{calc_impedance_matrix, ImpedanceFunction},
    matrix::{Matrix, DEFAULT_FILL_VALUE, DEFAULT_MATRIX_NAME},
    Series, WeightVector,
};
use std::path::Path;

/// reads a cost matrix, applies an impedance function and writes the result.
pub fn run_impedance(
    matrix_file: &Path,
    impedance_function: &ImpedanceFunction,
    output_file: &Path,
    format: MatrixFormat,
) -> Result<(), AccesstoAppError> {
    let cost_matrix = io::read_matrix_csv(matrix_file, DEFAULT_FILL_VALUE, DEFAULT_MATRIX_NAME)?;
    let impedance_matrix = calc_impedance_matrix(&cost_matrix, impedance_function)?;
    io::write_matrix_csv(&impedance_matrix, output_file, format)
}

/// runs a primal access calculation configured by a TOML file. per-origin
/// access is written as CSV, an aggregate total is printed to stdout.
pub fn run_primal(
    matrix_file: &Path,
    configuration_file: &Path,
    output_file: Option<&Path>,
) -> Result<(), AccesstoAppError> {
    let conf = AccessConfig::from_file(configuration_file)?;
    let cost_matrix = io::read_matrix_csv(matrix_file, conf.fill_value, DEFAULT_MATRIX_NAME)?;
    let result = calc_primal(&cost_matrix, &conf)?;
    match result {
        AccessResult::PerOrigin(series) => write_output(&series, output_file, &conf.name),
        AccessResult::Aggregate(total) => {
            log::info!("total access '{}' across all origins: {total}", conf.name);
            println!("{total}");
            Ok(())
        }
    }
}

/// computes primal access for an already loaded cost matrix, reading any
/// weight files named in the configuration.
pub fn calc_primal(
    cost_matrix: &Matrix,
    conf: &AccessConfig,
) -> Result<AccessResult, AccesstoAppError> {
    let destination_weights = read_optional_weights(conf.destination_weights.as_deref())?;
    let origin_weights = read_optional_weights(conf.origin_weights.as_deref())?;
    log::debug!(
        "computing access '{}' with {} and normalize={}",
        conf.name,
        conf.impedance,
        conf.normalize
    );
    let result = access::calc_access_to_opportunities(
        cost_matrix,
        &conf.impedance,
        destination_weights.as_ref(),
        origin_weights.as_ref(),
        conf.normalize,
    )?;
    let result = match result {
        AccessResult::PerOrigin(mut series) => {
            series.set_name(conf.name.clone());
            AccessResult::PerOrigin(series)
        }
        aggregate => aggregate,
    };
    Ok(result)
}

/// computes one of the dual access measures and writes the resulting series.
pub fn run_dual(
    matrix_file: &Path,
    measure: DualMeasure,
    threshold: Option<f64>,
    n: Option<usize>,
    direction: Direction,
    fill_value: f64,
    output_file: Option<&Path>,
) -> Result<(), AccesstoAppError> {
    let cost_matrix = io::read_matrix_csv(matrix_file, fill_value, DEFAULT_MATRIX_NAME)?;
    let series = calc_dual(&cost_matrix, measure, threshold, n, direction)?;
    let value_column = series.name().to_string();
    write_output(&series, output_file, &value_column)
}

pub fn calc_dual(
    cost_matrix: &Matrix,
    measure: DualMeasure,
    threshold: Option<f64>,
    n: Option<usize>,
    direction: Direction,
) -> Result<Series, AccesstoAppError> {
    log::debug!("computing dual measure {measure:?} {direction}");
    let series = match measure {
        DualMeasure::HasOpportunity => {
            let threshold = threshold.ok_or_else(|| {
                AccesstoAppError::InvalidUserInput(String::from(
                    "a threshold is required for the has-opportunity measure",
                ))
            })?;
            access::has_opportunity(cost_matrix, threshold, direction)?
        }
        DualMeasure::Closest => access::closest_opportunity(cost_matrix, direction),
        DualMeasure::NthClosest => {
            let n = n.ok_or_else(|| {
                AccesstoAppError::InvalidUserInput(String::from(
                    "n is required for the nth-closest measure",
                ))
            })?;
            access::nth_closest_opportunity(cost_matrix, n, direction)?
        }
    };
    Ok(series)
}

/// reads a matrix in either layout and writes it in `format`.
pub fn run_convert(
    matrix_file: &Path,
    output_file: &Path,
    format: MatrixFormat,
    fill_value: f64,
) -> Result<(), AccesstoAppError> {
    let matrix = io::read_matrix_csv(matrix_file, fill_value, DEFAULT_MATRIX_NAME)?;
    io::write_matrix_csv(&matrix, output_file, format)
}

fn read_optional_weights(file: Option<&str>) -> Result<Option<WeightVector>, AccesstoAppError> {
    file.map(|f| io::read_weights_csv(Path::new(f))).transpose()
}

fn write_output(
    series: &Series,
    output_file: Option<&Path>,
    value_column: &str,
) -> Result<(), AccesstoAppError> {
    match output_file {
        Some(path) => io::write_series_csv(series, path, value_column),
        None => io::write_series(series, std::io::stdout().lock(), value_column).map_err(|e| {
            AccesstoAppError::WriteError {
                path: "stdout".into(),
                message: e.to_string(),
            }
        }),
    }
}
