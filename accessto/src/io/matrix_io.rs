use super::{fs, MatrixFormat};
use crate::app::AccesstoAppError;
use accessto_core::model::matrix::{Matrix, TallRecord};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use itertools::Itertools;
use kdam::tqdm;
use std::{io::Read, path::Path};

/// header of the origin id column in written matrix files
pub const ORIGIN_HEADER: &str = "origin_id";

/// reads a matrix from a CSV file in either tall or wide layout.
///
/// the layout is inferred from the header. if every column label after the
/// first is an integer, the file is wide:
///
/// ```text
///            , destination_id_1, destination_id_2, ...
/// origin_id_1, cost_1_1        , cost_1_2        , ...
/// origin_id_2, cost_2_1        , cost_2_2        , ...
/// ```
///
/// otherwise the file must have exactly three columns and is read as tall,
/// unstacking missing pairs with `fill_value`:
///
/// ```text
/// origin_id  , destination_id  , travel_time
/// origin_id_1, destination_id_1, cost_1
/// origin_id_2, destination_id_2, cost_2
/// ```
///
/// empty cost cells are read as `fill_value`.
pub fn read_matrix_csv(
    path: &Path,
    fill_value: f64,
    name: &str,
) -> Result<Matrix, AccesstoAppError> {
    let reader = fs::open_reader(path)?;
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|e| read_error(path, format!("failure reading headers: {e}")))?
        .clone();

    let destination_ids = headers
        .iter()
        .skip(1)
        .map(|h| h.parse::<i64>())
        .collect::<Result<Vec<_>, _>>();
    match destination_ids {
        Ok(destinations) if !destinations.is_empty() => {
            log::debug!(
                "reading '{}' as a wide matrix with {} destinations",
                path.display(),
                destinations.len()
            );
            read_wide(csv_reader, destinations, fill_value, name, path)
        }
        _ if headers.len() == 3 => {
            log::debug!("reading '{}' as a tall matrix", path.display());
            read_tall(csv_reader, fill_value, name, path)
        }
        _ => Err(AccesstoAppError::InvalidUserInput(format!(
            "invalid file format for '{}'. file has text column labels suggesting tall format, but does not have the required three columns",
            path.display()
        ))),
    }
}

/// writes a matrix as CSV in the requested layout.
pub fn write_matrix_csv(
    matrix: &Matrix,
    path: &Path,
    format: MatrixFormat,
) -> Result<(), AccesstoAppError> {
    let writer = fs::create_writer(path)?;
    let mut csv_writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    match format {
        MatrixFormat::Tall => {
            for record in matrix.to_tall() {
                csv_writer
                    .serialize(record)
                    .map_err(|e| write_error(path, e.to_string()))?;
            }
        }
        MatrixFormat::Wide => {
            let header = std::iter::once(ORIGIN_HEADER.to_string())
                .chain(matrix.destinations().iter().map(|d| d.to_string()))
                .collect_vec();
            csv_writer
                .write_record(&header)
                .map_err(|e| write_error(path, e.to_string()))?;
            for (origin, row) in matrix.rows() {
                let record = std::iter::once(origin.to_string())
                    .chain(row.iter().map(|v| v.to_string()))
                    .collect_vec();
                csv_writer
                    .write_record(&record)
                    .map_err(|e| write_error(path, e.to_string()))?;
            }
        }
    }
    csv_writer
        .flush()
        .map_err(|e| write_error(path, e.to_string()))?;
    log::info!(
        "wrote {} x {} matrix '{}' to '{}' in {format} format",
        matrix.shape().0,
        matrix.shape().1,
        matrix.name(),
        path.display()
    );
    Ok(())
}

fn read_wide(
    mut csv_reader: csv::Reader<Box<dyn Read>>,
    destinations: Vec<i64>,
    fill_value: f64,
    name: &str,
    path: &Path,
) -> Result<Matrix, AccesstoAppError> {
    let mut origins = vec![];
    let mut data = vec![];
    for row_result in csv_reader.records() {
        let row = row_result.map_err(|e| read_error(path, format!("failure reading row: {e}")))?;
        origins.push(parse_id(&row, 0, "origin", path)?);
        let values = row
            .iter()
            .skip(1)
            .map(|cell| parse_cost(cell, fill_value, path))
            .collect::<Result<Vec<_>, _>>()?;
        data.push(values);
    }
    let matrix = Matrix::new(data, origins, destinations, name)?;
    Ok(matrix)
}

fn read_tall(
    csv_reader: csv::Reader<Box<dyn Read>>,
    fill_value: f64,
    name: &str,
    path: &Path,
) -> Result<Matrix, AccesstoAppError> {
    let rows_iter = tqdm!(
        csv_reader.into_records(),
        desc = format!("read matrix {}", path.display())
    );
    let mut records = vec![];
    for row_result in rows_iter {
        let row = row_result.map_err(|e| read_error(path, format!("failure reading row: {e}")))?;
        let origin_id = parse_id(&row, 0, "origin", path)?;
        let destination_id = parse_id(&row, 1, "destination", path)?;
        let cell = row.get(2).unwrap_or_default();
        let travel_time = parse_cost(cell, fill_value, path)?;
        records.push(TallRecord::new(origin_id, destination_id, travel_time));
    }
    eprintln!();
    let matrix = Matrix::from_tall(records, fill_value, name)?;
    Ok(matrix)
}

/// reads an integer id from a cell. ids that are not integers are rejected.
fn parse_id(
    row: &StringRecord,
    index: usize,
    kind: &str,
    path: &Path,
) -> Result<i64, AccesstoAppError> {
    let cell = row
        .get(index)
        .ok_or_else(|| read_error(path, format!("row {row:?} is missing the {kind} id")))?;
    cell.parse::<i64>().map_err(|e| {
        read_error(
            path,
            format!("{kind} id '{cell}' is not an integer, ids must be integers: {e}"),
        )
    })
}

fn parse_cost(cell: &str, fill_value: f64, path: &Path) -> Result<f64, AccesstoAppError> {
    if cell.is_empty() {
        return Ok(fill_value);
    }
    cell.parse::<f64>().map_err(|e| {
        read_error(
            path,
            format!("could not read '{cell}' as an f64 (floating point value): {e}"),
        )
    })
}

fn read_error(path: &Path, message: String) -> AccesstoAppError {
    AccesstoAppError::ReadError {
        path: path.to_path_buf(),
        message,
    }
}

fn write_error(path: &Path, message: String) -> AccesstoAppError {
    AccesstoAppError::WriteError {
        path: path.to_path_buf(),
        message,
    }
}
