use super::fs;
use crate::app::AccesstoAppError;
use accessto_core::model::WeightVector;
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// reads a weight vector from a two column CSV file of `id,weight` rows. the
/// header row is required but its labels are not checked.
pub fn read_weights_csv(path: &Path) -> Result<WeightVector, AccesstoAppError> {
    let reader = fs::open_reader(path)?;
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let mut weights = vec![];
    for row_result in csv_reader.records() {
        let row = row_result.map_err(|e| AccesstoAppError::ReadError {
            path: path.to_path_buf(),
            message: format!("failure reading row: {e}"),
        })?;
        let (id, weight) = match (row.get(0), row.get(1), row.len()) {
            (Some(id), Some(weight), 2) => (id, weight),
            _ => {
                return Err(AccesstoAppError::ReadError {
                    path: path.to_path_buf(),
                    message: format!("expected rows with two columns 'id,weight', found {row:?}"),
                })
            }
        };
        let id = id.parse::<i64>().map_err(|e| AccesstoAppError::ReadError {
            path: path.to_path_buf(),
            message: format!("weight id '{id}' is not an integer: {e}"),
        })?;
        let weight = weight.parse::<f64>().map_err(|e| AccesstoAppError::ReadError {
            path: path.to_path_buf(),
            message: format!("could not read weight '{weight}' for id {id}: {e}"),
        })?;
        weights.push((id, weight));
    }
    log::debug!("read {} weights from '{}'", weights.len(), path.display());
    let result = WeightVector::new(weights)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_weights() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        std::fs::write(&path, "id,jobs\n20,1\n21,3.5\n22,5\n").unwrap();
        let weights = read_weights_csv(&path).unwrap();
        assert_eq!(weights.len(), 3);
        assert_eq!(weights.get(21), Some(3.5));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "id,weight\n1,-2\n").unwrap();
        assert!(matches!(
            read_weights_csv(&path),
            Err(AccesstoAppError::Access(_))
        ));
    }

    #[test]
    fn test_non_integer_id_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "id,weight\nabc,2\n").unwrap();
        assert!(matches!(
            read_weights_csv(&path),
            Err(AccesstoAppError::ReadError { .. })
        ));
    }
}
