use super::fs;
use crate::app::AccesstoAppError;
use accessto_core::model::Series;
use std::{io::Write, path::Path};

/// header of the id column in written series files
pub const ID_HEADER: &str = "id";

/// writes a series as two CSV columns, `id` and `value_column`.
pub fn write_series<W: Write>(
    series: &Series,
    writer: W,
    value_column: &str,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);
    csv_writer.write_record([ID_HEADER, value_column])?;
    for (id, value) in series.iter() {
        csv_writer.write_record([id.to_string(), value.to_string()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// writes a series to a CSV file, see [`write_series`].
pub fn write_series_csv(
    series: &Series,
    path: &Path,
    value_column: &str,
) -> Result<(), AccesstoAppError> {
    let writer = fs::create_writer(path)?;
    write_series(series, writer, value_column).map_err(|e| AccesstoAppError::WriteError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    log::info!("wrote {} rows to '{}'", series.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_series() {
        let series = Series::new("closest", vec![(1, 5.0), (2, 8.5)]);
        let mut buffer = vec![];
        write_series(&series, &mut buffer, "closest").unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "id,closest\n1,5\n2,8.5\n");
    }
}
