use crate::app::AccesstoAppError;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

/// true if the file extension is `gz`.
pub fn is_gzip<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false)
}

/// opens a file for reading, decompressing gzip files.
pub fn open_reader(path: &Path) -> Result<Box<dyn Read>, AccesstoAppError> {
    if !path.is_file() {
        return Err(AccesstoAppError::ReadError {
            path: path.to_path_buf(),
            message: String::from("file does not exist"),
        });
    }
    let file = File::open(path).map_err(|e| AccesstoAppError::ReadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let reader: Box<dyn Read> = if is_gzip(path) {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

/// creates (or truncates) a file for writing, compressing gzip files.
pub fn create_writer(path: &Path) -> Result<Box<dyn Write>, AccesstoAppError> {
    let file = File::create(path).map_err(|e| AccesstoAppError::WriteError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let writer: Box<dyn Write> = if is_gzip(path) {
        Box::new(GzEncoder::new(BufWriter::new(file), Compression::default()))
    } else {
        Box::new(BufWriter::new(file))
    };
    Ok(writer)
}
