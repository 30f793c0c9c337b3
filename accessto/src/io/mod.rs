//! File I/O for matrices, weight vectors and access results. Any path ending
//! in `.gz` is read and written with gzip compression.
pub mod fs;
mod matrix_format;
pub mod matrix_io;
pub mod series_io;
pub mod weights_io;

pub use matrix_format::MatrixFormat;
pub use matrix_io::{read_matrix_csv, write_matrix_csv};
pub use series_io::{write_series, write_series_csv};
pub use weights_io::read_weights_csv;
