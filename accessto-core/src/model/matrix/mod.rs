//! Origin-destination matrices of travel costs or impedances.
//!
//! A [`Matrix`] is a dense table with one row per origin id and one column per
//! destination id. Unreachable pairs are stored as an explicit fill value (by
//! default `NaN`), never as a missing cell.
mod cost_matrix;
mod tall_record;

pub use cost_matrix::{Matrix, DEFAULT_FILL_VALUE, DEFAULT_MATRIX_NAME};
pub use tall_record::TallRecord;
