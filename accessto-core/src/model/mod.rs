pub mod access;
mod access_error;
pub mod impedance;
pub mod matrix;
mod series;
mod weight_vector;

pub use access_error::AccessError;
pub use series::Series;
pub use weight_vector::WeightVector;
