mod impedance_function;
pub mod impedance_ops;

pub use impedance_function::ImpedanceFunction;
pub use impedance_ops::{calc_impedance_matrix, gaussian, negative_exp, within_threshold};
