use super::{commands, AccesstoAppError};
use crate::io::MatrixFormat;
use accessto_core::model::{access::Direction, impedance::ImpedanceFunction, AccessError};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Command line tool for computing access to opportunities from travel cost matrices
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct AccesstoApp {
    #[command(subcommand)]
    pub op: AccesstoOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum AccesstoOperation {
    /// compute the impedance matrix of a cost matrix
    Impedance {
        /// cost matrix CSV file, tall or wide
        #[arg(short, long)]
        matrix: String,

        /// impedance function to apply
        #[arg(short, long, value_enum)]
        function: ImpedanceKind,

        /// threshold, beta or sigma parameter of the impedance function
        #[arg(short, long, allow_hyphen_values(true))]
        parameter: f64,

        /// file to write the impedance matrix to
        #[arg(short, long)]
        output: String,

        /// layout of the output file
        #[arg(long, value_enum, default_value_t = MatrixFormat::Tall)]
        format: MatrixFormat,
    },
    /// compute access to opportunities (cumulative or gravity measures)
    Primal {
        /// cost matrix CSV file, tall or wide
        #[arg(short, long)]
        matrix: String,

        /// TOML file configuring the impedance function, weights and normalization
        #[arg(short, long)]
        configuration_file: String,

        /// file to write per-origin access to. if not provided, write CSV to stdout.
        #[arg(short, long)]
        output: Option<String>,
    },
    /// compute a dual access measure for each origin (or destination)
    Dual {
        /// cost matrix CSV file, tall or wide
        #[arg(short, long)]
        matrix: String,

        /// the measure to compute
        #[arg(long, value_enum)]
        measure: DualMeasure,

        /// cost threshold, required by has-opportunity
        #[arg(short, long)]
        threshold: Option<f64>,

        /// rank of the opportunity, required by nth-closest
        #[arg(short, long)]
        n: Option<usize>,

        /// compute the measure for each destination instead of each origin
        #[arg(short, long)]
        reverse: bool,

        /// value used for origin-destination pairs missing from a tall matrix file
        #[arg(long, default_value_t = f64::NAN)]
        fill_value: f64,

        /// file to write the results to. if not provided, write CSV to stdout.
        #[arg(short, long)]
        output: Option<String>,
    },
    /// rewrite a matrix file in tall or wide layout
    Convert {
        /// matrix CSV file, tall or wide
        #[arg(short, long)]
        matrix: String,

        /// file to write the converted matrix to
        #[arg(short, long)]
        output: String,

        /// layout of the output file
        #[arg(short, long, value_enum)]
        format: MatrixFormat,

        /// value used for origin-destination pairs missing from a tall matrix file
        #[arg(long, default_value_t = f64::NAN)]
        fill_value: f64,
    },
}

/// impedance functions selectable from the command line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ImpedanceKind {
    WithinThreshold,
    NegativeExp,
    Gaussian,
}

impl ImpedanceKind {
    /// builds the impedance function, validating `parameter`.
    pub fn build(&self, parameter: f64) -> Result<ImpedanceFunction, AccessError> {
        match self {
            ImpedanceKind::WithinThreshold => ImpedanceFunction::within_threshold(parameter),
            ImpedanceKind::NegativeExp => ImpedanceFunction::negative_exp(parameter),
            ImpedanceKind::Gaussian => ImpedanceFunction::gaussian(parameter),
        }
    }
}

/// dual access measures selectable from the command line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DualMeasure {
    /// 1 if any opportunity is within the threshold, 0 otherwise
    HasOpportunity,
    /// cost to the closest opportunity
    Closest,
    /// cost to the n-th closest opportunity
    NthClosest,
}

impl AccesstoOperation {
    pub fn run(&self) -> Result<(), AccesstoAppError> {
        match self {
            AccesstoOperation::Impedance {
                matrix,
                function,
                parameter,
                output,
                format,
            } => {
                let impedance_function = function.build(*parameter)?;
                commands::run_impedance(
                    Path::new(matrix),
                    &impedance_function,
                    Path::new(output),
                    *format,
                )
            }
            AccesstoOperation::Primal {
                matrix,
                configuration_file,
                output,
            } => commands::run_primal(
                Path::new(matrix),
                Path::new(configuration_file),
                output.as_ref().map(Path::new),
            ),
            AccesstoOperation::Dual {
                matrix,
                measure,
                threshold,
                n,
                reverse,
                fill_value,
                output,
            } => commands::run_dual(
                Path::new(matrix),
                *measure,
                *threshold,
                *n,
                Direction::new(*reverse),
                *fill_value,
                output.as_ref().map(Path::new),
            ),
            AccesstoOperation::Convert {
                matrix,
                output,
                format,
                fill_value,
            } => commands::run_convert(Path::new(matrix), Path::new(output), *format, *fill_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dual_args() {
        let app = AccesstoApp::try_parse_from([
            "accessto",
            "dual",
            "--matrix",
            "cost.csv",
            "--measure",
            "nth-closest",
            "--n",
            "3",
            "--reverse",
        ])
        .expect("arguments should parse");
        match app.op {
            AccesstoOperation::Dual {
                measure,
                n,
                reverse,
                threshold,
                ..
            } => {
                assert_eq!(measure, DualMeasure::NthClosest);
                assert_eq!(n, Some(3));
                assert!(reverse);
                assert_eq!(threshold, None);
            }
            _ => panic!("expected dual operation"),
        }
    }

    #[test]
    fn test_parse_negative_beta() {
        let app = AccesstoApp::try_parse_from([
            "accessto",
            "impedance",
            "--matrix",
            "cost.csv",
            "--function",
            "negative-exp",
            "--parameter",
            "-0.1",
            "--output",
            "out.csv",
        ])
        .expect("arguments should parse");
        match app.op {
            AccesstoOperation::Impedance {
                function,
                parameter,
                format,
                ..
            } => {
                assert_eq!(function, ImpedanceKind::NegativeExp);
                assert_eq!(parameter, -0.1);
                assert_eq!(format, MatrixFormat::Tall);
                assert!(function.build(parameter).is_ok());
            }
            _ => panic!("expected impedance operation"),
        }
    }

    #[test]
    fn test_impedance_kind_validates_parameter() {
        assert!(ImpedanceKind::Gaussian.build(0.0).is_err());
        assert!(ImpedanceKind::WithinThreshold.build(-5.0).is_err());
    }
}
