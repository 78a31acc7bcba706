use thiserror::Error;

use crate::simplex::Phase;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimplexError {
    #[error("Coefficient matrix has {coefficients} rows but there are {constraints} constraint values")]
    RowCountMismatch { coefficients: usize, constraints: usize },
    #[error("Coefficient row {row} has {found} entries, expected {expected}")]
    RaggedCoefficients { row: usize, expected: usize, found: usize },
    #[error("Objective has {found} coefficients, expected {expected}")]
    ObjectiveLengthMismatch { expected: usize, found: usize },
    #[error("Constraint {row} has negative right-hand side {value}; the slack basis would be infeasible")]
    NegativeConstraint { row: usize, value: f64 },
    #[error("Non-finite value in {0}")]
    NonFiniteEntry(String),
    #[error("Tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
    #[error("Tableau is already initialized")]
    AlreadyInitialized,
    #[error("Tableau is not initialized")]
    NotInitialized,
    #[error("{0} not yet computed")]
    NotComputed(&'static str),
    #[error("Pivot column {column} has no positive entry; the problem is unbounded")]
    NoPositivePivotEntry { column: usize },
    #[error("Simplex already terminated as {0:?}")]
    Terminated(Phase),
    #[error("No terminal state reached after {0} iterations")]
    IterationLimit(usize),
}
