mod error;
mod problem;
mod simplex;
mod snapshot;
mod solution;
mod variable;

pub use error::SimplexError;
pub use problem::LpProblem;
pub use simplex::{Phase, Simplex};
pub use snapshot::{Step, TableauSnapshot};
pub use solution::{Solution, SolutionStatus};
pub use variable::Variable;
