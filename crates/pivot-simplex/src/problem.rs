use crate::error::SimplexError;

/// A linear program in standard form:
/// maximize `objective · x` subject to `coefficients · x <= constraints`, `x >= 0`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    /// Constraint matrix, one row per constraint
    pub coefficients: Vec<Vec<f64>>,
    /// Right-hand side of each constraint
    pub constraints: Vec<f64>,
    /// Objective coefficients (maximized)
    pub objective: Vec<f64>,
}

impl LpProblem {
    pub fn new(objective: Vec<f64>) -> Self {
        Self {
            coefficients: Vec::new(),
            constraints: Vec::new(),
            objective,
        }
    }

    pub fn add_constraint(&mut self, coefficients: Vec<f64>, rhs: f64) {
        self.coefficients.push(coefficients);
        self.constraints.push(rhs);
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Check the shapes and signs the slack basis relies on
    pub fn validate(&self) -> Result<(), SimplexError> {
        let n_vars = self.num_variables();

        if self.coefficients.len() != self.constraints.len() {
            return Err(SimplexError::RowCountMismatch {
                coefficients: self.coefficients.len(),
                constraints: self.constraints.len(),
            });
        }

        // the first row fixes the column count; the objective must match it
        let width = self.coefficients.first().map_or(n_vars, |row| row.len());
        if width != n_vars {
            return Err(SimplexError::ObjectiveLengthMismatch {
                expected: width,
                found: n_vars,
            });
        }

        for (i, row) in self.coefficients.iter().enumerate() {
            if row.len() != width {
                return Err(SimplexError::RaggedCoefficients {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(SimplexError::NonFiniteEntry(format!("coefficient row {}", i)));
            }
        }

        if self.objective.iter().any(|v| !v.is_finite()) {
            return Err(SimplexError::NonFiniteEntry("objective".to_string()));
        }

        for (i, &rhs) in self.constraints.iter().enumerate() {
            if !rhs.is_finite() {
                return Err(SimplexError::NonFiniteEntry(format!("constraint {}", i)));
            }
            if rhs < 0.0 {
                return Err(SimplexError::NegativeConstraint { row: i, value: rhs });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook() -> LpProblem {
        let mut problem = LpProblem::new(vec![3.0, 2.0]);
        problem.add_constraint(vec![1.0, 1.0], 4.0);
        problem.add_constraint(vec![1.0, -1.0], 2.0);
        problem
    }

    #[test]
    fn test_builder_dimensions() {
        let problem = textbook();
        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.num_constraints(), 2);
        assert_eq!(problem.validate(), Ok(()));
    }

    #[test]
    fn test_negative_rhs_rejected() {
        let mut problem = textbook();
        problem.add_constraint(vec![1.0, 0.0], -1.0);
        assert_eq!(
            problem.validate(),
            Err(SimplexError::NegativeConstraint { row: 2, value: -1.0 })
        );
    }

    #[test]
    fn test_ragged_row_rejected() {
        let mut problem = textbook();
        problem.add_constraint(vec![1.0], 1.0);
        assert_eq!(
            problem.validate(),
            Err(SimplexError::RaggedCoefficients { row: 2, expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_objective_length_mismatch_rejected() {
        let mut problem = textbook();
        problem.objective.push(1.0);
        assert_eq!(
            problem.validate(),
            Err(SimplexError::ObjectiveLengthMismatch { expected: 2, found: 3 })
        );
    }

    #[test]
    fn test_row_count_mismatch_rejected() {
        let mut problem = textbook();
        problem.constraints.pop();
        assert!(matches!(
            problem.validate(),
            Err(SimplexError::RowCountMismatch { coefficients: 2, constraints: 1 })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut problem = textbook();
        problem.objective[1] = f64::NAN;
        assert!(matches!(problem.validate(), Err(SimplexError::NonFiniteEntry(_))));
    }
}
