use crate::variable::Variable;

/// The result of running the simplex method to a terminal state
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Value of each structural variable (empty when unbounded)
    pub values: Vec<f64>,
    /// Objective value, `+inf` when unbounded
    pub objective_value: f64,
    /// Number of pivots performed
    pub iterations: usize,
    /// Basic variable of each row at termination
    pub basis: Vec<Variable>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// No negative reduced cost remains
    Optimal,
    /// An improving column has no positive entry
    Unbounded,
}

impl Solution {
    pub fn optimal(values: Vec<f64>, objective_value: f64, iterations: usize, basis: Vec<Variable>) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            values,
            objective_value,
            iterations,
            basis,
        }
    }

    pub fn unbounded(iterations: usize, basis: Vec<Variable>) -> Self {
        Self {
            status: SolutionStatus::Unbounded,
            values: Vec::new(),
            objective_value: f64::INFINITY,
            iterations,
            basis,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_has_infinite_value() {
        let solution = Solution::unbounded(2, vec![Variable::structural(0), Variable::structural(1)]);

        assert_eq!(solution.status, SolutionStatus::Unbounded);
        assert!(!solution.is_optimal());
        assert!(solution.values.is_empty());
        assert_eq!(solution.objective_value, f64::INFINITY);
    }
}
