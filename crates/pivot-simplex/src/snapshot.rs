use crate::simplex::Phase;
use crate::variable::Variable;

/// Owned copy of everything needed to draw one tableau
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TableauSnapshot {
    pub phase: Phase,
    /// Pivots performed so far
    pub iteration: usize,
    /// Number of structural (non-slack) columns
    pub num_variables: usize,
    pub coefficients: Vec<Vec<f64>>,
    pub objective: Vec<f64>,
    pub basis_variables: Vec<Variable>,
    pub basis_objective: Vec<f64>,
    pub basis_solution: Vec<f64>,
    pub basis_value: f64,
    /// `None` until computed for the current tableau
    pub reduced_costs: Option<Vec<f64>>,
    pub least_positive_ratio: Option<Vec<f64>>,
    pub pivot_row_index: Option<usize>,
    pub pivot_column_index: Option<usize>,
}

impl TableauSnapshot {
    /// Label of every column, structural first
    pub fn column_variables(&self) -> Vec<Variable> {
        let n_cols = self.objective.len();
        (0..n_cols)
            .map(|j| {
                if j < self.num_variables {
                    Variable::structural(j)
                } else {
                    Variable::slack(j - self.num_variables)
                }
            })
            .collect()
    }

    pub fn pivot(&self) -> Option<(usize, usize)> {
        self.pivot_row_index.zip(self.pivot_column_index)
    }
}

/// The engine step that produced a snapshot
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Slack columns added and slack basis in place
    Initial,
    ReducedCosts,
    /// Entering column and leaving row chosen
    PivotSelected,
    /// Pivot row scaled and pivot column eliminated
    Pivoted,
    /// Basis label and objective updated, basis value recomputed
    BasisSwapped,
    Optimal,
    Unbounded,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplex::Simplex;

    #[test]
    fn test_snapshot_of_initial_tableau() {
        let mut simplex = Simplex::new(
            vec![vec![1.0, 1.0], vec![3.0, -8.0], vec![10.0, 7.0]],
            vec![4.0, 24.0, 35.0],
            vec![5.0, 7.0],
        )
        .unwrap();
        simplex.initialize_tableau().unwrap();
        let snapshot = simplex.snapshot();

        assert_eq!(snapshot.phase, Phase::Evaluating);
        assert_eq!(snapshot.iteration, 0);
        assert_eq!(snapshot.reduced_costs, None);
        assert_eq!(snapshot.pivot(), None);
        assert_eq!(
            snapshot.column_variables(),
            vec![
                Variable::structural(0),
                Variable::structural(1),
                Variable::slack(0),
                Variable::slack(1),
                Variable::slack(2),
            ]
        );
    }

    #[test]
    fn test_snapshot_is_detached_from_engine() {
        let mut simplex = Simplex::new(vec![vec![1.0, 1.0], vec![1.0, -1.0]], vec![4.0, 2.0], vec![3.0, 2.0]).unwrap();
        simplex.initialize_tableau().unwrap();
        simplex.calculate_reduced_costs().unwrap();
        let before = simplex.snapshot();

        simplex.pivot().unwrap();

        assert_eq!(before.basis_solution, vec![4.0, 2.0]);
        assert_eq!(before.pivot(), None);
        assert_eq!(simplex.snapshot().pivot(), Some((1, 0)));
    }
}
