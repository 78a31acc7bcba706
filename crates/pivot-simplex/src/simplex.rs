use log::{debug, trace};

use crate::error::SimplexError;
use crate::problem::LpProblem;
use crate::snapshot::{Step, TableauSnapshot};
use crate::solution::Solution;
use crate::variable::Variable;

/// Where the engine is in the tableau simplex cycle
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Slack columns and basis not yet in place
    Uninitialized,
    /// Tableau ready, reduced costs need (re)computing
    Evaluating,
    /// A negative reduced cost with a bounded ratio test remains
    NeedsPivot,
    Optimal,
    Unbounded,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Optimal | Phase::Unbounded)
    }
}

/// Dense tableau simplex for `max c·x` s.t. `Ax <= b`, `x >= 0`, `b >= 0`.
///
/// Every step of the method is a separate mutator so a caller can inspect
/// the tableau between steps. `run` and `run_with` drive the full cycle.
#[derive(Debug, Clone)]
pub struct Simplex {
    coefficients: Vec<Vec<f64>>,
    constraints: Vec<f64>,
    objective: Vec<f64>,
    /// Structural column count, fixed at construction
    num_variables: usize,
    basis_size: usize,
    basis_variables: Vec<Variable>,
    basis_objective: Vec<f64>,
    basis_solution: Vec<f64>,
    basis_value: f64,
    reduced_costs: Option<Vec<f64>>,
    least_positive_ratio: Option<Vec<f64>>,
    pivot_row_index: Option<usize>,
    pivot_column_index: Option<usize>,
    solution: Option<Vec<f64>>,
    value: Option<f64>,
    slack_added: bool,
    phase: Phase,
    iterations: usize,
    /// Maximum pivots before giving up
    max_iterations: usize,
    /// Tolerance for sign tests on reduced costs and pivot entries
    tolerance: f64,
}

impl Simplex {
    pub fn new(
        coefficients: Vec<Vec<f64>>,
        constraints: Vec<f64>,
        objective: Vec<f64>,
    ) -> Result<Self, SimplexError> {
        let problem = LpProblem {
            coefficients,
            constraints,
            objective,
        };
        problem.validate()?;
        Ok(Self::from_parts(problem))
    }

    pub fn from_problem(problem: &LpProblem) -> Result<Self, SimplexError> {
        problem.validate()?;
        Ok(Self::from_parts(problem.clone()))
    }

    fn from_parts(problem: LpProblem) -> Self {
        let num_variables = problem.num_variables();
        Self {
            coefficients: problem.coefficients,
            constraints: problem.constraints,
            objective: problem.objective,
            num_variables,
            basis_size: 0,
            basis_variables: Vec::new(),
            basis_objective: Vec::new(),
            basis_solution: Vec::new(),
            basis_value: 0.0,
            reduced_costs: None,
            least_positive_ratio: None,
            pivot_row_index: None,
            pivot_column_index: None,
            solution: None,
            value: None,
            slack_added: false,
            phase: Phase::Uninitialized,
            iterations: 0,
            max_iterations: 10000,
            tolerance: 1e-9,
        }
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the sign-test tolerance; it must be finite and non-negative
    pub fn with_tolerance(mut self, tol: f64) -> Result<Self, SimplexError> {
        if !tol.is_finite() || tol < 0.0 {
            return Err(SimplexError::InvalidTolerance(tol));
        }
        self.tolerance = tol;
        Ok(self)
    }

    /// Append an identity block for the slack variables and zero-pad the objective
    pub fn initialize_slack(&mut self) -> Result<(), SimplexError> {
        if self.slack_added {
            return Err(SimplexError::AlreadyInitialized);
        }

        let identity_size = self.coefficients.len();
        for (i, row) in self.coefficients.iter_mut().enumerate() {
            row.extend((0..identity_size).map(|k| if k == i { 1.0 } else { 0.0 }));
        }
        self.objective.resize(self.num_variables + identity_size, 0.0);
        self.slack_added = true;

        Ok(())
    }

    /// Make the slack variable of each row its basic variable
    pub fn initialize_basis(&mut self) -> Result<(), SimplexError> {
        if self.phase != Phase::Uninitialized {
            return Err(SimplexError::AlreadyInitialized);
        }
        if !self.slack_added {
            return Err(SimplexError::NotInitialized);
        }

        let m = self.constraints.len();
        self.basis_size = m;
        self.basis_solution = self.constraints.clone();
        self.basis_objective = vec![0.0; m];
        self.basis_value = 0.0;
        self.basis_variables = (0..m).map(Variable::slack).collect();
        self.phase = Phase::Evaluating;

        Ok(())
    }

    pub fn initialize_tableau(&mut self) -> Result<(), SimplexError> {
        if self.phase != Phase::Uninitialized {
            return Err(SimplexError::AlreadyInitialized);
        }
        self.initialize_slack()?;
        self.initialize_basis()?;
        debug!(
            "initialized tableau with {} constraints and {} structural variables",
            self.basis_size, self.num_variables
        );
        Ok(())
    }

    pub fn calculate_basis_value(&mut self) -> Result<f64, SimplexError> {
        self.ensure_initialized()?;
        self.basis_value = dot(&self.basis_objective, &self.basis_solution);
        Ok(self.basis_value)
    }

    /// `reduced_costs[j] = basis_objective · column j - objective[j]`
    pub fn calculate_reduced_costs(&mut self) -> Result<(), SimplexError> {
        self.ensure_initialized()?;

        let mut reduced_costs: Vec<f64> = self.objective.iter().map(|&c| -c).collect();
        for (row, &cb) in self.coefficients.iter().zip(&self.basis_objective) {
            for (rc, &a) in reduced_costs.iter_mut().zip(row) {
                *rc += cb * a;
            }
        }
        trace!("reduced costs: {:?}", reduced_costs);

        self.reduced_costs = Some(reduced_costs);
        self.least_positive_ratio = None;
        self.pivot_row_index = None;
        self.pivot_column_index = None;

        Ok(())
    }

    /// True when no reduced cost is negative
    pub fn check_if_optimal(&self) -> Result<bool, SimplexError> {
        let reduced_costs = self.reduced_costs()?;
        Ok(reduced_costs.iter().all(|&rc| rc >= -self.tolerance))
    }

    /// True when some column with negative reduced cost has no positive entry
    pub fn check_if_unbounded(&self) -> Result<bool, SimplexError> {
        let reduced_costs = self.reduced_costs()?;
        Ok(reduced_costs.iter().enumerate().any(|(j, &rc)| {
            rc < -self.tolerance && self.coefficients.iter().all(|row| row[j] <= self.tolerance)
        }))
    }

    /// Dantzig's rule: the first column with the most negative reduced cost
    pub fn obtain_pivot_column_index(&mut self) -> Result<usize, SimplexError> {
        self.ensure_pivotable()?;
        let reduced_costs = self.reduced_costs()?;

        let mut min_col = None;
        let mut min_val = f64::INFINITY;
        for (j, &rc) in reduced_costs.iter().enumerate() {
            if rc < min_val {
                min_val = rc;
                min_col = Some(j);
            }
        }

        let col = min_col.ok_or(SimplexError::NotComputed("reduced costs"))?;
        debug!("entering column {} with reduced cost {}", col, min_val);
        self.pivot_column_index = Some(col);
        Ok(col)
    }

    /// Minimum ratio test over rows with a positive entry in the pivot column.
    ///
    /// The ratio of every row is kept in `least_positive_ratio`; rows with a
    /// zero entry get `+inf`. Ties go to the first row.
    pub fn obtain_pivot_row_index(&mut self) -> Result<usize, SimplexError> {
        self.ensure_pivotable()?;
        let col = self
            .pivot_column_index
            .ok_or(SimplexError::NotComputed("pivot column"))?;

        let mut ratios = Vec::with_capacity(self.basis_size);
        let mut min_ratio = f64::INFINITY;
        let mut min_row = None;

        for (i, row) in self.coefficients.iter().enumerate() {
            let val = row[col];
            if val.abs() <= self.tolerance {
                ratios.push(f64::INFINITY);
                continue;
            }
            let ratio = self.basis_solution[i] / val;
            ratios.push(ratio);
            if val > self.tolerance && (min_row.is_none() || ratio < min_ratio) {
                min_ratio = ratio;
                min_row = Some(i);
            }
        }

        self.least_positive_ratio = Some(ratios);
        self.pivot_row_index = min_row;

        let row = min_row.ok_or(SimplexError::NoPositivePivotEntry { column: col })?;
        debug!("leaving row {} with ratio {}", row, min_ratio);
        Ok(row)
    }

    /// Scale the pivot row so the pivot entry is exactly one
    pub fn make_pivot_element_one(&mut self) -> Result<(), SimplexError> {
        let (row, col) = self.selected_pivot()?;

        let scale = 1.0 / self.coefficients[row][col];
        for value in self.coefficients[row].iter_mut() {
            *value *= scale;
        }
        self.coefficients[row][col] = 1.0;
        self.basis_solution[row] *= scale;
        self.basis_objective[row] *= scale;
        self.reduced_costs = None;

        Ok(())
    }

    /// Eliminate the pivot column from every other row
    pub fn make_pivot_independent(&mut self) -> Result<(), SimplexError> {
        let (row, col) = self.selected_pivot()?;

        let pivot_row = self.coefficients[row].clone();
        let pivot_rhs = self.basis_solution[row];

        for (i, (coefficients, rhs)) in self
            .coefficients
            .iter_mut()
            .zip(self.basis_solution.iter_mut())
            .enumerate()
        {
            if i == row {
                continue;
            }
            let factor = coefficients[col];
            if factor == 0.0 {
                continue;
            }
            for (value, &p) in coefficients.iter_mut().zip(&pivot_row) {
                *value -= factor * p;
            }
            coefficients[col] = 0.0;
            *rhs -= factor * pivot_rhs;
        }
        self.reduced_costs = None;

        Ok(())
    }

    /// Put the entering variable in the pivot row's basis slot
    pub fn swap_basis_variable(&mut self) -> Result<(), SimplexError> {
        let (row, col) = self.selected_pivot()?;

        self.basis_objective[row] = self.objective[col];
        let entering = self.column_variable(col);
        let leaving = std::mem::replace(&mut self.basis_variables[row], entering);
        debug!("{} enters the basis, {} leaves", entering, leaving);

        self.iterations += 1;
        self.phase = Phase::Evaluating;

        Ok(())
    }

    /// Structural variable values of the current basic solution
    pub fn obtain_solution(&mut self) -> Result<Vec<f64>, SimplexError> {
        self.ensure_initialized()?;

        let mut values = vec![0.0; self.num_variables];
        for (variable, &value) in self.basis_variables.iter().zip(&self.basis_solution) {
            if !variable.is_slack && variable.ordinal < self.num_variables {
                values[variable.ordinal] = value;
            }
        }

        self.solution = Some(values.clone());
        Ok(values)
    }

    /// Recompute reduced costs and decide whether the method has terminated
    pub fn evaluate(&mut self) -> Result<Phase, SimplexError> {
        self.ensure_initialized()?;
        if self.phase.is_terminal() {
            return Ok(self.phase);
        }

        self.calculate_basis_value()?;
        self.calculate_reduced_costs()?;

        if self.check_if_optimal()? {
            let values = self.obtain_solution()?;
            // + 0.0 turns a -0.0 optimum at the origin into 0.0
            let value = dot(&self.objective[..self.num_variables], &values) + 0.0;
            debug!("optimal after {} iterations with value {}", self.iterations, value);
            self.value = Some(value);
            self.phase = Phase::Optimal;
        } else if self.check_if_unbounded()? {
            debug!("unbounded after {} iterations", self.iterations);
            self.value = Some(f64::INFINITY);
            self.phase = Phase::Unbounded;
        } else {
            self.phase = Phase::NeedsPivot;
        }

        Ok(self.phase)
    }

    /// Select the pivot, perform it and update the basis
    pub fn pivot(&mut self) -> Result<(), SimplexError> {
        self.obtain_pivot_column_index()?;
        self.obtain_pivot_row_index()?;
        self.make_pivot_element_one()?;
        self.make_pivot_independent()?;
        self.swap_basis_variable()?;
        self.calculate_basis_value()?;
        Ok(())
    }

    pub fn run(&mut self) -> Result<Solution, SimplexError> {
        self.run_with(|_, _| {})
    }

    /// Run to a terminal state, handing a snapshot of every intermediate
    /// tableau to `observer`
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<Solution, SimplexError>
    where
        F: FnMut(Step, &TableauSnapshot),
    {
        if self.phase == Phase::Uninitialized {
            self.initialize_tableau()?;
        }
        self.calculate_basis_value()?;
        observer(Step::Initial, &self.snapshot());

        loop {
            match self.evaluate()? {
                Phase::Optimal => {
                    observer(Step::Optimal, &self.snapshot());
                    return self.outcome();
                }
                Phase::Unbounded => {
                    observer(Step::Unbounded, &self.snapshot());
                    return self.outcome();
                }
                _ => observer(Step::ReducedCosts, &self.snapshot()),
            }

            if self.iterations >= self.max_iterations {
                return Err(SimplexError::IterationLimit(self.max_iterations));
            }

            self.obtain_pivot_column_index()?;
            self.obtain_pivot_row_index()?;
            observer(Step::PivotSelected, &self.snapshot());

            self.make_pivot_element_one()?;
            self.make_pivot_independent()?;
            observer(Step::Pivoted, &self.snapshot());

            self.swap_basis_variable()?;
            self.calculate_basis_value()?;
            observer(Step::BasisSwapped, &self.snapshot());
        }
    }

    /// The terminal result; fails before a terminal state is reached
    pub fn outcome(&self) -> Result<Solution, SimplexError> {
        match self.phase {
            Phase::Optimal => Ok(Solution::optimal(
                self.solution()?.to_vec(),
                self.value()?,
                self.iterations,
                self.basis_variables.clone(),
            )),
            Phase::Unbounded => Ok(Solution::unbounded(self.iterations, self.basis_variables.clone())),
            _ => Err(SimplexError::NotComputed("solution")),
        }
    }

    pub fn snapshot(&self) -> TableauSnapshot {
        TableauSnapshot {
            phase: self.phase,
            iteration: self.iterations,
            num_variables: self.num_variables,
            coefficients: self.coefficients.clone(),
            objective: self.objective.clone(),
            basis_variables: self.basis_variables.clone(),
            basis_objective: self.basis_objective.clone(),
            basis_solution: self.basis_solution.clone(),
            basis_value: self.basis_value,
            reduced_costs: self.reduced_costs.clone(),
            least_positive_ratio: self.least_positive_ratio.clone(),
            pivot_row_index: self.pivot_row_index,
            pivot_column_index: self.pivot_column_index,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_optimal(&self) -> bool {
        self.phase == Phase::Optimal
    }

    pub fn is_unbounded(&self) -> bool {
        self.phase == Phase::Unbounded
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn basis_size(&self) -> usize {
        self.basis_size
    }

    pub fn coefficients(&self) -> &[Vec<f64>] {
        &self.coefficients
    }

    pub fn constraints(&self) -> &[f64] {
        &self.constraints
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn basis_variables(&self) -> &[Variable] {
        &self.basis_variables
    }

    pub fn basis_objective(&self) -> &[f64] {
        &self.basis_objective
    }

    pub fn basis_solution(&self) -> &[f64] {
        &self.basis_solution
    }

    pub fn basis_value(&self) -> f64 {
        self.basis_value
    }

    pub fn reduced_costs(&self) -> Result<&[f64], SimplexError> {
        self.reduced_costs
            .as_deref()
            .ok_or(SimplexError::NotComputed("reduced costs"))
    }

    pub fn least_positive_ratio(&self) -> Result<&[f64], SimplexError> {
        self.least_positive_ratio
            .as_deref()
            .ok_or(SimplexError::NotComputed("ratio test"))
    }

    pub fn pivot_row_index(&self) -> Result<usize, SimplexError> {
        self.pivot_row_index.ok_or(SimplexError::NotComputed("pivot row"))
    }

    pub fn pivot_column_index(&self) -> Result<usize, SimplexError> {
        self.pivot_column_index
            .ok_or(SimplexError::NotComputed("pivot column"))
    }

    pub fn solution(&self) -> Result<&[f64], SimplexError> {
        self.solution
            .as_deref()
            .ok_or(SimplexError::NotComputed("solution"))
    }

    pub fn value(&self) -> Result<f64, SimplexError> {
        self.value.ok_or(SimplexError::NotComputed("value"))
    }

    fn column_variable(&self, col: usize) -> Variable {
        if col < self.num_variables {
            Variable::structural(col)
        } else {
            Variable::slack(col - self.num_variables)
        }
    }

    fn ensure_initialized(&self) -> Result<(), SimplexError> {
        if self.phase == Phase::Uninitialized {
            return Err(SimplexError::NotInitialized);
        }
        Ok(())
    }

    fn ensure_pivotable(&self) -> Result<(), SimplexError> {
        self.ensure_initialized()?;
        if self.phase.is_terminal() {
            return Err(SimplexError::Terminated(self.phase));
        }
        Ok(())
    }

    fn selected_pivot(&self) -> Result<(usize, usize), SimplexError> {
        self.ensure_pivotable()?;
        let row = self.pivot_row_index()?;
        let col = self.pivot_column_index()?;
        Ok((row, col))
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
