use pivot_simplex::LpProblem;

/// Built-in demonstration problems, numbered from 1
pub fn examples() -> Vec<(&'static str, LpProblem)> {
    vec![
        (
            "two variables, optimum at x1 = 3, x2 = 1",
            problem(vec![3.0, 2.0], vec![(vec![1.0, 1.0], 4.0), (vec![1.0, -1.0], 2.0)]),
        ),
        (
            "production planning with fractional optimum",
            problem(vec![80.0, 55.0], vec![(vec![4.1, 2.0], 40.0), (vec![2.0, 4.0], 32.0)]),
        ),
        (
            "three variables, three constraints",
            problem(
                vec![2.0, -1.0, 2.0],
                vec![
                    (vec![2.0, 1.0, 0.0], 10.0),
                    (vec![1.0, 2.0, -2.0], 20.0),
                    (vec![0.0, 1.0, 2.0], 5.0),
                ],
            ),
        ),
        (
            "unbounded objective",
            problem(vec![2.0, 1.0], vec![(vec![1.0, -1.0], 10.0), (vec![2.0, -1.0], 40.0)]),
        ),
    ]
}

pub fn example(number: usize) -> Option<(&'static str, LpProblem)> {
    examples().into_iter().nth(number.checked_sub(1)?)
}

fn problem(objective: Vec<f64>, rows: Vec<(Vec<f64>, f64)>) -> LpProblem {
    let mut problem = LpProblem::new(objective);
    for (coefficients, rhs) in rows {
        problem.add_constraint(coefficients, rhs);
    }
    problem
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_simplex::{Simplex, SolutionStatus};

    #[test]
    fn test_examples_are_valid() {
        for (name, problem) in examples() {
            assert_eq!(problem.validate(), Ok(()), "{}", name);
        }
    }

    #[test]
    fn test_example_numbering() {
        assert!(example(0).is_none());
        assert!(example(5).is_none());
        let (_, problem) = example(3).unwrap();
        assert_eq!(problem.num_variables(), 3);
    }

    #[test]
    fn test_example_outcomes() {
        let statuses: Vec<SolutionStatus> = examples()
            .iter()
            .map(|(_, problem)| Simplex::from_problem(problem).unwrap().run().unwrap().status)
            .collect();

        assert_eq!(
            statuses,
            vec![
                SolutionStatus::Optimal,
                SolutionStatus::Optimal,
                SolutionStatus::Optimal,
                SolutionStatus::Unbounded,
            ]
        );
    }
}
