use pivot_simplex::{Step, TableauSnapshot};

const MAX_DENOMINATOR: i64 = 10000;

/// Format a number as an integer or a fraction with a small denominator
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }
    if value.abs() >= 1e12 {
        return format!("{:e}", value);
    }

    let (numerator, denominator) = approximate_fraction(value.abs(), MAX_DENOMINATOR);
    let sign = if value < 0.0 && numerator != 0 { "-" } else { "" };
    if denominator == 1 {
        format!("{}{}", sign, numerator)
    } else {
        format!("{}{}/{}", sign, numerator, denominator)
    }
}

/// Closest fraction to a non-negative `x` with denominator at most `max_denominator`,
/// via its continued fraction expansion
fn approximate_fraction(x: f64, max_denominator: i64) -> (i64, i64) {
    let (mut p0, mut q0, mut p1, mut q1) = (0i64, 1i64, 1i64, 0i64);
    let mut rest = x;

    loop {
        let a = rest.floor();
        let a_int = a as i64;
        let q2 = q0 + a_int * q1;
        if q2 > max_denominator {
            break;
        }
        (p0, q0, p1, q1) = (p1, q1, p0 + a_int * p1, q2);

        let frac = rest - a;
        if frac < 1e-12 {
            return (p1, q1);
        }
        rest = 1.0 / frac;
    }

    // semiconvergent bound against the last convergent
    let k = (max_denominator - q0) / q1;
    let (p_semi, q_semi) = (p0 + k * p1, q0 + k * q1);
    let semi_err = (x - p_semi as f64 / q_semi as f64).abs();
    let conv_err = (x - p1 as f64 / q1 as f64).abs();
    if semi_err < conv_err {
        (p_semi, q_semi)
    } else {
        (p1, q1)
    }
}

/// Render a tableau as a column-aligned text table.
///
/// Columns are the basic variable, its objective coefficient `c_b`, its
/// value `x_b`, one column per variable and the ratio of the minimum ratio
/// test. The pivot element and its ratio are starred.
pub fn render_tableau(snapshot: &TableauSnapshot) -> String {
    let n_cols = snapshot.objective.len();
    let pivot = snapshot.pivot();
    let mut rows: Vec<Vec<String>> = Vec::new();

    let mut objective_row = vec!["c_j".to_string(), String::new(), String::new()];
    objective_row.extend(snapshot.objective.iter().map(|&c| format_number(c)));
    objective_row.push(String::new());
    rows.push(objective_row);

    let mut header = vec!["basis".to_string(), "c_b".to_string(), "x_b".to_string()];
    header.extend(snapshot.column_variables().iter().map(|v| v.to_string()));
    header.push("x_b/x_i".to_string());
    rows.push(header);

    for (i, coefficients) in snapshot.coefficients.iter().enumerate() {
        let mut row = vec![
            snapshot.basis_variables[i].to_string(),
            format_number(snapshot.basis_objective[i]),
            format_number(snapshot.basis_solution[i]),
        ];
        for (j, &a) in coefficients.iter().enumerate() {
            let star = if pivot == Some((i, j)) { "*" } else { "" };
            row.push(format!("{}{}", format_number(a), star));
        }
        let ratio = match &snapshot.least_positive_ratio {
            Some(ratios) => {
                let star = if snapshot.pivot_row_index == Some(i) { "*" } else { "" };
                format!("{}{}", format_number(ratios[i]), star)
            }
            None => String::new(),
        };
        row.push(ratio);
        rows.push(row);
    }

    let mut reduced_row = vec!["rc_j".to_string(), String::new(), format_number(snapshot.basis_value)];
    match &snapshot.reduced_costs {
        Some(reduced_costs) => reduced_row.extend(reduced_costs.iter().map(|&rc| format_number(rc))),
        None => reduced_row.extend(std::iter::repeat_n(String::new(), n_cols)),
    }
    reduced_row.push(String::new());
    rows.push(reduced_row);

    let n_fields = n_cols + 4;
    let mut widths = vec![0; n_fields];
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let separator = widths
        .iter()
        .map(|&w| "-".repeat(w))
        .collect::<Vec<_>>()
        .join("-+-");

    let last = rows.len() - 1;
    let mut out = String::new();
    for (r, row) in rows.iter().enumerate() {
        if r == 2 || r == last {
            out.push_str(&separator);
            out.push('\n');
        }
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:>w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// One-line caption for a step of the method
pub fn describe_step(step: Step, snapshot: &TableauSnapshot) -> String {
    let value = format_number(snapshot.basis_value);
    match step {
        Step::Initial => "Initial tableau with slack basis".to_string(),
        Step::ReducedCosts => format!("Iteration {}: reduced costs", snapshot.iteration + 1),
        Step::PivotSelected => match snapshot.pivot() {
            Some((row, col)) => format!(
                "Pivot on row {}, column {} ({} leaves)",
                row + 1,
                snapshot.column_variables()[col],
                snapshot.basis_variables[row]
            ),
            None => "Pivot selection".to_string(),
        },
        Step::Pivoted => "Pivot column eliminated".to_string(),
        Step::BasisSwapped => format!("Basis updated, c_b·x_b = {}", value),
        Step::Optimal => format!("Optimal! c_b·x_b = {}", value),
        Step::Unbounded => "Unbounded!".to_string(),
    }
}
