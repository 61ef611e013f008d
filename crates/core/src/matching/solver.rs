//! Linear equation solver for the score weight systems.
//!
//! The weight of each match attribute is not a hand-tuned constant: it is the
//! unique solution of a small system of linear equalities that encodes the
//! relative importance of attributes. Solving the whole system at once keeps
//! the ordering consistent when a constraint changes.

use std::collections::HashMap;

use thiserror::Error;

use super::attributes::MatchAttribute;

const EPS: f64 = 1e-9;

/// A single linear equality: `lhs = Σ coeff · attr + constant`.
#[derive(Debug, Clone)]
pub struct Equation {
    pub lhs: MatchAttribute,
    pub rhs: Vec<(f64, MatchAttribute)>,
    pub constant: f64,
}

impl Equation {
    /// `lhs = value`
    pub fn constant(lhs: MatchAttribute, value: f64) -> Self {
        Self {
            lhs,
            rhs: Vec::new(),
            constant: value,
        }
    }

    /// `lhs = a + b + ...`
    pub fn sum(lhs: MatchAttribute, terms: &[MatchAttribute]) -> Self {
        Self {
            lhs,
            rhs: terms.iter().map(|t| (1.0, *t)).collect(),
            constant: 0.0,
        }
    }

    /// `lhs = a + b + ... + constant`
    pub fn sum_plus(lhs: MatchAttribute, terms: &[MatchAttribute], constant: f64) -> Self {
        Self {
            lhs,
            rhs: terms.iter().map(|t| (1.0, *t)).collect(),
            constant,
        }
    }

    /// `lhs = coeff · attr`
    pub fn scaled(lhs: MatchAttribute, coeff: f64, attr: MatchAttribute) -> Self {
        Self {
            lhs,
            rhs: vec![(coeff, attr)],
            constant: 0.0,
        }
    }
}

/// Failure to produce a unique solution. Always a configuration defect in the
/// shipped equation sets, never a runtime condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("score equation system is under-determined: {unresolved} of {symbols} symbols have no unique value")]
    UnderDetermined { symbols: usize, unresolved: usize },

    #[error("score equation system is inconsistent and has no solution")]
    Inconsistent,
}

/// Solve a system of equations, returning the unique value of every symbol
/// that appears in it.
///
/// Redundant but consistent equations are tolerated; contradictory or
/// insufficient ones are not.
pub fn solve(equations: &[Equation]) -> Result<HashMap<MatchAttribute, f64>, SolveError> {
    // Stable symbol order: first appearance across the system.
    let mut symbols: Vec<MatchAttribute> = Vec::new();
    let mut index: HashMap<MatchAttribute, usize> = HashMap::new();
    let mut intern = |attr: MatchAttribute, symbols: &mut Vec<MatchAttribute>| {
        *index.entry(attr).or_insert_with(|| {
            symbols.push(attr);
            symbols.len() - 1
        })
    };
    for eq in equations {
        intern(eq.lhs, &mut symbols);
        for (_, attr) in &eq.rhs {
            intern(*attr, &mut symbols);
        }
    }

    let n = symbols.len();
    // Each row is `lhs - Σ coeff·attr = constant`, augmented column last.
    let mut rows: Vec<Vec<f64>> = equations
        .iter()
        .map(|eq| {
            let mut row = vec![0.0; n + 1];
            row[index[&eq.lhs]] += 1.0;
            for (coeff, attr) in &eq.rhs {
                row[index[attr]] -= *coeff;
            }
            row[n] = eq.constant;
            row
        })
        .collect();

    // Forward elimination with partial pivoting.
    let mut pivot_row = 0;
    let mut pivot_cols: Vec<usize> = Vec::new();
    for col in 0..n {
        let Some(best) = (pivot_row..rows.len())
            .filter(|&r| rows[r][col].abs() > EPS)
            .max_by(|&a, &b| rows[a][col].abs().total_cmp(&rows[b][col].abs()))
        else {
            continue;
        };
        rows.swap(pivot_row, best);
        let pivot = rows[pivot_row][col];
        for r in 0..rows.len() {
            if r == pivot_row || rows[r][col].abs() <= EPS {
                continue;
            }
            let factor = rows[r][col] / pivot;
            for c in col..=n {
                let delta = factor * rows[pivot_row][c];
                rows[r][c] -= delta;
            }
        }
        pivot_cols.push(col);
        pivot_row += 1;
        if pivot_row == rows.len() {
            break;
        }
    }

    // Any leftover row reducing to `0 = nonzero` means no solution exists.
    for row in rows.iter().skip(pivot_row) {
        if row[..n].iter().all(|v| v.abs() <= EPS) && row[n].abs() > EPS {
            return Err(SolveError::Inconsistent);
        }
    }

    if pivot_cols.len() < n {
        return Err(SolveError::UnderDetermined {
            symbols: n,
            unresolved: n - pivot_cols.len(),
        });
    }

    let mut solution = HashMap::with_capacity(n);
    for (r, &col) in pivot_cols.iter().enumerate() {
        solution.insert(symbols[col], rows[r][n] / rows[r][col]);
    }
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use MatchAttribute::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_solve_simple_chain() {
        // resolution = 4; format = resolution; hash = resolution + format
        let equations = vec![
            Equation::constant(Resolution, 4.0),
            Equation::sum(Format, &[Resolution]),
            Equation::sum(Hash, &[Resolution, Format]),
        ];
        let solution = solve(&equations).unwrap();
        assert!(close(solution[&Resolution], 4.0));
        assert!(close(solution[&Format], 4.0));
        assert!(close(solution[&Hash], 8.0));
    }

    #[test]
    fn test_solve_scaled_term() {
        let equations = vec![
            Equation::constant(AudioCodec, 1.0),
            Equation::scaled(VideoCodec, 2.0, AudioCodec),
        ];
        let solution = solve(&equations).unwrap();
        assert!(close(solution[&VideoCodec], 2.0));
    }

    #[test]
    fn test_solve_tolerates_redundant_equation() {
        let equations = vec![
            Equation::constant(AudioCodec, 1.0),
            Equation::scaled(VideoCodec, 2.0, AudioCodec),
            Equation::scaled(VideoCodec, 2.0, AudioCodec),
        ];
        let solution = solve(&equations).unwrap();
        assert!(close(solution[&VideoCodec], 2.0));
    }

    #[test]
    fn test_solve_under_determined() {
        let equations = vec![Equation::sum(Hash, &[Resolution, Format])];
        let err = solve(&equations).unwrap_err();
        assert!(matches!(err, SolveError::UnderDetermined { symbols: 3, .. }));
    }

    #[test]
    fn test_solve_inconsistent() {
        let equations = vec![
            Equation::constant(Resolution, 4.0),
            Equation::constant(Resolution, 5.0),
        ];
        assert_eq!(solve(&equations).unwrap_err(), SolveError::Inconsistent);
    }

    #[test]
    fn test_solve_is_deterministic() {
        let equations = vec![
            Equation::constant(Resolution, 4.0),
            Equation::sum_plus(Series, &[Resolution], 1.0),
            Equation::sum(Year, &[Series]),
        ];
        let a = solve(&equations).unwrap();
        let b = solve(&equations).unwrap();
        assert_eq!(a.len(), b.len());
        for (attr, value) in &a {
            assert!(close(*value, b[attr]));
        }
    }
}
