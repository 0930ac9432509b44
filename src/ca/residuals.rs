//! Correspondence matrix, masses and standardized residuals.

use ndarray::{Array1, Array2, Axis};
use rayon::prelude::*;

use crate::{CaError, ContingencyTable, Direction, Result};

#[derive(Debug, Clone)]
pub struct Residuals {
    /// The table divided by its grand total.
    pub correspondence: Array2<f64>,
    pub row_masses: Array1<f64>,
    pub col_masses: Array1<f64>,
    /// `D_r^{-1/2} (X - r cᵗ) D_c^{-1/2}`
    pub standardized: Array2<f64>,
    pub grand_total: f64,
}

fn first_zero(sums: &Array1<f64>) -> Option<usize> {
    sums.iter().position(|&s| s == 0.0)
}

/// Builds the correspondence matrix, the row and column masses and the
/// standardized residual matrix of `table`.
///
/// Fails on negative entries and on any row or column with a zero marginal.
pub fn build(table: &ContingencyTable) -> Result<Residuals> {
    table.check_nonnegative()?;
    let data = table.data();

    let row_sums = data.sum_axis(Axis(1));
    if let Some(i) = first_zero(&row_sums) {
        return Err(CaError::ZeroMass {
            direction: Direction::ROW,
            key: table.row_keys()[i].clone(),
        });
    }
    let col_sums = data.sum_axis(Axis(0));
    if let Some(j) = first_zero(&col_sums) {
        return Err(CaError::ZeroMass {
            direction: Direction::COLUMN,
            key: table.col_keys()[j].clone(),
        });
    }

    let grand_total = row_sums.sum();
    let correspondence = data.mapv(|v| v / grand_total);
    let row_masses = correspondence.sum_axis(Axis(1));
    let col_masses = correspondence.sum_axis(Axis(0));

    let mut standardized = correspondence.clone();
    standardized
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut row)| {
            let r = row_masses[i];
            for (value, &c) in row.iter_mut().zip(col_masses.iter()) {
                let expected = r * c;
                *value = (*value - expected) / expected.sqrt();
            }
        });

    Ok(Residuals {
        correspondence,
        row_masses,
        col_masses,
        standardized,
        grand_total,
    })
}

impl Residuals {
    /// Sum of squared standardized residuals, the chi-square statistic over the grand total.
    pub fn total_inertia(&self) -> f64 {
        self.standardized.iter().map(|s| s * s).sum()
    }
}
