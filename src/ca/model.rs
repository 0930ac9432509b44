use indexmap::IndexSet;
use log::{debug, info, warn};
use ndarray::{Array1, Array2};

use super::eigen::EigenSummary;
use super::quality::{contributions, principal_coordinates};
use super::{residuals, CaParams, KeyedMatrix};
use crate::svd::{compute_svd, SvdTriplet};
use crate::{CaError, ContingencyTable, Result};

/// State produced by fitting a correspondence analysis. Immutable once built.
#[derive(Debug, Clone)]
pub struct FittedCa {
    pub(super) row_masses: Array1<f64>,
    pub(super) col_masses: Array1<f64>,
    pub(super) active_rows: IndexSet<String>,
    pub(super) active_cols: IndexSet<String>,
    pub(super) svd: SvdTriplet,
    pub(super) total_inertia: f64,
    pub(super) grand_total: f64,
    pub(super) row_coordinates: KeyedMatrix,
    pub(super) column_coordinates: KeyedMatrix,
    pub(super) row_contributions: KeyedMatrix,
    pub(super) column_contributions: KeyedMatrix,
}

impl FittedCa {
    /// Fits a correspondence analysis to `table`.
    ///
    /// The number of components is capped at `min(rows, cols) - 1`, the number
    /// of nonzero singular values the residual matrix can have.
    pub fn fit(table: &ContingencyTable, params: &CaParams) -> Result<Self> {
        let (n_rows, n_cols) = table.dim();
        if n_rows < 2 || n_cols < 2 {
            return Err(CaError::InvalidInput(format!(
                "correspondence analysis needs at least 2 rows and 2 columns, got {} x {}",
                n_rows, n_cols
            )));
        }
        if params.n_components == 0 {
            return Err(CaError::InvalidInput(
                "n_components must be positive".to_string(),
            ));
        }

        let residuals = residuals::build(table)?;

        let max_rank = n_rows.min(n_cols) - 1;
        let n_components = params.n_components.min(max_rank);
        if n_components < params.n_components {
            warn!(
                "Requested {} components but a {} x {} table has at most {}",
                params.n_components, n_rows, n_cols, max_rank
            );
        }

        let svd = compute_svd(
            residuals.standardized.view(),
            n_components,
            params.n_iter,
            params.random_state,
            params.svd_method,
        )?;
        let total_inertia = residuals.total_inertia();

        let active_rows = table.row_keys().clone();
        let active_cols = table.col_keys().clone();

        let eigenvalues = svd.s.mapv(|s| s * s);
        let row_coordinates = KeyedMatrix::new(
            active_rows.clone(),
            principal_coordinates(&residuals.row_masses, &svd.u, &svd.s),
        );
        let column_coordinates = KeyedMatrix::new(
            active_cols.clone(),
            principal_coordinates(&residuals.col_masses, &svd.v, &svd.s),
        );
        let row_contributions = KeyedMatrix::new(
            active_rows.clone(),
            contributions(&residuals.row_masses, &row_coordinates.values, &eigenvalues),
        );
        let column_contributions = KeyedMatrix::new(
            active_cols.clone(),
            contributions(&residuals.col_masses, &column_coordinates.values, &eigenvalues),
        );

        info!(
            "Fitted correspondence analysis on a {} x {} table: {} components, total inertia {:.6}",
            n_rows, n_cols, n_components, total_inertia
        );
        debug!("Singular values: {:?}", svd.s.as_slice());

        Ok(Self {
            row_masses: residuals.row_masses,
            col_masses: residuals.col_masses,
            active_rows,
            active_cols,
            svd,
            total_inertia,
            grand_total: residuals.grand_total,
            row_coordinates,
            column_coordinates,
            row_contributions,
            column_contributions,
        })
    }

    pub fn n_components(&self) -> usize {
        self.svd.n_components()
    }

    /// Squared singular values, the inertia explained by each component.
    pub fn eigenvalues(&self) -> Array1<f64> {
        self.svd.s.mapv(|s| s * s)
    }

    pub fn total_inertia(&self) -> f64 {
        self.total_inertia
    }

    /// Sum of the table the model was fitted on.
    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    pub fn percentage_of_variance(&self) -> Array1<f64> {
        self.eigen_summary().percentage_of_variance
    }

    pub fn cumulative_percentage_of_variance(&self) -> Array1<f64> {
        self.eigen_summary().cumulative_percentage_of_variance
    }

    pub fn eigen_summary(&self) -> EigenSummary {
        EigenSummary::new(self.eigenvalues(), self.total_inertia)
    }

    pub fn row_masses(&self) -> &Array1<f64> {
        &self.row_masses
    }

    pub fn col_masses(&self) -> &Array1<f64> {
        &self.col_masses
    }

    pub fn active_rows(&self) -> &IndexSet<String> {
        &self.active_rows
    }

    pub fn active_columns(&self) -> &IndexSet<String> {
        &self.active_cols
    }

    pub fn svd(&self) -> &SvdTriplet {
        &self.svd
    }

    /// Left singular vectors, one row per active row.
    pub fn u(&self) -> &Array2<f64> {
        &self.svd.u
    }

    /// Right singular vectors, one row per active column.
    pub fn v(&self) -> &Array2<f64> {
        &self.svd.v
    }

    /// `D_r^{-1/2} U diag(s)`: principal coordinates of the active rows.
    pub fn active_row_coordinates(&self) -> &KeyedMatrix {
        &self.row_coordinates
    }

    /// `D_c^{-1/2} V diag(s)`: principal coordinates of the active columns.
    pub fn active_column_coordinates(&self) -> &KeyedMatrix {
        &self.column_coordinates
    }

    /// Share of each component's inertia explained by each active row.
    /// Every column sums to one.
    pub fn row_contributions(&self) -> &KeyedMatrix {
        &self.row_contributions
    }

    pub fn column_contributions(&self) -> &KeyedMatrix {
        &self.column_contributions
    }
}
