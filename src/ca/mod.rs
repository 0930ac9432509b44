//! # Correspondence Analysis
//!
//! Projects a nonnegative contingency table onto a few orthogonal axes that
//! best explain the chi-square distances between its rows and between its
//! columns.
//!
//! Fitting builds the correspondence matrix, the row and column masses and the
//! standardized residuals `D_r^{-1/2} (X - r cᵗ) D_c^{-1/2}`, then factorizes
//! the residuals with a truncated SVD. The fitted model projects any table
//! whose axes overlap the active keys:
//!
//! - rows (columns) present at fit time are **active**; they shaped the axes
//!   and have contributions
//! - any other row (column) key is **supplementary**; it is placed on the
//!   existing axes without having influenced them
//!
//! ```ignore
//! let mut ca = CorrespondenceAnalysisBuilder::new()
//!     .n_components(2)
//!     .svd_method(SvdMethod::Exact)
//!     .build();
//! ca.fit(&table)?;
//! let summary = ca.eigen_summary()?;
//! let rows = ca.row_coordinates(&table.stack_rows(&extra_rows)?)?;
//! ```

mod eigen;
mod model;
mod projection;
mod quality;
pub mod residuals;
mod shared;

pub use eigen::EigenSummary;
pub use model::FittedCa;
pub use shared::SharedCorrespondence;

use indexmap::IndexSet;
use ndarray::{Array1, Array2, ArrayView1};

use crate::svd::SvdMethod;
use crate::{CaError, ContingencyTable, Result};

/// Per-element results (coordinates, contributions, squared cosines) keyed
/// by row or column key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedMatrix {
    pub keys: IndexSet<String>,
    pub values: Array2<f64>,
}

impl KeyedMatrix {
    pub fn new(keys: IndexSet<String>, values: Array2<f64>) -> Self {
        debug_assert_eq!(keys.len(), values.nrows());
        Self { keys, values }
    }

    pub fn get(&self, key: &str) -> Option<ArrayView1<'_, f64>> {
        self.keys.get_index_of(key).map(|i| self.values.row(i))
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyedVector {
    pub keys: IndexSet<String>,
    pub values: Array1<f64>,
}

impl KeyedVector {
    pub fn new(keys: IndexSet<String>, values: Array1<f64>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Self { keys, values }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.keys.get_index_of(key).map(|i| self.values[i])
    }
}

/// Fit parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaParams {
    /// Requested number of components, capped at `min(rows, cols) - 1`.
    pub n_components: usize,
    /// Power iterations of the randomized SVD.
    pub n_iter: usize,
    pub random_state: Option<u64>,
    pub svd_method: SvdMethod,
}

impl Default for CaParams {
    fn default() -> Self {
        Self {
            n_components: 2,
            n_iter: 10,
            random_state: None,
            svd_method: SvdMethod::default(),
        }
    }
}

pub struct CorrespondenceAnalysisBuilder {
    params: CaParams,
}

impl Default for CorrespondenceAnalysisBuilder {
    fn default() -> Self {
        Self {
            params: CaParams::default(),
        }
    }
}

impl CorrespondenceAnalysisBuilder {
    /// Creates a new builder with default parameters.
    ///
    /// Default values:
    /// - `n_components`: 2
    /// - `n_iter`: 10
    /// - `random_state`: None
    /// - `svd_method`: Exact
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_components(mut self, n_components: usize) -> Self {
        self.params.n_components = n_components;
        self
    }

    pub fn n_iter(mut self, n_iter: usize) -> Self {
        self.params.n_iter = n_iter;
        self
    }

    pub fn random_state(mut self, seed: u64) -> Self {
        self.params.random_state = Some(seed);
        self
    }

    /// Sets the SVD backend.
    ///
    /// - `SvdMethod::Exact`: dense and deterministic
    /// - `SvdMethod::Randomized`: faster on large tables, deterministic for a fixed seed
    pub fn svd_method(mut self, svd_method: SvdMethod) -> Self {
        self.params.svd_method = svd_method;
        self
    }

    pub fn build(self) -> CorrespondenceAnalysis {
        CorrespondenceAnalysis {
            params: self.params,
            fitted: None,
        }
    }

    /// Builds a handle that can be fitted and queried from several threads.
    pub fn build_shared(self) -> SharedCorrespondence {
        SharedCorrespondence::new(self.params)
    }
}

/// Correspondence analysis estimator. Call [`fit`](Self::fit) before any query.
#[derive(Debug, Clone)]
pub struct CorrespondenceAnalysis {
    params: CaParams,
    fitted: Option<FittedCa>,
}

impl Default for CorrespondenceAnalysis {
    fn default() -> Self {
        CorrespondenceAnalysisBuilder::new().build()
    }
}

impl CorrespondenceAnalysis {
    /// Fits the model to `table`, replacing any previous fit.
    ///
    /// The new state is built completely before it replaces the old one; on
    /// error the previous fit is left untouched.
    pub fn fit(&mut self, table: &ContingencyTable) -> Result<&mut Self> {
        let fitted = FittedCa::fit(table, &self.params)?;
        self.fitted = Some(fitted);
        Ok(self)
    }

    pub fn params(&self) -> &CaParams {
        &self.params
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn fitted(&self) -> Result<&FittedCa> {
        self.fitted.as_ref().ok_or(CaError::NotFitted)
    }

    pub fn eigenvalues(&self) -> Result<Array1<f64>> {
        Ok(self.fitted()?.eigenvalues())
    }

    pub fn total_inertia(&self) -> Result<f64> {
        Ok(self.fitted()?.total_inertia())
    }

    pub fn percentage_of_variance(&self) -> Result<Array1<f64>> {
        Ok(self.fitted()?.percentage_of_variance())
    }

    pub fn cumulative_percentage_of_variance(&self) -> Result<Array1<f64>> {
        Ok(self.fitted()?.cumulative_percentage_of_variance())
    }

    pub fn eigen_summary(&self) -> Result<EigenSummary> {
        Ok(self.fitted()?.eigen_summary())
    }

    pub fn row_masses(&self) -> Result<&Array1<f64>> {
        Ok(self.fitted()?.row_masses())
    }

    pub fn col_masses(&self) -> Result<&Array1<f64>> {
        Ok(self.fitted()?.col_masses())
    }

    pub fn row_contributions(&self) -> Result<&KeyedMatrix> {
        Ok(self.fitted()?.row_contributions())
    }

    pub fn column_contributions(&self) -> Result<&KeyedMatrix> {
        Ok(self.fitted()?.column_contributions())
    }

    pub fn row_coordinates(&self, table: &ContingencyTable) -> Result<KeyedMatrix> {
        self.fitted()?.row_coordinates(table)
    }

    pub fn column_coordinates(&self, table: &ContingencyTable) -> Result<KeyedMatrix> {
        self.fitted()?.column_coordinates(table)
    }

    pub fn row_cosine_similarities(&self, table: &ContingencyTable) -> Result<KeyedMatrix> {
        self.fitted()?.row_cosine_similarities(table)
    }

    pub fn column_cosine_similarities(&self, table: &ContingencyTable) -> Result<KeyedMatrix> {
        self.fitted()?.column_cosine_similarities(table)
    }

    /// Fits the model and returns the row coordinates of the same table.
    pub fn fit_row_coordinates(&mut self, table: &ContingencyTable) -> Result<KeyedMatrix> {
        self.fit(table)?;
        self.row_coordinates(table)
    }

    pub fn fit_column_coordinates(&mut self, table: &ContingencyTable) -> Result<KeyedMatrix> {
        self.fit(table)?;
        self.column_coordinates(table)
    }
}
