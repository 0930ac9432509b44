//! # Truncated SVD
//!
//! The factor engine behind correspondence analysis: given a real matrix and a
//! target rank `k`, return `(U, s, V)` with `matrix ≈ U · diag(s) · Vᵗ`, `s`
//! sorted in descending order, `U` of shape `(rows, k)` and `V` of shape
//! `(cols, k)`.
//!
//! Two interchangeable backends share that contract:
//! - [`ExactSvd`]: dense SVD through `nalgebra`, deterministic
//! - [`RandomizedSvd`]: randomized range finder with power iterations, deterministic
//!   for a fixed seed
//!
//! Both outputs pass through [`svd_flip`] so that signs do not depend on the backend.

mod exact;
mod randomized;

pub use exact::ExactSvd;
pub use randomized::RandomizedSvd;

use anyhow::bail;
use log::debug;
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// How the basis is re-orthonormalized between power iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerIterationNormalizer {
    QR,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvdMethod {
    Exact,
    Randomized {
        n_oversamples: usize,
        normalizer: PowerIterationNormalizer,
    },
}

impl Default for SvdMethod {
    fn default() -> Self {
        Self::Exact
    }
}

impl SvdMethod {
    /// Randomized SVD with 10 oversamples and QR normalization.
    pub fn randomized() -> Self {
        Self::Randomized {
            n_oversamples: 10,
            normalizer: PowerIterationNormalizer::QR,
        }
    }

    pub fn engine(&self, n_iter: usize, random_state: Option<u64>) -> Box<dyn SvdEngine> {
        match *self {
            SvdMethod::Exact => Box::new(ExactSvd),
            SvdMethod::Randomized {
                n_oversamples,
                normalizer,
            } => Box::new(RandomizedSvd {
                n_oversamples,
                n_iter,
                normalizer,
                random_state,
            }),
        }
    }
}

/// Rank-k singular triplet. `v` holds the right singular vectors as columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SvdTriplet {
    pub u: Array2<f64>,
    pub s: Array1<f64>,
    pub v: Array2<f64>,
}

impl SvdTriplet {
    pub fn n_components(&self) -> usize {
        self.s.len()
    }

    // U · diag(s) · Vᵗ
    pub fn reconstruct(&self) -> Array2<f64> {
        let mut us = self.u.clone();
        for (mut column, &s) in us.axis_iter_mut(Axis(1)).zip(self.s.iter()) {
            column *= s;
        }
        us.dot(&self.v.t())
    }
}

pub trait SvdEngine: Send + Sync {
    fn compute(&self, matrix: ArrayView2<f64>, n_components: usize) -> anyhow::Result<SvdTriplet>;
}

/// Computes a rank-`n_components` SVD of `matrix` with the selected backend.
///
/// `n_iter` and `random_state` only affect the randomized backend.
pub fn compute_svd(
    matrix: ArrayView2<f64>,
    n_components: usize,
    n_iter: usize,
    random_state: Option<u64>,
    method: SvdMethod,
) -> anyhow::Result<SvdTriplet> {
    let (n_rows, n_cols) = matrix.dim();
    if n_components == 0 {
        bail!("n_components must be positive");
    }
    if n_components > n_rows.min(n_cols) {
        bail!(
            "n_components ({}) exceeds the rank bound of a {} x {} matrix",
            n_components,
            n_rows,
            n_cols
        );
    }
    debug!(
        "Computing {:?} SVD of a {} x {} matrix, k = {}",
        method, n_rows, n_cols, n_components
    );

    let mut triplet = method
        .engine(n_iter, random_state)
        .compute(matrix, n_components)?;
    svd_flip(&mut triplet);
    Ok(triplet)
}

/// Makes the largest-magnitude entry of every column of `u` positive, flipping
/// the matching column of `v` along with it.
pub fn svd_flip(triplet: &mut SvdTriplet) {
    for k in 0..triplet.n_components() {
        let column = triplet.u.column(k);
        let mut pivot = 0.0_f64;
        for &value in column.iter() {
            if value.abs() > pivot.abs() {
                pivot = value;
            }
        }
        if pivot < 0.0 {
            triplet.u.column_mut(k).mapv_inplace(|x| -x);
            triplet.v.column_mut(k).mapv_inplace(|x| -x);
        }
    }
}
