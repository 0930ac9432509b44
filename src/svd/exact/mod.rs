use anyhow::{anyhow, bail};
use ndarray::{Array1, ArrayView2};
use nshare::{IntoNalgebra, IntoNdarray2};

use super::{SvdEngine, SvdTriplet};

/// Full dense SVD, truncated to the requested rank.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSvd;

impl SvdEngine for ExactSvd {
    fn compute(&self, matrix: ArrayView2<f64>, n_components: usize) -> anyhow::Result<SvdTriplet> {
        let (n_rows, n_cols) = matrix.dim();
        if n_components > n_rows.min(n_cols) {
            bail!(
                "Cannot extract {} components from a {} x {} matrix",
                n_components,
                n_rows,
                n_cols
            );
        }

        // singular values come back sorted in descending order
        let svd = matrix.to_owned().into_nalgebra().svd(true, true);
        let u = svd.u.ok_or_else(|| anyhow!("SVD did not produce U"))?;
        let v_t = svd.v_t.ok_or_else(|| anyhow!("SVD did not produce V^T"))?;

        let u = u.columns(0, n_components).into_owned();
        let v = v_t.rows(0, n_components).transpose();
        let s = Array1::from_iter(svd.singular_values.iter().take(n_components).copied());

        Ok(SvdTriplet {
            u: u.into_ndarray2(),
            s,
            v: v.into_ndarray2(),
        })
    }
}
