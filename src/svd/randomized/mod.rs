//! Randomized truncated SVD (Halko, Martinsson & Tropp, 2011).
//!
//! A Gaussian test matrix sketches the range of the input, `n_iter` power
//! iterations sharpen the sketch, and an exact SVD of the small projected
//! matrix yields the leading triplets. A fixed `random_state` makes the
//! result reproducible.

use anyhow::bail;
use log::debug;
use nalgebra::DMatrix;
use ndarray::{Array1, ArrayView2};
use nshare::{IntoNalgebra, IntoNdarray2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use super::{PowerIterationNormalizer, SvdEngine, SvdTriplet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomizedSvd {
    pub n_oversamples: usize,
    pub n_iter: usize,
    pub normalizer: PowerIterationNormalizer,
    pub random_state: Option<u64>,
}

fn orthonormalize(matrix: DMatrix<f64>) -> DMatrix<f64> {
    matrix.qr().q()
}

impl RandomizedSvd {
    fn normalize(&self, matrix: DMatrix<f64>) -> DMatrix<f64> {
        match self.normalizer {
            PowerIterationNormalizer::QR => orthonormalize(matrix),
            PowerIterationNormalizer::None => matrix,
        }
    }
}

impl SvdEngine for RandomizedSvd {
    fn compute(&self, matrix: ArrayView2<f64>, n_components: usize) -> anyhow::Result<SvdTriplet> {
        let (n_rows, n_cols) = matrix.dim();
        let rank = n_rows.min(n_cols);
        if n_components > rank {
            bail!(
                "Cannot extract {} components from a {} x {} matrix",
                n_components,
                n_rows,
                n_cols
            );
        }
        let sketch = (n_components + self.n_oversamples).min(rank);
        debug!(
            "Randomized SVD: sketch width {}, {} power iterations, {:?} normalizer",
            sketch, self.n_iter, self.normalizer
        );

        let mut rng = match self.random_state {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };

        let a = matrix.to_owned().into_nalgebra();
        let omega = DMatrix::from_fn(n_cols, sketch, |_, _| rng.sample::<f64, _>(StandardNormal));

        let mut q = orthonormalize(&a * omega);
        for _ in 0..self.n_iter {
            let z = self.normalize(a.tr_mul(&q));
            q = self.normalize(&a * z);
        }
        let q = orthonormalize(q);

        // B = Qᵗ A is small: sketch x n_cols
        let b = q.tr_mul(&a);
        let svd = b.svd(true, true);
        let u_b = match svd.u {
            Some(u) => u,
            None => bail!("SVD of the projected matrix did not produce U"),
        };
        let v_t = match svd.v_t {
            Some(v_t) => v_t,
            None => bail!("SVD of the projected matrix did not produce V^T"),
        };

        let u = (q * u_b).columns(0, n_components).into_owned();
        let v = v_t.rows(0, n_components).transpose();
        let s = Array1::from_iter(svd.singular_values.iter().take(n_components).copied());

        Ok(SvdTriplet {
            u: u.into_ndarray2(),
            s,
            v: v.into_ndarray2(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svd::ExactSvd;
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;
    use rand::rngs::StdRng;

    fn low_rank_matrix(n_rows: usize, n_cols: usize, seed: u64) -> Array2<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let left = Array2::from_shape_fn((n_rows, 3), |_| rng.random_range(-1.0..1.0));
        let right = Array2::from_shape_fn((3, n_cols), |_| rng.random_range(-1.0..1.0));
        let noise = Array2::from_shape_fn((n_rows, n_cols), |_| rng.random_range(-1e-3..1e-3));
        left.dot(&right) + noise
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let a = low_rank_matrix(60, 40, 7);
        let engine = RandomizedSvd {
            n_oversamples: 5,
            n_iter: 4,
            normalizer: PowerIterationNormalizer::QR,
            random_state: Some(42),
        };
        let first = engine.compute(a.view(), 3).unwrap();
        let second = engine.compute(a.view(), 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_matches_exact_singular_values() {
        let a = low_rank_matrix(80, 30, 11);
        let exact = ExactSvd.compute(a.view(), 3).unwrap();

        for normalizer in [PowerIterationNormalizer::QR, PowerIterationNormalizer::None] {
            let engine = RandomizedSvd {
                n_oversamples: 10,
                n_iter: 2,
                normalizer,
                random_state: Some(3),
            };
            let approx = engine.compute(a.view(), 3).unwrap();
            assert_eq!(approx.u.dim(), (80, 3));
            assert_eq!(approx.v.dim(), (30, 3));
            for k in 0..3 {
                assert_abs_diff_eq!(approx.s[k], exact.s[k], epsilon = 1e-6 * exact.s[0]);
            }
        }
    }
}
