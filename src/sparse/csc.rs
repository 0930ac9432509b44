use anyhow::anyhow;
use nalgebra_sparse::CscMatrix;
use ndarray::Array2;
use num_traits::ToPrimitive;

use super::ToDense;

impl<M: ToPrimitive> ToDense for CscMatrix<M> {
    fn to_dense_array(&self) -> anyhow::Result<Array2<f64>> {
        let mut dense = Array2::zeros((self.nrows(), self.ncols()));
        for (row, col, value) in self.triplet_iter() {
            dense[[row, col]] += value
                .to_f64()
                .ok_or_else(|| anyhow!("Failed to convert entry ({}, {}) to f64", row, col))?;
        }
        Ok(dense)
    }
}
