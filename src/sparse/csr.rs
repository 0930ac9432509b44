use anyhow::anyhow;
use nalgebra_sparse::CsrMatrix;
use ndarray::Array2;
use num_traits::ToPrimitive;

use super::ToDense;

impl<M: ToPrimitive> ToDense for CsrMatrix<M> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_sparse::CooMatrix;

    #[test]
    fn test_csr_to_dense() {
        let mut coo = CooMatrix::new(2, 3);
        coo.push(0, 0, 4u32);
        coo.push(1, 2, 7u32);
        coo.push(0, 1, 1u32);
        let csr = CsrMatrix::from(&coo);

        let dense = csr.to_dense_array().unwrap();

        assert_eq!(dense.dim(), (2, 3));
        assert_eq!(dense[[0, 0]], 4.0);
        assert_eq!(dense[[0, 1]], 1.0);
        assert_eq!(dense[[0, 2]], 0.0);
        assert_eq!(dense[[1, 2]], 7.0);
    }
}
