//! Conversion of sparse count matrices into the dense representation the
//! correspondence engine works on. The choice is made once, when a
//! [`ContingencyTable`](crate::ContingencyTable) is built.

use ndarray::Array2;

pub mod csc;
pub mod csr;

pub trait ToDense {
    fn to_dense_array(&self) -> anyhow::Result<Array2<f64>>;
}
