use anyhow::bail;
use ndarray::{Array2, Axis};
use rayon::prelude::*;
use single_utilities::traits::FloatOpsTS;

use crate::utils::{axis_name, Normalize};
use crate::Direction;

impl<T> Normalize<T> for Array2<T>
where
    T: FloatOpsTS + Send + Sync,
{
    fn normalize(&mut self, sums: &[T], target: T, direction: &Direction) -> anyhow::Result<()> {
        let (axis, expected) = match direction {
            Direction::ROW => (Axis(0), self.nrows()),
            Direction::COLUMN => (Axis(1), self.ncols()),
        };
        if sums.len() != expected {
            bail!(
                "Length of sums ({}) does not match number of {}s ({})",
                sums.len(),
                axis_name(direction),
                expected
            );
        }
        if let Some(index) = sums.iter().position(|&s| s == T::zero()) {
            bail!(
                "Cannot normalize {} {} with a zero sum",
                axis_name(direction),
                index
            );
        }

        self.axis_iter_mut(axis)
            .into_par_iter()
            .enumerate()
            .for_each(|(i, mut lane)| {
                let scale = target / sums[i];
                lane.mapv_inplace(|v| v * scale);
            });
        Ok(())
    }
}
