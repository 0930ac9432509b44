//! Principal coordinates of arbitrary (active or supplementary) rows and columns.
//!
//! Queries are first narrowed to the active keys of the complementary axis, so
//! that profiles are always measured against the axes the model was fitted on.
//! Keys of the queried axis that were not active at fit time are projected as
//! supplementary elements with the same formula.

use indexmap::IndexSet;
use log::debug;
use ndarray::{Array1, Array2, Axis};

use super::model::FittedCa;
use super::KeyedMatrix;
use crate::utils::{axis_name, other_axis, Normalize};
use crate::{CaError, ContingencyTable, Direction, Result};

/// The queried axis of a fitted model together with the fitted quantities of
/// the complementary axis it is projected through.
pub(super) struct Side<'a> {
    /// Active keys along the queried axis.
    pub active: &'a IndexSet<String>,
    /// Active keys along the complementary axis.
    pub complement: &'a IndexSet<String>,
    /// Masses of the complementary axis, the barycenter of the profiles.
    pub baseline: &'a Array1<f64>,
    /// Singular vectors of the complementary axis.
    pub basis: &'a Array2<f64>,
}

impl<'a> Side<'a> {
    /// `profiles · D^{-1/2} · basis`
    pub fn project(&self, profiles: &Array2<f64>) -> Array2<f64> {
        let mut scaled = self.basis.clone();
        for (mut row, &mass) in scaled.axis_iter_mut(Axis(0)).zip(self.baseline.iter()) {
            row /= mass.sqrt();
        }
        profiles.dot(&scaled)
    }
}

/// Rows of `oriented` rescaled to sum to one.
pub(super) fn profiles(oriented: &ContingencyTable, direction: &Direction) -> Result<Array2<f64>> {
    let sums = oriented.data().sum_axis(Axis(1));
    if let Some(i) = sums.iter().position(|&s| s == 0.0) {
        return Err(CaError::ZeroMass {
            direction: direction.clone(),
            key: oriented.row_keys()[i].clone(),
        });
    }

    let mut profiles = oriented.data().to_owned();
    profiles
        .normalize(&sums.to_vec(), 1.0, &Direction::ROW)
        .map_err(|e| CaError::InvalidInput(e.to_string()))?;
    Ok(profiles)
}

impl FittedCa {
    pub(super) fn side(&self, direction: &Direction) -> Side<'_> {
        match direction {
            Direction::ROW => Side {
                active: &self.active_rows,
                complement: &self.active_cols,
                baseline: &self.col_masses,
                basis: &self.svd.v,
            },
            Direction::COLUMN => Side {
                active: &self.active_cols,
                complement: &self.active_rows,
                baseline: &self.row_masses,
                basis: &self.svd.u,
            },
        }
    }

    /// Lays the queried elements out as rows and keeps only the active keys of
    /// the complementary axis, in fitted order.
    ///
    /// Only the kept cells have to be nonnegative.
    pub(super) fn orient(
        &self,
        table: &ContingencyTable,
        direction: &Direction,
    ) -> Result<ContingencyTable> {
        let side = self.side(direction);
        let narrowed = table.select(&other_axis(direction), side.complement)?;
        narrowed.check_nonnegative()?;
        let oriented = match direction {
            Direction::ROW => narrowed,
            Direction::COLUMN => narrowed.transpose(),
        };
        debug!(
            "Projecting {} {}s through {} fitted {}s",
            oriented.nrows(),
            axis_name(direction),
            oriented.ncols(),
            axis_name(&other_axis(direction))
        );
        Ok(oriented)
    }

    fn coordinates(&self, table: &ContingencyTable, direction: &Direction) -> Result<KeyedMatrix> {
        let oriented = self.orient(table, direction)?;
        let profiles = profiles(&oriented, direction)?;
        let side = self.side(direction);
        Ok(KeyedMatrix::new(
            oriented.row_keys().clone(),
            side.project(&profiles),
        ))
    }

    /// Principal coordinates of every row of `table`.
    ///
    /// Columns of `table` outside the active column set are ignored; every
    /// active column must be present. Rows need not have been active.
    pub fn row_coordinates(&self, table: &ContingencyTable) -> Result<KeyedMatrix> {
        self.coordinates(table, &Direction::ROW)
    }

    /// Principal coordinates of every column of `table`, the mirror of
    /// [`row_coordinates`](Self::row_coordinates).
    pub fn column_coordinates(&self, table: &ContingencyTable) -> Result<KeyedMatrix> {
        self.coordinates(table, &Direction::COLUMN)
    }
}
