//! Contributions and squared cosines.
//!
//! Contributions only exist for active elements and are computed once at fit
//! time. Squared cosines compare a coordinate with the element's squared
//! chi-square distance to the barycenter. Active and supplementary elements
//! use different distance formulas but the same barycenter, the fitted masses
//! of the complementary axis, so their scores are comparable.
//!
//! A squared distance at or below `f64::EPSILON × total inertia` is rounding
//! residue: the element sits on the barycenter and its squared cosines are
//! `NaN`.

use ndarray::{Array1, Array2, ArrayView1, Axis};

use super::model::FittedCa;
use super::projection::{profiles, Side};
use super::{KeyedMatrix, KeyedVector};
use crate::{ContingencyTable, Direction, Result};

/// `D^{-1/2} · basis · diag(s)`
pub(super) fn principal_coordinates(
    masses: &Array1<f64>,
    basis: &Array2<f64>,
    singular_values: &Array1<f64>,
) -> Array2<f64> {
    let mut coordinates = basis.clone();
    for ((i, l), value) in coordinates.indexed_iter_mut() {
        *value *= singular_values[l] / masses[i].sqrt();
    }
    coordinates
}

/// `mass[i] · coordinate[i, l]² / eigenvalue[l]`
pub(super) fn contributions(
    masses: &Array1<f64>,
    coordinates: &Array2<f64>,
    eigenvalues: &Array1<f64>,
) -> Array2<f64> {
    let mut contributions = coordinates.mapv(|x| x * x);
    for ((i, l), value) in contributions.indexed_iter_mut() {
        *value *= masses[i] / eigenvalues[l];
    }
    contributions
}

// profile / baseline - 1, weighted by the baseline
fn active_squared_distance(profile: ArrayView1<f64>, baseline: &Array1<f64>) -> f64 {
    profile
        .iter()
        .zip(baseline.iter())
        .map(|(&p, &m)| {
            let t = p / m - 1.0;
            m * t * t
        })
        .sum()
}

fn supplementary_squared_distance(profile: ArrayView1<f64>, baseline: &Array1<f64>) -> f64 {
    profile
        .iter()
        .zip(baseline.iter())
        .map(|(&p, &m)| (p - m) * (p - m) / m)
        .sum()
}

fn squared_distances(
    oriented: &ContingencyTable,
    profiles: &Array2<f64>,
    side: &Side<'_>,
) -> Array1<f64> {
    oriented
        .row_keys()
        .iter()
        .zip(profiles.rows())
        .map(|(key, profile)| {
            if side.active.contains(key) {
                active_squared_distance(profile, side.baseline)
            } else {
                supplementary_squared_distance(profile, side.baseline)
            }
        })
        .collect()
}

impl FittedCa {
    fn distances(&self, table: &ContingencyTable, direction: &Direction) -> Result<KeyedVector> {
        let oriented = self.orient(table, direction)?;
        let profiles = profiles(&oriented, direction)?;
        let side = self.side(direction);
        let values = squared_distances(&oriented, &profiles, &side);
        Ok(KeyedVector::new(oriented.row_keys().clone(), values))
    }

    fn cosine_similarities(
        &self,
        table: &ContingencyTable,
        direction: &Direction,
    ) -> Result<KeyedMatrix> {
        let oriented = self.orient(table, direction)?;
        let profiles = profiles(&oriented, direction)?;
        let side = self.side(direction);

        let distances = squared_distances(&oriented, &profiles, &side);
        let tolerance = f64::EPSILON * self.total_inertia;
        let mut cos2 = side.project(&profiles).mapv(|x| x * x);
        for (mut row, &d2) in cos2.axis_iter_mut(Axis(0)).zip(distances.iter()) {
            if d2 <= tolerance {
                row.fill(f64::NAN);
            } else {
                row /= d2;
            }
        }
        Ok(KeyedMatrix::new(oriented.row_keys().clone(), cos2))
    }

    /// Squared chi-square distance of every row of `table` to the column barycenter.
    pub fn row_squared_distances(&self, table: &ContingencyTable) -> Result<KeyedVector> {
        self.distances(table, &Direction::ROW)
    }

    /// Squared chi-square distance of every column of `table` to the row barycenter.
    pub fn column_squared_distances(&self, table: &ContingencyTable) -> Result<KeyedVector> {
        self.distances(table, &Direction::COLUMN)
    }

    /// Squared cosine of every row of `table` with each component: the share of
    /// the row's squared distance to the barycenter carried by that component.
    pub fn row_cosine_similarities(&self, table: &ContingencyTable) -> Result<KeyedMatrix> {
        self.cosine_similarities(table, &Direction::ROW)
    }

    pub fn column_cosine_similarities(&self, table: &ContingencyTable) -> Result<KeyedMatrix> {
        self.cosine_similarities(table, &Direction::COLUMN)
    }
}
