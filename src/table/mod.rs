//! # Contingency tables
//!
//! A [`ContingencyTable`] is a dense matrix of nonnegative counts (or any
//! nonnegative weights) whose rows and columns are identified by unique string
//! keys. Keys keep their insertion order for display; lookups are by key.
//!
//! Sparse inputs are densified once, at construction, so every downstream
//! formula works on a single representation.

use indexmap::IndexSet;
use ndarray::{concatenate, Array2, ArrayView2, Axis};

use crate::sparse::ToDense;
use crate::utils::axis_name;
use crate::{CaError, Direction, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct ContingencyTable {
    row_keys: IndexSet<String>,
    col_keys: IndexSet<String>,
    data: Array2<f64>,
}

fn collect_keys<I, K>(keys: I, direction: &Direction) -> Result<IndexSet<String>>
where
    I: IntoIterator<Item = K>,
    K: Into<String>,
{
    let mut set = IndexSet::new();
    for key in keys {
        let key = key.into();
        if set.contains(&key) {
            return Err(CaError::InvalidInput(format!(
                "duplicate {} key {:?}",
                axis_name(direction),
                key
            )));
        }
        set.insert(key);
    }
    Ok(set)
}

impl ContingencyTable {
    /// Builds a keyed table. Fails when the key counts do not match the data
    /// shape, when a key repeats within its axis, or when a value is not finite.
    pub fn new<R, C, KR, KC>(row_keys: R, col_keys: C, data: Array2<f64>) -> Result<Self>
    where
        R: IntoIterator<Item = KR>,
        KR: Into<String>,
        C: IntoIterator<Item = KC>,
        KC: Into<String>,
    {
        let row_keys = collect_keys(row_keys, &Direction::ROW)?;
        let col_keys = collect_keys(col_keys, &Direction::COLUMN)?;

        if data.dim() != (row_keys.len(), col_keys.len()) {
            return Err(CaError::InvalidInput(format!(
                "data has shape {:?} but {} row keys and {} column keys were given",
                data.dim(),
                row_keys.len(),
                col_keys.len()
            )));
        }
        if let Some(((i, j), value)) = data.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(CaError::InvalidInput(format!(
                "non-finite value {} at row {:?}, column {:?}",
                value, row_keys[i], col_keys[j]
            )));
        }

        Ok(Self {
            row_keys,
            col_keys,
            data,
        })
    }

    /// Builds a table with positional keys `"0"`, `"1"`, ... on both axes.
    pub fn from_array(data: Array2<f64>) -> Result<Self> {
        let (n_rows, n_cols) = data.dim();
        Self::new(
            (0..n_rows).map(|i| i.to_string()),
            (0..n_cols).map(|j| j.to_string()),
            data,
        )
    }

    /// Densifies a CSR/CSC matrix and attaches keys to it. An entry that has no
    /// `f64` value is an [`CaError::InvalidInput`].
    pub fn from_sparse<M, R, C, KR, KC>(matrix: &M, row_keys: R, col_keys: C) -> Result<Self>
    where
        M: ToDense,
        R: IntoIterator<Item = KR>,
        KR: Into<String>,
        C: IntoIterator<Item = KC>,
        KC: Into<String>,
    {
        let data = matrix
            .to_dense_array()
            .map_err(|e| CaError::InvalidInput(format!("sparse input: {}", e)))?;
        Self::new(row_keys, col_keys, data)
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn row_keys(&self) -> &IndexSet<String> {
        &self.row_keys
    }

    pub fn col_keys(&self) -> &IndexSet<String> {
        &self.col_keys
    }

    pub fn keys(&self, direction: &Direction) -> &IndexSet<String> {
        match direction {
            Direction::ROW => &self.row_keys,
            Direction::COLUMN => &self.col_keys,
        }
    }

    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn into_data(self) -> Array2<f64> {
        self.data
    }

    /// Value at the given keys, if both exist.
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.row_keys.get_index_of(row)?;
        let j = self.col_keys.get_index_of(col)?;
        Some(self.data[[i, j]])
    }

    /// Fails with [`CaError::NegativeEntry`] on the first value below zero.
    pub fn check_nonnegative(&self) -> Result<()> {
        match self.data.indexed_iter().find(|&(_, &v)| v < 0.0) {
            Some(((i, j), &value)) => Err(CaError::NegativeEntry {
                row: self.row_keys[i].clone(),
                column: self.col_keys[j].clone(),
                value,
            }),
            None => Ok(()),
        }
    }

    /// Restricts the table to `keys` along `direction`, in the order of `keys`.
    ///
    /// Every requested key must be present.
    pub fn select(&self, direction: &Direction, keys: &IndexSet<String>) -> Result<Self> {
        let own = self.keys(direction);
        let indices = keys
            .iter()
            .map(|key| {
                own.get_index_of(key).ok_or_else(|| {
                    CaError::InvalidInput(format!("unknown {} key {:?}", axis_name(direction), key))
                })
            })
            .collect::<Result<Vec<usize>>>()?;

        let (axis, row_keys, col_keys) = match direction {
            Direction::ROW => (Axis(0), keys.clone(), self.col_keys.clone()),
            Direction::COLUMN => (Axis(1), self.row_keys.clone(), keys.clone()),
        };
        Ok(Self {
            row_keys,
            col_keys,
            data: self.data.select(axis, &indices),
        })
    }

    pub fn select_rows(&self, keys: &IndexSet<String>) -> Result<Self> {
        self.select(&Direction::ROW, keys)
    }

    pub fn select_columns(&self, keys: &IndexSet<String>) -> Result<Self> {
        self.select(&Direction::COLUMN, keys)
    }

    /// Swaps the roles of rows and columns.
    pub fn transpose(&self) -> Self {
        Self {
            row_keys: self.col_keys.clone(),
            col_keys: self.row_keys.clone(),
            data: self.data.t().to_owned(),
        }
    }

    /// Appends the rows of `other` below this table.
    ///
    /// `other` must carry the same column keys (in any order) and row keys
    /// that do not already occur here.
    pub fn stack_rows(&self, other: &ContingencyTable) -> Result<Self> {
        if other.col_keys.len() != self.col_keys.len() {
            return Err(CaError::InvalidInput(format!(
                "cannot stack a table with {} columns under one with {}",
                other.col_keys.len(),
                self.col_keys.len()
            )));
        }
        let aligned = other.select_columns(&self.col_keys)?;

        let row_keys = collect_keys(
            self.row_keys.iter().chain(aligned.row_keys.iter()).cloned(),
            &Direction::ROW,
        )?;
        let data = concatenate(Axis(0), &[self.data.view(), aligned.data.view()])
            .map_err(|e| CaError::InvalidInput(format!("cannot stack rows: {}", e)))?;

        Ok(Self {
            row_keys,
            col_keys: self.col_keys.clone(),
            data,
        })
    }

    /// Appends the columns of `other` to the right of this table.
    pub fn stack_columns(&self, other: &ContingencyTable) -> Result<Self> {
        Ok(self.transpose().stack_rows(&other.transpose())?.transpose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_sparse::{CooMatrix, CsrMatrix};
    use ndarray::array;
    use num_traits::ToPrimitive;

    // a value with no numeric representation at all
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Opaque;

    impl ToPrimitive for Opaque {
        fn to_i64(&self) -> Option<i64> {
            None
        }

        fn to_u64(&self) -> Option<u64> {
            None
        }
    }

    fn table() -> ContingencyTable {
        ContingencyTable::new(
            ["a", "b"],
            ["x", "y", "z"],
            array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_new_validates_shape_and_keys() {
        let shape = ContingencyTable::new(["a"], ["x", "y"], array![[1.0, 2.0, 3.0]]);
        assert!(matches!(shape, Err(CaError::InvalidInput(_))));

        let duplicate = ContingencyTable::new(["a", "a"], ["x"], array![[1.0], [2.0]]);
        assert!(matches!(duplicate, Err(CaError::InvalidInput(_))));

        let nan = ContingencyTable::new(["a"], ["x", "y"], array![[1.0, f64::NAN]]);
        assert!(matches!(nan, Err(CaError::InvalidInput(_))));
    }

    #[test]
    fn test_positional_keys() {
        let t = ContingencyTable::from_array(array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        assert_eq!(t.row_keys().iter().collect::<Vec<_>>(), vec!["0", "1", "2"]);
        assert_eq!(t.col_keys().iter().collect::<Vec<_>>(), vec!["0", "1"]);
        assert_eq!(t.get("2", "1"), Some(6.0));
    }

    #[test]
    fn test_negative_entry() {
        let t = ContingencyTable::new(["a", "b"], ["x", "y"], array![[1.0, 2.0], [-3.0, 4.0]])
            .unwrap();
        match t.check_nonnegative() {
            Err(CaError::NegativeEntry { row, column, value }) => {
                assert_eq!(row, "b");
                assert_eq!(column, "x");
                assert_eq!(value, -3.0);
            }
            other => panic!("expected a negative entry error, got {:?}", other),
        }
        assert!(table().check_nonnegative().is_ok());
    }

    #[test]
    fn test_select_reorders_and_rejects_unknown_keys() {
        let t = table();
        let keys: IndexSet<String> = ["z", "x"].iter().map(|s| s.to_string()).collect();
        let selected = t.select_columns(&keys).unwrap();
        assert_eq!(selected.data(), array![[3.0, 1.0], [6.0, 4.0]]);
        assert_eq!(selected.row_keys(), t.row_keys());

        let unknown: IndexSet<String> = ["w"].iter().map(|s| s.to_string()).collect();
        assert!(matches!(
            t.select_columns(&unknown),
            Err(CaError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_stack_rows_aligns_columns() {
        let t = table();
        let extra =
            ContingencyTable::new(["c"], ["z", "y", "x"], array![[9.0, 8.0, 7.0]]).unwrap();
        let stacked = t.stack_rows(&extra).unwrap();
        assert_eq!(stacked.dim(), (3, 3));
        assert_eq!(stacked.get("c", "x"), Some(7.0));
        assert_eq!(stacked.get("c", "z"), Some(9.0));

        // row keys must stay unique
        assert!(t.stack_rows(&t).is_err());
    }

    #[test]
    fn test_stack_columns_and_transpose() {
        let t = table();
        let extra = ContingencyTable::new(["b", "a"], ["w"], array![[10.0], [20.0]]).unwrap();
        let stacked = t.stack_columns(&extra).unwrap();
        assert_eq!(stacked.dim(), (2, 4));
        assert_eq!(stacked.get("a", "w"), Some(20.0));
        assert_eq!(stacked.get("b", "w"), Some(10.0));

        let tt = t.transpose();
        assert_eq!(tt.dim(), (3, 2));
        assert_eq!(tt.get("y", "b"), Some(5.0));
    }

    #[test]
    fn test_from_sparse() {
        let mut coo = CooMatrix::new(2, 2);
        coo.push(0, 1, 3.0);
        coo.push(1, 0, 2.0);
        let csr = CsrMatrix::from(&coo);
        let t = ContingencyTable::from_sparse(&csr, ["r1", "r2"], ["c1", "c2"]).unwrap();
        assert_eq!(t.data(), array![[0.0, 3.0], [2.0, 0.0]]);
    }

    #[test]
    fn test_from_sparse_rejects_unconvertible_entries() {
        let csr = CsrMatrix::try_from_csr_data(1, 2, vec![0, 1], vec![1], vec![Opaque]).unwrap();
        match ContingencyTable::from_sparse(&csr, ["r"], ["a", "b"]) {
            Err(CaError::InvalidInput(message)) => assert!(message.contains("(0, 1)")),
            other => panic!("expected an invalid input error, got {:?}", other),
        }
    }
}
