//! Pearson chi-square test of independence for a fitted table.
//!
//! The statistic falls out of the fit for free: it is the total inertia
//! times the grand total of the table.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::ca::FittedCa;
use crate::{CaError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndependenceTest {
    pub statistic: f64,
    pub degrees_of_freedom: usize,
    /// Upper tail probability of `statistic` under the chi-square distribution.
    pub p_value: f64,
}

impl FittedCa {
    /// Tests the rows and columns of the fitted table for independence.
    pub fn independence_test(&self) -> Result<IndependenceTest> {
        let degrees_of_freedom = (self.active_rows().len() - 1) * (self.active_columns().len() - 1);
        let statistic = self.total_inertia() * self.grand_total();

        let distribution = ChiSquared::new(degrees_of_freedom as f64)
            .map_err(|e| CaError::InvalidInput(format!("chi-square distribution: {}", e)))?;

        Ok(IndependenceTest {
            statistic,
            degrees_of_freedom,
            p_value: distribution.sf(statistic),
        })
    }
}
