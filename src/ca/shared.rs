use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use super::model::FittedCa;
use super::CaParams;
use crate::{CaError, ContingencyTable, Result};

/// A correspondence analysis that can be refitted and queried concurrently.
///
/// Readers take a snapshot of the current fit and keep using it even while a
/// new fit is swapped in. Fitting happens outside the lock, so queries are
/// never blocked by a running decomposition and never observe a half-built
/// model.
#[derive(Debug, Clone)]
pub struct SharedCorrespondence {
    params: CaParams,
    state: Arc<RwLock<Option<Arc<FittedCa>>>>,
}

impl SharedCorrespondence {
    pub fn new(params: CaParams) -> Self {
        Self {
            params,
            state: Arc::new(RwLock::new(None)),
        }
    }

    pub fn params(&self) -> &CaParams {
        &self.params
    }

    /// Fits `table` and publishes the result. The previous fit stays visible
    /// when fitting fails.
    pub fn fit(&self, table: &ContingencyTable) -> Result<Arc<FittedCa>> {
        let fitted = Arc::new(FittedCa::fit(table, &self.params)?);
        *self.state.write() = Some(Arc::clone(&fitted));
        debug!("Published a new correspondence analysis fit");
        Ok(fitted)
    }

    /// The current fit.
    pub fn snapshot(&self) -> Result<Arc<FittedCa>> {
        self.state.read().clone().ok_or(CaError::NotFitted)
    }

    pub fn is_fitted(&self) -> bool {
        self.state.read().is_some()
    }
}
