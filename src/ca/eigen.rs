use ndarray::Array1;

/// Explained inertia per component, derived from the eigenvalues and the
/// total inertia of a fitted model.
///
/// With a total inertia of zero (an independence table) the percentages are
/// `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenSummary {
    pub eigenvalues: Array1<f64>,
    pub percentage_of_variance: Array1<f64>,
    pub cumulative_percentage_of_variance: Array1<f64>,
}

impl EigenSummary {
    pub fn new(eigenvalues: Array1<f64>, total_inertia: f64) -> Self {
        let percentage_of_variance = eigenvalues.mapv(|e| 100.0 * e / total_inertia);
        let mut running = 0.0;
        let cumulative_percentage_of_variance = percentage_of_variance.mapv(|p| {
            running += p;
            running
        });
        Self {
            eigenvalues,
            percentage_of_variance,
            cumulative_percentage_of_variance,
        }
    }

    pub fn n_components(&self) -> usize {
        self.eigenvalues.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_percentages() {
        let summary = EigenSummary::new(array![0.5, 0.3, 0.1], 1.0);
        assert_relative_eq!(summary.percentage_of_variance[0], 50.0);
        assert_relative_eq!(summary.percentage_of_variance[2], 10.0);
        assert_relative_eq!(summary.cumulative_percentage_of_variance[1], 80.0);
        assert_relative_eq!(summary.cumulative_percentage_of_variance[2], 90.0);
        assert_eq!(summary.n_components(), 3);
    }

    #[test]
    fn test_zero_inertia_is_nan() {
        let summary = EigenSummary::new(array![0.0], 0.0);
        assert!(summary.percentage_of_variance[0].is_nan());
    }
}
