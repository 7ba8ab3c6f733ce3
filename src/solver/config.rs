//! Solver configuration.

/// Configuration for [`CspSolver`](super::CspSolver).
///
/// # Examples
///
/// ```
/// use u_csp::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_total_order_fast_path(false)
///     .with_max_cycle_length(6)
///     .with_max_nodes(10_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Try the total-order construction before backtracking when the model
    /// is pairwise-disjunct and every remaining constraint is `>` or `<`.
    pub total_order_fast_path: bool,

    /// Longest cycle (in edges) searched during preprocessing.
    ///
    /// `None` uses the number of constrained variables, which finds every
    /// simple cycle. Smaller bounds make preprocessing cheaper but may leave
    /// longer contradictory cycles for the search to fail on.
    pub max_cycle_length: Option<usize>,

    /// Maximum number of search expansions. 0 = no limit.
    pub max_nodes: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            total_order_fast_path: true,
            max_cycle_length: None,
            max_nodes: 0,
        }
    }
}

impl SolverConfig {
    pub fn with_total_order_fast_path(mut self, enabled: bool) -> Self {
        self.total_order_fast_path = enabled;
        self
    }

    pub fn with_max_cycle_length(mut self, n: usize) -> Self {
        self.max_cycle_length = Some(n);
        self
    }

    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(n) = self.max_cycle_length {
            if n < 2 {
                return Err(format!("max_cycle_length must be at least 2, got {n}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SolverConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.total_order_fast_path);
        assert_eq!(config.max_cycle_length, None);
        assert_eq!(config.max_nodes, 0);
    }

    #[test]
    fn test_short_cycle_bound_rejected() {
        assert!(SolverConfig::default()
            .with_max_cycle_length(1)
            .validate()
            .is_err());
        assert!(SolverConfig::default()
            .with_max_cycle_length(2)
            .validate()
            .is_ok());
    }
}
