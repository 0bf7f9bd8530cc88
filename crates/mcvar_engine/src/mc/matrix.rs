//! Simulated price matrix.
//!
//! # Memory Layout
//!
//! Prices are stored row-major: `data[step * n_paths + path]`, where row
//! `step = 0` holds the initial price for every path and the last row holds
//! the terminal prices.

/// Matrix of simulated prices, `(n_steps + 1)` rows by `n_paths` columns.
///
/// Rows are time steps and columns are independent paths. The matrix is
/// immutable once produced by the path generator.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceMatrix {
    data: Vec<f64>,
    n_steps: usize,
    n_paths: usize,
    dt: f64,
}

impl PriceMatrix {
    /// Wraps generated row-major data.
    pub(crate) fn from_row_major(data: Vec<f64>, n_steps: usize, n_paths: usize, dt: f64) -> Self {
        debug_assert_eq!(data.len(), (n_steps + 1) * n_paths);
        Self {
            data,
            n_steps,
            n_paths,
            dt,
        }
    }

    /// Number of rows, `n_steps + 1`.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_steps + 1
    }

    /// Number of time steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Number of paths (columns).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Time step length in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Initial price shared by every path.
    #[inline]
    pub fn initial_price(&self) -> f64 {
        self.data[0]
    }

    /// Price at `step` on `path`.
    ///
    /// # Panics
    ///
    /// Panics if `step > n_steps` or `path >= n_paths`.
    #[inline]
    pub fn get(&self, step: usize, path: usize) -> f64 {
        assert!(path < self.n_paths, "path index {} out of range", path);
        self.data[step * self.n_paths + path]
    }

    /// All prices at `step`, one per path.
    ///
    /// # Panics
    ///
    /// Panics if `step > n_steps`.
    #[inline]
    pub fn row(&self, step: usize) -> &[f64] {
        let start = step * self.n_paths;
        &self.data[start..start + self.n_paths]
    }

    /// Terminal prices (the last row), one per path.
    #[inline]
    pub fn terminal_prices(&self) -> &[f64] {
        self.row(self.n_steps)
    }

    /// Copies out the trajectory of a single path.
    ///
    /// # Panics
    ///
    /// Panics if `path >= n_paths`.
    pub fn path(&self, path: usize) -> Vec<f64> {
        assert!(path < self.n_paths, "path index {} out of range", path);
        self.data
            .iter()
            .skip(path)
            .step_by(self.n_paths)
            .copied()
            .collect()
    }

    /// Trajectories of the first `limit` paths, for chart rendering.
    pub fn path_subset(&self, limit: usize) -> Vec<Vec<f64>> {
        (0..limit.min(self.n_paths)).map(|p| self.path(p)).collect()
    }

    /// Raw row-major data.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
