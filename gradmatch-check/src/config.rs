//! Parameters of one check run.

/// Shape, seed and tolerances of one check run.
///
/// The binary always runs with [`CheckConfig::default`]; other values are for
/// library callers and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    pub seed: u64,
    /// N: rows of x, y and z.
    pub rows: usize,
    /// D: columns of x, y and z.
    pub cols: usize,
    pub rtol: f32,
    pub atol: f32,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            seed: 0,
            rows: 3,
            cols: 4,
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

impl CheckConfig {
    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
