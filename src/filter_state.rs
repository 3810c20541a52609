use crate::Position;
use num_traits::float::FloatCore;

/// The number of states of the constant-velocity model.
pub const STATES: usize = 4; // latitude, longitude, latitude rate, longitude rate

/// A snapshot of the filter's belief about position and velocity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FilterState<T> {
    /// The state estimate `[latitude, longitude, latitude rate, longitude rate]`.
    pub mean: [T; STATES],
    /// The estimate covariance, row-major.
    pub covariance: [[T; STATES]; STATES],
}

impl<T> FilterState<T> {
    /// Gets the estimated position.
    #[inline]
    pub fn position(&self) -> Position<T>
    where
        T: Copy,
    {
        Position::new(self.mean[0], self.mean[1])
    }

    /// Gets the estimated velocity, in degrees per time unit.
    #[inline]
    pub fn velocity(&self) -> Position<T>
    where
        T: Copy,
    {
        Position::new(self.mean[2], self.mean[3])
    }

    /// Gets the estimation variance (uncertainty) of the position, in degrees².
    ///
    /// ## Interpretation
    /// - Low Variance: Indicates high certainty in the estimate. The state estimate is
    ///   considered to be precise, as it doesn't vary much from the mean.
    /// - High Variance: Indicates high uncertainty in the estimate. The state estimate is
    ///   considered to be less precise, as it has a wide spread around the mean.
    #[inline]
    pub fn position_variance(&self) -> Position<T>
    where
        T: Copy,
    {
        Position::new(self.covariance[0][0], self.covariance[1][1])
    }

    /// Gets the diagonal of the estimate covariance.
    pub fn variances(&self) -> [T; STATES]
    where
        T: Copy,
    {
        core::array::from_fn(|i| self.covariance[i][i])
    }

    /// Determines whether the covariance equals its transpose within `tolerance`.
    pub fn is_symmetric(&self, tolerance: T) -> bool
    where
        T: FloatCore,
    {
        (0..STATES).all(|row| {
            (row + 1..STATES).all(|col| {
                FloatCore::abs(self.covariance[row][col] - self.covariance[col][row]) <= tolerance
            })
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn state() -> FilterState<f64> {
        FilterState {
            mean: [37.0, -122.0, 0.5, -0.25],
            covariance: [
                [2.0, 0.0, 1.0, 0.0],
                [0.0, 3.0, 0.0, 1.0],
                [1.0, 0.0, 4.0, 0.0],
                [0.0, 1.0, 0.0, 5.0],
            ],
        }
    }

    #[test]
    fn test_accessors() {
        let state = state();
        assert_eq!(state.position(), Position::new(37.0, -122.0));
        assert_eq!(state.velocity(), Position::new(0.5, -0.25));
        assert_eq!(state.position_variance(), Position::new(2.0, 3.0));
        assert_eq!(state.variances(), [2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_symmetry() {
        let mut state = state();
        assert!(state.is_symmetric(0.0));

        state.covariance[0][2] += 1e-12;
        assert!(!state.is_symmetric(0.0));
        assert!(state.is_symmetric(1e-9));
    }
}
