use core::fmt::{Display, Formatter};

/// Errors reported while filtering a trajectory.
///
/// None of these are retried: the recursion is pure arithmetic, so a failed run
/// fails again on the same input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// No measurements were supplied; the first one is needed to seed the filter.
    EmptyInput,
    /// The innovation covariance of the measurement at `index` is not invertible.
    SingularMatrix {
        /// The index of the offending measurement.
        index: usize,
    },
    /// The measurement at `index` has a non-finite latitude or longitude.
    InvalidMeasurement {
        /// The index of the offending measurement.
        index: usize,
    },
    /// The time elapsed before the measurement at `index` is negative or non-finite.
    InvalidTimeStep {
        /// The index of the offending measurement.
        index: usize,
    },
    /// A model parameter is negative or non-finite.
    InvalidParameter(&'static str),
    /// The run was cancelled before it started.
    Cancelled,
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            FilterError::EmptyInput => write!(f, "no measurements to filter"),
            FilterError::SingularMatrix { index } => write!(
                f,
                "innovation covariance is singular at measurement {index}"
            ),
            FilterError::InvalidMeasurement { index } => write!(
                f,
                "measurement {index} has a non-finite latitude or longitude"
            ),
            FilterError::InvalidTimeStep { index } => write!(
                f,
                "time step before measurement {index} is negative or not finite"
            ),
            FilterError::InvalidParameter(name) => {
                write!(f, "model parameter `{name}` must be finite and non-negative")
            }
            FilterError::Cancelled => write!(f, "trajectory processing was cancelled"),
        }
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
impl std::error::Error for FilterError {}
