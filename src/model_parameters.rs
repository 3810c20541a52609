use crate::{FilterError, PositionNoise};
use num_traits::float::FloatCore;

/// How the time between two consecutive measurements enters the motion model.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum TimeModel {
    /// Every pair of consecutive measurements is exactly one time unit apart,
    /// regardless of their time labels.
    #[default]
    UnitStep,
    /// The velocity coupling of the state transition is scaled by the difference of
    /// consecutive time labels. The process noise is not rescaled.
    ElapsedTime,
}

/// The noise parameters of the constant-velocity model, fixed for one filter run.
///
/// The process noise `Q`, the measurement noise `R` and the initial estimate
/// covariance `P₀` are diagonal; the values here are their diagonal entries.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ModelParameters<T> {
    /// Variance of the unmodeled motion disturbance per step, for each state.
    pub process_noise: T,
    /// Variance of the sensor noise, per axis.
    pub measurement_noise: PositionNoise<T>,
    /// Initial variance of each state.
    pub initial_covariance: T,
    /// How time labels affect the state transition.
    pub time_model: TimeModel,
}

impl<T> ModelParameters<T> {
    /// Initializes a new instance of the [`ModelParameters`] struct.
    ///
    /// ## Arguments
    /// * `process_noise` - The process noise value (sigma-squared) applied to every state.
    /// * `measurement_noise` - The measurement noise values (sigma-squared) for each axis.
    /// * `initial_covariance` - The initial variance of every state, e.g. `1.0`.
    pub const fn new(
        process_noise: T,
        measurement_noise: PositionNoise<T>,
        initial_covariance: T,
    ) -> Self {
        Self {
            process_noise,
            measurement_noise,
            initial_covariance,
            time_model: TimeModel::UnitStep,
        }
    }

    /// Replaces the process noise value.
    pub fn with_process_noise(mut self, process_noise: T) -> Self {
        self.process_noise = process_noise;
        self
    }

    /// Replaces the measurement noise values.
    pub fn with_measurement_noise(mut self, measurement_noise: PositionNoise<T>) -> Self {
        self.measurement_noise = measurement_noise;
        self
    }

    /// Replaces the initial estimate variance.
    pub fn with_initial_covariance(mut self, initial_covariance: T) -> Self {
        self.initial_covariance = initial_covariance;
        self
    }

    /// Replaces the time model.
    pub fn with_time_model(mut self, time_model: TimeModel) -> Self {
        self.time_model = time_model;
        self
    }

    /// Ensures that all noise values are finite and non-negative.
    ///
    /// Zero is accepted everywhere; an all-zero configuration is valid but yields a
    /// singular innovation covariance on the first step.
    pub fn validate(&self) -> Result<(), FilterError>
    where
        T: FloatCore,
    {
        check_variance(self.process_noise, "process_noise")?;
        check_variance(self.measurement_noise.latitude, "measurement_noise.latitude")?;
        check_variance(self.measurement_noise.longitude, "measurement_noise.longitude")?;
        check_variance(self.initial_covariance, "initial_covariance")
    }
}

fn check_variance<T>(value: T, name: &'static str) -> Result<(), FilterError>
where
    T: FloatCore,
{
    if FloatCore::is_finite(value) && value >= T::zero() {
        Ok(())
    } else {
        Err(FilterError::InvalidParameter(name))
    }
}

macro_rules! impl_default_parameters {
    ($type:ty) => {
        impl Default for ModelParameters<$type> {
            /// `Q = 0.01·I`, `R = 0.1·I`, `P₀ = I` and a unit time step.
            fn default() -> Self {
                Self::new(0.01, PositionNoise::uniform(0.1), 1.0)
            }
        }
    };
}

impl_default_parameters!(f32);
impl_default_parameters!(f64);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let parameters = ModelParameters::<f64>::default();
        assert_eq!(parameters.process_noise, 0.01);
        assert_eq!(parameters.measurement_noise, PositionNoise::new(0.1, 0.1));
        assert_eq!(parameters.initial_covariance, 1.0);
        assert_eq!(parameters.time_model, TimeModel::UnitStep);
        assert_eq!(parameters.validate(), Ok(()));
    }

    #[test]
    fn test_zero_is_valid() {
        let parameters = ModelParameters::new(0.0_f32, PositionNoise::uniform(0.0), 0.0);
        assert_eq!(parameters.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        let parameters = ModelParameters::<f64>::default().with_process_noise(-1.0);
        assert_eq!(
            parameters.validate(),
            Err(FilterError::InvalidParameter("process_noise"))
        );

        let parameters = ModelParameters::<f64>::default()
            .with_measurement_noise(PositionNoise::new(0.1, f64::NAN));
        assert_eq!(
            parameters.validate(),
            Err(FilterError::InvalidParameter("measurement_noise.longitude"))
        );

        let parameters = ModelParameters::<f64>::default().with_initial_covariance(f64::INFINITY);
        assert_eq!(
            parameters.validate(),
            Err(FilterError::InvalidParameter("initial_covariance"))
        );
    }
}
