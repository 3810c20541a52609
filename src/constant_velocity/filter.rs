use minikalman::buffers::types::*;
use minikalman::matrix::MatrixDataType;
use minikalman::prelude::*;
use minikalman::regular::{RegularKalmanBuilder, RegularObservationBuilder};
use num_traits::float::FloatCore;
use num_traits::One;

use crate::constant_velocity::types::*;
use crate::{FilterError, FilterState, ModelParameters, Position, PositionNoise};

/// A linear Kalman filter tracking latitude, longitude and their rates of change
/// under a constant-velocity motion model.
///
/// The state is `[latitude, longitude, latitude rate, longitude rate]`; only the
/// position is observed. Each [`step`](Self::step) runs one predict/update cycle:
///
/// ```text
/// x⁻ = F·x                 P⁻ = F·P·Fᵀ + Q
/// y  = z − H·x⁻            S  = H·P⁻·Hᵀ + R
/// K  = P⁻·Hᵀ·S⁻¹
/// x  = x⁻ + K·y            P  = (I − K·H)·P⁻
/// ```
pub struct ConstantVelocityFilter<T> {
    filter: OwnedKalmanFilter<T>,
    measurement: OwnedPositionObservation<T>,
    /// The diagonal of `R`, needed to test `S` for invertibility.
    measurement_noise: PositionNoise<T>,
    /// The number of completed steps.
    steps: usize,
}

impl<T> ConstantVelocityFilter<T> {
    /// Initializes a new instance of the [`ConstantVelocityFilter`] struct.
    ///
    /// The initial state is the given position at rest, with `initial_covariance · I`
    /// as its covariance.
    ///
    /// ## Arguments
    /// * `parameters` - The noise parameters of the model.
    /// * `initial_position` - The first observed position.
    ///
    /// ## Errors
    /// * [`FilterError::InvalidParameter`] if a noise value is negative or non-finite.
    /// * [`FilterError::InvalidMeasurement`] if the initial position is not finite.
    pub fn new(
        parameters: &ModelParameters<T>,
        initial_position: Position<T>,
    ) -> Result<Self, FilterError>
    where
        T: MatrixDataType + FloatCore + Default,
    {
        parameters.validate()?;
        if !initial_position.is_finite() {
            return Err(FilterError::InvalidMeasurement { index: 0 });
        }

        let filter = Self::build_filter(parameters, &initial_position);
        let measurement = Self::build_measurement(&parameters.measurement_noise);

        Ok(Self {
            filter,
            measurement,
            measurement_noise: parameters.measurement_noise,
            steps: 0,
        })
    }

    /// Initializes a filter with the default [`ModelParameters`]: `Q = 0.01·I`,
    /// `R = 0.1·I` and `P₀ = I`.
    pub fn initialize(latitude: T, longitude: T) -> Result<Self, FilterError>
    where
        T: MatrixDataType + FloatCore + Default,
        ModelParameters<T>: Default,
    {
        Self::new(&ModelParameters::default(), Position::new(latitude, longitude))
    }
}

impl<T> ConstantVelocityFilter<T> {
    /// Performs a predict/update cycle, assuming one time unit has passed since the
    /// previous step.
    ///
    /// ## Arguments
    /// * `position` - The observed position.
    ///
    /// ## Returns
    /// The filtered position.
    ///
    /// ## Errors
    /// * [`FilterError::InvalidMeasurement`] if the position is not finite.
    /// * [`FilterError::SingularMatrix`] if the innovation covariance cannot be inverted.
    ///   The prediction has already been applied in that case and the filter should be
    ///   discarded.
    pub fn step(&mut self, position: &Position<T>) -> Result<Position<T>, FilterError>
    where
        T: MatrixDataType + FloatCore + Default,
    {
        self.step_internal(<T as One>::one(), position)
    }

    /// Performs a predict/update cycle after `delta_t` time units.
    ///
    /// ## Arguments
    /// * `delta_t` - The time elapsed since the previous step; must be finite and non-negative.
    /// * `position` - The observed position.
    ///
    /// ## Errors
    /// * [`FilterError::InvalidTimeStep`] if `delta_t` is negative or not finite.
    /// * Any error of [`step`](Self::step).
    pub fn step_with_interval(
        &mut self,
        delta_t: T,
        position: &Position<T>,
    ) -> Result<Position<T>, FilterError>
    where
        T: MatrixDataType + FloatCore + Default,
    {
        if !FloatCore::is_finite(delta_t) || delta_t < T::default() {
            return Err(FilterError::InvalidTimeStep { index: self.steps });
        }

        self.step_internal(delta_t, position)
    }

    fn step_internal(&mut self, delta_t: T, position: &Position<T>) -> Result<Position<T>, FilterError>
    where
        T: MatrixDataType + FloatCore + Default,
    {
        if !position.is_finite() {
            return Err(FilterError::InvalidMeasurement { index: self.steps });
        }

        // Couple each position to its rate over the elapsed time.
        let transition = self.filter.state_transition_mut();
        transition.set(0, 2, delta_t);
        transition.set(1, 3, delta_t);

        self.filter.predict();

        // S = H×P×Hᵀ + R picks the upper-left 2×2 block of P.
        let determinant = self.innovation_covariance_determinant();
        if !FloatCore::is_finite(determinant) || determinant <= T::default() {
            return Err(FilterError::SingularMatrix { index: self.steps });
        }

        self.measurement.measurement_vector_mut().apply(|vec| {
            vec.set_row(0, position.latitude);
            vec.set_row(1, position.longitude);
        });

        self.filter.correct(&mut self.measurement);
        self.panic_if_nan();

        self.steps += 1;
        Ok(self.position())
    }

    fn innovation_covariance_determinant(&self) -> T
    where
        T: MatrixDataType,
    {
        let covariance = self.filter.estimate_covariance();
        let s00 = covariance.get_at(0, 0) + self.measurement_noise.latitude;
        let s01 = covariance.get_at(0, 1);
        let s10 = covariance.get_at(1, 0);
        let s11 = covariance.get_at(1, 1) + self.measurement_noise.longitude;
        s00 * s11 - s01 * s10
    }

    #[allow(unused)]
    fn panic_if_nan(&self)
    where
        T: Copy + FloatCore,
    {
        #[cfg(debug_assertions)]
        self.filter.state_vector().inspect(|vec| {
            if (0..STATES).any(|row| FloatCore::is_nan(vec.get_row(row))) {
                panic!("NaN detected in state estimate")
            }
        });
    }
}

impl<T> ConstantVelocityFilter<T> {
    /// Gets the number of completed steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Obtains the current estimate of the position.
    pub fn position(&self) -> Position<T>
    where
        T: Copy,
    {
        let state = self.filter.state_vector();
        Position::new(state.get_row(0), state.get_row(1))
    }

    /// Obtains the current estimate of the velocity, in degrees per time unit.
    pub fn velocity(&self) -> Position<T>
    where
        T: Copy,
    {
        let state = self.filter.state_vector();
        Position::new(state.get_row(2), state.get_row(3))
    }

    /// Obtains the current estimation variance (uncertainty) of the position, in degrees².
    pub fn position_variance(&self) -> Position<T>
    where
        T: Copy,
    {
        let covariance = self.filter.estimate_covariance();
        Position::new(covariance.get_at(0, 0), covariance.get_at(1, 1))
    }

    /// Takes a snapshot of the state estimate and its covariance.
    pub fn state(&self) -> FilterState<T>
    where
        T: Copy,
    {
        let state = self.filter.state_vector();
        let covariance = self.filter.estimate_covariance();
        FilterState {
            mean: core::array::from_fn(|row| state.get_row(row)),
            covariance: core::array::from_fn(|row| {
                core::array::from_fn(|col| covariance.get_at(row, col))
            }),
        }
    }
}

impl<T> ConstantVelocityFilter<T> {
    /// Builds the Kalman filter used for prediction.
    fn build_filter(parameters: &ModelParameters<T>, initial: &Position<T>) -> OwnedKalmanFilter<T>
    where
        T: MatrixDataType + Default,
    {
        let zero = T::default();

        // State vector, starting at rest.
        let mut state_vec =
            StateVectorBuffer::<STATES, T, _>::new(MatrixData::new_array::<STATES, 1, STATES, T>(
                [zero; STATES],
            ));
        state_vec.apply(|vec| {
            vec.set_row(0, initial.latitude);
            vec.set_row(1, initial.longitude);
        });

        // State transition matrix. The velocity coupling is set on every step.
        let mut state_transition =
            StateTransitionMatrixMutBuffer::<STATES, T, _>::new(MatrixData::new_array::<
                STATES,
                STATES,
                { STATES * STATES },
                T,
            >(
                [zero; { STATES * STATES }]
            ));
        state_transition.make_identity();

        // Estimate covariance matrix.
        let mut estimate_covariance =
            EstimateCovarianceMatrixBuffer::<STATES, T, _>::new(MatrixData::new_array::<
                STATES,
                STATES,
                { STATES * STATES },
                T,
            >(
                [zero; { STATES * STATES }]
            ));
        estimate_covariance.make_scalar(parameters.initial_covariance);

        // Process noise matrix.
        let mut process_noise = DirectProcessNoiseCovarianceMatrixMutBuffer::<STATES, T, _>::new(
            MatrixData::new_array::<STATES, STATES, { STATES * STATES }, T>(
                [zero; { STATES * STATES }],
            ),
        );
        process_noise.make_scalar(parameters.process_noise);

        // Predicted state vector.
        let predicted_state =
            PredictedStateEstimateVectorBuffer::<STATES, T, _>::new(MatrixData::new_array::<
                STATES,
                1,
                STATES,
                T,
            >([zero; STATES]));

        // Temporary estimate covariance matrix.
        let temp_state_matrix =
            TemporaryStateMatrixBuffer::<STATES, T, _>::new(MatrixData::new_array::<
                STATES,
                STATES,
                { STATES * STATES },
                T,
            >(
                [zero; { STATES * STATES }]
            ));

        RegularKalmanBuilder::new::<STATES, T>(
            state_transition,
            state_vec,
            estimate_covariance,
            process_noise,
            predicted_state,
            temp_state_matrix,
        )
    }

    /// Builds the position observation used for the correction.
    fn build_measurement(measurement_noise: &PositionNoise<T>) -> OwnedPositionObservation<T>
    where
        T: MatrixDataType + Default,
    {
        let zero = T::default();

        // Measurement vector
        let measurement =
            MeasurementVectorBuffer::<OBSERVATIONS, T, _>::new(MatrixData::new_array::<
                OBSERVATIONS,
                1,
                OBSERVATIONS,
                T,
            >([zero; OBSERVATIONS]));

        // Observation matrix, selecting the position from the state.
        let mut observation_matrix =
            ObservationMatrixMutBuffer::<OBSERVATIONS, STATES, T, _>::new(MatrixData::new_array::<
                OBSERVATIONS,
                STATES,
                { OBSERVATIONS * STATES },
                T,
            >(
                [zero; { OBSERVATIONS * STATES }],
            ));
        observation_matrix.apply(|mat| {
            mat.set_at(0, 0, <T as One>::one());
            mat.set_at(1, 1, <T as One>::one());
        });

        // Measurement noise covariance
        let mut noise_covariance =
            MeasurementNoiseCovarianceMatrixBuffer::<OBSERVATIONS, T, _>::new(
                MatrixData::new_array::<
                    OBSERVATIONS,
                    OBSERVATIONS,
                    { OBSERVATIONS * OBSERVATIONS },
                    T,
                >([zero; { OBSERVATIONS * OBSERVATIONS }]),
            );
        noise_covariance.apply(|mat| {
            mat.set_at(0, 0, measurement_noise.latitude);
            mat.set_at(1, 1, measurement_noise.longitude);
        });

        // Innovation vector
        let innovation_vector =
            InnovationVectorBuffer::<OBSERVATIONS, T, _>::new(MatrixData::new_array::<
                OBSERVATIONS,
                1,
                OBSERVATIONS,
                T,
            >([zero; OBSERVATIONS]));

        // Innovation covariance matrix
        let innovation_covariance =
            InnovationCovarianceMatrixBuffer::<OBSERVATIONS, T, _>::new(MatrixData::new_array::<
                OBSERVATIONS,
                OBSERVATIONS,
                { OBSERVATIONS * OBSERVATIONS },
                T,
            >(
                [zero; { OBSERVATIONS * OBSERVATIONS }],
            ));

        // Kalman Gain matrix
        let kalman_gain =
            KalmanGainMatrixBuffer::<STATES, OBSERVATIONS, T, _>::new(MatrixData::new_array::<
                STATES,
                OBSERVATIONS,
                { STATES * OBSERVATIONS },
                T,
            >(
                [zero; { STATES * OBSERVATIONS }],
            ));

        // Temporary residual covariance inverted matrix
        let temp_sinv = TemporaryResidualCovarianceInvertedMatrixBuffer::<OBSERVATIONS, T, _>::new(
            MatrixData::new_array::<OBSERVATIONS, OBSERVATIONS, { OBSERVATIONS * OBSERVATIONS }, T>(
                [zero; { OBSERVATIONS * OBSERVATIONS }],
            ),
        );

        // Temporary H×P matrix
        let temp_hp =
            TemporaryHPMatrixBuffer::<OBSERVATIONS, STATES, T, _>::new(MatrixData::new_array::<
                OBSERVATIONS,
                STATES,
                { OBSERVATIONS * STATES },
                T,
            >(
                [zero; { OBSERVATIONS * STATES }],
            ));

        // Temporary P×Hᵀ matrix
        let temp_pht =
            TemporaryPHTMatrixBuffer::<STATES, OBSERVATIONS, T, _>::new(MatrixData::new_array::<
                STATES,
                OBSERVATIONS,
                { STATES * OBSERVATIONS },
                T,
            >(
                [zero; { STATES * OBSERVATIONS }],
            ));

        // Temporary K×(H×P) matrix
        let temp_khp = TemporaryKHPMatrixBuffer::<STATES, T, _>::new(MatrixData::new_array::<
            STATES,
            STATES,
            { STATES * STATES },
            T,
        >(
            [zero; { STATES * STATES }]
        ));

        RegularObservationBuilder::new::<STATES, OBSERVATIONS, T>(
            observation_matrix,
            measurement,
            noise_covariance,
            innovation_vector,
            innovation_covariance,
            kalman_gain,
            temp_sinv,
            temp_hp,
            temp_pht,
            temp_khp,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_initialize() {
        let filter = ConstantVelocityFilter::<f64>::initialize(37.0, -122.0).expect("valid input");
        let state = filter.state();

        assert_eq!(filter.steps(), 0);
        assert_eq!(state.mean, [37.0, -122.0, 0.0, 0.0]);
        for row in 0..STATES {
            for col in 0..STATES {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_eq!(state.covariance[row][col], expected);
            }
        }
    }

    #[test]
    fn test_initialize_rejects_non_finite_position() {
        let result = ConstantVelocityFilter::<f64>::initialize(f64::NAN, -122.0);
        assert!(matches!(
            result,
            Err(FilterError::InvalidMeasurement { index: 0 })
        ));
    }

    #[test]
    fn test_first_step_on_initial_position() {
        // With y = 0 the mean is only propagated; at rest it stays put.
        let mut filter = ConstantVelocityFilter::<f64>::initialize(37.0, -122.0).expect("valid input");
        let filtered = filter
            .step(&Position::new(37.0, -122.0))
            .expect("step succeeds");

        assert_eq!(filtered, Position::new(37.0, -122.0));
        assert_eq!(filter.velocity(), Position::new(0.0, 0.0));

        // P⁻ = F·I·Fᵀ + 0.01·I has 2.01 on the position diagonal; S = 2.11.
        let expected_position_variance = 2.01 - 2.01 * 2.01 / 2.11;
        let expected_velocity_variance = 1.01 - 1.0 / 2.11;
        let state = filter.state();
        assert!((state.covariance[0][0] - expected_position_variance).abs() < TOLERANCE);
        assert!((state.covariance[1][1] - expected_position_variance).abs() < TOLERANCE);
        assert!((state.covariance[2][2] - expected_velocity_variance).abs() < TOLERANCE);
        assert!((state.covariance[3][3] - expected_velocity_variance).abs() < TOLERANCE);
        assert!(state.is_symmetric(TOLERANCE));
        assert_eq!(filter.steps(), 1);
    }

    #[test]
    fn test_step_blends_prediction_and_measurement() {
        let mut filter = ConstantVelocityFilter::<f64>::initialize(0.0, 0.0).expect("valid input");
        let filtered = filter.step(&Position::new(1.0, -1.0)).expect("step succeeds");

        // K₀₀ = 2.01 / 2.11; the estimate moves most of the way to the measurement.
        let gain = 2.01 / 2.11;
        assert!((filtered.latitude - gain).abs() < TOLERANCE);
        assert!((filtered.longitude + gain).abs() < TOLERANCE);
        assert!(filter.velocity().latitude > 0.0);
        assert!(filter.velocity().longitude < 0.0);
    }

    #[test]
    fn test_constant_input_keeps_variances_non_increasing() {
        let mut filter = ConstantVelocityFilter::<f64>::initialize(5.0, 7.0).expect("valid input");
        let mut previous = filter.state().variances();

        for _ in 0..50 {
            let filtered = filter.step(&Position::new(5.0, 7.0)).expect("step succeeds");
            assert_eq!(filtered, Position::new(5.0, 7.0));

            let state = filter.state();
            assert!(state.is_symmetric(TOLERANCE));

            let variances = state.variances();
            for (current, before) in variances.iter().zip(previous.iter()) {
                assert!(
                    *current <= *before + 1e-12,
                    "variance grew from {before} to {current}"
                );
            }
            previous = variances;
        }
    }

    #[test]
    fn test_converges_after_jump() {
        let mut filter = ConstantVelocityFilter::<f64>::initialize(0.0, 0.0).expect("valid input");
        let target = Position::new(1.0, 2.0);

        let mut filtered = Position::default();
        for _ in 0..40 {
            filtered = filter.step(&target).expect("step succeeds");
        }

        assert!((filtered.latitude - target.latitude).abs() < 1e-2);
        assert!((filtered.longitude - target.longitude).abs() < 1e-2);
    }

    #[test]
    fn test_singular_innovation_covariance() {
        let parameters = ModelParameters::new(0.0_f64, PositionNoise::uniform(0.0), 0.0);
        let mut filter =
            ConstantVelocityFilter::new(&parameters, Position::new(1.0, 2.0)).expect("valid input");

        let result = filter.step(&Position::new(1.0, 2.0));
        assert_eq!(result, Err(FilterError::SingularMatrix { index: 0 }));
        assert_eq!(filter.steps(), 0);
    }

    #[test]
    fn test_zero_measurement_noise_is_not_singular() {
        // P⁻ ≥ Q keeps S invertible even with a perfect sensor.
        let parameters = ModelParameters::<f64>::default().with_measurement_noise(PositionNoise::uniform(0.0));
        let mut filter =
            ConstantVelocityFilter::new(&parameters, Position::new(1.0, 2.0)).expect("valid input");

        let filtered = filter.step(&Position::new(1.5, 2.5)).expect("step succeeds");
        assert!((filtered.latitude - 1.5).abs() < TOLERANCE);
        assert!((filtered.longitude - 2.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_step_rejects_non_finite_measurement() {
        let mut filter = ConstantVelocityFilter::<f64>::initialize(1.0, 2.0).expect("valid input");
        filter.step(&Position::new(1.0, 2.0)).expect("step succeeds");

        let result = filter.step(&Position::new(f64::INFINITY, 2.0));
        assert_eq!(result, Err(FilterError::InvalidMeasurement { index: 1 }));
    }

    #[test]
    fn test_interval_scales_velocity_coupling() {
        let mut unit = ConstantVelocityFilter::<f64>::initialize(0.0, 0.0).expect("valid input");
        let mut elapsed = ConstantVelocityFilter::<f64>::initialize(0.0, 0.0).expect("valid input");

        unit.step(&Position::new(1.0, 1.0)).expect("step succeeds");
        elapsed
            .step_with_interval(1.0, &Position::new(1.0, 1.0))
            .expect("step succeeds");
        assert_eq!(unit.state(), elapsed.state());

        // Without elapsed time the velocity does not move the prediction, so observing
        // the current estimate leaves it untouched.
        assert!(elapsed.velocity().latitude > 0.0);
        let before = elapsed.position();
        let after = elapsed
            .step_with_interval(0.0, &before)
            .expect("step succeeds");
        assert_eq!(after, before);

        // With a unit step the same observation lags behind the prediction.
        let moved = unit.step(&before).expect("step succeeds");
        assert_ne!(moved, before);
    }

    #[test]
    fn test_interval_rejects_invalid_time_step() {
        let mut filter = ConstantVelocityFilter::<f64>::initialize(0.0, 0.0).expect("valid input");
        assert_eq!(
            filter.step_with_interval(-1.0, &Position::new(0.0, 0.0)),
            Err(FilterError::InvalidTimeStep { index: 0 })
        );
        assert_eq!(
            filter.step_with_interval(f64::NAN, &Position::new(0.0, 0.0)),
            Err(FilterError::InvalidTimeStep { index: 0 })
        );
    }

    #[test]
    fn test_single_precision() {
        let mut filter = ConstantVelocityFilter::<f32>::initialize(37.0, -122.0).expect("valid input");
        let filtered = filter.step(&Position::new(37.0, -122.0)).expect("step succeeds");
        assert_eq!(filtered, Position::new(37.0, -122.0));
    }
}
