//! Filtering of complete trajectories.

use alloc::vec::Vec;
use core::fmt::Debug;
use minikalman::matrix::MatrixDataType;
use num_traits::float::FloatCore;
use num_traits::NumCast;

use crate::constant_velocity::ConstantVelocityFilter;
use crate::{FilterError, FilterState, Measurement, ModelParameters, TimeModel, TimedPosition};

/// Where the time labels of a [`Trajectory`] come from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimeSource {
    /// Every measurement carried its own time.
    Recorded,
    /// At least one measurement had no time, so all measurements were labelled with
    /// their zero-based position in the input instead.
    Synthetic,
}

/// A raw trajectory and its filtered counterpart.
///
/// Both sequences have the same length and the same time labels; entry `i` of
/// `filtered` is the estimate after observing entry `i` of `raw`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<T> {
    /// The measurements as supplied, with their time labels.
    pub raw: Vec<TimedPosition<T>>,
    /// The filtered positions.
    pub filtered: Vec<TimedPosition<T>>,
    /// How the time labels were obtained.
    pub time_source: TimeSource,
}

impl<T> Trajectory<T> {
    /// Gets the number of samples in the trajectory.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Gets the time labels shared by both sequences.
    pub fn times(&self) -> impl Iterator<Item = T> + '_
    where
        T: Copy,
    {
        self.raw.iter().map(|sample| sample.time)
    }

    /// Hands the raw and filtered sequences to a renderer.
    pub fn render_with<R>(&self, renderer: &R) -> R::Output
    where
        R: Render<T>,
    {
        renderer.render(&self.raw, &self.filtered)
    }
}

/// Turns a raw and a filtered trajectory into something displayable.
///
/// Implementations live outside the estimator; a renderer must not assume anything
/// about how the filtered sequence was produced beyond its index alignment with
/// the raw one.
pub trait Render<T> {
    /// The displayable result, e.g. a figure or a list of draw calls.
    type Output;

    /// Renders both sequences.
    fn render(&self, raw: &[TimedPosition<T>], filtered: &[TimedPosition<T>]) -> Self::Output;
}

/// Drives a [`ConstantVelocityFilter`] across a sequence of measurements.
#[derive(Debug, Clone)]
pub struct TrajectoryProcessor<T> {
    parameters: ModelParameters<T>,
}

impl<T> Default for TrajectoryProcessor<T>
where
    ModelParameters<T>: Default,
{
    fn default() -> Self {
        Self::new(ModelParameters::default())
    }
}

impl<T> TrajectoryProcessor<T> {
    /// Initializes a new instance of the [`TrajectoryProcessor`] struct.
    pub const fn new(parameters: ModelParameters<T>) -> Self {
        Self { parameters }
    }

    /// Gets the model parameters used for every trajectory.
    pub fn parameters(&self) -> &ModelParameters<T> {
        &self.parameters
    }

    /// Filters a trajectory.
    ///
    /// The filter is seeded with the first measurement and then steps through every
    /// measurement, the first one included.
    ///
    /// ## Errors
    /// * [`FilterError::EmptyInput`] if there are no measurements.
    /// * [`FilterError::InvalidMeasurement`] if any latitude or longitude is not finite;
    ///   this is checked before filtering starts.
    /// * [`FilterError::InvalidParameter`] if the model parameters are invalid.
    /// * [`FilterError::SingularMatrix`] if a step cannot be applied.
    /// * [`FilterError::InvalidTimeStep`] if time labels decrease under
    ///   [`TimeModel::ElapsedTime`].
    pub fn process(&self, measurements: &[Measurement<T>]) -> Result<Trajectory<T>, FilterError>
    where
        T: MatrixDataType + FloatCore + Default + Debug,
    {
        self.process_inspect(measurements, |_, _| {})
    }

    /// Filters a trajectory like [`process`](Self::process), calling `inspect` with the
    /// measurement index and the filter state after every step.
    pub fn process_inspect<F>(
        &self,
        measurements: &[Measurement<T>],
        mut inspect: F,
    ) -> Result<Trajectory<T>, FilterError>
    where
        T: MatrixDataType + FloatCore + Default + Debug,
        F: FnMut(usize, &FilterState<T>),
    {
        let first = measurements.first().ok_or_else(|| {
            log::warn!("Refusing to filter an empty trajectory");
            FilterError::EmptyInput
        })?;

        if let Some(index) = measurements.iter().position(|m| !m.is_finite()) {
            log::warn!("Measurement {index} has a non-finite position");
            return Err(FilterError::InvalidMeasurement { index });
        }

        let (times, time_source) = time_labels(measurements);
        log::debug!(
            "Filtering {} measurements ({:?} time labels, {:?})",
            measurements.len(),
            time_source,
            self.parameters.time_model
        );

        let mut filter = ConstantVelocityFilter::new(&self.parameters, first.position())?;
        let mut raw = Vec::with_capacity(measurements.len());
        let mut filtered = Vec::with_capacity(measurements.len());

        let mut previous_time = times[0];
        for (index, (measurement, &time)) in measurements.iter().zip(times.iter()).enumerate() {
            let position = measurement.position();
            let estimate = match self.parameters.time_model {
                TimeModel::UnitStep => filter.step(&position),
                TimeModel::ElapsedTime => filter.step_with_interval(time - previous_time, &position),
            }
            .inspect_err(|error| log::warn!("Aborting trajectory: {error}"))?;
            previous_time = time;

            log::trace!("Measurement {index}: {position:?} filtered to {estimate:?}");
            inspect(index, &filter.state());

            raw.push(TimedPosition::from_position(time, position));
            filtered.push(TimedPosition::from_position(time, estimate));
        }

        Ok(Trajectory {
            raw,
            filtered,
            time_source,
        })
    }
}

/// Filters a trajectory with the default [`ModelParameters`].
pub fn process<T>(measurements: &[Measurement<T>]) -> Result<Trajectory<T>, FilterError>
where
    T: MatrixDataType + FloatCore + Default + Debug,
    ModelParameters<T>: Default,
{
    TrajectoryProcessor::default().process(measurements)
}

/// Collects the recorded time labels, or the positional indexes if any is missing.
fn time_labels<T>(measurements: &[Measurement<T>]) -> (Vec<T>, TimeSource)
where
    T: FloatCore,
{
    let recorded: Option<Vec<T>> = measurements.iter().map(|m| m.time).collect();
    match recorded {
        Some(times) => (times, TimeSource::Recorded),
        None => {
            let times = (0..measurements.len())
                .map(|index| <T as NumCast>::from(index).unwrap_or_else(<T as FloatCore>::infinity))
                .collect();
            (times, TimeSource::Synthetic)
        }
    }
}
