//! Parallel filtering of independent trajectories.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::sync::atomic::{AtomicBool, Ordering};
use minikalman::matrix::MatrixDataType;
use num_traits::float::FloatCore;
use rayon::prelude::*;

use crate::{FilterError, Measurement, Trajectory, TrajectoryProcessor};

/// Filters every trajectory with the same processor, spreading the work across the
/// rayon thread pool.
///
/// Each trajectory gets its own filter, so no state is shared between runs. The
/// results are returned in input order.
///
/// Setting `cancel` stops trajectories that have not started yet; they are reported as
/// [`FilterError::Cancelled`]. A trajectory that is already being filtered runs to
/// completion.
pub fn process_all<T, M>(
    processor: &TrajectoryProcessor<T>,
    trajectories: &[M],
    cancel: &AtomicBool,
) -> Vec<Result<Trajectory<T>, FilterError>>
where
    T: MatrixDataType + FloatCore + Default + Debug + Send + Sync,
    M: AsRef<[Measurement<T>]> + Sync,
{
    log::debug!("Filtering {} trajectories", trajectories.len());
    trajectories
        .par_iter()
        .enumerate()
        .map(|(index, measurements)| {
            if cancel.load(Ordering::Relaxed) {
                log::debug!("Skipping trajectory {index}: cancelled");
                return Err(FilterError::Cancelled);
            }
            processor.process(measurements.as_ref())
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::vec;

    fn trajectories() -> Vec<Vec<Measurement<f64>>> {
        (0..16)
            .map(|k| {
                (0..25)
                    .map(|i| {
                        let t = i as f64;
                        Measurement::new(t, 40.0 + k as f64 * 0.1 + t * 1e-4, -3.0 + t * 2e-4)
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_matches_sequential_processing() {
        let processor = TrajectoryProcessor::<f64>::default();
        let inputs = trajectories();
        let cancel = AtomicBool::new(false);

        let results = process_all(&processor, &inputs, &cancel);
        assert_eq!(results.len(), inputs.len());
        for (result, measurements) in results.iter().zip(inputs.iter()) {
            let expected = processor.process(measurements);
            assert_eq!(result, &expected);
        }
    }

    #[test]
    fn test_errors_stay_with_their_trajectory() {
        let processor = TrajectoryProcessor::<f64>::default();
        let inputs = vec![
            vec![Measurement::untimed(1.0, 2.0)],
            vec![],
            vec![Measurement::untimed(1.0, f64::INFINITY)],
        ];
        let cancel = AtomicBool::new(false);

        let results = process_all(&processor, &inputs, &cancel);
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(FilterError::EmptyInput));
        assert_eq!(results[2], Err(FilterError::InvalidMeasurement { index: 0 }));
    }

    #[test]
    fn test_cancelled_before_start() {
        let processor = TrajectoryProcessor::<f64>::default();
        let inputs = trajectories();
        let cancel = AtomicBool::new(true);

        let results = process_all(&processor, &inputs, &cancel);
        assert_eq!(results.len(), inputs.len());
        assert!(results.iter().all(|r| r == &Err(FilterError::Cancelled)));
    }
}
