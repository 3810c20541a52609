use crate::impl_standard_traits;
use crate::Position;
use num_traits::float::FloatCore;
use uniform_array_derive::UniformArray;

/// A single position fix, optionally labelled with a time.
///
/// The time is an opaque ordering key (seconds, sample number, ...). Measurements
/// without a time receive their positional index as label when a trajectory is
/// processed, see [`TimeSource`](crate::TimeSource).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Measurement<T> {
    /// The time label of the fix, if one was recorded.
    pub time: Option<T>,
    /// The latitude, in degrees.
    pub latitude: T,
    /// The longitude, in degrees.
    pub longitude: T,
}

impl<T> Measurement<T> {
    /// Initializes a new [`Measurement`] with a recorded time.
    #[inline(always)]
    pub const fn new(time: T, latitude: T, longitude: T) -> Self {
        Self {
            time: Some(time),
            latitude,
            longitude,
        }
    }

    /// Initializes a new [`Measurement`] without a time label.
    #[inline(always)]
    pub const fn untimed(latitude: T, longitude: T) -> Self {
        Self {
            time: None,
            latitude,
            longitude,
        }
    }

    /// Gets the observed position.
    #[inline]
    pub fn position(&self) -> Position<T>
    where
        T: Copy,
    {
        Position::new(self.latitude, self.longitude)
    }

    /// Determines whether latitude and longitude are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool
    where
        T: FloatCore,
    {
        self.position().is_finite()
    }
}

/// A position with its time label, as handed to renderers.
#[derive(UniformArray)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[repr(C)]
pub struct TimedPosition<T> {
    /// The time label.
    pub time: T,
    /// The latitude, in degrees.
    pub latitude: T,
    /// The longitude, in degrees.
    pub longitude: T,
}

impl<T> TimedPosition<T> {
    /// Initializes a new [`TimedPosition`] instance.
    #[inline(always)]
    pub const fn new(time: T, latitude: T, longitude: T) -> Self {
        Self {
            time,
            latitude,
            longitude,
        }
    }

    /// Attaches a time label to a position.
    #[inline]
    pub fn from_position(time: T, position: Position<T>) -> Self {
        Self::new(time, position.latitude, position.longitude)
    }

    /// Gets the position without its time label.
    #[inline]
    pub fn position(&self) -> Position<T>
    where
        T: Copy,
    {
        Position::new(self.latitude, self.longitude)
    }
}

impl_standard_traits!(TimedPosition, T, time, latitude, longitude);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_untimed() {
        let measurement = Measurement::untimed(10.0_f64, 20.0);
        assert_eq!(measurement.time, None);
        assert_eq!(measurement.position(), Position::new(10.0, 20.0));
    }

    #[test]
    fn test_is_finite() {
        assert!(Measurement::new(0.0_f64, 10.0, 20.0).is_finite());
        assert!(!Measurement::new(0.0_f64, f64::NAN, 20.0).is_finite());
        assert!(!Measurement::untimed(10.0_f64, f64::NEG_INFINITY).is_finite());
    }

    #[test]
    fn test_timed_position_index() {
        let timed = TimedPosition::from_position(3.0_f32, Position::new(1.0, 2.0));
        assert_eq!(timed.len(), 3);
        assert_eq!(timed[0], 3.0);
        assert_eq!(timed[1], 1.0);
        assert_eq!(timed[2], 2.0);
        assert_eq!(timed.position(), Position::new(1.0, 2.0));
    }
}
