use crate::impl_standard_traits;
use core::ops::Sub;
use num_traits::float::FloatCore;
use uniform_array_derive::UniformArray;

/// A geographic position, in degrees.
#[derive(UniformArray)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[repr(C)]
pub struct Position<T> {
    /// The latitude, in degrees.
    pub latitude: T,
    /// The longitude, in degrees.
    pub longitude: T,
}

impl<T> Position<T> {
    /// Initializes a new [`Position`] instance.
    #[inline(always)]
    pub const fn new(latitude: T, longitude: T) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Determines whether both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool
    where
        T: FloatCore,
    {
        FloatCore::is_finite(self.latitude) && FloatCore::is_finite(self.longitude)
    }
}

impl<T> From<(T, T)> for Position<T> {
    #[inline]
    fn from((latitude, longitude): (T, T)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl<T> From<Position<T>> for (T, T) {
    #[inline]
    fn from(value: Position<T>) -> Self {
        (value.latitude, value.longitude)
    }
}

impl<T> Sub<Position<T>> for Position<T>
where
    T: Sub<T, Output = T>,
{
    type Output = Position<T>;

    #[inline]
    fn sub(self, rhs: Position<T>) -> Self::Output {
        Self {
            latitude: self.latitude - rhs.latitude,
            longitude: self.longitude - rhs.longitude,
        }
    }
}

impl_standard_traits!(Position, T, latitude, longitude);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_len() {
        let position = Position::<f32>::default();
        assert_eq!(position.len(), 2);
    }

    #[test]
    fn test_index() {
        let position = Position::<f64>::new(37.0, -122.0);
        assert_eq!(position[0], 37.0);
        assert_eq!(position[1], -122.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(Position::new(37.0_f64, -122.0).is_finite());
        assert!(!Position::new(f64::NAN, -122.0).is_finite());
        assert!(!Position::new(37.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_difference() {
        let a = Position::new(1.0_f64, 2.0);
        let b = Position::new(0.5_f64, -1.0);
        assert_eq!(a - b, Position::new(0.5, 3.0));
    }
}
