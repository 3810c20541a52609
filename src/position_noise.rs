use crate::impl_standard_traits;
use uniform_array_derive::UniformArray;

/// The measurement noise of a position fix, as variances in degrees².
#[derive(UniformArray)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[repr(C)]
pub struct PositionNoise<T> {
    /// The latitude noise (sigma-squared).
    pub latitude: T,
    /// The longitude noise (sigma-squared).
    pub longitude: T,
}

impl<T> PositionNoise<T> {
    /// Initializes a new [`PositionNoise`] instance.
    #[inline(always)]
    pub const fn new(latitude: T, longitude: T) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Initializes a new [`PositionNoise`] instance with the same variance on both axes.
    #[inline(always)]
    pub fn uniform(variance: T) -> Self
    where
        T: Clone,
    {
        Self::new(variance.clone(), variance)
    }
}

impl_standard_traits!(PositionNoise, T, latitude, longitude);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_uniform() {
        let noise = PositionNoise::uniform(0.1_f32);
        assert_eq!(noise[0], 0.1);
        assert_eq!(noise[1], 0.1);
        assert_eq!(noise.len(), 2);
    }
}
