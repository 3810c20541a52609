//! A constant-velocity Kalman filter over latitude and longitude.

mod filter;
mod types;

pub use filter::ConstantVelocityFilter;
pub use types::OBSERVATIONS;
