//! # GPS trajectory smoothing
//!
//! A constant-velocity Kalman filter that turns a noisy sequence of latitude/longitude
//! fixes into a smoothed trajectory of the same length.
//!
//! ```
//! use gps_kalman::{Measurement, TrajectoryProcessor};
//!
//! let measurements = [
//!     Measurement::new(0.0, 37.0, -122.0),
//!     Measurement::new(1.0, 37.001, -122.001),
//!     Measurement::new(2.0, 37.002, -122.002),
//! ];
//!
//! let trajectory = TrajectoryProcessor::<f64>::default()
//!     .process(&measurements)
//!     .unwrap();
//! assert_eq!(trajectory.filtered.len(), 3);
//! ```

// Enable no_std mode.
#![cfg_attr(not(feature = "std"), no_std)]
// Ensure allow(unsafe_code) / forbid(unsafe_code) markers.
#![cfg_attr(feature = "unsafe", allow(unsafe_code))]
#![cfg_attr(not(feature = "unsafe"), forbid(unsafe_code))]
// Only enables the `doc_cfg` feature when the `docsrs` configuration attribute is defined.
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "rayon")]
#[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
pub mod batch;
pub mod constant_velocity;
mod error;
mod filter_state;
mod macros;
mod measurement;
mod model_parameters;
mod position;
mod position_noise;
#[cfg(feature = "alloc")]
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
mod trajectory;

pub use crate::constant_velocity::ConstantVelocityFilter;
pub use crate::error::FilterError;
pub use crate::filter_state::{FilterState, STATES};
pub use crate::measurement::{Measurement, TimedPosition};
pub use crate::model_parameters::{ModelParameters, TimeModel};
pub use crate::position::Position;
pub use crate::position_noise::PositionNoise;
#[cfg(feature = "alloc")]
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
pub use crate::trajectory::{process, Render, TimeSource, Trajectory, TrajectoryProcessor};
