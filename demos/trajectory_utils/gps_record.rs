use gps_kalman::Measurement;
use serde::Deserialize;

/// One row of a GPS log.
#[derive(Debug, Deserialize)]
pub struct GpsRecord {
    /// The sample time; the column is optional.
    #[serde(rename = "Time", default)]
    pub time: Option<f64>,
    /// Latitude, in degrees.
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    /// Longitude, in degrees.
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

impl GpsRecord {
    pub fn vec_into_measurements(vec: Vec<Self>) -> Vec<Measurement<f64>> {
        vec.into_iter().map(Measurement::from).collect()
    }
}

impl From<GpsRecord> for Measurement<f64> {
    fn from(value: GpsRecord) -> Self {
        match value.time {
            Some(time) => Measurement::new(time, value.latitude, value.longitude),
            None => Measurement::untimed(value.latitude, value.longitude),
        }
    }
}
