use gps_kalman::{Render, TimedPosition};
use kiss3d::nalgebra::Point3;

/// Points ready to be drawn, scaled into the unit square around the origin.
pub struct Scene {
    pub raw: Vec<Point3<f32>>,
    pub filtered: Vec<Point3<f32>>,
}

/// Projects latitude onto the horizontal and longitude onto the vertical axis.
///
/// Both sequences share one scale so that the filtered track can be compared to the
/// raw one point by point.
pub struct ScatterPlot {
    /// Half the edge length of the square the data is fitted into.
    pub extent: f32,
}

impl Default for ScatterPlot {
    fn default() -> Self {
        Self { extent: 1.0 }
    }
}

impl Render<f64> for ScatterPlot {
    type Output = Scene;

    fn render(&self, raw: &[TimedPosition<f64>], filtered: &[TimedPosition<f64>]) -> Scene {
        let (min, max) = raw.iter().chain(filtered.iter()).fold(
            ((f64::INFINITY, f64::INFINITY), (f64::NEG_INFINITY, f64::NEG_INFINITY)),
            |(min, max), p| {
                (
                    (min.0.min(p.latitude), min.1.min(p.longitude)),
                    (max.0.max(p.latitude), max.1.max(p.longitude)),
                )
            },
        );

        let center = ((min.0 + max.0) * 0.5, (min.1 + max.1) * 0.5);
        let span = (max.0 - min.0).max(max.1 - min.1);
        let scale = if span > 0.0 {
            2.0 * self.extent as f64 / span
        } else {
            1.0
        };

        let project = |p: &TimedPosition<f64>| {
            Point3::new(
                ((p.latitude - center.0) * scale) as f32,
                ((p.longitude - center.1) * scale) as f32,
                0.0,
            )
        };

        Scene {
            raw: raw.iter().map(project).collect(),
            filtered: filtered.iter().map(project).collect(),
        }
    }
}
