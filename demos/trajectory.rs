use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use kiss3d::camera::ArcBall;
use kiss3d::event::{Action, Key, WindowEvent};
use kiss3d::light::Light;
use kiss3d::nalgebra::{Point2, Point3};
use kiss3d::text::Font;
use kiss3d::window::Window;

use gps_kalman::{ModelParameters, PositionNoise, TimeModel, TimeSource, TrajectoryProcessor};

use crate::trajectory_utils::{read_csv, GpsRecord, ScatterPlot};

mod trajectory_utils;

#[derive(Parser, Debug)]
#[command(author, version, about = "GPS data: raw vs. Kalman filtered", long_about = None)]
struct Args {
    /// The GPS log with `Latitude`, `Longitude` and optional `Time` columns
    #[arg(default_value = "tests/data/gps/drive.csv")]
    path: PathBuf,

    /// Field delimiter of the log
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Process noise variance applied to every state
    #[arg(short = 'q', long, default_value_t = 0.01)]
    process_noise: f64,

    /// Measurement noise variance applied to latitude and longitude
    #[arg(short = 'r', long, default_value_t = 0.1)]
    measurement_noise: f64,

    /// Scale the motion model by the recorded time between samples
    #[arg(short, long)]
    elapsed_time: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let delimiter = u8::try_from(args.delimiter)
        .map_err(|_| format!("delimiter {:?} is not a single byte", args.delimiter))?;
    let records = read_csv::<GpsRecord>(&args.path, delimiter)?;
    let measurements = GpsRecord::vec_into_measurements(records);
    log::info!("Loaded {} samples from {}", measurements.len(), args.path.display());

    let time_model = if args.elapsed_time {
        TimeModel::ElapsedTime
    } else {
        TimeModel::UnitStep
    };
    let parameters = ModelParameters::new(
        args.process_noise,
        PositionNoise::uniform(args.measurement_noise),
        1.0,
    )
    .with_time_model(time_model);

    let processor = TrajectoryProcessor::new(parameters);
    let trajectory = processor.process(&measurements)?;
    if trajectory.time_source == TimeSource::Synthetic {
        log::info!("No time column found; samples are labelled by their index");
    }

    let scene = trajectory.render_with(&ScatterPlot::default());

    let font = Font::default();
    let mut window = Window::new("GPS Data: Raw vs. Kalman Filtered");
    window.set_framerate_limit(Some(30));
    window.set_light(Light::StickToCamera);
    window.set_point_size(6.0);

    let mut camera = ArcBall::new(Point3::new(0.0, 0.0, 3.0), Point3::origin());

    // Some colors.
    let red = Point3::new(1.0, 0.0, 0.0);
    let blue = Point3::new(0.2, 0.4, 1.0);
    let white = Point3::new(1.0, 1.0, 1.0);

    let mut display_raw = true;
    let mut display_filtered = true;
    let mut display_lines = false;

    while window.render_with_camera(&mut camera) {
        for event in window.events().iter() {
            if let WindowEvent::Key(key, Action::Press, _) = event.value {
                if key == Key::R {
                    display_raw = !display_raw;
                } else if key == Key::F {
                    display_filtered = !display_filtered;
                } else if key == Key::L {
                    display_lines = !display_lines;
                }
            }
        }

        window.set_background_color(0.118, 0.122, 0.149);

        if display_raw {
            for point in &scene.raw {
                window.draw_point(point, &red);
            }
            if display_lines {
                for pair in scene.raw.windows(2) {
                    window.draw_line(&pair[0], &pair[1], &(red * 0.5));
                }
            }
        }

        if display_filtered {
            for point in &scene.filtered {
                window.draw_point(point, &blue);
            }
            if display_lines {
                for pair in scene.filtered.windows(2) {
                    window.draw_line(&pair[0], &pair[1], &(blue * 0.5));
                }
            }
        }

        window.draw_text(
            "Raw GPS Data (R)",
            &Point2::new(0.0, 0.0),
            32.0,
            &font,
            &red,
        );
        window.draw_text(
            "Filtered GPS Data (F)",
            &Point2::new(0.0, 32.0),
            32.0,
            &font,
            &blue,
        );
        window.draw_text(
            "x: Latitude, y: Longitude (L toggles lines)",
            &Point2::new(0.0, 64.0),
            32.0,
            &font,
            &white,
        );
    }

    Ok(())
}
