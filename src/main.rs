//! Demo driver: runs the gaze pipeline over synthetic tracker frames.
//!
//! There is no tracker or camera in this crate, so the binary synthesizes a
//! frontal face snapshot per frame (with periodic detection dropouts) and
//! feeds it through the frame processor, printing the estimated gaze.

use anyhow::Result;
use clap::Parser;
use gaze_estimation::camera::CameraIntrinsics;
use gaze_estimation::config::Config;
use gaze_estimation::constants::{EYE_MODEL_LANDMARKS, IRIS_RING_LANDMARKS, NUM_FACIAL_LANDMARKS};
use gaze_estimation::frame::FrameConsumer;
use gaze_estimation::tracked_model::{GlobalParams, SubModel, TrackedModel};
use log::info;
use ndarray::Array2;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of synthetic frames to process
    #[arg(short = 'n', long, default_value = "30")]
    frames: u64,

    /// Frame width in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value = "480")]
    height: u32,

    /// Focal length x (0 derives from the frame size)
    #[arg(long, default_value = "0.0")]
    fx: f64,

    /// Focal length y (0 derives from the frame size)
    #[arg(long, default_value = "0.0")]
    fy: f64,

    /// Optical centre x (0 derives from the frame size)
    #[arg(long, default_value = "0.0")]
    cx: f64,

    /// Optical centre y (0 derives from the frame size)
    #[arg(long, default_value = "0.0")]
    cy: f64,

    /// Simulate a tracker dropout every Nth frame (0 disables)
    #[arg(long, default_value = "7")]
    dropout_every: u64,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::default().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    }

    info!("Gaze Estimation - synthetic frame demo");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command-line intrinsics override the configured ones when set
    let cli_camera = CameraIntrinsics::new(args.fx, args.fy, args.cx, args.cy);
    if cli_camera != CameraIntrinsics::default() {
        config.camera = cli_camera;
    }
    config.validate()?;

    let intrinsics = config.camera.resolve(f64::from(args.width), f64::from(args.height));
    info!(
        "intrinsics: fx={} fy={} cx={} cy={}",
        intrinsics.fx, intrinsics.fy, intrinsics.cx, intrinsics.cy
    );

    let mut processor = config.frame_processor();

    for frame in 0..args.frames {
        let dropout = args.dropout_every != 0 && frame % args.dropout_every == args.dropout_every - 1;
        let model = synthetic_frontal_model(&intrinsics, dropout)?;

        let output = processor.consume_frame(&model, args.width, args.height);

        let left = output.left.direction();
        let right = output.right.direction();
        info!(
            "frame {frame:3}: left=({:+.3}, {:+.3}, {:+.3}) right=({:+.3}, {:+.3}, {:+.3}) pupils={:?}/{:?}{}",
            left.x,
            left.y,
            left.z,
            right.x,
            right.y,
            right.z,
            output.pupil_left,
            output.pupil_right,
            if dropout { "  [tracker dropout]" } else { "" }
        );
    }

    info!("processed {} frames", processor.frames_processed());
    Ok(())
}

/// Build one frame of synthetic tracker output: a frontal face 500 mm from
/// the camera with both 28-point eye sub-models attached.
fn synthetic_frontal_model(intrinsics: &CameraIntrinsics, dropout: bool) -> Result<TrackedModel> {
    let global = GlobalParams {
        scale: 1.0,
        rotation: nalgebra::Vector3::zeros(),
        tx: intrinsics.cx,
        ty: intrinsics.cy,
    };

    // Face landmarks sit at the optical centre except the four eye corners
    let mut face = Array2::from_elem((NUM_FACIAL_LANDMARKS, 2), 0.0);
    for row in 0..NUM_FACIAL_LANDMARKS {
        face[[row, 0]] = intrinsics.cx;
        face[[row, 1]] = intrinsics.cy;
    }
    let corner_y = intrinsics.cy - 5.0;
    for (row, dx) in [(36, -42.0), (39, -22.0), (42, 22.0), (45, 42.0)] {
        face[[row, 0]] = intrinsics.cx + dx;
        face[[row, 1]] = corner_y;
    }

    let certainty = if dropout { 0.9 } else { -0.8 };
    let mut model = TrackedModel::new(global, face, vec![0.0; NUM_FACIAL_LANDMARKS], !dropout, certainty)?;

    for (name, eye_x) in [("left_eye_28", -32.0), ("right_eye_28", 32.0)] {
        model.insert_sub_model(name, synthetic_eye(intrinsics, eye_x)?);
    }
    Ok(model)
}

/// Eye sub-model whose iris ring surrounds the pupil of an eyeball centred
/// 12 mm behind it, so the frontal gaze points straight down the -z axis.
fn synthetic_eye(intrinsics: &CameraIntrinsics, eye_x: f64) -> Result<SubModel> {
    let z_eyeball = intrinsics.fx;
    let z_pupil = z_eyeball - gaze_estimation::constants::EYEBALL_RADIUS_MM;
    let pupil_px = intrinsics.fx * (eye_x / z_pupil) + intrinsics.cx;
    let pupil_py = intrinsics.fy * (-8.5 / z_pupil) + intrinsics.cy;

    let landmarks = Array2::from_shape_fn((EYE_MODEL_LANDMARKS, 2), |(i, j)| {
        let angle = std::f64::consts::TAU * (i % IRIS_RING_LANDMARKS) as f64 / IRIS_RING_LANDMARKS as f64;
        let radius = if i < IRIS_RING_LANDMARKS { 2.0 } else { 6.0 };
        match j {
            0 => pupil_px + radius * angle.cos(),
            _ => pupil_py + radius * angle.sin(),
        }
    });

    let scale = intrinsics.fx / z_pupil;
    Ok(SubModel::new(landmarks, vec![0.0; EYE_MODEL_LANDMARKS], scale)?)
}
