//! Eye-gaze estimation library for tracked faces.
//!
//! This library computes per-frame 3D gaze direction vectors from the output
//! of an external facial-landmark tracker:
//! 1. A 6-DOF head pose is derived from the tracker's global parameters via
//!    weak-perspective inversion
//! 2. The pupil centre is estimated from the iris ring of a hierarchical
//!    28-point eye sub-model
//! 3. A ray from the camera through the pupil is intersected with an
//!    anatomical eyeball sphere
//! 4. The gaze is the unit direction from the eyeball centre to the
//!    intersection point, projected to pixels on request for visualization
//!
//! The tracker itself, image decoding and any drawing are external
//! collaborators; this crate only consumes a per-frame [`tracked_model::TrackedModel`]
//! snapshot and camera intrinsics.
//!
//! # Examples
//!
//! ## Estimating gaze for one eye
//!
//! ```
//! use gaze_estimation::camera::CameraIntrinsics;
//! use gaze_estimation::gaze::{Eye, GazeSession};
//! use gaze_estimation::tracked_model::{GlobalParams, SubModel, TrackedModel};
//! use ndarray::Array2;
//!
//! # fn main() -> gaze_estimation::Result<()> {
//! // Frontal face 500 mm from a 640x480 camera with default calibration
//! let intrinsics = CameraIntrinsics::default().resolve(640.0, 480.0);
//! let global = GlobalParams {
//!     scale: 1.0,
//!     tx: 320.0,
//!     ty: 240.0,
//!     ..GlobalParams::default()
//! };
//!
//! // Face landmark set; the eye corners live at rows 36/39 and 42/45
//! let mut face = Array2::from_elem((68, 2), 320.0);
//! for (row, x, y) in [
//!     (36, 278.0, 235.0),
//!     (39, 298.0, 235.0),
//!     (42, 342.0, 235.0),
//!     (45, 362.0, 235.0),
//! ] {
//!     face[[row, 0]] = x;
//!     face[[row, 1]] = y;
//! }
//! let mut model = TrackedModel::new(global, face, vec![0.0; 68], true, -0.8)?;
//!
//! // 28-point eye sub-model: the first 8 points are the iris ring
//! let left_eye = Array2::from_shape_fn((28, 2), |(i, j)| {
//!     let angle = std::f64::consts::TAU * (i % 8) as f64 / 8.0;
//!     let radius = if i < 8 { 2.0 } else { 6.0 };
//!     match j {
//!         0 => 287.2 + radius * angle.cos(),
//!         _ => 231.3 + radius * angle.sin(),
//!     }
//! });
//! model.insert_sub_model("left_eye_28", SubModel::new(left_eye, vec![0.0; 28], 500.0 / 488.0)?);
//!
//! let session = GazeSession::new(intrinsics);
//! let gaze = session.estimate_gaze(&model, Eye::Left);
//! assert!((gaze.direction().norm() - 1.0).abs() < 1e-6);
//! # Ok(())
//! # }
//! ```
//!
//! ## Processing frames through the adapter
//!
//! ```no_run
//! use gaze_estimation::config::Config;
//! use gaze_estimation::frame::FrameConsumer;
//! use gaze_estimation::tracked_model::TrackedModel;
//!
//! # fn next_tracked_frame() -> TrackedModel { unimplemented!() }
//! # fn main() -> gaze_estimation::Result<()> {
//! let config = Config::from_file("gaze.yaml")?;
//! config.validate()?;
//! let mut processor = config.frame_processor();
//!
//! loop {
//!     let model = next_tracked_frame();
//!     let output = processor.consume_frame(&model, 640, 480);
//!     println!("left gaze: {:?}", output.left.direction());
//! }
//! # }
//! ```

/// Camera intrinsic parameters and the fallback calibration heuristic
pub mod camera;

/// Configuration management
pub mod config;

/// Constants used throughout the library
pub mod constants;

/// Error types and result handling
pub mod error;

/// Eye-region landmark geometry and pupil estimation
pub mod eye_geometry;

/// Per-frame processing adapter for host frameworks
pub mod frame;

/// Gaze direction estimation for one eye
pub mod gaze;

/// Camera-space head pose extraction
pub mod head_pose;

/// Pinhole projection of pupil geometry into pixels
pub mod projection;

/// Ray and sphere intersection
pub mod ray_sphere;

/// Euler angle to rotation matrix conversion
pub mod rotation;

/// Per-frame snapshot of the external tracker's output
pub mod tracked_model;

pub use error::{Error, Result};
