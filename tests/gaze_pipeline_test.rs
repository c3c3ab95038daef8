//! Integration tests for the gaze estimation pipeline

use gaze_estimation::camera::CameraIntrinsics;
use gaze_estimation::constants::{EYEBALL_RADIUS_MM, EYE_MODEL_LANDMARKS, IRIS_RING_LANDMARKS, NUM_FACIAL_LANDMARKS};
use gaze_estimation::frame::{FrameConsumer, GazeFrameProcessor};
use gaze_estimation::gaze::{sentinel_gaze, Eye, GazeSession};
use gaze_estimation::tracked_model::{GlobalParams, SubModel, TrackedModel};
use nalgebra::Vector3;
use ndarray::Array2;

/// Standard frontal calibration used across the scenario tests
fn intrinsics() -> CameraIntrinsics {
    CameraIntrinsics::default().resolve(640.0, 480.0)
}

/// Frontal face snapshot 500 mm from the camera, eye corners placed
/// symmetrically about the optical axis.
fn frontal_model(with_eyes: bool) -> TrackedModel {
    frontal_model_with_detection(with_eyes, true, -0.8)
}

fn frontal_model_with_detection(with_eyes: bool, success: bool, certainty: f64) -> TrackedModel {
    let cam = intrinsics();
    let global = GlobalParams {
        scale: 1.0,
        rotation: Vector3::zeros(),
        tx: cam.cx,
        ty: cam.cy,
    };

    let mut face = Array2::zeros((NUM_FACIAL_LANDMARKS, 2));
    for row in 0..NUM_FACIAL_LANDMARKS {
        face[[row, 0]] = cam.cx;
        face[[row, 1]] = cam.cy;
    }
    for (row, dx) in [(36, -42.0), (39, -22.0), (42, 22.0), (45, 42.0)] {
        face[[row, 0]] = cam.cx + dx;
        face[[row, 1]] = cam.cy - 5.0;
    }

    let mut model = TrackedModel::new(global, face, vec![0.0; NUM_FACIAL_LANDMARKS], success, certainty).unwrap();
    if with_eyes {
        model.insert_sub_model("left_eye_28", frontal_eye(&cam, -32.0));
        model.insert_sub_model("right_eye_28", frontal_eye(&cam, 32.0));
    }
    model
}

/// Eye sub-model whose iris ring surrounds the pupil of an eyeball sitting on
/// the face plane, pupil 12 mm in front of the eyeball centre.
fn frontal_eye(cam: &CameraIntrinsics, eye_x: f64) -> SubModel {
    let z_pupil = cam.fx - EYEBALL_RADIUS_MM;
    let pupil_px = cam.fx * (eye_x / z_pupil) + cam.cx;
    let pupil_py = cam.fy * (-8.5 / z_pupil) + cam.cy;

    let landmarks = Array2::from_shape_fn((EYE_MODEL_LANDMARKS, 2), |(i, j)| {
        let angle = std::f64::consts::TAU * (i % IRIS_RING_LANDMARKS) as f64 / IRIS_RING_LANDMARKS as f64;
        let radius = if i < IRIS_RING_LANDMARKS { 2.0 } else { 6.0 };
        match j {
            0 => pupil_px + radius * angle.cos(),
            _ => pupil_py + radius * angle.sin(),
        }
    });

    SubModel::new(landmarks, vec![0.0; EYE_MODEL_LANDMARKS], cam.fx / z_pupil).unwrap()
}

#[test]
fn test_frontal_gaze_points_down_negative_z() {
    let session = GazeSession::new(intrinsics());
    let model = frontal_model(true);

    let left = session.estimate_gaze(&model, Eye::Left);
    let right = session.estimate_gaze(&model, Eye::Right);

    assert!(left.is_valid());
    assert!(right.is_valid());

    let l = left.direction();
    let r = right.direction();
    assert!((l.norm() - 1.0).abs() < 1e-6);
    assert!((r.norm() - 1.0).abs() < 1e-6);
    assert!(l.z < -0.99, "left gaze should point toward the camera: {l:?}");
    assert!(r.z < -0.99, "right gaze should point toward the camera: {r:?}");
}

#[test]
fn test_frontal_gaze_lateral_symmetry() {
    let session = GazeSession::new(intrinsics());
    let model = frontal_model(true);

    let l = session.estimate_gaze(&model, Eye::Left).direction();
    let r = session.estimate_gaze(&model, Eye::Right).direction();

    assert!(
        (l.x + r.x).abs() < 0.05,
        "lateral components should cancel: {} vs {}",
        l.x,
        r.x
    );
}

#[test]
fn test_estimate_is_idempotent() {
    let session = GazeSession::new(intrinsics());
    let model = frontal_model(true);

    let first = session.estimate_gaze(&model, Eye::Left);
    let second = session.estimate_gaze(&model, Eye::Left);

    // Pure function of the frame snapshot: bit-identical results
    assert_eq!(first.direction(), second.direction());
    assert_eq!(first, second);
}

#[test]
fn test_missing_eye_model_degrades_to_sentinel() {
    let session = GazeSession::new(intrinsics());
    let model = frontal_model(false);

    let estimate = session.estimate_gaze(&model, Eye::Left);
    assert!(!estimate.is_valid());
    assert_eq!(estimate.direction(), sentinel_gaze());
}

#[test]
fn test_zero_scale_frame_degrades_to_sentinel() {
    let session = GazeSession::new(intrinsics());

    let global = GlobalParams::default();
    let mut model =
        TrackedModel::new(global, Array2::zeros((NUM_FACIAL_LANDMARKS, 2)), vec![0.0; NUM_FACIAL_LANDMARKS], true, -0.8)
            .unwrap();
    model.insert_sub_model(
        "left_eye_28",
        SubModel::new(Array2::zeros((EYE_MODEL_LANDMARKS, 2)), vec![0.0; EYE_MODEL_LANDMARKS], 0.0).unwrap(),
    );

    // Zero scale collapses every cloud onto the origin; the pupil ray is
    // degenerate but the frame still yields an output
    let estimate = session.estimate_gaze(&model, Eye::Left);
    assert_eq!(estimate.direction(), sentinel_gaze());
}

#[test]
fn test_pupil_pixel_positions() {
    let session = GazeSession::new(intrinsics());
    let model = frontal_model(true);

    let left = session.estimate_gaze(&model, Eye::Left);
    let right = session.estimate_gaze(&model, Eye::Right);

    let (lx, ly) = session.pupil_pixel_position(&model, left, Eye::Left).unwrap();
    let (rx, ry) = session.pupil_pixel_position(&model, right, Eye::Right).unwrap();

    // Pupils sit 32 mm either side of the axis at 488 mm depth
    assert_eq!((lx, ly), (287, 231));
    assert_eq!((rx, ry), (353, 231));
}

#[test]
fn test_pupil_pixel_position_missing_eye_model() {
    let session = GazeSession::new(intrinsics());
    let model = frontal_model(false);

    let err = session
        .pupil_pixel_position(&model, gaze_estimation::gaze::GazeEstimate::Unknown, Eye::Left)
        .unwrap_err();
    assert!(matches!(err, gaze_estimation::Error::EyeModelNotFound(_)));
}

#[test]
fn test_frame_processor_end_to_end() {
    let mut processor = GazeFrameProcessor::new(CameraIntrinsics::default());
    let model = frontal_model(true);

    let output = processor.consume_frame(&model, 640, 480);

    assert!(output.left.is_valid());
    assert!(output.right.is_valid());
    assert_eq!(output.pupil_left, Some((287, 231)));
    assert_eq!(output.pupil_right, Some((353, 231)));
}

#[test]
fn test_frame_processor_tracker_dropout() {
    let mut processor = GazeFrameProcessor::new(CameraIntrinsics::default());
    let good = frontal_model(true);
    let dropped = frontal_model_with_detection(true, false, 0.9);

    let first = processor.consume_frame(&good, 640, 480);
    let second = processor.consume_frame(&dropped, 640, 480);
    let third = processor.consume_frame(&good, 640, 480);

    // One output per frame: the dropout frame emits sentinels, not nothing
    assert!(first.left.is_valid());
    assert_eq!(second.left.direction(), sentinel_gaze());
    assert_eq!(second.pupil_left, None);
    assert!(third.left.is_valid());
    assert_eq!(processor.frames_processed(), 3);
}
