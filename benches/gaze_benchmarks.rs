//! Benchmarks for the per-frame gaze geometry

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gaze_estimation::camera::CameraIntrinsics;
use gaze_estimation::constants::{EYEBALL_RADIUS_MM, EYE_MODEL_LANDMARKS, IRIS_RING_LANDMARKS, NUM_FACIAL_LANDMARKS};
use gaze_estimation::eye_geometry::pupil_position;
use gaze_estimation::gaze::{Eye, GazeSession};
use gaze_estimation::ray_sphere;
use gaze_estimation::rotation::euler_to_rotation_matrix;
use gaze_estimation::tracked_model::{GlobalParams, SubModel, TrackedModel};
use nalgebra::Vector3;
use ndarray::Array2;

fn frontal_model(cam: &CameraIntrinsics) -> TrackedModel {
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

    let mut model = TrackedModel::new(global, face, vec![0.0; NUM_FACIAL_LANDMARKS], true, -0.8).unwrap();
    for (name, eye_x) in [("left_eye_28", -32.0), ("right_eye_28", 32.0)] {
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
        let sub_model = SubModel::new(landmarks, vec![0.0; EYE_MODEL_LANDMARKS], cam.fx / z_pupil).unwrap();
        model.insert_sub_model(name, sub_model);
    }
    model
}

fn benchmark_rotation(c: &mut Criterion) {
    // Jittered angles so the compiler cannot constant-fold the trigonometry
    let angles: Vec<Vector3<f64>> = (0..100)
        .map(|_| {
            Vector3::new(
                rand::random::<f64>() - 0.5,
                rand::random::<f64>() - 0.5,
                rand::random::<f64>() - 0.5,
            )
        })
        .collect();

    c.bench_function("euler_to_rotation_matrix", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % angles.len();
            black_box(euler_to_rotation_matrix(black_box(angles[i])))
        });
    });
}

fn benchmark_ray_sphere(c: &mut Criterion) {
    let centre = Vector3::new(-32.0, -8.5, 500.0);
    let direction = Vector3::new(-32.0, -8.5, 488.0).normalize();

    c.bench_function("ray_sphere_intersect", |b| {
        b.iter(|| {
            black_box(ray_sphere::intersect(
                black_box(Vector3::zeros()),
                black_box(direction),
                black_box(centre),
                black_box(EYEBALL_RADIUS_MM),
            ))
        });
    });
}

fn benchmark_pupil_position(c: &mut Criterion) {
    let cloud = Array2::from_shape_fn((EYE_MODEL_LANDMARKS, 3), |(i, j)| (i + j) as f64 * 0.37);

    c.bench_function("pupil_position_28", |b| {
        b.iter(|| black_box(pupil_position(black_box(cloud.view()))));
    });
}

fn benchmark_estimate_gaze(c: &mut Criterion) {
    let cam = CameraIntrinsics::default().resolve(640.0, 480.0);
    let session = GazeSession::new(cam);
    let model = frontal_model(&cam);

    c.bench_function("estimate_gaze_single_eye", |b| {
        b.iter(|| black_box(session.estimate_gaze(black_box(&model), Eye::Left)));
    });

    c.bench_function("estimate_gaze_both_eyes", |b| {
        b.iter(|| {
            black_box(session.estimate_gaze(black_box(&model), Eye::Left));
            black_box(session.estimate_gaze(black_box(&model), Eye::Right));
        });
    });
}

criterion_group!(
    benches,
    benchmark_rotation,
    benchmark_ray_sphere,
    benchmark_pupil_position,
    benchmark_estimate_gaze
);
criterion_main!(benches);
