// Host-side tests for the camera orbit state machine.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod scene {
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod tween {
        include!("../src/core/tween.rs");
    }
    pub mod orbit {
        include!("../src/core/orbit.rs");
    }
}

use glam::Vec3;
use scene::camera::Camera;
use scene::orbit::*;

const EPS: f32 = 1e-4;

/// Drive `ctl` with fixed steps, starting from `t0`. Returns the end time and
/// every effect emitted along the way.
fn run(ctl: &mut OrbitController, t0: f64, dt: f64, steps: usize) -> (f64, Vec<OrbitEffect>) {
    let mut t = t0;
    let mut effects = Vec::new();
    for _ in 0..steps {
        t += dt;
        effects.extend(ctl.frame(t, dt).effects);
    }
    (t, effects)
}

#[test]
fn initial_state_matches_defaults() {
    let ctl = OrbitController::default();
    let s = ctl.state();
    assert_eq!(s.radius, 15.0);
    assert_eq!(s.radius_direction, RadiusDirection::Increasing);
    assert!((s.orbit_angular_speed - 0.0033).abs() < 1e-7);
    assert_eq!(s.camera_height, 60.0);
    assert!(!s.camera_animating);
    assert_eq!(ctl.status(), TransitionStatus::Idle);
    assert!(!ctl.is_radius_scheduled());
}

#[test]
fn radius_rises_linearly_to_thirty_then_flips() {
    let mut ctl = OrbitController::default();
    ctl.frame(0.0, 0.0);
    assert_eq!(ctl.status(), TransitionStatus::Running(RadiusDirection::Increasing));
    assert!(ctl.is_radius_scheduled());

    for i in 1..=14 {
        ctl.frame(i as f64 * 100.0, 100.0);
        let expected = 15.0 + i as f32;
        assert!((ctl.state().radius - expected).abs() < EPS, "step {i}");
        assert_eq!(ctl.state().radius_direction, RadiusDirection::Increasing);
    }

    ctl.frame(1500.0, 100.0);
    assert_eq!(ctl.state().radius, 30.0);
    assert_eq!(ctl.state().radius_direction, RadiusDirection::Decreasing);
    assert_eq!(ctl.status(), TransitionStatus::Idle);
    assert!(!ctl.is_radius_scheduled());

    // next frame starts the way back down
    ctl.frame(1600.0, 100.0);
    assert_eq!(ctl.status(), TransitionStatus::Running(RadiusDirection::Decreasing));
    assert!((ctl.state().radius - 29.0).abs() < EPS);
}

#[test]
fn repeated_checks_never_double_schedule_a_leg() {
    let mut ctl = OrbitController::default();
    // many frames with no elapsed time: the leg is scheduled once and waits
    for _ in 0..50 {
        ctl.frame(0.0, 0.0);
        assert_eq!(ctl.status(), TransitionStatus::Running(RadiusDirection::Increasing));
        assert_eq!(ctl.state().radius, 15.0);
    }
    let (_, _) = run(&mut ctl, 0.0, 50.0, 30);
    assert_eq!(ctl.state().radius, 30.0);
    assert_eq!(ctl.state().radius_direction, RadiusDirection::Decreasing);
}

#[test]
fn direction_alternates_strictly() {
    let mut ctl = OrbitController::default();
    let mut legs: Vec<RadiusDirection> = Vec::new();
    let mut t = 0.0;
    // uneven frame pacing, including dropped frames
    let pattern = [16.7, 16.6, 33.3, 16.7, 50.0, 8.0];
    for i in 0..2000 {
        let dt = pattern[i % pattern.len()];
        t += dt;
        let before = ctl.status();
        ctl.frame(t, dt);
        if let TransitionStatus::Running(dir) = ctl.status() {
            if !matches!(before, TransitionStatus::Running(_)) {
                legs.push(dir);
            }
        }
    }
    assert!(legs.len() > 10);
    assert_eq!(legs[0], RadiusDirection::Increasing);
    for pair in legs.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
    let r = ctl.state().radius;
    assert!(r >= 15.0 - EPS && r <= 30.0 + EPS);
}

#[test]
fn full_cycle_returns_to_starting_radius() {
    let mut ctl = OrbitController::default();
    ctl.frame(0.0, 0.0);
    let (t, _) = run(&mut ctl, 0.0, 100.0, 15);
    assert_eq!(ctl.state().radius, 30.0);
    ctl.frame(t, 0.0);
    run(&mut ctl, t, 100.0, 15);
    assert!((ctl.state().radius - 15.0).abs() < EPS);
    assert_eq!(ctl.state().radius_direction, RadiusDirection::Increasing);
}

#[test]
fn opening_sequence_runs_once_and_requests_video_once() {
    let mut ctl = OrbitController::default();
    assert!(ctl.start_animation());
    assert!(ctl.state().camera_animating);
    assert!(!ctl.start_animation());

    let (t, effects) = run(&mut ctl, 0.0, 100.0, 39);
    assert!(effects.is_empty(), "video must wait for the slow-down");
    assert!(ctl.state().camera_height > 17.0);

    let (t, effects) = run(&mut ctl, t, 100.0, 1);
    assert_eq!(effects, vec![OrbitEffect::PlayVideo]);
    assert!((ctl.state().camera_height - 17.0).abs() < EPS);
    assert!((ctl.state().orbit_angular_speed - 0.0003).abs() < 1e-7);

    assert!(!ctl.start_animation());
    let (_, effects) = run(&mut ctl, t, 100.0, 100);
    assert!(effects.is_empty());
}

#[test]
fn opening_interpolates_linearly() {
    let mut ctl = OrbitController::default();
    ctl.start_animation();
    run(&mut ctl, 0.0, 100.0, 20);
    // halfway: 60 -> 17 and 0.0033 -> 0.0003
    assert!((ctl.state().camera_height - 38.5).abs() < EPS);
    assert!((ctl.state().orbit_angular_speed - 0.0018).abs() < 1e-6);
    assert!(ctl.is_animating(OrbitChannel::CameraHeight));
}

#[test]
fn camera_orbits_and_faces_the_box_every_frame() {
    let mut ctl = OrbitController::default();
    let subject = Vec3::new(0.0, 9.0, 0.0);
    let mut t = 0.0;
    for _ in 0..500 {
        t += 16.7;
        let pose = ctl.frame(t, 16.7).pose;
        assert_eq!(pose.target, subject);
        let horizontal = (pose.eye.x * pose.eye.x + pose.eye.z * pose.eye.z).sqrt();
        assert!(horizontal >= 15.0 - EPS && horizontal <= 30.0 + EPS);
    }
}

#[test]
fn pose_follows_the_orbit_formula() {
    let ctl = OrbitController::default();
    let t = 1234.0;
    let theta = t * 0.0033_f32 as f64;
    let pose = ctl.pose_at(t);
    assert!((pose.eye.x - 15.0 * theta.cos() as f32).abs() < EPS);
    assert!((pose.eye.z - 15.0 * theta.sin() as f32).abs() < EPS);
    assert_eq!(pose.eye.y, 60.0);
}

#[test]
fn view_matrix_puts_the_box_straight_ahead() {
    let ctl = OrbitController::default();
    let mut cam = Camera::perspective(16.0 / 9.0);
    for t in [0.0, 300.0, 999.0, 4321.0] {
        cam.apply_pose(ctl.pose_at(t));
        let p = cam.view_matrix().transform_point3(Vec3::new(0.0, 9.0, 0.0));
        assert!(p.x.abs() < 1e-3 && p.y.abs() < 1e-3, "{p:?}");
        assert!(p.z < 0.0);
    }
}

#[test]
fn legs_keep_their_length_when_frames_straddle_the_end() {
    // 40 ms frames put each leg end mid-frame (1500 / 40 = 37.5)
    let mut ctl = OrbitController::default();
    ctl.frame(0.0, 0.0);
    let mut flips = 0;
    let mut t = 0.0;
    for _ in 0..1510 {
        t += 40.0;
        let before = ctl.state().radius_direction;
        ctl.frame(t, 40.0);
        if ctl.state().radius_direction != before {
            flips += 1;
        }
    }
    // 60.4 s of legs at 1.5 s each
    assert_eq!(flips, 40);
    let r = ctl.state().radius;
    assert!(r >= 15.0 - EPS && r <= 30.0 + EPS);
}
