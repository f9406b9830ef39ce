// Host-side tests for the transition scheduler.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod tween {
    include!("../src/core/tween.rs");
}

use glam::Vec3;
use tween::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Key {
    A,
    B,
}

#[test]
fn easing_endpoints_and_midpoints() {
    for e in [Easing::Linear, Easing::QuadraticOut] {
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
    }
    assert!((Easing::Linear.apply(0.5) - 0.5).abs() < 1e-6);
    assert!((Easing::QuadraticOut.apply(0.5) - 0.75).abs() < 1e-6);
    // clamped outside [0, 1]
    assert_eq!(Easing::QuadraticOut.apply(2.0), 1.0);
    assert_eq!(Easing::Linear.apply(-1.0), 0.0);
}

#[test]
fn quadratic_out_front_loads_progress() {
    let mut prev = 0.0;
    for i in 1..=10 {
        let k = i as f32 / 10.0;
        let v = Easing::QuadraticOut.apply(k);
        assert!(v >= k, "quadratic-out never lags linear");
        assert!(v > prev);
        prev = v;
    }
}

#[test]
fn linear_tween_interpolates_and_lands_on_target() {
    let mut t = Tween::new(10.0_f32, 20.0, 1000.0, Easing::Linear);
    assert!((t.advance(250.0) - 12.5).abs() < 1e-5);
    assert!(!t.is_finished());
    assert!((t.advance(250.0) - 15.0).abs() < 1e-5);
    assert_eq!(t.advance(5000.0), 20.0);
    assert!(t.is_finished());
    assert_eq!(t.progress(), 1.0);
}

#[test]
fn negative_steps_do_not_rewind() {
    let mut t = Tween::new(0.0_f32, 1.0, 100.0, Easing::Linear);
    t.advance(50.0);
    let v = t.advance(-30.0);
    assert!((v - 0.5).abs() < 1e-6);
}

#[test]
fn zero_duration_finishes_on_first_advance() {
    let mut tw: Tweener<Key, f32> = Tweener::new();
    tw.start(Key::A, 1.0, 3.0, 0.0, Easing::Linear);
    let mut seen = None;
    let done = tw.advance(0.0, |_, v| seen = Some(v));
    assert_eq!(done.as_slice(), &[Key::A]);
    assert_eq!(seen, Some(3.0));
    assert!(tw.is_empty());
}

#[test]
fn completion_is_reported_exactly_once() {
    let mut tw: Tweener<Key, f32> = Tweener::new();
    tw.start(Key::A, 0.0, 1.0, 100.0, Easing::Linear);
    let mut completions = 0;
    for _ in 0..20 {
        completions += tw.advance(16.0, |_, _| {}).len();
    }
    assert_eq!(completions, 1);
    assert!(!tw.is_active(Key::A));
}

#[test]
fn restarting_a_key_supersedes_the_in_flight_tween() {
    let mut tw: Tweener<Key, f32> = Tweener::new();
    let mut value = 0.0;
    assert!(!tw.start(Key::A, 0.0, 10.0, 100.0, Easing::Linear));
    tw.advance(50.0, |_, v| value = v);
    assert!((value - 5.0).abs() < 1e-5);

    // last write wins: new target, fresh duration, old completion never fires
    assert!(tw.start(Key::A, value, 0.0, 100.0, Easing::Linear));
    assert_eq!(tw.len(), 1);
    let done = tw.advance(50.0, |_, v| value = v);
    assert!(done.is_empty());
    assert!((value - 2.5).abs() < 1e-5);
    let done = tw.advance(50.0, |_, v| value = v);
    assert_eq!(done.as_slice(), &[Key::A]);
    assert_eq!(value, 0.0);
}

#[test]
fn keys_advance_independently() {
    let mut tw: Tweener<Key, f32> = Tweener::new();
    tw.start(Key::A, 0.0, 1.0, 100.0, Easing::Linear);
    tw.start(Key::B, 0.0, 1.0, 200.0, Easing::Linear);
    let done = tw.advance(100.0, |_, _| {});
    assert_eq!(done.as_slice(), &[Key::A]);
    assert!(tw.is_active(Key::B));
    assert!((tw.get(Key::B).map(|t| t.value()).unwrap_or(0.0) - 0.5).abs() < 1e-6);
}

#[test]
fn vec3_tweens_move_all_axes_together() {
    let mut t = Tween::new(Vec3::ONE, Vec3::splat(5.0), 100.0, Easing::QuadraticOut);
    let v = t.advance(50.0);
    assert!((v.x - 4.0).abs() < 1e-5);
    assert_eq!(v.x, v.y);
    assert_eq!(v.y, v.z);
    assert_eq!(t.target(), Vec3::splat(5.0));
}

#[test]
fn overshoot_is_reported_for_finished_keys_only() {
    let mut tw: Tweener<Key, f32> = Tweener::new();
    tw.start(Key::A, 0.0, 1.0, 100.0, Easing::Linear);
    tw.start(Key::B, 0.0, 1.0, 500.0, Easing::Linear);
    tw.advance(80.0, |_, _| {});
    assert_eq!(tw.overshoot_ms(Key::A), 0.0);
    let done = tw.advance(50.0, |_, _| {});
    assert_eq!(done.as_slice(), &[Key::A]);
    assert!((tw.overshoot_ms(Key::A) - 30.0).abs() < 1e-9);
    assert_eq!(tw.overshoot_ms(Key::B), 0.0);
    // cleared on the next step
    tw.advance(10.0, |_, _| {});
    assert_eq!(tw.overshoot_ms(Key::A), 0.0);
}

#[test]
fn fast_forward_credits_time_without_completing() {
    let mut tw: Tweener<Key, f32> = Tweener::new();
    tw.start(Key::A, 0.0, 10.0, 100.0, Easing::Linear);
    tw.fast_forward(Key::A, 30.0);
    assert!((tw.get(Key::A).map(|t| t.value()).unwrap_or(0.0) - 3.0).abs() < 1e-5);
    let mut value = 0.0;
    let done = tw.advance(70.0, |_, v| value = v);
    assert_eq!(done.as_slice(), &[Key::A]);
    assert_eq!(value, 10.0);
    // unknown keys are ignored
    tw.fast_forward(Key::B, 10.0);
    assert!(tw.is_empty());
}
