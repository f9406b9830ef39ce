// Host-side tests for the scene meshes.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod geometry {
    include!("../src/render/geometry.rs");
}

use geometry::*;
use glam::Vec3;

#[test]
fn box_mesh_has_six_quads_with_expected_extents() {
    let (verts, indices) = box_mesh([9.0, 16.0, 9.0]);
    assert_eq!(verts.len(), 24);
    assert_eq!(indices.len(), 36);
    assert!(indices.iter().all(|&i| (i as usize) < verts.len()));
    for v in &verts {
        let p = Vec3::from_array(v.position);
        assert!((p.x.abs() - 4.5).abs() < 1e-6);
        assert!((p.y.abs() - 8.0).abs() < 1e-6);
        assert!((p.z.abs() - 4.5).abs() < 1e-6);
        assert!(v.uv.iter().all(|c| *c == 0.0 || *c == 1.0));
    }
}

#[test]
fn box_triangles_wind_counter_clockwise_from_outside() {
    let (verts, indices) = box_mesh([2.0, 2.0, 2.0]);
    for tri in indices.chunks(3) {
        let a = Vec3::from_array(verts[tri[0] as usize].position);
        let b = Vec3::from_array(verts[tri[1] as usize].position);
        let c = Vec3::from_array(verts[tri[2] as usize].position);
        let normal = (b - a).cross(c - a);
        let centroid = (a + b + c) / 3.0;
        assert!(normal.dot(centroid) > 0.0, "inward-facing triangle {tri:?}");
    }
}

#[test]
fn grid_covers_the_requested_square_on_the_ground() {
    let color = [1.0, 0.0, 1.0];
    let lines = grid_lines(100.0, 100, color);
    assert_eq!(lines.len(), 101 * 4);
    for v in &lines {
        assert_eq!(v.position[1], 0.0);
        assert!(v.position[0].abs() <= 50.0 + 1e-4);
        assert!(v.position[2].abs() <= 50.0 + 1e-4);
        assert_eq!(v.color, color);
    }
    // first and last rows sit on the border
    assert_eq!(lines[0].position, [-50.0, 0.0, -50.0]);
    let last = lines[lines.len() - 1].position;
    assert!((last[0] - 50.0).abs() < 1e-4 && (last[2] - 50.0).abs() < 1e-4);
}

#[test]
fn grid_with_zero_divisions_still_draws_the_border() {
    let lines = grid_lines(10.0, 0, [1.0; 3]);
    assert_eq!(lines.len(), 8);
}

#[test]
fn srgb_colors_decode_to_linear_light() {
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    // mid grey is much darker in linear light
    assert!((srgb_to_linear(0.5) - 0.2140).abs() < 1e-3);

    let magenta = linear_rgb([0xfc as f32 / 255.0, 0x03 as f32 / 255.0, 0xe8 as f32 / 255.0]);
    assert!((magenta[0] - 0.9734).abs() < 1e-3);
    assert!((magenta[1] - 0.000911).abs() < 1e-4);
    assert!((magenta[2] - 0.8069).abs() < 1e-3);
}
