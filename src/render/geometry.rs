// CPU-side meshes for the scene pass: the textured box and the ground grid.

use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

// (normal, right, up) per face; right x up == normal so quads wind CCW from outside
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

/// Box centered on the origin with full extents `size`, each face mapping
/// the whole texture.
pub fn box_mesh(size: [f32; 3]) -> (Vec<MeshVertex>, Vec<u16>) {
    let half = Vec3::from_array(size) * 0.5;
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (n, u, v) in FACES {
        let base = vertices.len() as u16;
        for (su, sv, uv) in [
            (-1.0, -1.0, [0.0, 1.0]),
            (1.0, -1.0, [1.0, 1.0]),
            (1.0, 1.0, [1.0, 0.0]),
            (-1.0, 1.0, [0.0, 0.0]),
        ] {
            let p = (n + u * su + v * sv) * half;
            vertices.push(MeshVertex {
                position: p.to_array(),
                uv,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

/// Decode one sRGB-encoded channel in \[0, 1\] to linear light.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn linear_rgb(srgb: [f32; 3]) -> [f32; 3] {
    srgb.map(srgb_to_linear)
}

/// Square line grid on the y = 0 plane, `size` wide with `divisions` cells
/// per side. Emits a line list; `color` is linear.
pub fn grid_lines(size: f32, divisions: u32, color: [f32; 3]) -> Vec<LineVertex> {
    let divisions = divisions.max(1);
    let half = size * 0.5;
    let step = size / divisions as f32;
    let mut out = Vec::with_capacity(((divisions + 1) * 4) as usize);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        out.push(LineVertex { position: [-half, 0.0, k], color });
        out.push(LineVertex { position: [half, 0.0, k], color });
        out.push(LineVertex { position: [k, 0.0, -half], color });
        out.push(LineVertex { position: [k, 0.0, half], color });
    }
    out
}
