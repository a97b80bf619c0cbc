//! Unit primitive meshes.
//!
//! Every primitive is centered on the origin and fits the unit cube
//! `[-0.5, 0.5]^3`, so the scale passed by the scene builder is the final
//! size of the part. Round primitives are built around the +Y axis.
//!
//! Each mesh carries two index lists over the same vertices: `triangles`
//! for filled drawing and `lines` (pairs) for wireframe drawing.

use std::f32::consts::{PI, TAU};

use ftr_core::MeshKind;

use crate::vertex::MeshVertex;

const SPHERE_STACKS: u32 = 16;
const SPHERE_SLICES: u32 = 24;
const CYLINDER_SLICES: u32 = 24;
const TORUS_MAJOR_SEGMENTS: u32 = 32;
const TORUS_MINOR_SEGMENTS: u32 = 12;
const TORUS_TUBE_RADIUS: f32 = 0.1;
const TORUS_RING_RADIUS: f32 = 0.5 - TORUS_TUBE_RADIUS;

#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub triangles: Vec<u32>,
    pub lines: Vec<u32>,
}

impl MeshData {
    pub fn for_kind(kind: MeshKind) -> Self {
        match kind {
            MeshKind::Cube => cube(),
            MeshKind::Sphere => sphere(SPHERE_STACKS, SPHERE_SLICES),
            MeshKind::Cylinder => cylinder(CYLINDER_SLICES),
            MeshKind::Torus => torus(TORUS_MAJOR_SEGMENTS, TORUS_MINOR_SEGMENTS),
        }
    }

    fn tri(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.extend_from_slice(&[a, b, c]);
    }

    fn line(&mut self, a: u32, b: u32) {
        self.lines.extend_from_slice(&[a, b]);
    }
}

pub fn cube() -> MeshData {
    let mut mesh = MeshData::default();
    for i in 0..8u32 {
        let x = if i & 1 == 0 { -0.5 } else { 0.5 };
        let y = if i & 2 == 0 { -0.5 } else { 0.5 };
        let z = if i & 4 == 0 { -0.5 } else { 0.5 };
        mesh.vertices.push(MeshVertex::new(x, y, z));
    }

    // Two triangles per face, corners listed counter-clockwise from outside.
    const FACES: [[u32; 4]; 6] = [
        [0, 4, 6, 2], // -X
        [1, 3, 7, 5], // +X
        [0, 1, 5, 4], // -Y
        [2, 6, 7, 3], // +Y
        [0, 2, 3, 1], // -Z
        [4, 5, 7, 6], // +Z
    ];
    for [a, b, c, d] in FACES {
        mesh.tri(a, b, c);
        mesh.tri(a, c, d);
    }

    // Corners differing in exactly one bit share an edge.
    for a in 0..8u32 {
        for bit in [1, 2, 4] {
            if a & bit == 0 {
                mesh.line(a, a | bit);
            }
        }
    }
    mesh
}

pub fn sphere(stacks: u32, slices: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let radius = 0.5;
    for i in 0..=stacks {
        let phi = PI * i as f32 / stacks as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for j in 0..slices {
            let theta = TAU * j as f32 / slices as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            mesh.vertices.push(MeshVertex::new(
                radius * sin_phi * cos_theta,
                radius * cos_phi,
                radius * sin_phi * sin_theta,
            ));
        }
    }

    let idx = |i: u32, j: u32| i * slices + (j % slices);
    for i in 0..stacks {
        for j in 0..slices {
            let (a, b) = (idx(i, j), idx(i, j + 1));
            let (c, d) = (idx(i + 1, j), idx(i + 1, j + 1));
            mesh.tri(a, c, b);
            mesh.tri(b, c, d);
            mesh.line(a, c);
            // Pole rows collapse to a point; skip their rings.
            if i > 0 {
                mesh.line(a, b);
            }
        }
    }
    mesh
}

pub fn cylinder(slices: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let radius = 0.5;
    for y in [-0.5, 0.5] {
        for j in 0..slices {
            let theta = TAU * j as f32 / slices as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            mesh.vertices
                .push(MeshVertex::new(radius * cos_theta, y, radius * sin_theta));
        }
    }
    let bottom_center = mesh.vertices.len() as u32;
    mesh.vertices.push(MeshVertex::new(0.0, -0.5, 0.0));
    let top_center = bottom_center + 1;
    mesh.vertices.push(MeshVertex::new(0.0, 0.5, 0.0));

    for j in 0..slices {
        let next = (j + 1) % slices;
        let (b0, b1) = (j, next);
        let (t0, t1) = (slices + j, slices + next);

        mesh.tri(b0, t0, b1);
        mesh.tri(b1, t0, t1);
        mesh.tri(bottom_center, b0, b1);
        mesh.tri(top_center, t1, t0);

        mesh.line(b0, b1);
        mesh.line(t0, t1);
        mesh.line(b0, t0);
    }
    mesh
}

pub fn torus(major_segments: u32, minor_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for i in 0..major_segments {
        let u = TAU * i as f32 / major_segments as f32;
        let (sin_u, cos_u) = u.sin_cos();
        for j in 0..minor_segments {
            let v = TAU * j as f32 / minor_segments as f32;
            let (sin_v, cos_v) = v.sin_cos();
            let ring = TORUS_RING_RADIUS + TORUS_TUBE_RADIUS * cos_v;
            mesh.vertices.push(MeshVertex::new(
                ring * cos_u,
                TORUS_TUBE_RADIUS * sin_v,
                ring * sin_u,
            ));
        }
    }

    let idx = |i: u32, j: u32| (i % major_segments) * minor_segments + (j % minor_segments);
    for i in 0..major_segments {
        for j in 0..minor_segments {
            let (a, b) = (idx(i, j), idx(i, j + 1));
            let (c, d) = (idx(i + 1, j), idx(i + 1, j + 1));
            mesh.tri(a, c, b);
            mesh.tri(b, c, d);
            mesh.line(a, b);
            mesh.line(a, c);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_in_range(mesh: &MeshData) {
        let n = mesh.vertices.len() as u32;
        assert!(mesh.triangles.iter().all(|&i| i < n));
        assert!(mesh.lines.iter().all(|&i| i < n));
        assert_eq!(mesh.triangles.len() % 3, 0);
        assert_eq!(mesh.lines.len() % 2, 0);
    }

    fn max_abs_extent(mesh: &MeshData) -> [f32; 3] {
        let mut ext = [0.0f32; 3];
        for v in &mesh.vertices {
            for (axis, e) in ext.iter_mut().enumerate() {
                *e = e.max(v.position[axis].abs());
            }
        }
        ext
    }

    #[test]
    fn every_kind_has_valid_indices() {
        for &kind in MeshKind::ALL {
            let mesh = MeshData::for_kind(kind);
            assert!(!mesh.triangles.is_empty(), "{kind:?} has no triangles");
            assert!(!mesh.lines.is_empty(), "{kind:?} has no lines");
            assert_indices_in_range(&mesh);
        }
    }

    #[test]
    fn cube_has_twelve_edges_and_twelve_triangles() {
        let mesh = cube();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.triangles.len(), 36);
        assert_eq!(mesh.lines.len(), 24);
        // Each edge spans exactly one unit along one axis.
        for pair in mesh.lines.chunks(2) {
            let a = mesh.vertices[pair[0] as usize].position;
            let b = mesh.vertices[pair[1] as usize].position;
            let len: f32 = (0..3).map(|k| (a[k] - b[k]).abs()).sum();
            assert!((len - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn primitives_fit_the_unit_cube() {
        for &kind in MeshKind::ALL {
            let ext = max_abs_extent(&MeshData::for_kind(kind));
            for e in ext {
                assert!(e <= 0.5 + 1e-5, "{kind:?} exceeds unit bounds: {ext:?}");
            }
        }
    }

    #[test]
    fn round_primitives_reach_full_radius() {
        for kind in [MeshKind::Sphere, MeshKind::Cylinder, MeshKind::Torus] {
            let ext = max_abs_extent(&MeshData::for_kind(kind));
            assert!((ext[0] - 0.5).abs() < 1e-5, "{kind:?} x extent {}", ext[0]);
            assert!((ext[2] - 0.5).abs() < 0.02, "{kind:?} z extent {}", ext[2]);
        }
    }

    #[test]
    fn torus_is_flat_around_y_axis() {
        let ext = max_abs_extent(&MeshData::for_kind(MeshKind::Torus));
        assert!((ext[1] - TORUS_TUBE_RADIUS).abs() < 1e-5);
    }

    #[test]
    fn cylinder_spans_unit_height() {
        let mesh = cylinder(8);
        let ys: Vec<f32> = mesh.vertices.iter().map(|v| v.position[1]).collect();
        assert!(ys.iter().any(|&y| (y + 0.5).abs() < 1e-6));
        assert!(ys.iter().any(|&y| (y - 0.5).abs() < 1e-6));
        // Two rings plus two cap centers.
        assert_eq!(mesh.vertices.len(), 18);
    }
}
