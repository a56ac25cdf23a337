//! Indexed triangle meshes with normals and a derived edge list.
//!
//! Every builder centers its shape the way the scene places it; callers
//! position meshes with a model matrix. The edge list holds each
//! undirected triangle edge once and drives wireframe drawing.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use rustc_hash::FxHashSet;

/// Vertex layout shared by every mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.normalize_or_zero().to_array(),
        }
    }
}

/// CPU-side mesh ready for upload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    /// Vertices.
    pub vertices: Vec<Vertex>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
    /// Line list indices, one pair per unique edge.
    pub edges: Vec<u32>,
}

// Outward normal and the two in-plane axes (u, v) with u × v = normal.
const BOX_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

impl MeshData {
    /// Mesh from vertices and triangle indices; edges are derived.
    #[must_use]
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let edges = derive_edges(&indices);
        Self {
            vertices,
            indices,
            edges,
        }
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of wireframe edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Shift every vertex by `offset`.
    #[must_use]
    pub fn translated(mut self, offset: Vec3) -> Self {
        for vertex in &mut self.vertices {
            let p = Vec3::from_array(vertex.position) + offset;
            vertex.position = p.to_array();
        }
        self
    }

    /// Axis-aligned box of the given size centered on the origin.
    #[must_use]
    pub fn cuboid(size: Vec3) -> Self {
        Self::box_faces(size, &BOX_FACES)
    }

    /// Box without its top face, centered on the origin.
    #[must_use]
    pub fn open_box(size: Vec3) -> Self {
        let faces: Vec<_> = BOX_FACES
            .into_iter()
            .filter(|(normal, _, _)| *normal != Vec3::Y)
            .collect();
        Self::box_faces(size, &faces)
    }

    fn box_faces(size: Vec3, faces: &[(Vec3, Vec3, Vec3)]) -> Self {
        let half = size * 0.5;
        let mut vertices = Vec::with_capacity(faces.len() * 4);
        let mut indices = Vec::with_capacity(faces.len() * 6);
        for &(normal, u, v) in faces {
            let base = vertices.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
            {
                let corner = (normal + u * su + v * sv) * half;
                vertices.push(Vertex::new(corner, normal));
            }
            indices.extend_from_slice(&[
                base,
                base + 1,
                base + 2,
                base,
                base + 2,
                base + 3,
            ]);
        }
        Self::new(vertices, indices)
    }

    /// Truncated cone along y, centered on the origin. A zero radius
    /// gives a cone; equal radii give a cylinder. Caps are added for
    /// non-zero radii.
    #[must_use]
    pub fn frustum(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
    ) -> Self {
        let segments = segments.max(3);
        let half = height * 0.5;
        let slope = (radius_bottom - radius_top) / height;
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for i in 0..=segments {
            let angle = i as f32 / segments as f32 * TAU;
            let (sin, cos) = angle.sin_cos();
            let normal = Vec3::new(sin, slope, cos);
            vertices.push(Vertex::new(
                Vec3::new(radius_top * sin, half, radius_top * cos),
                normal,
            ));
            vertices.push(Vertex::new(
                Vec3::new(radius_bottom * sin, -half, radius_bottom * cos),
                normal,
            ));
        }
        for i in 0..segments {
            let top = i * 2;
            let bottom = top + 1;
            let next_top = top + 2;
            let next_bottom = top + 3;
            indices.extend_from_slice(&[
                top,
                bottom,
                next_bottom,
                top,
                next_bottom,
                next_top,
            ]);
        }

        for (radius, y, normal) in
            [(radius_top, half, Vec3::Y), (radius_bottom, -half, Vec3::NEG_Y)]
        {
            if radius > 0.0 {
                append_disc(
                    &mut vertices,
                    &mut indices,
                    radius,
                    y,
                    normal,
                    segments,
                );
            }
        }

        Self::new(vertices, indices)
    }

    /// Flat ring in the xz plane occupying `y` in `[-depth, 0]`.
    #[must_use]
    pub fn annulus(inner: f32, outer: f32, depth: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        // (radius a, y a, radius b, y b, normal source)
        let bands: [(f32, f32, f32, f32, fn(f32, f32) -> Vec3); 4] = [
            (inner, 0.0, outer, 0.0, |_, _| Vec3::Y),
            (outer, -depth, inner, -depth, |_, _| Vec3::NEG_Y),
            (outer, 0.0, outer, -depth, |s, c| Vec3::new(s, 0.0, c)),
            (inner, -depth, inner, 0.0, |s, c| Vec3::new(-s, 0.0, -c)),
        ];

        for (ra, ya, rb, yb, normal) in bands {
            let base = vertices.len() as u32;
            for i in 0..=segments {
                let angle = i as f32 / segments as f32 * TAU;
                let (sin, cos) = angle.sin_cos();
                let n = normal(sin, cos);
                vertices.push(Vertex::new(
                    Vec3::new(ra * sin, ya, ra * cos),
                    n,
                ));
                vertices.push(Vertex::new(
                    Vec3::new(rb * sin, yb, rb * cos),
                    n,
                ));
            }
            for i in 0..segments {
                let a = base + i * 2;
                indices.extend_from_slice(&[a, a + 1, a + 3, a, a + 3, a + 2]);
            }
        }

        Self::new(vertices, indices)
    }

    /// Upper hemisphere seen from inside (normals point at the center).
    #[must_use]
    pub fn dome(radius: f32, segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(1);
        let mut vertices = Vec::new();
        for r in 0..=rings {
            let polar = r as f32 / rings as f32 * FRAC_PI_2;
            for s in 0..=segments {
                let azimuth = s as f32 / segments as f32 * TAU;
                let dir = Vec3::new(
                    polar.sin() * azimuth.sin(),
                    polar.cos(),
                    polar.sin() * azimuth.cos(),
                );
                vertices.push(Vertex::new(dir * radius, -dir));
            }
        }
        let indices = grid_indices(segments, rings);
        Self::new(vertices, indices)
    }

    /// Möbius strip of centerline `radius` and width 2 in the xz plane,
    /// built from `strips` angular steps of `segments` quads each.
    #[must_use]
    pub fn mobius(radius: f32, strips: u32, segments: u32) -> Self {
        let strips = strips.max(3);
        let segments = segments.max(1);
        Self::surface(strips, segments, |u, v| {
            let angle = u * TAU;
            let t = v * 2.0 - 1.0;
            let r = radius + t * (angle * 0.5).cos();
            Vec3::new(r * angle.cos(), t * (angle * 0.5).sin(), r * angle.sin())
        })
    }

    /// Surface sampled from `point(u, v)` over `[0, 1]²` on a
    /// `slices` × `stacks` grid, with smoothed normals.
    #[must_use]
    pub fn parametric(
        slices: u32,
        stacks: u32,
        point: impl Fn(f32, f32) -> Vec3,
    ) -> Self {
        Self::surface(slices.max(1), stacks.max(1), point)
    }

    fn surface(
        slices: u32,
        stacks: u32,
        point: impl Fn(f32, f32) -> Vec3,
    ) -> Self {
        let mut positions = Vec::new();
        for j in 0..=stacks {
            let v = j as f32 / stacks as f32;
            for i in 0..=slices {
                let u = i as f32 / slices as f32;
                positions.push(point(u, v));
            }
        }
        let indices = grid_indices(slices, stacks);
        let normals = smooth_normals(&positions, &indices);
        let vertices = positions
            .into_iter()
            .zip(normals)
            .map(|(p, n)| Vertex::new(p, n))
            .collect();
        Self::new(vertices, indices)
    }
}

fn append_disc(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    normal: Vec3,
    segments: u32,
) {
    let center = vertices.len() as u32;
    vertices.push(Vertex::new(Vec3::new(0.0, y, 0.0), normal));
    for i in 0..=segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();
        vertices.push(Vertex::new(
            Vec3::new(radius * sin, y, radius * cos),
            normal,
        ));
    }
    for i in 0..segments {
        let a = center + 1 + i;
        if normal.y > 0.0 {
            indices.extend_from_slice(&[center, a, a + 1]);
        } else {
            indices.extend_from_slice(&[center, a + 1, a]);
        }
    }
}

/// Two triangles per cell of a `(cols + 1) × (rows + 1)` vertex grid laid
/// out row by row.
fn grid_indices(cols: u32, rows: u32) -> Vec<u32> {
    let stride = cols + 1;
    let mut indices = Vec::with_capacity((cols * rows * 6) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let a = row * stride + col;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    indices
}

/// Area-weighted vertex normals.
fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        let face =
            (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals
}

/// Unique undirected edges of a triangle list, in first-seen order.
fn derive_edges(indices: &[u32]) -> Vec<u32> {
    let mut seen = FxHashSet::default();
    let mut edges = Vec::new();
    for tri in indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            if seen.insert((a.min(b), a.max(b))) {
                edges.push(a);
                edges.push(b);
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(mesh: &MeshData) -> (Vec3, Vec3) {
        mesh.vertices.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec3::from_array(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    fn indices_in_range(mesh: &MeshData) -> bool {
        let n = mesh.vertices.len() as u32;
        mesh.indices.iter().chain(&mesh.edges).all(|&i| i < n)
    }

    #[test]
    fn cuboid_is_centered_with_outward_normals() {
        let mesh = MeshData::cuboid(Vec3::new(30.0, 2.0, 2.0));
        assert_eq!(mesh.triangle_count(), 12);
        // Faces share no vertices: four sides plus a diagonal each.
        assert_eq!(mesh.edge_count(), 30);
        let (lo, hi) = bounds(&mesh);
        assert_eq!(lo, Vec3::new(-15.0, -1.0, -1.0));
        assert_eq!(hi, Vec3::new(15.0, 1.0, 1.0));
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            assert!(p.dot(Vec3::from_array(v.normal)) > 0.0);
        }
    }

    #[test]
    fn cuboid_winding_matches_normals() {
        let mesh = MeshData::cuboid(Vec3::ONE);
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
            let n = Vec3::from_array(mesh.vertices[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
        }
    }

    #[test]
    fn open_box_drops_the_top() {
        let mesh = MeshData::open_box(Vec3::ONE);
        assert_eq!(mesh.triangle_count(), 10);
        assert!(mesh.vertices.iter().all(|v| v.normal != [0.0, 1.0, 0.0]));
    }

    #[test]
    fn cone_tip_and_base() {
        let mesh = MeshData::frustum(0.0, 1.0, 3.0, 16);
        let (lo, hi) = bounds(&mesh);
        assert!((hi.y - 1.5).abs() < 1e-6 && (lo.y + 1.5).abs() < 1e-6);
        assert!((hi.x - 1.0).abs() < 1e-5);
        assert!(indices_in_range(&mesh));
    }

    #[test]
    fn annulus_spans_radii_and_depth() {
        let mesh = MeshData::annulus(5.0, 9.0, 1.0, 32);
        assert!(indices_in_range(&mesh));
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            let r = p.with_y(0.0).length();
            assert!(r > 4.999 && r < 9.001);
            assert!(p.y <= 0.0 && p.y >= -1.0);
        }
    }

    #[test]
    fn dome_normals_face_inward() {
        let mesh = MeshData::dome(30.0, 24, 8);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            assert!(p.y >= -1e-4);
            assert!((p.length() - 30.0).abs() < 1e-3);
            assert!(p.dot(Vec3::from_array(v.normal)) < 0.0);
        }
    }

    #[test]
    fn mobius_and_parametric_grids() {
        let mobius = MeshData::mobius(1.5, 16, 5);
        assert_eq!(mobius.triangle_count(), 16 * 5 * 2);
        assert!(indices_in_range(&mobius));

        let flat = MeshData::parametric(15, 15, |u, v| Vec3::new(u, 0.0, v));
        assert_eq!(flat.vertices.len(), 16 * 16);
        for v in &flat.vertices {
            assert!(Vec3::from_array(v.normal).y.abs() > 0.999);
        }
    }

    #[test]
    fn translated_moves_every_vertex() {
        let mesh = MeshData::frustum(0.05, 0.05, 1.0, 8)
            .translated(Vec3::new(0.0, -0.5, 0.0));
        let (lo, hi) = bounds(&mesh);
        assert!((hi.y).abs() < 1e-6 && (lo.y + 1.0).abs() < 1e-6);
    }
}
