//! Inside-out UV sphere the panoramas are mapped onto.
//!
//! Vertices are laid out in `height_segments + 1` rings of
//! `width_segments + 1` vertices (the seam column is duplicated so UVs wrap
//! cleanly). The sphere is mirrored on X so that, seen from the center,
//! the equirectangular image reads left-to-right and triangles face
//! inward.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::options::SphereOptions;

/// Fewest segments around the equator.
const MIN_WIDTH_SEGMENTS: u32 = 3;
/// Fewest segments from pole to pole.
const MIN_HEIGHT_SEGMENTS: u32 = 2;
/// Most segments around the equator.
const MAX_WIDTH_SEGMENTS: u32 = 128;
/// Most segments from pole to pole.
const MAX_HEIGHT_SEGMENTS: u32 = 96;

/// CPU-side panorama sphere mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Unit normals pointing toward the center.
    pub normals: Vec<Vec3>,
    /// Equirectangular texture coordinates, `v = 1` at the north pole.
    pub uvs: Vec<Vec2>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Build the sphere described by `options`.
    #[must_use]
    pub fn from_options(options: &SphereOptions) -> Self {
        Self::panorama(
            options.radius,
            options.width_segments,
            options.height_segments,
        )
    }

    /// Build an inward-facing sphere. Segment counts are clamped to
    /// 3..=128 around and 2..=96 from pole to pole.
    #[must_use]
    pub fn panorama(
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    ) -> Self {
        let width =
            width_segments.clamp(MIN_WIDTH_SEGMENTS, MAX_WIDTH_SEGMENTS);
        let height =
            height_segments.clamp(MIN_HEIGHT_SEGMENTS, MAX_HEIGHT_SEGMENTS);
        let vertex_count = ((width + 1) * (height + 1)) as usize;

        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for iy in 0..=height {
            let v = iy as f32 / height as f32;
            let (sin_v, cos_v) = (v * PI).sin_cos();
            for ix in 0..=width {
                let u = ix as f32 / width as f32;
                let (sin_u, cos_u) = (u * TAU).sin_cos();
                // Standard UV sphere has x = -cos(u)·sin(v); mirrored here.
                let dir = Vec3::new(cos_u * sin_v, cos_v, sin_u * sin_v);
                positions.push(dir * radius);
                normals.push(-dir);
                uvs.push(Vec2::new(u, 1.0 - v));
            }
        }

        let row = width + 1;
        let mut indices =
            Vec::with_capacity((width * (2 * height - 2) * 3) as usize);
        for iy in 0..height {
            for ix in 0..width {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                // Pole rows collapse to a single triangle per quad.
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            positions,
            normals,
            uvs,
            indices,
        }
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Positions as a flat `[x, y, z, ...]` slice for upload.
    #[must_use]
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// UVs as a flat `[u, v, ...]` slice for upload.
    #[must_use]
    pub fn uvs_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.uvs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sphere_counts() {
        let mesh = SphereMesh::from_options(&SphereOptions::default());
        assert_eq!(mesh.positions.len(), 61 * 41);
        assert_eq!(mesh.uvs.len(), mesh.positions.len());
        assert_eq!(mesh.triangle_count(), 60 * (2 * 40 - 2));
        let max = *mesh.indices.iter().max().unwrap() as usize;
        assert!(max < mesh.positions.len());
    }

    #[test]
    fn vertices_lie_on_the_radius() {
        let mesh = SphereMesh::panorama(500.0, 16, 8);
        for p in &mesh.positions {
            assert!((p.length() - 500.0).abs() < 1e-2);
        }
    }

    #[test]
    fn triangles_face_the_center() {
        let mesh = SphereMesh::panorama(10.0, 12, 6);
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| mesh.positions[i as usize]);
            let face_normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            // Counter-clockwise winding seen from inside.
            assert!(face_normal.dot(centroid) < 0.0);
        }
    }

    #[test]
    fn normals_point_inward() {
        let mesh = SphereMesh::panorama(2.0, 8, 4);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(*p) < 0.0);
        }
    }

    #[test]
    fn tiny_segment_counts_are_clamped() {
        let mesh = SphereMesh::panorama(1.0, 0, 0);
        assert_eq!(mesh.positions.len(), 4 * 3);
        assert_eq!(mesh.triangle_count(), 3 * 2);
    }

    #[test]
    fn huge_configured_segment_counts_are_clamped() {
        let opts = crate::options::Options::from_toml(
            "[sphere]\nwidth_segments = 4294967295\nheight_segments = 40",
        )
        .unwrap();
        let mesh = SphereMesh::from_options(&opts.sphere);
        assert_eq!(mesh.positions.len(), 129 * 41);
        assert_eq!(mesh.triangle_count(), 128 * (2 * 40 - 2));

        let mesh = SphereMesh::panorama(1.0, u32::MAX, u32::MAX);
        assert_eq!(mesh.positions.len(), 129 * 97);
    }

    #[test]
    fn flat_views_match_vertex_count() {
        let mesh = SphereMesh::panorama(1.0, 8, 4);
        assert_eq!(mesh.positions_flat().len(), mesh.positions.len() * 3);
        assert_eq!(mesh.uvs_flat().len(), mesh.uvs.len() * 2);
    }
}
