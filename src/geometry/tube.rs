use glam::{Quat, Vec3};
use std::f32::consts::TAU;

use super::mesh::{MeshData, Vertex};
use crate::math::CatmullRomCurve;

/// Parallel-transported tangent/normal/binormal triples sampled at `u = i / segments`
#[derive(Debug, Clone)]
pub struct FrenetFrames {
    pub tangents: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub binormals: Vec<Vec3>,
}

impl FrenetFrames {
    pub fn compute(curve: &CatmullRomCurve, segments: usize) -> Self {
        let segments = segments.max(1);
        let tangents: Vec<Vec3> = (0..=segments)
            .map(|i| curve.tangent_at(i as f32 / segments as f32))
            .collect();

        // Seed the first normal from the axis the tangent leans on least
        let t0 = tangents[0];
        let abs = t0.abs();
        let seed = if abs.x <= abs.y && abs.x <= abs.z {
            Vec3::X
        } else if abs.y <= abs.z {
            Vec3::Y
        } else {
            Vec3::Z
        };
        let axis = t0.cross(seed).normalize_or_zero();
        let n0 = t0.cross(axis).normalize_or_zero();

        let mut normals = Vec::with_capacity(tangents.len());
        let mut binormals = Vec::with_capacity(tangents.len());
        normals.push(n0);
        binormals.push(t0.cross(n0));

        for i in 1..tangents.len() {
            let prev = tangents[i - 1];
            let cur = tangents[i];
            let mut normal = normals[i - 1];

            let axis = prev.cross(cur);
            if axis.length() > f32::EPSILON {
                let angle = prev.dot(cur).clamp(-1.0, 1.0).acos();
                normal = Quat::from_axis_angle(axis.normalize(), angle) * normal;
            }

            binormals.push(cur.cross(normal));
            normals.push(normal);
        }

        Self {
            tangents,
            normals,
            binormals,
        }
    }

    pub fn len(&self) -> usize {
        self.tangents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tangents.is_empty()
    }
}

/// Open tube of `radius` swept along `curve`
pub fn tube_mesh(
    curve: &CatmullRomCurve,
    tubular_segments: usize,
    radius: f32,
    radial_segments: usize,
) -> MeshData {
    let tubular_segments = tubular_segments.max(1);
    let radial_segments = radial_segments.max(3);
    let frames = FrenetFrames::compute(curve, tubular_segments);
    let ring = radial_segments + 1;

    let mut vertices = Vec::with_capacity((tubular_segments + 1) * ring);
    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32;
        let center = curve.point_at(u);
        let n = frames.normals[i];
        let b = frames.binormals[i];

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let normal = (n * -v.cos() + b * v.sin()).normalize_or_zero();
            vertices.push(Vertex::new(
                center + normal * radius,
                normal,
                [u, j as f32 / radial_segments as f32],
            ));
        }
    }

    let mut indices = Vec::with_capacity(tubular_segments * radial_segments * 6);
    for j in 1..=tubular_segments {
        for i in 1..=radial_segments {
            let a = (ring * (j - 1) + (i - 1)) as u32;
            let b = (ring * j + (i - 1)) as u32;
            let c = (ring * j + i) as u32;
            let d = (ring * (j - 1) + i) as u32;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    MeshData::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rail() -> CatmullRomCurve {
        CatmullRomCurve::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, -2.0),
            Vec3::new(1.0, 2.0, -4.0),
            Vec3::new(3.0, 2.5, -5.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_frames_are_orthonormal() {
        let frames = FrenetFrames::compute(&rail(), 20);
        assert_eq!(frames.len(), 21);
        for i in 0..frames.len() {
            let (t, n, b) = (frames.tangents[i], frames.normals[i], frames.binormals[i]);
            assert!((t.length() - 1.0).abs() < 1e-3, "tangent {} not unit", i);
            assert!((n.length() - 1.0).abs() < 1e-3, "normal {} not unit", i);
            assert!(t.dot(n).abs() < 1e-2, "normal {} not perpendicular", i);
            assert!(b.dot(n).abs() < 1e-2, "binormal {} not perpendicular", i);
        }
    }

    #[test]
    fn test_tube_counts() {
        let mesh = tube_mesh(&rail(), 20, 0.05, 8);
        assert_eq!(mesh.vertex_count(), 21 * 9);
        assert_eq!(mesh.triangle_count(), 20 * 8 * 2);
    }

    #[test]
    fn test_tube_vertices_sit_on_radius() {
        let curve = rail();
        let mesh = tube_mesh(&curve, 10, 0.05, 8);
        for (i, ring) in mesh.vertices.chunks(9).enumerate() {
            let center = curve.point_at(i as f32 / 10.0);
            for v in ring {
                assert!((v.position().distance(center) - 0.05).abs() < 1e-4);
            }
        }
    }
}
