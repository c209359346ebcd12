use glam::Vec3;
use std::f32::consts::{PI, TAU};

use super::mesh::{MeshData, Vertex};

/// Axis-aligned box centred on the origin
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let half = Vec3::new(width, height, depth) * 0.5;

    // (normal, u axis, v axis) with u x v == normal so quads wind CCW from outside
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let base = vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner = (normal + u * su + v * sv) * half;
            let uv = [(su + 1.0) * 0.5, 1.0 - (sv + 1.0) * 0.5];
            vertices.push(Vertex::new(corner, normal, uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData::new(vertices, indices)
}

/// Capped cylinder along Y, centred on the origin
pub fn cylinder_mesh(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> MeshData {
    let radial_segments = radial_segments.max(3);
    let half_height = height * 0.5;
    let slope = (radius_bottom - radius_top) / height;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Torso: row 0 is the top ring, row 1 the bottom ring
    for row in 0..=1u32 {
        let v = row as f32;
        let radius = v * (radius_bottom - radius_top) + radius_top;
        for x in 0..=radial_segments {
            let u = x as f32 / radial_segments as f32;
            let theta = u * TAU;
            let (sin, cos) = theta.sin_cos();
            let position = Vec3::new(radius * sin, -v * height + half_height, radius * cos);
            let normal = Vec3::new(sin, slope, cos).normalize();
            vertices.push(Vertex::new(position, normal, [u, 1.0 - v]));
        }
    }
    let ring = radial_segments + 1;
    for x in 0..radial_segments {
        let a = x;
        let b = ring + x;
        let c = ring + x + 1;
        let d = x + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    for top in [true, false] {
        let (radius, y, normal) = if top {
            (radius_top, half_height, Vec3::Y)
        } else {
            (radius_bottom, -half_height, Vec3::NEG_Y)
        };
        if radius <= 0.0 {
            continue;
        }
        let center = vertices.len() as u32;
        vertices.push(Vertex::new(Vec3::new(0.0, y, 0.0), normal, [0.5, 0.5]));
        let first = vertices.len() as u32;
        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            vertices.push(Vertex::new(
                Vec3::new(radius * sin, y, radius * cos),
                normal,
                [cos * 0.5 + 0.5, sin * 0.5 + 0.5],
            ));
        }
        for x in 0..radial_segments {
            let i = first + x;
            if top {
                indices.extend_from_slice(&[center, i, i + 1]);
            } else {
                indices.extend_from_slice(&[center, i + 1, i]);
            }
        }
    }

    MeshData::new(vertices, indices)
}

/// UV sphere centred on the origin
pub fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let mut vertices = Vec::new();
    let mut grid = Vec::with_capacity(height_segments as usize + 1);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let mut row = Vec::with_capacity(width_segments as usize + 1);
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let position = Vec3::new(
                -radius * (u * TAU).cos() * (v * PI).sin(),
                radius * (v * PI).cos(),
                radius * (u * TAU).sin() * (v * PI).sin(),
            );
            let normal = position.normalize_or_zero();
            row.push(vertices.len() as u32);
            vertices.push(Vertex::new(position, normal, [u, 1.0 - v]));
        }
        grid.push(row);
    }

    let mut indices = Vec::new();
    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            // Pole rows collapse one triangle each
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments as usize - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData::new(vertices, indices)
}

/// Subdivided plane in XY facing +Z, centred on the origin
pub fn plane_mesh(width: f32, height: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let grid_x = width_segments.max(1);
    let grid_y = height_segments.max(1);
    let segment_width = width / grid_x as f32;
    let segment_height = height / grid_y as f32;

    let mut vertices = Vec::with_capacity(((grid_x + 1) * (grid_y + 1)) as usize);
    for iy in 0..=grid_y {
        let y = iy as f32 * segment_height - height * 0.5;
        for ix in 0..=grid_x {
            let x = ix as f32 * segment_width - width * 0.5;
            vertices.push(Vertex::new(
                Vec3::new(x, -y, 0.0),
                Vec3::Z,
                [ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32],
            ));
        }
    }

    let mut indices = Vec::with_capacity((grid_x * grid_y * 6) as usize);
    let row = grid_x + 1;
    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = ix + row * iy;
            let b = ix + row * (iy + 1);
            let c = (ix + 1) + row * (iy + 1);
            let d = (ix + 1) + row * iy;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    MeshData::new(vertices, indices)
}
