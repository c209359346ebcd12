use glam::Quat;
use std::f32::consts::FRAC_PI_2;

use crate::geometry::plane_mesh;
use crate::scene::{Material, NodeId, Scene, Transform, Wave};

#[derive(Debug, Clone, PartialEq)]
pub struct OceanParams {
    pub size: f32,
    pub segments: u32,
    pub level: f32,
    pub color: u32,
    pub wave: Wave,
}

impl Default for OceanParams {
    fn default() -> Self {
        Self {
            size: 400.0,
            segments: 160,
            level: -1.0,
            color: 0x1E6FA8,
            wave: Wave {
                amplitude: 0.4,
                frequency: 0.15,
                speed: 1.2,
            },
        }
    }
}

/// Surface offset at world `(x, z)` and shader time `time`
pub fn wave_height(wave: &Wave, x: f32, z: f32, time: f32) -> f32 {
    wave.height(x, z, time)
}

/// Subdivided water plane; the vertex stage displaces it with the material's wave
pub fn create_ocean(scene: &mut Scene, parent: NodeId, params: &OceanParams) -> NodeId {
    let mesh = scene.add_mesh(plane_mesh(params.size, params.size, params.segments, params.segments));
    let material = Material::from_hex(params.color)
        .with_surface(0.2, 0.3)
        .with_wave(params.wave);
    scene.add_mesh_node(
        parent,
        "ocean",
        mesh,
        material,
        Transform::from_xyz(0.0, params.level, 0.0).with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
    )
}
