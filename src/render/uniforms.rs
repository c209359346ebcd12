use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::geometry::Vertex;
use crate::math::scale_rgb;
use crate::scene::{Light, Material, Scene};

pub const MAX_LIGHTS: usize = 8;

/// Bit set in [`ObjectUniform::flags`] for wave-displaced surfaces
pub const FLAG_WAVE: u32 = 1;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

impl Vertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    /// 0 means no falloff
    pub range: f32,
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Per-frame data, bind group 0
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub time: f32,
    pub fog_color: [f32; 3],
    pub fog_density: f32,
    pub ambient: [f32; 4],
    pub light_count: u32,
    pub _pad0: u32,
    pub _pad1: u32,
    pub _pad2: u32,
    pub lights: [LightUniform; MAX_LIGHTS],
}

impl FrameUniform {
    /// Ambient lights are summed; the first `MAX_LIGHTS` point lights are kept
    pub fn new(scene: &Scene, camera: &Camera, time: f32) -> Self {
        let mut ambient = Vec3::ZERO;
        let mut lights = [LightUniform::default(); MAX_LIGHTS];
        let mut light_count = 0;

        for (light, position) in scene.lights() {
            match light {
                Light::Ambient { color, intensity } => {
                    ambient += Vec3::from_array(scale_rgb(color, intensity));
                }
                Light::Point { color, intensity, range } => {
                    if light_count == MAX_LIGHTS {
                        continue;
                    }
                    lights[light_count] = LightUniform {
                        position: position.to_array(),
                        range,
                        color,
                        intensity,
                    };
                    light_count += 1;
                }
            }
        }

        let (fog_color, fog_density) = match scene.fog {
            Some(fog) => (fog.color, fog.density),
            None => (scene.background, 0.0),
        };

        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_position: camera.position.to_array(),
            time,
            fog_color,
            fog_density,
            ambient: ambient.extend(1.0).to_array(),
            light_count: light_count as u32,
            _pad0: 0,
            _pad1: 0,
            _pad2: 0,
            lights,
        }
    }
}

/// Per-draw data, bind group 1
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub emissive: [f32; 3],
    pub flags: u32,
    pub uv_repeat: [f32; 2],
    pub roughness: f32,
    pub metalness: f32,
    /// amplitude, frequency, speed, unused
    pub wave: [f32; 4],
}

impl ObjectUniform {
    pub fn new(world: Mat4, material: &Material) -> Self {
        let (flags, wave) = match material.wave {
            Some(w) => (FLAG_WAVE, [w.amplitude, w.frequency, w.speed, 0.0]),
            None => (0, [0.0; 4]),
        };
        let uv_repeat = material.texture.as_ref().map_or([1.0, 1.0], |t| t.repeat);

        Self {
            model: world.to_cols_array_2d(),
            normal_matrix: world.inverse().transpose().to_cols_array_2d(),
            color: [material.color[0], material.color[1], material.color[2], 1.0],
            emissive: material.emissive,
            flags,
            uv_repeat,
            roughness: material.roughness,
            metalness: material.metalness,
            wave,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Transform, Wave};

    #[test]
    fn test_uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<LightUniform>(), 32);
        assert_eq!(std::mem::size_of::<FrameUniform>(), 128 + 32 * MAX_LIGHTS);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 192);
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }

    #[test]
    fn test_frame_uniform_collects_lights() {
        let mut scene = Scene::new();
        let root = scene.root();
        scene.add_light(root, "ambient", Light::ambient(0xFFFFFF, 0.5), Transform::IDENTITY);
        for i in 0..(MAX_LIGHTS + 2) {
            scene.add_light(root, "p", Light::point(0xFFFFFF, 1.0, 10.0), Transform::from_xyz(i as f32, 0.0, 0.0));
        }
        let camera = Camera::new(Vec3::ZERO, 1.0);
        let frame = FrameUniform::new(&scene, &camera, 2.0);
        assert_eq!(frame.light_count as usize, MAX_LIGHTS);
        assert_eq!(frame.lights[1].position, [1.0, 0.0, 0.0]);
        assert!((frame.ambient[0] - 0.5).abs() < 1e-6);
        assert_eq!(frame.time, 2.0);
        assert_eq!(frame.fog_density, 0.0);
    }

    #[test]
    fn test_object_uniform_wave_flag() {
        let material = Material::default().with_wave(Wave {
            amplitude: 0.5,
            frequency: 0.1,
            speed: 1.0,
        });
        let object = ObjectUniform::new(Mat4::IDENTITY, &material);
        assert_eq!(object.flags & FLAG_WAVE, FLAG_WAVE);
        assert_eq!(object.wave[0], 0.5);
        assert_eq!(ObjectUniform::new(Mat4::IDENTITY, &Material::default()).flags, 0);
    }
}
