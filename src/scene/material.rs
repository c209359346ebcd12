use std::path::PathBuf;

use crate::math::hex_to_rgb;

/// Image texture applied to a material, tiled `repeat` times
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRef {
    pub path: PathBuf,
    pub repeat: [f32; 2],
}

/// Travelling-wave displacement applied in the vertex stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub amplitude: f32,
    pub frequency: f32,
    pub speed: f32,
}

impl Wave {
    pub fn height(&self, x: f32, z: f32, time: f32) -> f32 {
        let phase = time * self.speed;
        self.amplitude * ((x * self.frequency + phase).sin() + (z * self.frequency + phase).cos())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub texture: Option<TextureRef>,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: [f32; 3],
    pub wave: Option<Wave>,
}

impl Material {
    pub fn from_hex(hex: u32) -> Self {
        Self {
            color: hex_to_rgb(hex),
            ..Self::default()
        }
    }

    pub fn with_texture(mut self, path: impl Into<PathBuf>, repeat: [f32; 2]) -> Self {
        self.texture = Some(TextureRef {
            path: path.into(),
            repeat,
        });
        self
    }

    pub fn with_surface(mut self, roughness: f32, metalness: f32) -> Self {
        self.roughness = roughness;
        self.metalness = metalness;
        self
    }

    pub fn with_emissive(mut self, emissive: [f32; 3]) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_wave(mut self, wave: Wave) -> Self {
        self.wave = Some(wave);
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            texture: None,
            roughness: 1.0,
            metalness: 0.0,
            emissive: [0.0, 0.0, 0.0],
            wave: None,
        }
    }
}
