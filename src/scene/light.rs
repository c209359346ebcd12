use crate::math::hex_to_rgb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Uniform light with no position
    Ambient { color: [f32; 3], intensity: f32 },
    /// Omni light at the node's world position; `range == 0` means unbounded
    Point {
        color: [f32; 3],
        intensity: f32,
        range: f32,
    },
}

impl Light {
    pub fn ambient(hex: u32, intensity: f32) -> Self {
        Light::Ambient {
            color: hex_to_rgb(hex),
            intensity,
        }
    }

    pub fn point(hex: u32, intensity: f32, range: f32) -> Self {
        Light::Point {
            color: hex_to_rgb(hex),
            intensity,
            range,
        }
    }
}

/// Exponential-squared fog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: [f32; 3],
    pub density: f32,
}

impl Fog {
    pub fn exp2(hex: u32, density: f32) -> Self {
        Self {
            color: hex_to_rgb(hex),
            density,
        }
    }

    /// Fraction of the surface colour replaced by fog at `distance`
    pub fn factor(&self, distance: f32) -> f32 {
        let d = self.density * distance;
        (1.0 - (-d * d).exp()).clamp(0.0, 1.0)
    }
}
