use glam::Vec3;
use std::f32::consts::PI;

use crate::geometry::sphere_mesh;
use crate::math::hex_to_rgb;
use crate::scene::{Light, Material, NodeId, Scene, Transform};

/// Light source that eases towards each point of a closed path in turn
#[derive(Debug, Clone)]
pub struct SunPath {
    points: Vec<Vec3>,
    index: usize,
    position: Vec3,
    /// Fraction of the remaining distance covered per second
    pub speed: f32,
    pub arrive_distance: f32,
}

impl SunPath {
    /// Starts at the first point heading for the second; `None` for an empty path
    pub fn new(points: Vec<Vec3>, speed: f32, arrive_distance: f32) -> Option<Self> {
        let position = *points.first()?;
        let index = 1 % points.len();
        Some(Self {
            points,
            index,
            position,
            speed,
            arrive_distance,
        })
    }

    /// Evenly spaced points on an arc across the sky from +x to -x
    pub fn arc(radius: f32, height: f32, z: f32, count: usize) -> Vec<Vec3> {
        let count = count.max(2);
        (0..count)
            .map(|i| {
                let angle = i as f32 / (count - 1) as f32 * PI;
                Vec3::new(radius * angle.cos(), height * angle.sin() + height * 0.25, z)
            })
            .collect()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Index of the point currently being approached
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.points[self.index]
    }

    /// Moves to the next path point, wrapping at the end
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.points.len();
        log::debug!("sun heading for point {} of {}", self.index, self.points.len());
    }

    /// Lerps towards the target and advances once within `arrive_distance`
    pub fn update(&mut self, delta: f32) -> Vec3 {
        let alpha = (self.speed * delta).clamp(0.0, 1.0);
        self.position = self.position.lerp(self.target(), alpha);
        if self.position.distance(self.target()) <= self.arrive_distance {
            self.advance();
        }
        self.position
    }
}

/// Glowing sphere with an unbounded point light, placed at the path start
pub fn create_sun(scene: &mut Scene, parent: NodeId, path: &SunPath) -> NodeId {
    let group = scene.add_group(parent, "sun", Transform::from_translation(path.position()));
    let mesh = scene.add_mesh(sphere_mesh(2.0, 24, 16));
    scene.add_mesh_node(
        group,
        "sun-disc",
        mesh,
        Material::from_hex(0xFFCC33).with_emissive(hex_to_rgb(0xFFCC33)),
        Transform::IDENTITY,
    );
    scene.add_light(group, "sun-light", Light::point(0xFFF2CC, 1.5, 0.0), Transform::IDENTITY);
    group
}
