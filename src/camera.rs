use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;
use crate::interaction::{Button, Controller};
use crate::math::Ray;

pub const CAMERA_SPEED: f32 = 0.1;
pub const CAMERA_ROTATION_SPEED: f32 = 0.05;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl MovementState {
    /// Held keys: WASD, Space/Shift, Q/E, with arrows mirroring W/S and Q/E
    pub fn from_controller(controller: &dyn Controller) -> Self {
        let down = |buttons: &[Button]| buttons.iter().any(|b| controller.is_down(*b));
        Self {
            forward: down(&[Button::KeyW, Button::ArrowUp]),
            backward: down(&[Button::KeyS, Button::ArrowDown]),
            left: down(&[Button::KeyA]),
            right: down(&[Button::KeyD]),
            up: down(&[Button::Space]),
            down: down(&[Button::Shift]),
            rotate_left: down(&[Button::KeyQ, Button::ArrowLeft]),
            rotate_right: down(&[Button::KeyE, Button::ArrowRight]),
        }
    }

    const fn to_direction(&self, positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    const fn velocity(&self) -> (f32, f32, f32) {
        (
            self.to_direction(self.forward, self.backward),
            self.to_direction(self.right, self.left),
            self.to_direction(self.up, self.down),
        )
    }

    /// Q turns left, which is increasing yaw
    const fn rotation_velocity(&self) -> f32 {
        self.to_direction(self.rotate_left, self.rotate_right)
    }
}

/// Perspective fly camera. Yaw 0 looks down +z; yaw PI looks down -z.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub movement: MovementState,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub speed: f32,
    pub rotation_speed: f32,
}

impl Camera {
    pub fn new(position: Vec3, aspect: f32) -> Self {
        Self {
            position,
            yaw: std::f32::consts::PI,
            pitch: 0.0,
            movement: MovementState::default(),
            fov_y: 75f32.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
            speed: CAMERA_SPEED,
            rotation_speed: CAMERA_ROTATION_SPEED,
        }
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            fov_y: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
            speed: config.speed,
            rotation_speed: config.rotation_speed,
            ..Self::new(Vec3::from_array(config.position), aspect)
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        Vec3::Y
    }

    pub fn update(&mut self) {
        let (fwd, right_dir, up_dir) = self.movement.velocity();

        let displacement = self.forward() * fwd * self.speed
            + self.right() * right_dir * self.speed
            + Vec3::Y * up_dir * self.speed;

        self.position += displacement;
        self.yaw += self.movement.rotation_velocity() * self.rotation_speed;
    }

    /// Call after the viewport changes shape
    pub fn update_projection(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    /// Right-handed projection with wgpu's 0..1 depth range
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Ray from the eye through a point in normalized device coordinates
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let on_near = self.view_proj().inverse().project_point3(ndc.extend(0.0));
        Ray::new(self.position, on_near - self.position)
    }
}
