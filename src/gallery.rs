use glam::Vec2;

use crate::camera::{Camera, MovementState};
use crate::config::GalleryConfig;
use crate::core::FrameInfo;
use crate::interaction::{Button, ClickRotate, Controller, LampDrag, Raycaster, SpinToggle};
use crate::scene::{NodeId, Scene};
use crate::scenes::{build_gallery, ClickMode, SunPath, Variant};

/// What a click on the staircase does in the running variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickBehaviour {
    Rotate(ClickRotate),
    Spin(SpinToggle),
}

impl ClickBehaviour {
    fn for_mode(mode: ClickMode, spin_speed: f32) -> Self {
        match mode {
            ClickMode::Rotate => Self::Rotate(ClickRotate::default()),
            ClickMode::Spin => Self::Spin(SpinToggle::new(spin_speed)),
        }
    }

    /// Staircase yaw accumulated so far
    pub fn angle(&self) -> f32 {
        match self {
            Self::Rotate(rotate) => rotate.angle(),
            Self::Spin(spin) => spin.angle(),
        }
    }
}

/// Scene state plus everything the input and frame handlers mutate
pub struct Gallery {
    pub scene: Scene,
    pub camera: Camera,
    variant: Variant,
    staircase: NodeId,
    lamps: Vec<NodeId>,
    drag: LampDrag,
    click: ClickBehaviour,
    sun: Option<(NodeId, SunPath)>,
    /// Set between a pointer press that did not grab a lamp and its release
    pressed: bool,
    time: f32,
}

impl Gallery {
    pub fn new(config: &GalleryConfig, aspect: f32) -> Self {
        let built = build_gallery(config);
        Self {
            scene: built.scene,
            camera: Camera::from_config(&config.camera, aspect),
            variant: built.variant,
            staircase: built.staircase,
            lamps: built.lamps,
            drag: LampDrag::new(built.lamp_bounds),
            click: ClickBehaviour::for_mode(built.variant.click_mode(), config.spin_speed),
            sun: built.sun,
            pressed: false,
            time: 0.0,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn staircase(&self) -> NodeId {
        self.staircase
    }

    pub fn lamps(&self) -> &[NodeId] {
        &self.lamps
    }

    pub fn click_behaviour(&self) -> &ClickBehaviour {
        &self.click
    }

    pub fn sun(&self) -> Option<&SunPath> {
        self.sun.as_ref().map(|(_, path)| path)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Seconds of animation time fed to the wave shader
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.update_projection(width as f32 / height as f32);
        }
    }

    // ========================================================================
    // Pointer
    // ========================================================================

    /// Starts a lamp drag when the ray hits a lamp. Returns true if it did.
    pub fn pointer_down(&mut self, ndc: Vec2) -> bool {
        let raycaster = Raycaster::from_camera(ndc, &self.camera);
        let hit = raycaster
            .intersect_objects(&self.scene, &self.lamps, true)
            .into_iter()
            .find_map(|hit| self.lamp_of(hit.node).map(|lamp| (lamp, hit.point)));

        match hit {
            Some((lamp, point)) => {
                let lamp_position = self.scene.world_position(lamp);
                self.drag.begin(lamp, lamp_position, point, self.camera.forward());
                self.pressed = false;
                true
            }
            None => {
                self.pressed = true;
                false
            }
        }
    }

    /// Moves the dragged lamp under the pointer
    pub fn pointer_move(&mut self, ndc: Vec2) {
        if !self.drag.is_dragging() {
            return;
        }
        let ray = self.camera.ray_from_ndc(ndc);
        if let Some((lamp, position)) = self.drag.drag_to(&ray) {
            self.scene.set_world_position(lamp, position);
        }
    }

    /// Ends a drag, or treats press plus release as a click
    pub fn pointer_up(&mut self, ndc: Vec2) {
        if self.drag.end().is_some() {
            return;
        }
        if std::mem::take(&mut self.pressed) {
            self.click(ndc);
        }
    }

    /// Drops any lamp drag where it is and forgets a pending click
    pub fn cancel_drag(&mut self) {
        self.pressed = false;
        if let Some(lamp) = self.drag.end() {
            log::debug!("drag on {} cancelled", self.scene.node(lamp).name);
        }
    }

    /// Hit-tests the staircase and applies the variant's click behaviour.
    /// Returns true when the staircase was hit.
    pub fn click(&mut self, ndc: Vec2) -> bool {
        let raycaster = Raycaster::from_camera(ndc, &self.camera);
        let Some(hit) = raycaster.intersect_subtree(&self.scene, self.staircase).into_iter().next() else {
            return false;
        };
        log::debug!("clicked {} at {:.2}", self.scene.node(hit.node).name, hit.distance);

        match &mut self.click {
            ClickBehaviour::Rotate(rotate) => match rotate.try_rotate() {
                Some(angle) => {
                    self.scene.transform_mut(self.staircase).rotate_y(angle);
                    log::debug!("staircase rotated to {:.3} rad", rotate.angle());
                }
                None => log::warn!("rotation limit reached at {:.3} rad", rotate.angle()),
            },
            ClickBehaviour::Spin(spin) => {
                let rotating = spin.toggle();
                log::debug!("staircase spin {}", if rotating { "on" } else { "off" });
            }
        }
        true
    }

    fn lamp_of(&self, node: NodeId) -> Option<NodeId> {
        self.lamps
            .iter()
            .copied()
            .find(|lamp| self.scene.is_descendant_of(node, *lamp))
    }

    // ========================================================================
    // Keys and frames
    // ========================================================================

    pub fn key_pressed(&mut self, button: Button) {
        match button {
            Button::KeyR => self.reset_rotation(),
            Button::KeyL => {
                if let Some((_, path)) = &mut self.sun {
                    path.advance();
                }
            }
            _ => {}
        }
    }

    pub fn reset_rotation(&mut self) {
        let undo = match &mut self.click {
            ClickBehaviour::Rotate(rotate) => rotate.reset(),
            ClickBehaviour::Spin(spin) => spin.reset(),
        };
        self.scene.transform_mut(self.staircase).rotate_y(undo);
        log::debug!("staircase rotation reset");
    }

    /// Per-frame step: camera from held keys, spin, sun, shader time
    pub fn update(&mut self, frame: FrameInfo, controller: &dyn Controller) {
        self.camera.movement = MovementState::from_controller(controller);
        self.camera.update();

        if let ClickBehaviour::Spin(spin) = &mut self.click {
            let step = spin.step(frame.delta);
            if step != 0.0 {
                self.scene.transform_mut(self.staircase).rotate_y(step);
            }
        }

        if let Some((node, path)) = &mut self.sun {
            let position = path.update(frame.delta);
            self.scene.set_world_position(*node, position);
        }

        self.time = frame.time;
    }

    /// Overlay rows describing the current state
    pub fn hud_rows(&self) -> Vec<(&'static str, String)> {
        let p = self.camera.position;
        let mut rows = vec![
            ("Variant", format!("{:?}", self.variant)),
            ("Camera", format!("{:.1}, {:.1}, {:.1}", p.x, p.y, p.z)),
            ("Stairs", format!("{:.0}°", self.click.angle().to_degrees())),
        ];
        if let ClickBehaviour::Spin(spin) = &self.click {
            rows.push(("Spin", if spin.is_rotating() { "on" } else { "off" }.to_string()));
        }
        if let Some(path) = self.sun() {
            rows.push(("Sun", format!("{}/{}", path.index(), path.points().len())));
        }
        if let Some(lamp) = self.drag.dragged() {
            rows.push(("Dragging", self.scene.node(lamp).name.clone()));
        }
        rows
    }
}
