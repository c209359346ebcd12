//! Parametric staircase, L-staircase and pathway generators.
//!
//! Each generator is split in two: a pure `*_layout` function that does the
//! closed-form placement arithmetic, and a `create_*` function that turns the
//! layout into scene nodes under a new group.

use anyhow::ensure;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use crate::geometry::{box_mesh, sphere_mesh, tube_mesh};
use crate::math::CatmullRomCurve;
use crate::scene::{Material, MeshId, NodeId, Scene, Transform};

// ============================================================================
// Parameters
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaircaseParams {
    pub step_count: usize,
    pub step_height: f32,
    pub step_depth: f32,
    pub step_width: f32,
    pub post_height: f32,
    pub rail_thickness: f32,
    /// Height of the post caps above the post centre
    pub cap_offset: f32,
    pub tubular_segments: usize,
    pub radial_segments: usize,
    pub step_color: u32,
    pub rail_color: u32,
    /// Group position; defaults to the left door, `(-10 + step_depth / 2, 0, 0)`
    pub anchor: Option<[f32; 3]>,
}

impl Default for StaircaseParams {
    fn default() -> Self {
        Self {
            step_count: 30,
            step_height: 0.3,
            step_depth: 1.0,
            step_width: 6.0,
            post_height: 1.0,
            rail_thickness: 0.1,
            cap_offset: 0.4,
            tubular_segments: 20,
            radial_segments: 8,
            step_color: 0x8B4513,
            rail_color: 0xD2B48C,
            anchor: None,
        }
    }
}

impl StaircaseParams {
    pub fn anchor(&self) -> Vec3 {
        self.anchor
            .map(Vec3::from_array)
            .unwrap_or(Vec3::new(-10.0 + self.step_depth / 2.0, 0.0, 0.0))
    }

    /// Lateral distance from the step centre line to a post centre
    pub fn post_offset(&self) -> f32 {
        self.step_width / 2.0 + self.rail_thickness / 2.0
    }

    /// Rejects dimensions that cannot produce geometry
    pub fn validate(&self) -> anyhow::Result<()> {
        let dims = [
            ("step_height", self.step_height),
            ("step_depth", self.step_depth),
            ("step_width", self.step_width),
            ("post_height", self.post_height),
            ("rail_thickness", self.rail_thickness),
        ];
        for (name, value) in dims {
            ensure!(value.is_finite() && value > 0.0, "{} must be positive, got {}", name, value);
        }
        ensure!(self.cap_offset.is_finite(), "cap_offset must be finite");
        ensure!(self.tubular_segments > 0, "tubular_segments must be at least 1");
        ensure!(self.radial_segments >= 3, "radial_segments must be at least 3");
        Ok(())
    }
}

/// Direction of the second leg of an L-staircase, seen walking up the first leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    Left,
    #[default]
    Right,
}

impl Turn {
    /// +1 for the +x side, -1 for the -x side
    pub fn sign(self) -> f32 {
        match self {
            Turn::Left => -1.0,
            Turn::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathwayParams {
    pub waypoints: Vec<Vec3>,
    pub width: f32,
    pub tile_length: f32,
    pub thickness: f32,
    pub post_height: f32,
    pub rail_thickness: f32,
    pub tile_color: u32,
    pub rail_color: u32,
}

impl Default for PathwayParams {
    fn default() -> Self {
        Self {
            waypoints: Vec::new(),
            width: 3.0,
            tile_length: 1.0,
            thickness: 0.1,
            post_height: 1.0,
            rail_thickness: 0.1,
            tile_color: 0xA0522D,
            rail_color: 0xD2B48C,
        }
    }
}

// ============================================================================
// Layout
// ============================================================================

/// A box of local `size`, centred at `position` and turned `yaw` about Y
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub size: Vec3,
    pub yaw: f32,
}

impl Placement {
    fn new(position: Vec3, size: Vec3) -> Self {
        Self { position, size, yaw: 0.0 }
    }

    fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(Quat::from_rotation_y(self.yaw))
    }
}

/// Step, post and rail-point positions relative to the group anchor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaircaseLayout {
    pub steps: Vec<Placement>,
    pub left_posts: Vec<Placement>,
    pub right_posts: Vec<Placement>,
    pub left_rail: Vec<Vec3>,
    pub right_rail: Vec<Vec3>,
}

impl StaircaseLayout {
    fn push_posts(&mut self, left: Vec3, right: Vec3, post_size: Vec3) {
        let top = Vec3::Y * (post_size.y / 2.0);
        self.left_posts.push(Placement::new(left, post_size));
        self.right_posts.push(Placement::new(right, post_size));
        self.left_rail.push(left + top);
        self.right_rail.push(right + top);
    }
}

fn post_size(params: &StaircaseParams) -> Vec3 {
    Vec3::new(params.rail_thickness, params.post_height, params.rail_thickness)
}

/// Straight flight: step `i` at `(0, i*h, -i*d)` with posts on both sides
pub fn staircase_layout(params: &StaircaseParams) -> StaircaseLayout {
    let h = params.step_height;
    let d = params.step_depth;
    let offset = params.post_offset();
    let step_size = Vec3::new(params.step_width, h, d);
    let post_size = post_size(params);

    let mut layout = StaircaseLayout::default();
    for i in 0..params.step_count {
        let fi = i as f32;
        layout.steps.push(Placement::new(Vec3::new(0.0, fi * h, -fi * d), step_size));

        let y = fi * h + params.post_height / 2.0;
        let z = -fi * d + d / 2.0;
        layout.push_posts(Vec3::new(-offset, y, z), Vec3::new(offset, y, z), post_size);
    }
    layout
}

/// Two flights joined by a landing at `step_count / 2`.
///
/// The landing is half again as wide as a step and one step-width deep; the
/// second leg leaves it along the turn side of the x axis.
pub fn l_staircase_layout(params: &StaircaseParams, turn: Turn) -> StaircaseLayout {
    let n = params.step_count;
    let mid = n / 2;
    let h = params.step_height;
    let d = params.step_depth;
    let w = params.step_width;
    let sign = turn.sign();
    let offset = params.post_offset();
    let step_size = Vec3::new(w, h, d);
    let post_size = post_size(params);

    let mut layout = staircase_layout(&StaircaseParams {
        step_count: mid,
        ..params.clone()
    });
    if mid >= n {
        return layout;
    }

    // Landing sits right behind the last first-leg step
    let landing_y = mid as f32 * h;
    let landing_z = if mid == 0 {
        0.0
    } else {
        -((mid - 1) as f32) * d - d / 2.0 - w / 2.0
    };
    layout.steps.push(Placement::new(
        Vec3::new(sign * w / 4.0, landing_y, landing_z),
        Vec3::new(1.5 * w, h, w),
    ));

    // Corner posts where the rail lines of both legs meet
    let post_y = landing_y + params.post_height / 2.0;
    let outer = Vec3::new(-sign * offset, post_y, landing_z - offset);
    let inner = Vec3::new(sign * offset, post_y, landing_z + offset);
    let (left, right) = match turn {
        Turn::Right => (outer, inner),
        Turn::Left => (inner, outer),
    };
    layout.push_posts(left, right, post_size);

    let yaw = -sign * FRAC_PI_2;
    for k in (mid + 1)..n {
        let j = (k - mid) as f32;
        let x = sign * (w + (j - 0.5) * d);
        let y = k as f32 * h;
        layout
            .steps
            .push(Placement::new(Vec3::new(x, y, landing_z), step_size).with_yaw(yaw));

        // Front edge of a second-leg step faces the landing
        let post_x = x - sign * d / 2.0;
        let post_y = y + params.post_height / 2.0;
        layout.push_posts(
            Vec3::new(post_x, post_y, landing_z - sign * offset),
            Vec3::new(post_x, post_y, landing_z + sign * offset),
            post_size,
        );
    }
    layout
}

/// Yaw that turns local -Z onto the horizontal part of `tangent`
fn heading_yaw(tangent: Vec3) -> f32 {
    let flat = Vec3::new(tangent.x, 0.0, tangent.z);
    if flat.length_squared() < 1e-12 {
        0.0
    } else {
        (-flat.x).atan2(-flat.z)
    }
}

/// Tiles laid along a smooth curve through the waypoints, one tile per
/// `tile_length` of arc, with a post pair at every tile
pub fn pathway_layout(params: &PathwayParams) -> StaircaseLayout {
    let tile_size = Vec3::new(params.width, params.thickness, params.tile_length);
    let post_size = Vec3::new(params.rail_thickness, params.post_height, params.rail_thickness);
    let offset = params.width / 2.0 + params.rail_thickness / 2.0;

    let mut layout = StaircaseLayout::default();
    let mut place = |center: Vec3, yaw: f32| {
        layout.steps.push(Placement::new(center, tile_size).with_yaw(yaw));
        let right = Quat::from_rotation_y(yaw) * Vec3::X;
        let y = Vec3::Y * (params.post_height / 2.0);
        layout.push_posts(center - right * offset + y, center + right * offset + y, post_size);
    };

    match CatmullRomCurve::new(params.waypoints.clone()) {
        Some(curve) => {
            let count = (curve.length() / params.tile_length.max(1e-3)).ceil().max(1.0) as usize;
            for k in 0..count {
                let u = (k as f32 + 0.5) / count as f32;
                place(curve.point_at(u), heading_yaw(curve.tangent_at(u)));
            }
        }
        None => {
            if let Some(&only) = params.waypoints.first() {
                place(only, 0.0);
            }
        }
    }
    layout
}

// ============================================================================
// Scene insertion
// ============================================================================

/// Box meshes shared between placements of equal size
#[derive(Default)]
struct BoxCache {
    entries: Vec<(Vec3, MeshId)>,
}

impl BoxCache {
    fn get(&mut self, scene: &mut Scene, size: Vec3) -> MeshId {
        if let Some((_, id)) = self.entries.iter().find(|(s, _)| s.abs_diff_eq(size, 1e-6)) {
            return *id;
        }
        let id = scene.add_mesh(box_mesh(size.x, size.y, size.z));
        self.entries.push((size, id));
        id
    }
}

struct RailStyle {
    material: Material,
    cap_radius: f32,
    cap_offset: f32,
    tubular_segments: usize,
    radial_segments: usize,
}

fn insert_layout(
    scene: &mut Scene,
    group: NodeId,
    layout: &StaircaseLayout,
    step_material: Material,
    rail: RailStyle,
    step_name: &str,
) {
    let mut boxes = BoxCache::default();

    for (i, step) in layout.steps.iter().enumerate() {
        let mesh = boxes.get(scene, step.size);
        scene.add_mesh_node(group, format!("{}-{}", step_name, i), mesh, step_material.clone(), step.transform());
    }

    let cap = scene.add_mesh(sphere_mesh(rail.cap_radius, 16, 16));
    for (side, posts) in [("left", &layout.left_posts), ("right", &layout.right_posts)] {
        for (i, post) in posts.iter().enumerate() {
            let mesh = boxes.get(scene, post.size);
            scene.add_mesh_node(group, format!("post-{}-{}", side, i), mesh, rail.material.clone(), post.transform());
            scene.add_mesh_node(
                group,
                format!("cap-{}-{}", side, i),
                cap,
                rail.material.clone(),
                Transform::from_translation(post.position + Vec3::Y * rail.cap_offset),
            );
        }
    }

    for (side, points) in [("left", &layout.left_rail), ("right", &layout.right_rail)] {
        // Fewer than two control points cannot make a curve
        let Some(curve) = CatmullRomCurve::new(points.clone()) else {
            log::debug!("skipping {} rail with {} control point(s)", side, points.len());
            continue;
        };
        let mesh = scene.add_mesh(tube_mesh(
            &curve,
            rail.tubular_segments,
            rail.cap_radius / 2.0,
            rail.radial_segments,
        ));
        scene.add_mesh_node(group, format!("rail-{}", side), mesh, rail.material.clone(), Transform::IDENTITY);
    }
}

fn staircase_style(params: &StaircaseParams) -> (Material, RailStyle) {
    (
        Material::from_hex(params.step_color),
        RailStyle {
            material: Material::from_hex(params.rail_color),
            cap_radius: params.rail_thickness,
            cap_offset: params.cap_offset,
            tubular_segments: params.tubular_segments,
            radial_segments: params.radial_segments,
        },
    )
}

/// Adds a straight staircase group under `parent` at the params' anchor
pub fn create_staircase(scene: &mut Scene, parent: NodeId, params: &StaircaseParams) -> NodeId {
    let group = scene.add_group(parent, "staircase", Transform::from_translation(params.anchor()));
    let layout = staircase_layout(params);
    let (step_material, rail) = staircase_style(params);
    insert_layout(scene, group, &layout, step_material, rail, "step");
    log::info!(
        "staircase: {} steps, {} posts per side",
        layout.steps.len(),
        layout.left_posts.len()
    );
    group
}

/// Adds an L-shaped staircase group turning towards `turn`
pub fn create_l_staircase(scene: &mut Scene, parent: NodeId, params: &StaircaseParams, turn: Turn) -> NodeId {
    let group = scene.add_group(parent, "staircase", Transform::from_translation(params.anchor()));
    let layout = l_staircase_layout(params, turn);
    let (step_material, rail) = staircase_style(params);
    insert_layout(scene, group, &layout, step_material, rail, "step");
    log::info!("l-staircase: {} steps turning {:?}", layout.steps.len(), turn);
    group
}

/// Adds a railed pathway group; waypoints are in `parent` space
pub fn create_pathway(scene: &mut Scene, parent: NodeId, params: &PathwayParams) -> NodeId {
    let group = scene.add_group(parent, "pathway", Transform::IDENTITY);
    let layout = pathway_layout(params);
    let rail = RailStyle {
        material: Material::from_hex(params.rail_color),
        cap_radius: params.rail_thickness,
        cap_offset: params.post_height * 0.4,
        tubular_segments: (layout.steps.len() * 4).max(20),
        radial_segments: 8,
    };
    insert_layout(scene, group, &layout, Material::from_hex(params.tile_color), rail, "tile");
    log::info!("pathway: {} tiles over {} waypoints", layout.steps.len(), params.waypoints.len());
    group
}
