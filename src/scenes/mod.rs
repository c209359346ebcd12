//! Gallery layouts assembled from the staircase, room and prop builders

mod ocean;
mod props;
mod room;
mod staircase;
mod sun;

pub use ocean::{create_ocean, wave_height, OceanParams};
pub use props::{create_lamp, create_picture};
pub use room::{create_floor, create_wall_door, create_walls, RoomParams};
pub use staircase::{
    create_l_staircase, create_pathway, create_staircase, l_staircase_layout, pathway_layout,
    staircase_layout, PathwayParams, Placement, StaircaseLayout, StaircaseParams, Turn,
};
pub use sun::{create_sun, SunPath};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use crate::config::GalleryConfig;
use crate::math::AABB;
use crate::scene::{Fog, Light, NodeId, Scene, Transform};

/// Hand-tuned gallery layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Straight staircase between three walls; clicks rotate it
    #[default]
    Classic,
    /// L-staircase, pathway, lamps and pictures; clicks toggle a spin
    Gallery,
    /// Staircase by the sea with a moving sun
    Seaside,
}

/// What a click on the staircase does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickMode {
    Rotate,
    Spin,
}

impl Variant {
    pub fn click_mode(self) -> ClickMode {
        match self {
            Variant::Classic => ClickMode::Rotate,
            Variant::Gallery | Variant::Seaside => ClickMode::Spin,
        }
    }
}

/// A built scene plus the handles the interaction layer needs
#[derive(Debug, Clone)]
pub struct GalleryScene {
    pub scene: Scene,
    pub variant: Variant,
    pub staircase: NodeId,
    pub lamps: Vec<NodeId>,
    /// Lamps are kept inside this box while dragged
    pub lamp_bounds: AABB,
    pub sun: Option<(NodeId, SunPath)>,
}

// ============================================================================
// Variant builders
// ============================================================================

pub fn build_gallery(config: &GalleryConfig) -> GalleryScene {
    let built = match config.variant {
        Variant::Classic => build_classic(config),
        Variant::Gallery => build_l_gallery(config),
        Variant::Seaside => build_seaside(config),
    };
    log::info!(
        "built {:?} scene: {} nodes, {} meshes, {} lamps",
        built.variant,
        built.scene.node_count(),
        built.scene.mesh_count(),
        built.lamps.len()
    );
    built
}

fn add_room_lights(scene: &mut Scene, root: NodeId) {
    scene.add_light(root, "ambient", Light::ambient(0x404040, 1.5), Transform::IDENTITY);
    scene.add_light(root, "point", Light::point(0xFFFFFF, 1.0, 100.0), Transform::from_xyz(10.0, 10.0, 10.0));
}

fn dark_scene() -> Scene {
    let mut scene = Scene::new();
    scene.background = crate::math::hex_to_rgb(0x202020);
    scene.fog = Some(Fog::exp2(0x202020, 0.01));
    scene
}

fn build_classic(config: &GalleryConfig) -> GalleryScene {
    let mut scene = dark_scene();
    let root = scene.root();
    add_room_lights(&mut scene, root);

    let staircase = create_staircase(&mut scene, root, &config.staircase);
    create_walls(&mut scene, root, &RoomParams::default(), &config.assets_dir);

    GalleryScene {
        scene,
        variant: Variant::Classic,
        staircase,
        lamps: Vec::new(),
        lamp_bounds: AABB::new(Vec3::splat(-10.0), Vec3::splat(10.0)),
        sun: None,
    }
}

fn add_lamps(scene: &mut Scene, root: NodeId, bases: &[Vec3]) -> Vec<NodeId> {
    bases
        .iter()
        .enumerate()
        .map(|(i, base)| create_lamp(scene, root, &format!("lamp-{}", i), *base))
        .collect()
}

fn build_l_gallery(config: &GalleryConfig) -> GalleryScene {
    let assets: &Path = &config.assets_dir;
    let mut scene = dark_scene();
    let root = scene.root();
    add_room_lights(&mut scene, root);

    let room = RoomParams {
        half_width: 20.0,
        depth: 60.0,
        door_z: 10.0,
        ..RoomParams::default()
    };
    let floor_y = -config.staircase.step_height / 2.0;
    create_walls(&mut scene, root, &room, assets);
    create_floor(&mut scene, root, [room.half_width * 2.0, room.depth], floor_y, assets);

    let params = StaircaseParams {
        anchor: config.staircase.anchor.or(Some([-12.0, 0.0, 5.0])),
        ..config.staircase.clone()
    };
    let staircase = create_l_staircase(&mut scene, root, &params, Turn::Right);

    // From the staircase foot round to the right-hand door
    let tile_y = floor_y + 0.05;
    let foot = params.anchor() + Vec3::new(0.0, 0.0, params.step_depth);
    create_pathway(
        &mut scene,
        root,
        &PathwayParams {
            waypoints: vec![
                Vec3::new(foot.x, tile_y, foot.z + 1.0),
                Vec3::new(-4.0, tile_y, 13.0),
                Vec3::new(8.0, tile_y, 13.0),
                Vec3::new(room.half_width - 2.0, tile_y, room.door_z),
            ],
            ..PathwayParams::default()
        },
    );

    let lamps = add_lamps(
        &mut scene,
        root,
        &[
            Vec3::new(-6.0, floor_y, 16.0),
            Vec3::new(4.0, floor_y, 16.0),
            Vec3::new(12.0, floor_y, 4.0),
            Vec3::new(-2.0, floor_y, -4.0),
        ],
    );

    let picture_y = 4.5;
    let wall_x = room.half_width - room.wall_thickness / 2.0 - 0.06;
    let size = Vec2::new(4.0, 3.0);
    create_picture(&mut scene, root, 1, size, Vec3::new(-wall_x, picture_y, -10.0), FRAC_PI_2, assets);
    create_picture(&mut scene, root, 2, size, Vec3::new(wall_x, picture_y, -10.0), -FRAC_PI_2, assets);
    create_picture(&mut scene, root, 3, size, Vec3::new(-8.0, picture_y + 6.0, room.back_z() + 0.31), 0.0, assets);
    create_picture(&mut scene, root, 4, size, Vec3::new(8.0, picture_y + 6.0, room.back_z() + 0.31), 0.0, assets);

    let margin = 1.0;
    let lamp_bounds = AABB::new(
        Vec3::new(-room.half_width + margin, floor_y, room.back_z() + margin),
        Vec3::new(room.half_width - margin, floor_y + 6.0, 20.0),
    );

    GalleryScene {
        scene,
        variant: Variant::Gallery,
        staircase,
        lamps,
        lamp_bounds,
        sun: None,
    }
}

fn build_seaside(config: &GalleryConfig) -> GalleryScene {
    let assets: &Path = &config.assets_dir;
    let mut scene = Scene::new();
    scene.background = crate::math::hex_to_rgb(0x87CEEB);
    scene.fog = Some(Fog::exp2(0x87CEEB, 0.004));
    let root = scene.root();
    scene.add_light(root, "ambient", Light::ambient(0x404040, 1.0), Transform::IDENTITY);

    let ocean = OceanParams::default();
    create_ocean(&mut scene, root, &ocean);

    let floor_y = -config.staircase.step_height / 2.0;
    let params = StaircaseParams {
        anchor: config.staircase.anchor.or(Some([0.0, 0.0, 0.0])),
        ..config.staircase.clone()
    };
    let staircase = create_staircase(&mut scene, root, &params);

    // Boardwalk out over the water from the staircase foot
    let tile_y = floor_y + 0.05;
    let foot = params.anchor();
    create_pathway(
        &mut scene,
        root,
        &PathwayParams {
            waypoints: vec![
                Vec3::new(foot.x, tile_y, foot.z + 1.0),
                Vec3::new(foot.x + 3.0, tile_y, foot.z + 8.0),
                Vec3::new(foot.x - 2.0, tile_y, foot.z + 15.0),
                Vec3::new(foot.x, tile_y, foot.z + 22.0),
            ],
            width: 4.0,
            tile_color: 0xC2A477,
            ..PathwayParams::default()
        },
    );

    let lamps = add_lamps(
        &mut scene,
        root,
        &[
            Vec3::new(foot.x + 6.0, floor_y, foot.z + 6.0),
            Vec3::new(foot.x - 5.0, floor_y, foot.z + 12.0),
            Vec3::new(foot.x + 5.0, floor_y, foot.z + 18.0),
        ],
    );

    let size = Vec2::new(3.0, 2.0);
    create_picture(&mut scene, root, 1, size, Vec3::new(foot.x + 7.0, 2.5, foot.z + 10.0), -FRAC_PI_2, assets);
    create_picture(&mut scene, root, 2, size, Vec3::new(foot.x - 7.0, 2.5, foot.z + 16.0), FRAC_PI_2, assets);

    let path = SunPath::new(
        SunPath::arc(80.0, 50.0, -60.0, 12),
        config.sun.speed,
        config.sun.arrive_distance,
    );
    let sun = path.map(|path| (create_sun(&mut scene, root, &path), path));

    let lamp_bounds = AABB::new(
        Vec3::new(foot.x - 10.0, floor_y, foot.z - 2.0),
        Vec3::new(foot.x + 10.0, floor_y + 6.0, foot.z + 24.0),
    );

    GalleryScene {
        scene,
        variant: Variant::Seaside,
        staircase,
        lamps,
        lamp_bounds,
        sun,
    }
}
