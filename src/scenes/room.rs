use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use crate::geometry::{box_mesh, plane_mesh};
use crate::scene::{Material, NodeId, Scene, Transform};

/// Three-walled room open towards +z
#[derive(Debug, Clone, PartialEq)]
pub struct RoomParams {
    /// Distance from the centre line to each side wall
    pub half_width: f32,
    /// Length of the side walls; the back wall sits at `-depth / 2`
    pub depth: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    pub wall_color: u32,
    /// Side-door z positions
    pub door_z: f32,
}

impl Default for RoomParams {
    fn default() -> Self {
        Self {
            half_width: 10.0,
            depth: 30.0,
            wall_height: 100.0,
            wall_thickness: 0.5,
            wall_color: 0x808080,
            door_z: 0.0,
        }
    }
}

impl RoomParams {
    pub fn back_z(&self) -> f32 {
        -self.depth / 2.0
    }
}

const DOOR_SIZE: Vec3 = Vec3::new(3.0, 7.0, 0.5);

fn wall_material(params: &RoomParams, assets: &Path) -> Material {
    Material::from_hex(params.wall_color)
        .with_texture(assets.join("bg.jpg"), [4.0, 4.0])
        .with_surface(0.75, 0.1)
}

/// Adds the left, right and back walls with a door on each
pub fn create_walls(scene: &mut Scene, parent: NodeId, params: &RoomParams, assets: &Path) -> NodeId {
    let group = scene.add_group(parent, "walls", Transform::IDENTITY);
    let material = wall_material(params, assets);

    // Tall walls centred on y = 0 fade into the fog above and below
    let side = scene.add_mesh(box_mesh(params.wall_thickness, params.wall_height, params.depth));
    let back = scene.add_mesh(box_mesh(params.depth, params.wall_height, params.wall_thickness));
    let walls = [
        ("wall-left", side, Vec3::new(-params.half_width, 0.0, 0.0)),
        ("wall-right", side, Vec3::new(params.half_width, 0.0, 0.0)),
        ("wall-back", back, Vec3::new(0.0, 0.0, params.back_z())),
    ];
    for (name, mesh, position) in walls {
        scene.add_mesh_node(group, name, mesh, material.clone(), Transform::from_translation(position));
    }

    let inset = params.half_width - params.wall_thickness / 2.0;
    let door_y = DOOR_SIZE.y / 2.0;
    create_wall_door(scene, group, "door-left", Vec3::new(-inset, door_y, params.door_z), FRAC_PI_2, assets);
    create_wall_door(scene, group, "door-right", Vec3::new(inset, door_y, params.door_z), -FRAC_PI_2, assets);
    create_wall_door(scene, group, "door-back", Vec3::new(0.0, door_y, params.back_z()), 0.0, assets);

    group
}

/// Door slab facing local +z after `yaw`
pub fn create_wall_door(
    scene: &mut Scene,
    parent: NodeId,
    name: &str,
    position: Vec3,
    yaw: f32,
    assets: &Path,
) -> NodeId {
    let mesh = scene.add_mesh(box_mesh(DOOR_SIZE.x, DOOR_SIZE.y, DOOR_SIZE.z));
    let material = Material::from_hex(0xFFFFFF).with_texture(assets.join("door.jpg"), [1.0, 1.0]);
    scene.add_mesh_node(
        parent,
        name,
        mesh,
        material,
        Transform::from_translation(position).with_rotation(Quat::from_rotation_y(yaw)),
    )
}

/// Horizontal textured floor with its top at `y`
pub fn create_floor(scene: &mut Scene, parent: NodeId, size: [f32; 2], y: f32, assets: &Path) -> NodeId {
    let mesh = scene.add_mesh(plane_mesh(size[0], size[1], 1, 1));
    let material = Material::from_hex(0x6B5B4B)
        .with_texture(assets.join("floor.jpg"), [size[0] / 4.0, size[1] / 4.0])
        .with_surface(0.9, 0.0);
    scene.add_mesh_node(
        parent,
        "floor",
        mesh,
        material,
        Transform::from_xyz(0.0, y, 0.0).with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
    )
}
