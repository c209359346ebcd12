use glam::{Quat, Vec2, Vec3};
use std::path::Path;

use crate::geometry::{box_mesh, cylinder_mesh, plane_mesh, sphere_mesh};
use crate::math::{hex_to_rgb, hsv_to_rgb};
use crate::scene::{Light, Material, NodeId, Scene, Transform};

const LAMP_HEIGHT: f32 = 3.0;
const LAMP_COLOR: u32 = 0xFFD27F;

/// Street lamp: a post, a glowing bulb and a point light. The returned group
/// is what gets dragged.
pub fn create_lamp(scene: &mut Scene, parent: NodeId, name: &str, base: Vec3) -> NodeId {
    let group = scene.add_group(parent, name, Transform::from_translation(base));

    let post = scene.add_mesh(cylinder_mesh(0.08, 0.12, LAMP_HEIGHT, 12));
    scene.add_mesh_node(
        group,
        format!("{}-post", name),
        post,
        Material::from_hex(0x2F2F2F).with_surface(0.4, 0.8),
        Transform::from_xyz(0.0, LAMP_HEIGHT / 2.0, 0.0),
    );

    let bulb = scene.add_mesh(sphere_mesh(0.3, 16, 16));
    scene.add_mesh_node(
        group,
        format!("{}-bulb", name),
        bulb,
        Material::from_hex(LAMP_COLOR).with_emissive(hex_to_rgb(LAMP_COLOR)),
        Transform::from_xyz(0.0, LAMP_HEIGHT + 0.2, 0.0),
    );

    scene.add_light(
        group,
        format!("{}-light", name),
        Light::point(LAMP_COLOR, 1.0, 15.0),
        Transform::from_xyz(0.0, LAMP_HEIGHT + 0.2, 0.0),
    );

    group
}

/// Framed picture facing local +z after `yaw`. `index` picks the image
/// (`picture{index}.jpg`) and the frame tint.
pub fn create_picture(
    scene: &mut Scene,
    parent: NodeId,
    index: usize,
    size: Vec2,
    center: Vec3,
    yaw: f32,
    assets: &Path,
) -> NodeId {
    let name = format!("picture-{}", index);
    let group = scene.add_group(
        parent,
        name.clone(),
        Transform::from_translation(center).with_rotation(Quat::from_rotation_y(yaw)),
    );

    // Golden-ratio hue steps keep neighbouring frames distinct
    let hue = (index as f32 * 0.618_034) % 1.0;
    let frame = scene.add_mesh(box_mesh(size.x + 0.3, size.y + 0.3, 0.1));
    scene.add_mesh_node(
        group,
        format!("{}-frame", name),
        frame,
        Material {
            color: hsv_to_rgb(hue, 0.35, 0.4),
            ..Material::default()
        }
        .with_surface(0.6, 0.2),
        Transform::IDENTITY,
    );

    let canvas = scene.add_mesh(plane_mesh(size.x, size.y, 1, 1));
    scene.add_mesh_node(
        group,
        format!("{}-canvas", name),
        canvas,
        Material::from_hex(0xFFFFFF).with_texture(assets.join(format!("picture{}.jpg", index)), [1.0, 1.0]),
        Transform::from_xyz(0.0, 0.0, 0.06),
    );

    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;

    #[test]
    fn test_lamp_light_sits_in_bulb() {
        let mut scene = Scene::new();
        let root = scene.root();
        let lamp = create_lamp(&mut scene, root, "lamp-0", Vec3::new(2.0, 0.0, -3.0));
        let lights = scene.lights();
        assert_eq!(lights.len(), 1);
        assert!((lights[0].1 - Vec3::new(2.0, 3.2, -3.0)).length() < 1e-5);

        let bounds = scene.world_bounds(lamp).unwrap();
        assert!(bounds.min.y.abs() < 1e-4, "lamp should stand on its base");
    }

    #[test]
    fn test_picture_canvas_in_front_of_frame() {
        let mut scene = Scene::new();
        let root = scene.root();
        create_picture(&mut scene, root, 1, Vec2::new(4.0, 3.0), Vec3::new(0.0, 4.0, -14.0), 0.0, Path::new("assets"));
        let canvas = scene.find("picture-1-canvas").unwrap();
        assert!(scene.world_position(canvas).z > -14.0);
        match &scene.node(canvas).kind {
            NodeKind::Mesh { material, .. } => {
                let texture = material.texture.as_ref().unwrap();
                assert!(texture.path.ends_with("picture1.jpg"));
            }
            other => panic!("canvas should be a mesh, got {:?}", other),
        }
    }
}
