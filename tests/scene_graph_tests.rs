use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;
use stair_gallery::config::GalleryConfig;
use stair_gallery::geometry::box_mesh;
use stair_gallery::scene::{Light, Material, Scene, Transform};
use stair_gallery::scenes::{build_gallery, create_staircase, StaircaseParams, Variant};

#[cfg(test)]
mod scene_graph_tests {
    use super::*;

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut scene = Scene::new();
        let root = scene.root();
        let parent = scene.add_group(
            root,
            "parent",
            Transform::from_xyz(1.0, 0.0, 0.0).with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
        );
        let child = scene.add_group(parent, "child", Transform::from_xyz(0.0, 0.0, -1.0));

        let world = scene.world_position(child);
        assert!(world.abs_diff_eq(Vec3::ZERO, 1e-5), "child world position {:?}", world);
    }

    #[test]
    fn test_set_world_position_under_rotated_parent() {
        let mut scene = Scene::new();
        let root = scene.root();
        let parent = scene.add_group(
            root,
            "parent",
            Transform::from_xyz(5.0, 1.0, 0.0)
                .with_rotation(Quat::from_rotation_y(0.7))
                .with_scale(Vec3::splat(2.0)),
        );
        let child = scene.add_group(parent, "child", Transform::IDENTITY);

        let target = Vec3::new(-3.0, 4.0, 2.0);
        scene.set_world_position(child, target);
        assert!(scene.world_position(child).abs_diff_eq(target, 1e-4));
    }

    #[test]
    fn test_descendants_depth_first() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add_group(root, "a", Transform::IDENTITY);
        let a1 = scene.add_group(a, "a1", Transform::IDENTITY);
        let b = scene.add_group(root, "b", Transform::IDENTITY);
        let a2 = scene.add_group(a, "a2", Transform::IDENTITY);

        assert_eq!(scene.descendants(root), vec![a, a1, a2, b]);
        assert!(scene.is_descendant_of(a2, a));
        assert!(scene.is_descendant_of(a, a), "a node counts as its own descendant");
        assert!(!scene.is_descendant_of(b, a));
        assert_eq!(scene.node(a1).parent(), Some(a));
    }

    #[test]
    fn test_hidden_group_hides_renderables() {
        let mut scene = Scene::new();
        let root = scene.root();
        let group = scene.add_group(root, "group", Transform::IDENTITY);
        let mesh = scene.add_mesh(box_mesh(1.0, 1.0, 1.0));
        scene.add_mesh_node(group, "box", mesh, Material::default(), Transform::IDENTITY);
        scene.add_mesh_node(root, "other", mesh, Material::default(), Transform::IDENTITY);

        assert_eq!(scene.renderables().len(), 2);
        scene.node_mut(group).visible = false;
        let visible = scene.renderables();
        assert_eq!(visible.len(), 1);
        assert_eq!(scene.node(visible[0].node).name, "other");
    }

    #[test]
    fn test_lights_report_world_positions() {
        let mut scene = Scene::new();
        let root = scene.root();
        let group = scene.add_group(root, "lamp", Transform::from_xyz(2.0, 0.0, 0.0));
        scene.add_light(group, "light", Light::point(0xFFFFFF, 1.0, 10.0), Transform::from_xyz(0.0, 3.0, 0.0));

        let lights = scene.lights();
        assert_eq!(lights.len(), 1);
        assert!(lights[0].1.abs_diff_eq(Vec3::new(2.0, 3.0, 0.0), 1e-5));
    }

    #[test]
    fn test_staircase_bounds_cover_all_steps() {
        let params = StaircaseParams::default();
        let mut scene = Scene::new();
        let root = scene.root();
        let staircase = create_staircase(&mut scene, root, &params);

        let bounds = scene.world_bounds(staircase).expect("staircase has geometry");
        let top = (params.step_count - 1) as f32 * params.step_height;
        assert!(bounds.max.y >= top, "bounds top {} below the last step {}", bounds.max.y, top);
        let back = params.anchor().z - (params.step_count - 1) as f32 * params.step_depth;
        assert!(bounds.min.z <= back);
    }

    #[test]
    fn test_variant_contents() {
        let build = |variant| {
            build_gallery(&GalleryConfig {
                variant,
                ..GalleryConfig::default()
            })
        };

        let classic = build(Variant::Classic);
        for name in ["wall-left", "wall-right", "wall-back", "door-left", "door-right", "door-back"] {
            assert!(classic.scene.find(name).is_some(), "classic is missing {}", name);
        }
        assert!(classic.lamps.is_empty());
        assert!(classic.sun.is_none());
        assert!(classic.scene.fog.is_some());

        let gallery = build(Variant::Gallery);
        assert_eq!(gallery.lamps.len(), 4);
        assert!(gallery.scene.find("floor").is_some());
        assert!(gallery.scene.find("pathway").is_some());
        assert!(gallery.scene.find("picture-1").is_some());

        let seaside = build(Variant::Seaside);
        assert!(seaside.scene.find("ocean").is_some());
        assert!(seaside.sun.is_some());
        assert_eq!(seaside.lamps.len(), 3);
    }

    #[test]
    fn test_lamps_start_inside_drag_bounds() {
        for variant in [Variant::Gallery, Variant::Seaside] {
            let built = build_gallery(&GalleryConfig {
                variant,
                ..GalleryConfig::default()
            });
            for lamp in &built.lamps {
                let position = built.scene.world_position(*lamp);
                assert!(built.lamp_bounds.contains(position), "{:?}: lamp at {:?} outside bounds", variant, position);
            }
        }
    }
}
