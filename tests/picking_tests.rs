use glam::{Vec2, Vec3};
use stair_gallery::camera::Camera;
use stair_gallery::geometry::box_mesh;
use stair_gallery::interaction::Raycaster;
use stair_gallery::math::Ray;
use stair_gallery::scene::{Material, NodeId, Scene, Transform};
use stair_gallery::scenes::{create_staircase, StaircaseParams};

#[cfg(test)]
mod picking_tests {
    use super::*;

    fn add_box(scene: &mut Scene, parent: NodeId, name: &str, transform: Transform) -> NodeId {
        let mesh = scene.add_mesh(box_mesh(1.0, 1.0, 1.0));
        scene.add_mesh_node(parent, name, mesh, Material::default(), transform)
    }

    fn forward_ray() -> Raycaster {
        Raycaster::new(Ray::new(Vec3::ZERO, Vec3::NEG_Z))
    }

    #[test]
    fn test_hits_sorted_nearest_first() {
        let mut scene = Scene::new();
        let root = scene.root();
        let far = add_box(&mut scene, root, "far", Transform::from_xyz(0.0, 0.0, -10.0));
        let near = add_box(&mut scene, root, "near", Transform::from_xyz(0.0, 0.0, -5.0));

        let hits = forward_ray().intersect_objects(&scene, &[far, near], false);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node, near, "nearest hit must come first");
        assert_eq!(hits[1].node, far);
        assert!((hits[0].distance - 4.5).abs() < 1e-4, "front face at z=-4.5, got {}", hits[0].distance);
        assert!(hits[0].point.abs_diff_eq(Vec3::new(0.0, 0.0, -4.5), 1e-4));
    }

    #[test]
    fn test_miss_returns_nothing() {
        let mut scene = Scene::new();
        let root = scene.root();
        let id = add_box(&mut scene, root, "side", Transform::from_xyz(5.0, 0.0, -5.0));
        assert!(forward_ray().intersect_objects(&scene, &[id], false).is_empty());
        assert!(forward_ray().intersect_node(&scene, root).is_none(), "groups have no geometry");
    }

    #[test]
    fn test_scaled_node_reports_world_distance() {
        let mut scene = Scene::new();
        let root = scene.root();
        let id = add_box(
            &mut scene,
            root,
            "big",
            Transform::from_xyz(0.0, 0.0, -10.0).with_scale(Vec3::splat(2.0)),
        );
        let hit = forward_ray().intersect_node(&scene, id).expect("ray should hit the scaled box");
        assert!((hit.distance - 9.0).abs() < 1e-4, "distance {}", hit.distance);
    }

    #[test]
    fn test_recursive_reaches_children() {
        let mut scene = Scene::new();
        let root = scene.root();
        let group = scene.add_group(root, "group", Transform::from_xyz(0.0, 0.0, -3.0));
        add_box(&mut scene, group, "child", Transform::from_xyz(0.0, 0.0, -2.0));

        assert!(forward_ray().intersect_objects(&scene, &[group], false).is_empty());
        let hits = forward_ray().intersect_objects(&scene, &[group], true);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 4.5).abs() < 1e-4);
    }

    #[test]
    fn test_hidden_nodes_are_skipped() {
        let mut scene = Scene::new();
        let root = scene.root();
        let group = scene.add_group(root, "group", Transform::IDENTITY);
        let id = add_box(&mut scene, group, "box", Transform::from_xyz(0.0, 0.0, -5.0));

        scene.node_mut(group).visible = false;
        assert!(forward_ray().intersect_objects(&scene, &[id], false).is_empty());

        scene.node_mut(group).visible = true;
        assert_eq!(forward_ray().intersect_objects(&scene, &[id], false).len(), 1);
    }

    #[test]
    fn test_camera_centre_ray() {
        let mut scene = Scene::new();
        let root = scene.root();
        let id = add_box(&mut scene, root, "target", Transform::IDENTITY);

        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let hits = Raycaster::from_camera(Vec2::ZERO, &camera).intersect_objects(&scene, &[id], false);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 4.5).abs() < 1e-3, "distance {}", hits[0].distance);
    }

    #[test]
    fn test_staircase_subtree_hit() {
        let params = StaircaseParams::default();
        let mut scene = Scene::new();
        let root = scene.root();
        let staircase = create_staircase(&mut scene, root, &params);

        // Straight at the first step's riser
        let anchor = params.anchor();
        let raycaster = Raycaster::new(Ray::new(anchor + Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z));
        let hits = raycaster.intersect_subtree(&scene, staircase);
        let first = hits.first().expect("ray should hit the staircase");
        assert_eq!(scene.node(first.node).name, "step-0");
        assert!((first.distance - (10.0 - params.step_depth / 2.0)).abs() < 1e-4);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    }
}
