use glam::{Vec2, Vec3};
use std::f32::consts::PI;
use stair_gallery::config::GalleryConfig;
use stair_gallery::core::FrameInfo;
use stair_gallery::gallery::{ClickBehaviour, Gallery};
use stair_gallery::interaction::{cursor_to_ndc, Button, ClickRotate, LampDrag, SpinToggle, WinitController};
use stair_gallery::math::{Ray, AABB};
use stair_gallery::scene::Scene;
use stair_gallery::scenes::Variant;

#[cfg(test)]
mod interaction_tests {
    use super::*;

    fn gallery(variant: Variant) -> Gallery {
        let config = GalleryConfig {
            variant,
            ..GalleryConfig::default()
        };
        Gallery::new(&config, 4.0 / 3.0)
    }

    fn ndc_of(g: &Gallery, world: Vec3) -> Vec2 {
        g.camera.view_proj().project_point3(world).truncate()
    }

    #[test]
    fn test_click_rotate_stops_at_half_turn() {
        let mut rotate = ClickRotate::default();
        for i in 0..3 {
            assert!(rotate.try_rotate().is_some(), "click {} should rotate", i);
        }
        assert!((rotate.angle() + PI).abs() < 1e-5, "three clicks reach -PI, got {}", rotate.angle());
        assert!(rotate.try_rotate().is_none(), "fourth click would exceed the limit");

        for _ in 0..10 {
            rotate.try_rotate();
            assert!(rotate.angle().abs() <= PI + 1e-5);
        }
    }

    #[test]
    fn test_click_rotate_reset_undoes_total() {
        let mut rotate = ClickRotate::default();
        rotate.try_rotate();
        rotate.try_rotate();
        let undo = rotate.reset();
        assert!((undo - 2.0 * PI / 3.0).abs() < 1e-5);
        assert_eq!(rotate.angle(), 0.0);
    }

    #[test]
    fn test_spin_only_moves_while_on() {
        let mut spin = SpinToggle::new(2.0);
        assert_eq!(spin.step(0.5), 0.0);
        assert!(spin.toggle());
        assert!((spin.step(0.5) - 1.0).abs() < 1e-6);
        assert!(!spin.toggle());
        assert_eq!(spin.step(0.5), 0.0);
        assert!((spin.angle() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_drag_keeps_grab_offset() {
        let mut drag = LampDrag::new(AABB::new(Vec3::splat(-100.0), Vec3::splat(100.0)));
        assert!(drag.drag_to(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).is_none(), "idle drag does nothing");

        let node = Scene::new().root();
        drag.begin(node, Vec3::ZERO, Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Z);
        let (dragged, position) = drag
            .drag_to(&Ray::new(Vec3::new(2.0, 3.0, 5.0), Vec3::NEG_Z))
            .expect("ray meets the drag plane");
        assert_eq!(dragged, node);
        assert!(position.abs_diff_eq(Vec3::new(2.0, 2.5, 0.0), 1e-5), "position {:?}", position);

        assert_eq!(drag.end(), Some(node));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drag_result_is_clamped() {
        let bounds = AABB::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0));
        let mut drag = LampDrag::new(bounds);
        drag.begin(Scene::new().root(), Vec3::ZERO, Vec3::ZERO, Vec3::NEG_Z);

        for origin in [Vec3::new(50.0, 0.0, 5.0), Vec3::new(-20.0, 30.0, 5.0), Vec3::new(0.5, -9.0, 5.0)] {
            let (_, position) = drag.drag_to(&Ray::new(origin, Vec3::NEG_Z)).unwrap();
            assert!(bounds.contains(position), "{:?} escaped the clamp box", position);
        }
    }

    #[test]
    fn test_cursor_to_ndc_corners() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(cursor_to_ndc(Vec2::new(400.0, 300.0), size), Vec2::ZERO);
        assert_eq!(cursor_to_ndc(Vec2::ZERO, size), Vec2::new(-1.0, 1.0));
        assert_eq!(cursor_to_ndc(size, size), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_classic_click_rotates_staircase() {
        let mut g = gallery(Variant::Classic);
        g.camera.position = Vec3::new(-9.5, 5.0, 15.0);
        let staircase = g.staircase();
        let step = g.scene.find("step-10").unwrap();
        let ndc = ndc_of(&g, g.scene.world_position(step));

        assert!(!g.pointer_down(ndc), "no lamps to grab in the classic layout");
        g.pointer_up(ndc);

        let angle = g.click_behaviour().angle();
        assert!((angle + PI / 3.0).abs() < 1e-5, "one click turns -60 degrees, got {}", angle);
        let rotation = g.scene.node(staircase).transform.rotation;
        assert!(!rotation.abs_diff_eq(glam::Quat::IDENTITY, 1e-3), "staircase transform should be rotated");
    }

    #[test]
    fn test_gallery_click_toggles_spin() {
        let mut g = gallery(Variant::Gallery);
        g.camera.position = Vec3::new(-12.0, 5.0, 20.0);
        let step = g.scene.find("step-5").unwrap();
        let ndc = ndc_of(&g, g.scene.world_position(step));

        assert!(g.click(ndc), "ray through a step should hit the staircase");
        assert!(matches!(g.click_behaviour(), ClickBehaviour::Spin(s) if s.is_rotating()));

        let controller = WinitController::new();
        g.update(FrameInfo::new(1, 1.0, 0.5), &controller);
        let expected = GalleryConfig::default().spin_speed * 0.5;
        assert!((g.click_behaviour().angle() - expected).abs() < 1e-5);

        g.key_pressed(Button::KeyR);
        assert_eq!(g.click_behaviour().angle(), 0.0);
        let rotation = g.scene.node(g.staircase()).transform.rotation;
        assert!(rotation.abs_diff_eq(glam::Quat::IDENTITY, 1e-5), "reset should undo the spin: {:?}", rotation);
    }

    #[test]
    fn test_lamp_drag_moves_lamp() {
        let mut g = gallery(Variant::Gallery);
        let lamp = g.scene.find("lamp-3").unwrap();
        let base = g.scene.world_position(lamp);
        let bulb = g.scene.find("lamp-3-bulb").unwrap();
        let ndc = ndc_of(&g, g.scene.world_position(bulb));

        assert!(g.pointer_down(ndc), "pointer over the bulb should grab the lamp");
        assert!(g.is_dragging());

        let target = g.scene.world_position(bulb) + Vec3::new(3.0, 0.0, 0.0);
        g.pointer_move(ndc_of(&g, target));
        let moved = g.scene.world_position(lamp);
        assert!((moved.x - (base.x + 3.0)).abs() < 0.1, "lamp x {} after drag", moved.x);
        assert!((moved.y - base.y).abs() < 0.1, "lamp y {} after drag", moved.y);

        g.pointer_up(ndc);
        assert!(!g.is_dragging());
        assert_eq!(g.click_behaviour().angle(), 0.0, "ending a drag is not a click");
    }

    #[test]
    fn test_cancel_drag_leaves_lamp_in_place() {
        let mut g = gallery(Variant::Gallery);
        let lamp = g.scene.find("lamp-3").unwrap();
        let bulb = g.scene.find("lamp-3-bulb").unwrap();
        let ndc = ndc_of(&g, g.scene.world_position(bulb));
        assert!(g.pointer_down(ndc));

        g.cancel_drag();
        assert!(!g.is_dragging(), "losing focus ends the drag");

        let resting = g.scene.world_position(lamp);
        let elsewhere = g.scene.world_position(bulb) + Vec3::new(3.0, 0.0, 0.0);
        g.pointer_move(ndc_of(&g, elsewhere));
        assert!(g.scene.world_position(lamp).abs_diff_eq(resting, 1e-6), "lamp must stop following the cursor");
    }

    #[test]
    fn test_cancel_drag_drops_pending_click() {
        let mut g = gallery(Variant::Classic);
        g.camera.position = Vec3::new(-9.5, 5.0, 15.0);
        let step = g.scene.find("step-10").unwrap();
        let ndc = ndc_of(&g, g.scene.world_position(step));

        assert!(!g.pointer_down(ndc));
        g.cancel_drag();
        g.pointer_up(ndc);
        assert_eq!(g.click_behaviour().angle(), 0.0, "a press cut off by focus loss is not a click");
    }

    #[test]
    fn test_held_keys_move_camera() {
        let mut g = gallery(Variant::Classic);
        let start = g.camera.position;
        let mut controller = WinitController::new();
        controller.press(Button::KeyW);
        g.update(FrameInfo::new(1, 0.016, 0.016), &controller);
        assert!(g.camera.position.z < start.z, "W moves the camera forward (-z)");
    }
}
