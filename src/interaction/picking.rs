use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::math::{intersect_triangle, Ray};
use crate::scene::{NodeId, NodeKind, Scene};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

/// Hit-tests scene meshes along a world-space ray
#[derive(Debug, Clone, Copy)]
pub struct Raycaster {
    pub ray: Ray,
}

impl Raycaster {
    pub fn new(ray: Ray) -> Self {
        Self { ray }
    }

    /// Picking ray through `ndc` (x right, y up, both in -1..1)
    pub fn from_camera(ndc: Vec2, camera: &Camera) -> Self {
        Self::new(camera.ray_from_ndc(ndc))
    }

    /// Nearest hit on a single mesh node, ignoring its children
    pub fn intersect_node(&self, scene: &Scene, id: NodeId) -> Option<Intersection> {
        let node = scene.node(id);
        let NodeKind::Mesh { mesh, .. } = &node.kind else {
            return None;
        };
        let mesh = scene.mesh(*mesh);
        let world = scene.world_matrix(id);

        // Cheap reject against the world-space box first
        let bounds = mesh.bounds()?.transformed(&world);
        self.ray.intersect_aabb(&bounds)?;

        // Test in local space; the un-normalized local direction keeps `t` in world units
        let inverse = world.inverse();
        let origin = inverse.transform_point3(self.ray.origin);
        let direction = inverse.transform_vector3(self.ray.direction);

        let distance = mesh
            .triangles()
            .filter_map(|[a, b, c]| intersect_triangle(origin, direction, a, b, c))
            .min_by(f32::total_cmp)?;

        Some(Intersection {
            node: id,
            distance,
            point: self.ray.at(distance),
        })
    }

    /// Hits on `ids` (and their subtrees when `recursive`), nearest first.
    /// Hidden nodes are skipped.
    pub fn intersect_objects(&self, scene: &Scene, ids: &[NodeId], recursive: bool) -> Vec<Intersection> {
        let mut candidates: Vec<NodeId> = ids.to_vec();
        if recursive {
            for id in ids {
                candidates.extend(scene.descendants(*id));
            }
        }

        let mut hits: Vec<Intersection> = candidates
            .into_iter()
            .filter(|id| scene.is_visible(*id))
            .filter_map(|id| self.intersect_node(scene, id))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Hits anywhere below `root`, nearest first
    pub fn intersect_subtree(&self, scene: &Scene, root: NodeId) -> Vec<Intersection> {
        self.intersect_objects(scene, scene.node(root).children(), true)
    }
}
