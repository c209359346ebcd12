use glam::Vec3;

use crate::math::{Ray, AABB};
use crate::scene::NodeId;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    node: NodeId,
    plane_point: Vec3,
    plane_normal: Vec3,
    /// Node position minus the grabbed point
    offset: Vec3,
}

/// Drags a node across a camera-facing plane, clamped to a box
#[derive(Debug, Clone, PartialEq)]
pub struct LampDrag {
    pub bounds: AABB,
    active: Option<ActiveDrag>,
}

impl LampDrag {
    pub fn new(bounds: AABB) -> Self {
        Self { bounds, active: None }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn dragged(&self) -> Option<NodeId> {
        self.active.map(|a| a.node)
    }

    /// Grabs `node` at `hit_point` on a plane facing `view_forward`
    pub fn begin(&mut self, node: NodeId, node_position: Vec3, hit_point: Vec3, view_forward: Vec3) {
        self.active = Some(ActiveDrag {
            node,
            plane_point: hit_point,
            plane_normal: view_forward.normalize_or_zero(),
            offset: node_position - hit_point,
        });
        log::debug!("drag start on {:?}", node);
    }

    /// New clamped position for the dragged node, or `None` when idle or the
    /// ray misses the drag plane
    pub fn drag_to(&self, ray: &Ray) -> Option<(NodeId, Vec3)> {
        let active = self.active?;
        let t = ray.intersect_plane(active.plane_point, active.plane_normal)?;
        let position = self.bounds.clamp_point(ray.at(t) + active.offset);
        Some((active.node, position))
    }

    pub fn end(&mut self) -> Option<NodeId> {
        let node = self.active.take().map(|a| a.node);
        if let Some(node) = node {
            log::debug!("drag end on {:?}", node);
        }
        node
    }
}
