//! Scene graph: an arena of nodes with parent links and a shared mesh table

mod light;
mod material;
mod transform;

pub use light::{Fog, Light};
pub use material::{Material, TextureRef, Wave};
pub use transform::Transform;

use glam::{Mat4, Vec3};

use crate::geometry::MeshData;
use crate::math::AABB;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl MeshId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Group,
    Mesh { mesh: MeshId, material: Material },
    Light(Light),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A mesh node flattened to world space, ready for drawing
#[derive(Debug, Clone, Copy)]
pub struct RenderItem<'a> {
    pub node: NodeId,
    pub mesh: MeshId,
    pub material: &'a Material,
    pub world: Mat4,
}

#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Node>,
    meshes: Vec<MeshData>,
    pub background: [f32; 3],
    pub fog: Option<Fog>,
}

impl Scene {
    /// Empty scene holding only the root group
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: "root".to_string(),
                transform: Transform::IDENTITY,
                visible: true,
                kind: NodeKind::Group,
                parent: None,
                children: Vec::new(),
            }],
            meshes: Vec::new(),
            background: [0.0, 0.0, 0.0],
            fog: None,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn mesh(&self, id: MeshId) -> &MeshData {
        &self.meshes[id.0]
    }

    pub fn meshes(&self) -> &[MeshData] {
        &self.meshes
    }

    pub fn add_node(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Transform,
        kind: NodeKind,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.into(),
            transform,
            visible: true,
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn add_group(&mut self, parent: NodeId, name: impl Into<String>, transform: Transform) -> NodeId {
        self.add_node(parent, name, transform, NodeKind::Group)
    }

    pub fn add_mesh_node(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        mesh: MeshId,
        material: Material,
        transform: Transform,
    ) -> NodeId {
        self.add_node(parent, name, transform, NodeKind::Mesh { mesh, material })
    }

    pub fn add_light(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        light: Light,
        transform: Transform,
    ) -> NodeId {
        self.add_node(parent, name, transform, NodeKind::Light(light))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].transform
    }

    /// First node with the given name, in insertion order
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// True when `node` is `ancestor` or lies below it
    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    /// Walks parents and composes local transforms
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = self.nodes[id.0].transform.matrix();
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            let node = &self.nodes[parent.0];
            matrix = node.transform.matrix() * matrix;
            current = node.parent;
        }
        matrix
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    /// Moves a node so that its world position becomes `position`
    pub fn set_world_position(&mut self, id: NodeId, position: Vec3) {
        let parent_inverse = match self.nodes[id.0].parent {
            Some(parent) => self.world_matrix(parent).inverse(),
            None => Mat4::IDENTITY,
        };
        self.nodes[id.0].transform.translation = parent_inverse.transform_point3(position);
    }

    /// Depth-first subtree below `id`, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id.0].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next.0].children.iter().rev().copied());
        }
        out
    }

    /// Union of world-space mesh bounds under `id`, including `id` itself
    pub fn world_bounds(&self, id: NodeId) -> Option<AABB> {
        std::iter::once(id)
            .chain(self.descendants(id))
            .filter_map(|n| match &self.nodes[n.0].kind {
                NodeKind::Mesh { mesh, .. } => self.meshes[mesh.0]
                    .bounds()
                    .map(|b| b.transformed(&self.world_matrix(n))),
                _ => None,
            })
            .reduce(|a, b| a.union(&b))
    }

    /// False when the node or any ancestor is hidden
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(n) = current {
            let node = &self.nodes[n.0];
            if !node.visible {
                return false;
            }
            current = node.parent;
        }
        true
    }

    /// Every visible mesh node with its world matrix
    pub fn renderables(&self) -> Vec<RenderItem<'_>> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| match &node.kind {
                NodeKind::Mesh { mesh, material } if self.is_visible(NodeId(i)) => Some(RenderItem {
                    node: NodeId(i),
                    mesh: *mesh,
                    material,
                    world: self.world_matrix(NodeId(i)),
                }),
                _ => None,
            })
            .collect()
    }

    /// Every visible light with its world position
    pub fn lights(&self) -> Vec<(Light, Vec3)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| match node.kind {
                NodeKind::Light(light) if self.is_visible(NodeId(i)) => {
                    Some((light, self.world_position(NodeId(i))))
                }
                _ => None,
            })
            .collect()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
