//! Procedural triangle meshes

mod mesh;
mod primitives;
mod tube;

pub use mesh::{MeshData, Vertex};
pub use primitives::{box_mesh, cylinder_mesh, plane_mesh, sphere_mesh};
pub use tube::{tube_mesh, FrenetFrames};
