//! Scene-side inputs of the culling pass.
//!
//! Bounds math, entity transforms, the renderable object table and the
//! mesh bounds table. All of it is owned by the caller and only read
//! during culling.

mod aabb;
mod transform;
mod mesh_table;
mod object_table;

pub use aabb::AABB;
pub use transform::Transform;
pub use mesh_table::{MeshId, MeshBounds, MeshTable};
pub use object_table::{
    Entity, TransformStore, TransformTable, RenderableObject, ObjectTable,
};
