/// Per-mesh bounds and draw ranges.

use super::aabb::AABB;

/// Index of a mesh in the `MeshTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

/// Local-space bounds of a mesh and the index range that draws it.
///
/// Immutable once registered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshBounds {
    /// Bounding box in mesh-local space
    pub aabb: AABB,
    /// Number of indices to draw
    pub index_count: u32,
    /// First index in the shared index buffer
    pub first_index: u32,
    /// Value added to each index before fetching the vertex
    pub vertex_offset: i32,
}

/// Append-only table of mesh bounds, addressed by `MeshId`.
#[derive(Debug, Default)]
pub struct MeshTable {
    meshes: Vec<MeshBounds>,
}

impl MeshTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh and return its id.
    pub fn register(&mut self, bounds: MeshBounds) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(bounds);
        id
    }

    pub fn get(&self, id: MeshId) -> Option<&MeshBounds> {
        self.meshes.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
#[path = "mesh_table_tests.rs"]
mod tests;
