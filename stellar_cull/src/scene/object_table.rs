/// Renderable object table and the transform store it references.
///
/// An object does not own its transform: it holds the entity key and the
/// transform is resolved through a `TransformStore` at culling time, so the
/// entity store stays the single source of truth.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::engine_bail;
use super::mesh_table::MeshId;
use super::transform::Transform;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable handle of an entity in the transform store.
    ///
    /// Keys remain valid after other entities are despawned.
    pub struct Entity;
}

// ===== TRANSFORM STORE =====

/// Read access to entity transforms.
///
/// Implemented by the caller's entity-component store. Must be `Sync`: the
/// parallel CPU strategy resolves transforms from worker threads.
pub trait TransformStore: Send + Sync {
    /// Current transform of an entity, or None if it has none.
    fn transform(&self, entity: Entity) -> Option<Transform>;
}

/// Minimal slot-map backed transform store.
#[derive(Debug, Default)]
pub struct TransformTable {
    transforms: SlotMap<Entity, Transform>,
}

impl TransformTable {
    pub fn new() -> Self {
        Self { transforms: SlotMap::with_key() }
    }

    /// Create an entity with the given transform.
    pub fn spawn(&mut self, transform: Transform) -> Entity {
        self.transforms.insert(transform)
    }

    /// Remove an entity. Returns its last transform.
    pub fn despawn(&mut self, entity: Entity) -> Option<Transform> {
        self.transforms.remove(entity)
    }

    /// Replace an entity's transform. Returns false if the entity is unknown.
    pub fn set_transform(&mut self, entity: Entity, transform: Transform) -> bool {
        if let Some(slot) = self.transforms.get_mut(entity) {
            *slot = transform;
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl TransformStore for TransformTable {
    fn transform(&self, entity: Entity) -> Option<Transform> {
        self.transforms.get(entity).copied()
    }
}

// ===== RENDERABLE OBJECT =====

/// Binding of an entity to a mesh, with the index reported back per draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderableObject {
    /// Entity whose transform places the object
    pub entity: Entity,
    /// Mesh drawn for this object
    pub mesh: MeshId,
    /// Stable index written to the per-draw buffer for each surviving draw
    pub object_index: u32,
}

// ===== OBJECT TABLE =====

/// Live set of renderable objects.
///
/// Objects are stored contiguously; the storage order is the iteration order
/// every culling strategy sees. Removal swaps the last object into the freed
/// position.
#[derive(Debug, Default)]
pub struct ObjectTable {
    objects: Vec<RenderableObject>,
    /// Entity → position in `objects`
    positions: FxHashMap<Entity, usize>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make an entity renderable.
    ///
    /// Fails if the entity already has a renderable object.
    pub fn insert(&mut self, object: RenderableObject) -> Result<()> {
        if self.positions.contains_key(&object.entity) {
            engine_bail!("stellar::Culling",
                "Entity {:?} is already renderable", object.entity);
        }
        self.positions.insert(object.entity, self.objects.len());
        self.objects.push(object);
        Ok(())
    }

    /// Stop rendering an entity. Returns the removed object, if any.
    pub fn remove(&mut self, entity: Entity) -> Option<RenderableObject> {
        let position = self.positions.remove(&entity)?;
        let removed = self.objects.swap_remove(position);
        if let Some(moved) = self.objects.get(position) {
            self.positions.insert(moved.entity, position);
        }
        Some(removed)
    }

    pub fn get(&self, entity: Entity) -> Option<&RenderableObject> {
        self.positions.get(&entity).map(|&position| &self.objects[position])
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.positions.contains_key(&entity)
    }

    /// All objects in iteration order.
    pub fn as_slice(&self) -> &[RenderableObject] {
        &self.objects
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderableObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.positions.clear();
    }
}

#[cfg(test)]
#[path = "object_table_tests.rs"]
mod tests;
