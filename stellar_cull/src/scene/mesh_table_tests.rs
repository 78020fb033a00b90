use glam::Vec3;
use super::*;

fn bounds(index_count: u32) -> MeshBounds {
    MeshBounds {
        aabb: AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0)),
        index_count,
        first_index: 0,
        vertex_offset: 0,
    }
}

#[test]
fn test_register_assigns_sequential_ids() {
    let mut table = MeshTable::new();

    assert_eq!(table.register(bounds(36)), MeshId(0));
    assert_eq!(table.register(bounds(6)), MeshId(1));
    assert_eq!(table.len(), 2);
}

#[test]
fn test_get_returns_registered_bounds() {
    let mut table = MeshTable::new();
    let id = table.register(bounds(36));

    assert_eq!(table.get(id).unwrap().index_count, 36);
}

#[test]
fn test_unknown_mesh_id() {
    let table = MeshTable::new();

    assert!(table.is_empty());
    assert!(table.get(MeshId(7)).is_none());
}
