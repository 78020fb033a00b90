/// Shared fixtures for culling tests: scenes, a mock-backed system and
/// read-back helpers for the mock buffers.

use std::collections::BTreeSet;
use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::{Arc, Mutex};
use glam::{Mat4, Vec3, Vec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::camera::{Camera, Frustum};
use crate::graphics_device::mock_graphics_device::{buffer_id, MockGraphicsDevice};
use crate::graphics_device::{Buffer, GraphicsDevice};
use crate::scene::{
    MeshBounds, MeshId, MeshTable, ObjectTable, RenderableObject, Transform, TransformTable, AABB,
};
use super::{
    CullInput, CullingConfig, CullingMode, CullingSystem, DrawIndexedIndirectCommand,
    GpuCullHeader, GpuObjectDescriptor, OBJECT_DESCRIPTORS_OFFSET,
};

/// Fake SPIR-V accepted by the mock device
pub const FAKE_KERNEL: [u8; 16] = [0x03, 0x02, 0x23, 0x07, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0];

pub struct TestScene {
    pub camera: Camera,
    pub transforms: TransformTable,
    pub objects: ObjectTable,
    pub meshes: MeshTable,
}

impl TestScene {
    /// Camera at the origin looking down +Z, 90° vertical FOV, square aspect
    pub fn new() -> Self {
        let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::Z, Vec3::Y);
        let projection = Mat4::perspective_rh(FRAC_PI_2, 1.0, 0.1, 100.0);
        Self {
            camera: Camera::new(view, projection),
            transforms: TransformTable::new(),
            objects: ObjectTable::new(),
            meshes: MeshTable::new(),
        }
    }

    /// Register a cube mesh of the given half extent; index_count encodes the id
    pub fn add_cube_mesh(&mut self, half_extent: f32) -> MeshId {
        let id = self.meshes.len() as u32;
        self.meshes.register(MeshBounds {
            aabb: AABB::from_center_half_extent(Vec3::ZERO, Vec3::splat(half_extent)),
            index_count: 36 + id,
            first_index: id * 36,
            vertex_offset: id as i32 * 8,
        })
    }

    /// Add an object; its object_index is its insertion order
    pub fn add_object(&mut self, transform: Transform, mesh: MeshId) -> u32 {
        let object_index = self.objects.len() as u32;
        let entity = self.transforms.spawn(transform);
        self.objects
            .insert(RenderableObject { entity, mesh, object_index })
            .unwrap();
        object_index
    }

    /// `count` objects scattered around the camera with random rotation and scale
    pub fn random(seed: u64, count: usize) -> Self {
        let mut scene = Self::new();
        let meshes = [
            scene.add_cube_mesh(0.5),
            scene.add_cube_mesh(1.0),
            scene.add_cube_mesh(4.0),
        ];
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..count {
            let position = Vec3::new(
                rng.gen_range(-120.0..120.0),
                rng.gen_range(-120.0..120.0),
                rng.gen_range(-120.0..120.0),
            );
            let rotation = Vec3::new(
                rng.gen_range(-PI..PI),
                rng.gen_range(-PI..PI),
                rng.gen_range(-PI..PI),
            );
            let scale = Vec3::new(
                rng.gen_range(0.25..3.0),
                rng.gen_range(0.25..3.0),
                rng.gen_range(0.25..3.0),
            );
            let mesh = meshes[rng.gen_range(0..meshes.len())];
            scene.add_object(Transform::new(position, rotation, scale), mesh);
        }

        scene
    }

    pub fn input(&self) -> CullInput<'_> {
        CullInput {
            camera: &self.camera,
            objects: &self.objects,
            transforms: &self.transforms,
            meshes: &self.meshes,
        }
    }
}

/// A culling system on a fresh mock device
pub fn mock_system(config: CullingConfig) -> (Arc<Mutex<MockGraphicsDevice>>, CullingSystem) {
    let mock = Arc::new(Mutex::new(MockGraphicsDevice::new()));
    let device: Arc<Mutex<dyn GraphicsDevice>> = mock.clone();
    let system = CullingSystem::new(device, config).unwrap();
    (mock, system)
}

/// Config for a mode, with the fake kernel in GPU mode
pub fn config_for(mode: CullingMode) -> CullingConfig {
    let mut config = CullingConfig::with_mode(mode);
    if mode == CullingMode::GpuCompute {
        config.kernel_spirv = Some(Arc::from(FAKE_KERNEL.to_vec()));
    }
    config
}

fn contents(mock: &Arc<Mutex<MockGraphicsDevice>>, buffer: &dyn Buffer) -> Vec<u8> {
    mock.lock()
        .unwrap()
        .buffer_by_id(buffer_id(buffer))
        .expect("buffer was not created by this mock")
        .contents()
}

/// One emitted draw: its command and the object index beside it
pub type Draw = (DrawIndexedIndirectCommand, u32);

/// Decode the draws a CPU strategy wrote into its output buffers
pub fn read_cpu_draws(
    mock: &Arc<Mutex<MockGraphicsDevice>>,
    indirect: &dyn Buffer,
    per_draw: &dyn Buffer,
) -> Vec<Draw> {
    let indirect = contents(mock, indirect);
    let per_draw = contents(mock, per_draw);
    let count = u32::from_le_bytes([indirect[0], indirect[1], indirect[2], indirect[3]]) as usize;

    (0..count)
        .map(|i| {
            let start = 4 + i * 20;
            let command: DrawIndexedIndirectCommand =
                bytemuck::pod_read_unaligned(&indirect[start..start + 20]);
            let index = u32::from_le_bytes([
                per_draw[i * 4], per_draw[i * 4 + 1], per_draw[i * 4 + 2], per_draw[i * 4 + 3],
            ]);
            (command, index)
        })
        .collect()
}

/// Run the compaction kernel in software on what was uploaded to a slot.
///
/// Mirrors `frustum_cull.comp`: bounds from the uploaded rotation columns,
/// the 8-corner plane test, then an append in invocation order.
pub fn run_kernel_model(mock: &Arc<Mutex<MockGraphicsDevice>>, slot: usize) -> Vec<Draw> {
    let input = mock.lock()
        .unwrap()
        .last_buffer_named(&format!("cull_input_{}", slot))
        .expect("no kernel input buffer")
        .contents();

    let header_size = OBJECT_DESCRIPTORS_OFFSET as usize;
    let header: GpuCullHeader = bytemuck::pod_read_unaligned(&input[..header_size]);
    let frustum = Frustum { planes: header.planes.map(Vec4::from_array) };
    let stride = std::mem::size_of::<GpuObjectDescriptor>();

    let mut draws = Vec::new();
    for id in 0..header.object_count as usize {
        let start = header_size + id * stride;
        let obj: GpuObjectDescriptor = bytemuck::pod_read_unaligned(&input[start..start + stride]);

        let mut world_min = Vec3::new(obj.position[0], obj.position[1], obj.position[2]);
        let mut world_max = world_min;
        for i in 0..3 {
            for j in 0..3 {
                let r = obj.rotation[j][i];
                let a = r * obj.aabb_min[j] * obj.scale[i].abs();
                let b = r * obj.aabb_max[j] * obj.scale[i].abs();
                world_min[i] += a.min(b);
                world_max[i] += a.max(b);
            }
        }

        if frustum.intersects_aabb(&AABB::new(world_min, world_max)) {
            draws.push((obj.command, obj.object_index));
        }
    }
    draws
}

/// Object indices of a draw list, as a set
pub fn index_set(draws: &[Draw]) -> BTreeSet<u32> {
    draws.iter().map(|(_, index)| *index).collect()
}
