/// VulkanGraphicsDevice - Vulkan implementation of GraphicsDevice trait
///
/// Headless: no surface or swapchain. Needs Vulkan 1.2 with the
/// `drawIndirectCount` feature and a queue family supporting both graphics
/// and compute.

use stellar_cull::stellar::{Result, Error};
use stellar_cull::stellar::device::{
    GraphicsDevice,
    CommandList as DeviceCommandList, Buffer as DeviceBuffer,
    Shader as DeviceShader, Pipeline as DevicePipeline,
    BindingGroup as DeviceBindingGroup,
    BufferDesc, ShaderDesc, ComputePipelineDesc,
    BindingResource, BindingType,
};
use stellar_cull::{engine_debug, engine_info, engine_warn, engine_error, engine_bail, engine_err};
use ash::vk;
use gpu_allocator::vulkan::{AllocationCreateDesc, AllocationScheme, Allocator, AllocatorCreateDesc};
use std::ffi::CString;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::vulkan_binding_group::BindingGroup;
use crate::vulkan_buffer::{buffer_usage_to_vk, memory_location_to_gpu_allocator, Buffer};
use crate::vulkan_command_list::CommandList;
use crate::vulkan_context::GpuContext;
use crate::vulkan_pipeline::{validate_bindings, Pipeline};
use crate::vulkan_shader::{ReflectedBinding, Shader};

const SOURCE: &str = "stellar::vulkan";

/// Number of submissions that may be in flight before `submit` waits
const MAX_SUBMITS_IN_FLIGHT: usize = 2;

/// Device creation settings
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Enable VK_LAYER_KHRONOS_validation (requires the `vulkan-validation` feature)
    pub enable_validation: bool,
    /// Application name reported to the driver
    pub app_name: String,
    /// Application version (`vk::make_api_version`)
    pub app_version: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            enable_validation: cfg!(debug_assertions),
            app_name: "Stellar Cull".to_string(),
            app_version: vk::make_api_version(0, 0, 1, 0),
        }
    }
}

/// Vulkan device implementation
///
/// Central object for creating culling resources and submitting commands.
pub struct VulkanGraphicsDevice {
    /// Physical device the logical device was created on
    physical_device: vk::PhysicalDevice,
    /// Fences for submit synchronization
    submit_fences: Vec<vk::Fence>,
    current_submit_fence: AtomicUsize,
    /// Shared GPU context for all resources
    ctx: Arc<GpuContext>,
}

impl VulkanGraphicsDevice {
    /// Create a headless Vulkan device
    pub fn new(config: DeviceConfig) -> Result<Self> {
        unsafe {
            let entry = ash::Entry::load()
                .map_err(|e| {
                    engine_error!(SOURCE, "Failed to load Vulkan library: {:?}", e);
                    Error::InitializationFailed(format!("Failed to load Vulkan library: {:?}", e))
                })?;

            let app_name = CString::new(config.app_name.clone())
                .map_err(|_| Error::InitializationFailed("Application name contains a NUL byte".to_string()))?;

            let app_info = vk::ApplicationInfo::default()
                .application_name(&app_name)
                .application_version(config.app_version)
                .engine_name(c"Stellar")
                .engine_version(vk::make_api_version(0, 0, 1, 0))
                .api_version(vk::API_VERSION_1_2);

            let enable_validation = Self::validation_requested(&config);

            #[allow(unused_mut)]
            let mut extension_names: Vec<*const std::os::raw::c_char> = Vec::new();
            #[allow(unused_mut)]
            let mut layer_names: Vec<*const std::os::raw::c_char> = Vec::new();
            #[cfg(feature = "vulkan-validation")]
            if enable_validation {
                extension_names.push(ash::ext::debug_utils::NAME.as_ptr());
                layer_names.push(c"VK_LAYER_KHRONOS_validation".as_ptr());
            }

            let create_info = vk::InstanceCreateInfo::default()
                .application_info(&app_info)
                .enabled_layer_names(&layer_names)
                .enabled_extension_names(&extension_names);

            let instance = entry
                .create_instance(&create_info, None)
                .map_err(|e| {
                    engine_error!(SOURCE, "Failed to create Vulkan instance: {:?}", e);
                    Error::InitializationFailed(format!("Failed to create instance: {:?}", e))
                })?;

            let (debug_utils_loader, debug_messenger) =
                Self::create_debug_messenger(&entry, &instance, enable_validation)?;

            let (physical_device, queue_family) = Self::pick_physical_device(&instance)?;

            // Logical device with drawIndirectCount enabled
            let queue_priorities = [1.0];
            let queue_create_infos = [vk::DeviceQueueCreateInfo::default()
                .queue_family_index(queue_family)
                .queue_priorities(&queue_priorities)];

            let mut vulkan12_features = vk::PhysicalDeviceVulkan12Features::default()
                .draw_indirect_count(true);

            let device_create_info = vk::DeviceCreateInfo::default()
                .queue_create_infos(&queue_create_infos)
                .push_next(&mut vulkan12_features);

            let device = instance
                .create_device(physical_device, &device_create_info, None)
                .map_err(|e| {
                    engine_error!(SOURCE, "Failed to create logical device: {:?}", e);
                    Error::InitializationFailed(format!("Failed to create device: {:?}", e))
                })?;

            let queue = device.get_device_queue(queue_family, 0);

            let allocator = Allocator::new(&AllocatorCreateDesc {
                instance: instance.clone(),
                device: device.clone(),
                physical_device,
                debug_settings: Default::default(),
                buffer_device_address: false,
                allocation_sizes: Default::default(),
            })
            .map_err(|e| {
                engine_error!(SOURCE, "Failed to create GPU allocator: {:?}", e);
                Error::InitializationFailed(format!("Failed to create allocator: {:?}", e))
            })?;

            let fence_create_info = vk::FenceCreateInfo::default()
                .flags(vk::FenceCreateFlags::SIGNALED);
            let mut submit_fences = Vec::with_capacity(MAX_SUBMITS_IN_FLIGHT);
            for _ in 0..MAX_SUBMITS_IN_FLIGHT {
                submit_fences.push(
                    device.create_fence(&fence_create_info, None)
                        .map_err(|e| {
                            engine_error!(SOURCE, "Failed to create submit fence: {:?}", e);
                            Error::InitializationFailed(format!("Failed to create fence: {:?}", e))
                        })?
                );
            }

            let descriptor_pool = Self::create_descriptor_pool(&device)?;

            let ctx = Arc::new(GpuContext::new(
                device,
                allocator,
                queue,
                queue_family,
                descriptor_pool,
                instance,
                entry,
                debug_utils_loader,
                debug_messenger,
            ));

            engine_info!(SOURCE, "Vulkan device created (queue family {}, validation {})",
                queue_family, enable_validation);

            Ok(Self {
                physical_device,
                submit_fences,
                current_submit_fence: AtomicUsize::new(0),
                ctx,
            })
        }
    }

    /// Physical device in use
    pub fn physical_device(&self) -> vk::PhysicalDevice {
        self.physical_device
    }

    fn validation_requested(config: &DeviceConfig) -> bool {
        if config.enable_validation && !cfg!(feature = "vulkan-validation") {
            engine_warn!(SOURCE,
                "Validation requested but the `vulkan-validation` feature is disabled");
            return false;
        }
        config.enable_validation
    }

    #[cfg(feature = "vulkan-validation")]
    unsafe fn create_debug_messenger(
        entry: &ash::Entry,
        instance: &ash::Instance,
        enable_validation: bool,
    ) -> Result<(Option<ash::ext::debug_utils::Instance>, Option<vk::DebugUtilsMessengerEXT>)> {
        if !enable_validation {
            return Ok((None, None));
        }

        let debug_utils = ash::ext::debug_utils::Instance::new(entry, instance);
        crate::debug::init_debug_config();

        let debug_info = vk::DebugUtilsMessengerCreateInfoEXT::default()
            .message_severity(
                vk::DebugUtilsMessageSeverityFlagsEXT::ERROR
                    | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                    | vk::DebugUtilsMessageSeverityFlagsEXT::INFO
            )
            .message_type(
                vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                    | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                    | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE
            )
            .pfn_user_callback(Some(crate::debug::vulkan_debug_callback));

        let messenger = debug_utils
            .create_debug_utils_messenger(&debug_info, None)
            .map_err(|e| {
                engine_error!(SOURCE, "Failed to create debug messenger: {:?}", e);
                Error::InitializationFailed(format!("Failed to create debug messenger: {:?}", e))
            })?;

        Ok((Some(debug_utils), Some(messenger)))
    }

    #[cfg(not(feature = "vulkan-validation"))]
    unsafe fn create_debug_messenger(
        _entry: &ash::Entry,
        _instance: &ash::Instance,
        _enable_validation: bool,
    ) -> Result<(Option<ash::ext::debug_utils::Instance>, Option<vk::DebugUtilsMessengerEXT>)> {
        Ok((None, None))
    }

    /// First Vulkan 1.2 device with drawIndirectCount and a graphics+compute queue
    unsafe fn pick_physical_device(instance: &ash::Instance) -> Result<(vk::PhysicalDevice, u32)> {
        let physical_devices = instance
            .enumerate_physical_devices()
            .map_err(|e| {
                engine_error!(SOURCE, "Failed to enumerate physical devices: {:?}", e);
                Error::InitializationFailed(format!("Failed to enumerate physical devices: {:?}", e))
            })?;

        for physical_device in physical_devices {
            let properties = instance.get_physical_device_properties(physical_device);
            let name = properties
                .device_name_as_c_str()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            if properties.api_version < vk::API_VERSION_1_2 {
                engine_debug!(SOURCE, "Skipping '{}': Vulkan 1.2 not supported", name);
                continue;
            }

            let mut vulkan12_features = vk::PhysicalDeviceVulkan12Features::default();
            let mut features2 = vk::PhysicalDeviceFeatures2::default()
                .push_next(&mut vulkan12_features);
            instance.get_physical_device_features2(physical_device, &mut features2);
            if vulkan12_features.draw_indirect_count != vk::TRUE {
                engine_debug!(SOURCE, "Skipping '{}': drawIndirectCount not supported", name);
                continue;
            }

            let queue_family = instance
                .get_physical_device_queue_family_properties(physical_device)
                .iter()
                .position(|qf| qf.queue_flags.contains(vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE))
                .map(|i| i as u32);

            if let Some(queue_family) = queue_family {
                engine_info!(SOURCE, "Using GPU '{}'", name);
                return Ok((physical_device, queue_family));
            }
        }

        engine_error!(SOURCE, "No GPU with Vulkan 1.2 drawIndirectCount and a graphics+compute queue");
        Err(Error::InitializationFailed(
            "No Vulkan 1.2 GPU with drawIndirectCount found".to_string()
        ))
    }

    /// Create a descriptor pool with fixed capacity (256 sets).
    /// Called during init and when the current pool is exhausted.
    /// Sets are freed individually when their binding group drops.
    fn create_descriptor_pool(device: &ash::Device) -> Result<vk::DescriptorPool> {
        let pool_sizes = [
            vk::DescriptorPoolSize {
                ty: vk::DescriptorType::STORAGE_BUFFER,
                descriptor_count: 1024,
            },
        ];
        let info = vk::DescriptorPoolCreateInfo::default()
            .flags(vk::DescriptorPoolCreateFlags::FREE_DESCRIPTOR_SET)
            .pool_sizes(&pool_sizes)
            .max_sets(256);

        unsafe {
            device.create_descriptor_pool(&info, None)
                .map_err(|e| {
                    engine_error!(SOURCE, "Failed to create descriptor pool: {:?}", e);
                    Error::InitializationFailed(format!("Failed to create descriptor pool: {:?}", e))
                })
        }
    }

    /// Parse SPIR-V bytecode and extract its descriptor bindings using spirq
    fn reflect_bindings(code: &[u32]) -> Result<Vec<ReflectedBinding>> {
        let entry_points = spirq::ReflectConfig::new()
            .spv(code)
            .ref_all_rscs(true)
            .reflect()
            .map_err(|e| engine_err!(SOURCE, "SPIR-V reflection failed: {:?}", e))?;

        let mut bindings: Vec<ReflectedBinding> = Vec::new();
        for entry_point in &entry_points {
            for var in entry_point.vars.iter() {
                if let spirq::var::Variable::Descriptor { desc_bind, desc_ty, .. } = var {
                    let binding = ReflectedBinding {
                        set: desc_bind.set(),
                        binding: desc_bind.bind(),
                        binding_type: Self::spirq_desc_type_to_binding_type(desc_ty.clone())?,
                    };
                    if !bindings.contains(&binding) {
                        bindings.push(binding);
                    }
                }
            }
        }

        Ok(bindings)
    }

    /// Convert spirq descriptor type to BindingType
    fn spirq_desc_type_to_binding_type(desc_ty: spirq::ty::DescriptorType) -> Result<BindingType> {
        use spirq::ty::DescriptorType;
        match desc_ty {
            DescriptorType::StorageBuffer(..) => Ok(BindingType::StorageBuffer),
            other => {
                engine_bail!(SOURCE, "Unsupported SPIR-V descriptor type in compute kernel: {:?}", other);
            }
        }
    }

    /// Number of descriptor pools allocated so far
    pub fn descriptor_pool_count(&self) -> usize {
        self.ctx.descriptor_pools.lock().map(|pools| pools.len()).unwrap_or(0)
    }

    /// Allocate one descriptor set, growing the pool list when exhausted.
    /// Returns the set and the pool it came from.
    unsafe fn allocate_descriptor_set(
        &self,
        layout: vk::DescriptorSetLayout,
    ) -> Result<(vk::DescriptorPool, vk::DescriptorSet)> {
        let layouts = [layout];
        let mut pools = self.ctx.descriptor_pools.lock()
            .map_err(|_| engine_err!(SOURCE, "Descriptor pool mutex poisoned"))?;
        let current_pool = *pools.last()
            .ok_or_else(|| engine_err!(SOURCE, "No descriptor pool available"))?;

        let allocate_info = vk::DescriptorSetAllocateInfo::default()
            .descriptor_pool(current_pool)
            .set_layouts(&layouts);

        let (pool, sets) = match self.ctx.device.allocate_descriptor_sets(&allocate_info) {
            Ok(sets) => (current_pool, sets),
            Err(vk::Result::ERROR_OUT_OF_POOL_MEMORY) | Err(vk::Result::ERROR_FRAGMENTED_POOL) => {
                let new_pool = Self::create_descriptor_pool(&self.ctx.device)?;
                pools.push(new_pool);
                engine_info!(SOURCE,
                    "Descriptor pool exhausted, created new pool (total: {})", pools.len());
                let retry_info = vk::DescriptorSetAllocateInfo::default()
                    .descriptor_pool(new_pool)
                    .set_layouts(&layouts);
                let sets = self.ctx.device.allocate_descriptor_sets(&retry_info)
                    .map_err(|e| engine_err!(SOURCE,
                        "Failed to allocate descriptor set after pool growth: {:?}", e))?;
                (new_pool, sets)
            }
            Err(e) => return Err(engine_err!(SOURCE, "Failed to allocate descriptor set: {:?}", e)),
        };

        Ok((pool, sets[0]))
    }
}

impl GraphicsDevice for VulkanGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn DeviceBuffer>> {
        if desc.size == 0 {
            engine_bail!(SOURCE, "create_buffer: zero-sized buffer '{}'", desc.name);
        }

        unsafe {
            let buffer_create_info = vk::BufferCreateInfo::default()
                .size(desc.size)
                .usage(buffer_usage_to_vk(desc.usage))
                .sharing_mode(vk::SharingMode::EXCLUSIVE);

            let buffer = self.ctx.device.create_buffer(&buffer_create_info, None)
                .map_err(|e| engine_err!(SOURCE,
                    "Failed to create buffer '{}' of size {} bytes: {:?}", desc.name, desc.size, e))?;

            let requirements = self.ctx.device.get_buffer_memory_requirements(buffer);

            let allocation = {
                let mut allocator = self.ctx.allocator.lock()
                    .map_err(|_| engine_err!(SOURCE, "Allocator mutex poisoned"))?;
                allocator.allocate(&AllocationCreateDesc {
                    name: &desc.name,
                    requirements,
                    location: memory_location_to_gpu_allocator(desc.location),
                    linear: true,
                    allocation_scheme: AllocationScheme::GpuAllocatorManaged,
                })
            };
            let allocation = match allocation {
                Ok(allocation) => allocation,
                Err(_) => {
                    self.ctx.device.destroy_buffer(buffer, None);
                    let size_mb = requirements.size as f64 / (1024.0 * 1024.0);
                    engine_error!(SOURCE,
                        "Out of GPU memory for buffer '{}' (required: {:.2} MB)", desc.name, size_mb);
                    return Err(Error::OutOfMemory);
                }
            };

            self.ctx.device.bind_buffer_memory(buffer, allocation.memory(), allocation.offset())
                .map_err(|e| engine_err!(SOURCE, "Failed to bind buffer memory: {:?}", e))?;

            Ok(Arc::new(Buffer::new(
                Arc::clone(&self.ctx),
                buffer,
                allocation,
                desc.size,
                desc.name,
            )))
        }
    }

    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn DeviceShader>> {
        let words = ash::util::read_spv(&mut Cursor::new(desc.code))
            .map_err(|e| {
                engine_error!(SOURCE, "Invalid SPIR-V ({} bytes): {}", desc.code.len(), e);
                Error::InvalidResource(format!("invalid SPIR-V: {}", e))
            })?;

        let reflected_bindings = Self::reflect_bindings(&words)?;

        unsafe {
            let create_info = vk::ShaderModuleCreateInfo::default().code(&words);
            let module = self.ctx.device.create_shader_module(&create_info, None)
                .map_err(|e| engine_err!(SOURCE, "Failed to create shader module: {:?}", e))?;

            Ok(Arc::new(Shader::new(
                Arc::clone(&self.ctx),
                module,
                desc.entry_point,
                reflected_bindings,
            )))
        }
    }

    fn create_compute_pipeline(&mut self, desc: ComputePipelineDesc) -> Result<Arc<dyn DevicePipeline>> {
        let shader = unsafe { Shader::from_dyn(desc.shader.as_ref()) };
        validate_bindings(&desc.name, shader.reflected_bindings(), &desc.binding_layouts)?;

        let entry_point = CString::new(shader.entry_point.clone())
            .map_err(|_| Error::InvalidResource("Entry point contains a NUL byte".to_string()))?;

        unsafe {
            let mut descriptor_set_layouts = Vec::with_capacity(desc.binding_layouts.len());
            for layout in &desc.binding_layouts {
                let bindings: Vec<vk::DescriptorSetLayoutBinding> = layout.entries
                    .iter()
                    .map(|entry| vk::DescriptorSetLayoutBinding::default()
                        .binding(entry.binding)
                        .descriptor_type(binding_type_to_vk(entry.binding_type))
                        .descriptor_count(1)
                        .stage_flags(vk::ShaderStageFlags::COMPUTE))
                    .collect();
                let info = vk::DescriptorSetLayoutCreateInfo::default().bindings(&bindings);
                let set_layout = self.ctx.device.create_descriptor_set_layout(&info, None)
                    .map_err(|e| engine_err!(SOURCE,
                        "Failed to create descriptor set layout for '{}': {:?}", desc.name, e))?;
                descriptor_set_layouts.push(set_layout);
            }

            let layout_info = vk::PipelineLayoutCreateInfo::default()
                .set_layouts(&descriptor_set_layouts);
            let pipeline_layout = self.ctx.device.create_pipeline_layout(&layout_info, None)
                .map_err(|e| engine_err!(SOURCE,
                    "Failed to create pipeline layout for '{}': {:?}", desc.name, e))?;

            let stage = vk::PipelineShaderStageCreateInfo::default()
                .stage(vk::ShaderStageFlags::COMPUTE)
                .module(shader.module)
                .name(&entry_point);
            let create_info = vk::ComputePipelineCreateInfo::default()
                .stage(stage)
                .layout(pipeline_layout);

            let pipelines = self.ctx.device
                .create_compute_pipelines(vk::PipelineCache::null(), &[create_info], None)
                .map_err(|(_, e)| engine_err!(SOURCE,
                    "Failed to create compute pipeline '{}': {:?}", desc.name, e))?;

            engine_debug!(SOURCE, "Compute pipeline '{}' created ({} binding groups)",
                desc.name, descriptor_set_layouts.len());

            Ok(Arc::new(Pipeline::new(
                Arc::clone(&self.ctx),
                pipelines[0],
                pipeline_layout,
                descriptor_set_layouts,
                desc.binding_layouts,
                desc.name,
            )))
        }
    }

    fn create_binding_group(
        &self,
        pipeline: &Arc<dyn DevicePipeline>,
        set_index: u32,
        resources: &[BindingResource],
    ) -> Result<Arc<dyn DeviceBindingGroup>> {
        let vk_pipeline = unsafe { Pipeline::from_dyn(pipeline.as_ref()) };

        let Some(layout) = vk_pipeline.binding_layouts.get(set_index as usize) else {
            engine_bail!(SOURCE,
                "create_binding_group: set_index {} out of range (pipeline '{}' has {} layouts)",
                set_index, vk_pipeline.name, vk_pipeline.binding_layouts.len());
        };
        if layout.entries.len() != resources.len() {
            engine_bail!(SOURCE,
                "create_binding_group: set {} expects {} resources, got {}",
                set_index, layout.entries.len(), resources.len());
        }

        unsafe {
            let (descriptor_pool, descriptor_set) =
                self.allocate_descriptor_set(vk_pipeline.descriptor_set_layouts[set_index as usize])?;

            // Buffer infos must stay alive until update_descriptor_sets
            let mut buffer_infos = Vec::with_capacity(resources.len());
            for resource in resources {
                let BindingResource::StorageBuffer(buffer) = resource;
                let buffer = Buffer::from_dyn(*buffer);
                buffer_infos.push(
                    vk::DescriptorBufferInfo::default()
                        .buffer(buffer.buffer)
                        .offset(0)
                        .range(vk::WHOLE_SIZE)
                );
            }

            let writes: Vec<vk::WriteDescriptorSet> = layout.entries
                .iter()
                .zip(&buffer_infos)
                .map(|(entry, info)| vk::WriteDescriptorSet::default()
                    .dst_set(descriptor_set)
                    .dst_binding(entry.binding)
                    .dst_array_element(0)
                    .descriptor_type(binding_type_to_vk(entry.binding_type))
                    .buffer_info(std::slice::from_ref(info)))
                .collect();

            self.ctx.device.update_descriptor_sets(&writes, &[]);

            Ok(Arc::new(BindingGroup {
                ctx: Arc::clone(&self.ctx),
                descriptor_pool,
                descriptor_set,
                set_index,
            }))
        }
    }

    fn create_command_list(&self) -> Result<Box<dyn DeviceCommandList>> {
        Ok(Box::new(CommandList::new(Arc::clone(&self.ctx))?))
    }

    fn submit(&self, commands: &[&dyn DeviceCommandList]) -> Result<()> {
        let fence_index = self.current_submit_fence.fetch_add(1, Ordering::Relaxed) % MAX_SUBMITS_IN_FLIGHT;
        let fence = self.submit_fences[fence_index];

        unsafe {
            // Wait for the previous submit that used this fence
            self.ctx.device
                .wait_for_fences(&[fence], true, u64::MAX)
                .map_err(|e| engine_err!(SOURCE, "submit: failed to wait for fence: {:?}", e))?;
            self.ctx.device
                .reset_fences(&[fence])
                .map_err(|e| engine_err!(SOURCE, "submit: failed to reset fence: {:?}", e))?;

            let command_buffers: Vec<vk::CommandBuffer> = commands
                .iter()
                .map(|cmd| CommandList::from_dyn(*cmd).command_buffer())
                .collect();

            let submit_info = vk::SubmitInfo::default()
                .command_buffers(&command_buffers);

            self.ctx.device
                .queue_submit(self.ctx.queue, &[submit_info], fence)
                .map_err(|e| engine_err!(SOURCE, "submit: failed to submit queue: {:?}", e))?;
        }

        Ok(())
    }

    fn wait_idle(&self) -> Result<()> {
        unsafe {
            self.ctx.device
                .device_wait_idle()
                .map_err(|e| engine_err!(SOURCE, "Failed to wait idle: {:?}", e))
        }
    }
}

impl Drop for VulkanGraphicsDevice {
    fn drop(&mut self) {
        unsafe {
            self.ctx.device.device_wait_idle().ok();

            for &fence in &self.submit_fences {
                self.ctx.device.destroy_fence(fence, None);
            }
            // Descriptor pools, device and instance go with the last GpuContext reference
        }
    }
}

/// Convert BindingType to Vulkan descriptor type
pub(crate) fn binding_type_to_vk(binding_type: BindingType) -> vk::DescriptorType {
    match binding_type {
        BindingType::StorageBuffer => vk::DescriptorType::STORAGE_BUFFER,
    }
}
