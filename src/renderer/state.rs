//! GPU state management - WebGPU device, queue, surface, particle pipeline

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

/// Errors that can occur during GPU initialization
pub enum GpuStateError {
    NoWindow,
    NoDocument,
    NoCanvas,
    SurfaceCreationFailed(String),
    NoAdapter,
    DeviceCreationFailed(String),
}

impl From<GpuStateError> for JsValue {
    fn from(err: GpuStateError) -> Self {
        match err {
            GpuStateError::NoWindow => JsValue::from_str("No window found"),
            GpuStateError::NoDocument => JsValue::from_str("No document found"),
            GpuStateError::NoCanvas => JsValue::from_str("No canvas with id 'heart-canvas' found"),
            GpuStateError::SurfaceCreationFailed(e) => {
                JsValue::from_str(&format!("Surface creation failed: {}", e))
            }
            GpuStateError::NoAdapter => JsValue::from_str("Failed to find a suitable GPU adapter"),
            GpuStateError::DeviceCreationFailed(e) => {
                JsValue::from_str(&format!("Device creation failed: {}", e))
            }
        }
    }
}

/// Shader uniforms, one write per frame
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    pub view_proj: [f32; 16],
    pub time: f32,
    pub pulse: f32,
    pub rot_y: f32,
    pub aspect: f32,
}

/// Holds all WebGPU state for particle rendering
pub(crate) struct GpuState {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub render_pipeline: wgpu::RenderPipeline,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub position_buffer: wgpu::Buffer,
    pub color_buffer: wgpu::Buffer,
    pub size_buffer: wgpu::Buffer,
    pub view_proj: [f32; 16],
    pub aspect: f32,
    pub instance_count: u32,
}

// Thread-local storage for GPU state (WASM is single-threaded)
thread_local! {
    pub(crate) static GPU_STATE: RefCell<Option<GpuState>> = RefCell::new(None);
}

/// Camera distance matching the scene layout (sphere radius 20-50,
/// heart half-width ~17)
const CAMERA_Z: f32 = 30.0;
const FOV_Y_DEG: f32 = 75.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.0;

/// Column-major perspective matrix, wgpu clip space (z in 0..1)
fn perspective(fov_y_rad: f32, aspect: f32, near: f32, far: f32) -> [f32; 16] {
    let f = 1.0 / (fov_y_rad / 2.0).tan();
    let rz = far / (near - far);
    #[rustfmt::skip]
    let m = [
        f / aspect, 0.0, 0.0,        0.0,
        0.0,        f,   0.0,        0.0,
        0.0,        0.0, rz,        -1.0,
        0.0,        0.0, rz * near,  0.0,
    ];
    m
}

/// Perspective camera looking down -Z from z = CAMERA_Z.
/// The view is a pure translation, folded into the projection's
/// fourth column.
pub(crate) fn view_proj_matrix(aspect: f32) -> [f32; 16] {
    let mut m = perspective(FOV_Y_DEG.to_radians(), aspect, Z_NEAR, Z_FAR);
    // proj * translate(0, 0, -CAMERA_Z): col3 += col2 * (-CAMERA_Z)
    for row in 0..4 {
        m[12 + row] += m[8 + row] * -CAMERA_Z;
    }
    m
}

/// Initialize WebGPU: adapter, device, surface, particle pipeline.
/// Canvas surfaces only exist in the browser; the native stub keeps
/// the crate compiling and testable off-wasm.
#[cfg(not(target_arch = "wasm32"))]
pub async fn initialize_gpu() -> Result<(), GpuStateError> {
    Err(GpuStateError::SurfaceCreationFailed(
        "canvas surfaces require the wasm32 target".to_string(),
    ))
}

/// Initialize WebGPU: adapter, device, surface, particle pipeline
#[cfg(target_arch = "wasm32")]
pub async fn initialize_gpu() -> Result<(), GpuStateError> {
    use crate::particles::PARTICLE_COUNT;

    let window = web_sys::window().ok_or(GpuStateError::NoWindow)?;
    let document = window.document().ok_or(GpuStateError::NoDocument)?;
    let canvas = document
        .get_element_by_id("heart-canvas")
        .ok_or(GpuStateError::NoCanvas)?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| GpuStateError::NoCanvas)?;

    let width = canvas.width().max(1);
    let height = canvas.height().max(1);
    let aspect = width as f32 / height as f32;

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU,
        ..Default::default()
    });

    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
        .map_err(|e| GpuStateError::SurfaceCreationFailed(format!("{:?}", e)))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or(GpuStateError::NoAdapter)?;

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Heartfield Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        )
        .await
        .map_err(|e| GpuStateError::DeviceCreationFailed(format!("{:?}", e)))?;

    // Configure surface
    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .copied()
        .unwrap_or(surface_caps.formats[0]);

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width,
        height,
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode: surface_caps.alpha_modes[0],
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(&device, &config);

    // Create shader and pipeline
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Particle Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("../shader.wgsl").into()),
    });

    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Uniforms"),
        size: std::mem::size_of::<SceneUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Uniform Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Uniform Bind Group"),
        layout: &bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Particle Pipeline Layout"),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });

    // Per-instance attribute buffers (SoA, mirrors the cloud layout)
    const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
    const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
    const SIZE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32];

    let position_layout = wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &POSITION_ATTRS,
    };
    let color_layout = wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &COLOR_ATTRS,
    };
    let size_layout = wgpu::VertexBufferLayout {
        array_stride: 4,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &SIZE_ATTRS,
    };

    // Additive blending: overlapping sprites sum toward white, which
    // sells the glow without a bloom post pass
    let additive = wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    };

    let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Particle Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[position_layout, color_layout, size_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(additive),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    let position_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Particle Positions"),
        size: (PARTICLE_COUNT * 12) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let color_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Particle Colors"),
        size: (PARTICLE_COUNT * 12) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let size_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Particle Sizes"),
        size: (PARTICLE_COUNT * 4) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let view_proj = view_proj_matrix(aspect);

    GPU_STATE.with(|state| {
        *state.borrow_mut() = Some(GpuState {
            device,
            queue,
            surface,
            render_pipeline,
            uniform_buffer,
            bind_group,
            position_buffer,
            color_buffer,
            size_buffer,
            view_proj,
            aspect,
            instance_count: 0,
        });
    });

    Ok(())
}
