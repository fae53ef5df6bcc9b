//! Particle rendering - buffer uploads and the per-frame render pass

use super::state::{SceneUniforms, GPU_STATE};
use crate::particles::FrameUniforms;

/// Near-black backdrop; glow reads best on it
const BACKGROUND: wgpu::Color = wgpu::Color {
    r: 0.004,
    g: 0.004,
    b: 0.016,
    a: 1.0,
};

/// Upload the immutable per-particle attributes once after scene init.
/// `colors` is flat rgb (3 per particle), `sizes` one float each.
pub fn upload_static_attributes(colors: &[f32], sizes: &[f32]) {
    GPU_STATE.with(|state_cell| {
        let mut state_ref = state_cell.borrow_mut();
        let state = match state_ref.as_mut() {
            Some(s) => s,
            None => return,
        };

        state.queue.write_buffer(&state.color_buffer, 0, bytemuck::cast_slice(colors));
        state.queue.write_buffer(&state.size_buffer, 0, bytemuck::cast_slice(sizes));
        state.instance_count = sizes.len() as u32;
    });
}

/// Re-upload particle positions. Called on scene init and on every
/// frame a morph mutates the buffer; skipped while positions are
/// static (rotation and pulse live in the shader).
pub fn upload_positions(positions: &[f32]) {
    GPU_STATE.with(|state_cell| {
        let state_ref = state_cell.borrow();
        let state = match state_ref.as_ref() {
            Some(s) => s,
            None => return,
        };
        state
            .queue
            .write_buffer(&state.position_buffer, 0, bytemuck::cast_slice(positions));
    });
}

/// Render one frame of the particle field
pub fn render_frame(uniforms: FrameUniforms) {
    GPU_STATE.with(|state_cell| {
        let state_ref = state_cell.borrow();
        let state = match state_ref.as_ref() {
            Some(s) => s,
            None => return,
        };

        let scene = SceneUniforms {
            view_proj: state.view_proj,
            time: uniforms.time,
            pulse: uniforms.pulse_strength,
            rot_y: uniforms.rotation_y,
            aspect: state.aspect,
        };
        state
            .queue
            .write_buffer(&state.uniform_buffer, 0, bytemuck::bytes_of(&scene));

        let output = match state.surface.get_current_texture() {
            Ok(t) => t,
            Err(_) => return,
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = state
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Particle Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Particle Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(BACKGROUND),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if state.instance_count > 0 {
                pass.set_pipeline(&state.render_pipeline);
                pass.set_bind_group(0, &state.bind_group, &[]);
                pass.set_vertex_buffer(0, state.position_buffer.slice(..));
                pass.set_vertex_buffer(1, state.color_buffer.slice(..));
                pass.set_vertex_buffer(2, state.size_buffer.slice(..));
                // 6 vertices per quad sprite, one instance per particle
                pass.draw(0..6, 0..state.instance_count);
            }
        }

        state.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    });
}
