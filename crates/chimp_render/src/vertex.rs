#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl FrameVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FrameVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(FrameVertex, position) as wgpu::BufferAddress,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // tex_coords
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(FrameVertex, tex_coords) as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }

    /// Two triangles covering a `width` x `height` frame in pixel space,
    /// with texture coordinates mapping the frame's top-left to (0, 0).
    pub fn frame_quad(width: f32, height: f32) -> ([FrameVertex; 4], [u16; 6]) {
        let vertices = [
            FrameVertex {
                position: [0.0, 0.0],
                tex_coords: [0.0, 0.0],
            },
            FrameVertex {
                position: [width, 0.0],
                tex_coords: [1.0, 0.0],
            },
            FrameVertex {
                position: [width, height],
                tex_coords: [1.0, 1.0],
            },
            FrameVertex {
                position: [0.0, height],
                tex_coords: [0.0, 1.0],
            },
        ];
        (vertices, [0, 1, 2, 0, 2, 3])
    }
}
