use chimp_core::Surface;

/// GPU copy of a CPU-composited frame. Re-uploaded in full every tick.
pub struct FrameTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl FrameTexture {
    pub fn new(device: &wgpu::Device, width: u32, height: u32, label: &str) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Nearest keeps sprite pixels crisp when the window is scaled.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Frame Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size: (width, height),
        }
    }

    /// Copy `frame` into the texture. Frames of a different size are
    /// rejected, since the texture is allocated once at startup.
    pub fn upload(&self, queue: &wgpu::Queue, frame: &Surface) -> Result<(), String> {
        check_frame_size(frame, self.size)?;
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            frame.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.size.0),
                rows_per_image: Some(self.size.1),
            },
            wgpu::Extent3d {
                width: self.size.0,
                height: self.size.1,
                depth_or_array_layers: 1,
            },
        );
        Ok(())
    }
}

fn check_frame_size(frame: &Surface, size: (u32, u32)) -> Result<(), String> {
    if frame.size() != size {
        return Err(format!(
            "Frame is {}x{} but texture is {}x{}",
            frame.width(),
            frame.height(),
            size.0,
            size.1
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_frame_is_accepted() {
        let frame = Surface::filled(800, 600, [250, 250, 250]);
        assert!(check_frame_size(&frame, (800, 600)).is_ok());
    }

    #[test]
    fn mismatched_frame_is_an_error() {
        let frame = Surface::filled(640, 480, [0, 0, 0]);
        let err = check_frame_size(&frame, (800, 600)).expect_err("size mismatch should fail");
        assert_eq!(err, "Frame is 640x480 but texture is 800x600");
    }
}
