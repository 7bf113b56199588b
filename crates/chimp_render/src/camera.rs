use glam::{Mat4, Vec2, Vec4};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Maps the game's pixel space (origin top-left, y down) onto clip space.
///
/// The frame is scaled uniformly to fit the viewport and centred, so a
/// viewport with a different aspect ratio letterboxes instead of stretching.
pub struct FrameCamera {
    pub frame_size: Vec2,
    pub viewport: (u32, u32),
}

impl FrameCamera {
    pub fn new(frame_width: u32, frame_height: u32, viewport: (u32, u32)) -> Self {
        Self {
            frame_size: Vec2::new(frame_width as f32, frame_height as f32),
            viewport,
        }
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }

    /// Uniform scale from frame pixels to viewport pixels, plus the margin
    /// (in frame pixels) on each side of the fitted frame.
    fn fit(&self) -> (f32, Vec2) {
        let viewport = Vec2::new(self.viewport.0.max(1) as f32, self.viewport.1.max(1) as f32);
        let scale = (viewport.x / self.frame_size.x).min(viewport.y / self.frame_size.y);
        // Visible pixel-space extent once the frame is fit into the viewport.
        let visible = viewport / scale;
        (scale, (visible - self.frame_size) * 0.5)
    }

    pub fn view_proj(&self) -> Mat4 {
        let (_, margin) = self.fit();

        Mat4::orthographic_rh(
            -margin.x,
            self.frame_size.x + margin.x,
            self.frame_size.y + margin.y,
            -margin.y,
            -1.0,
            1.0,
        )
    }

    /// Map a viewport position (e.g. the cursor in physical pixels) back to
    /// frame pixels. Points in the letterbox margins land outside the frame.
    pub fn viewport_to_frame(&self, point: Vec2) -> Vec2 {
        let (scale, margin) = self.fit();
        point / scale - margin
    }

    /// Project a pixel-space point to normalized device coordinates.
    pub fn to_ndc(&self, point: Vec2) -> Vec2 {
        let clip = self.view_proj() * Vec4::new(point.x, point.y, 0.0, 1.0);
        Vec2::new(clip.x / clip.w, clip.y / clip.w)
    }
}
