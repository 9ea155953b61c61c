use glam::Mat4;

/// Per-chunk shader uniforms: camera matrices, model matrix and tint.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ChunkUniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(ChunkUniforms, [u8; 208]);

impl ChunkUniforms {
    /// Tint applied to terrain when no other color is configured.
    pub const DEFAULT_COLOR: [f32; 4] = [0.5, 0.6, 1.0, 1.0];

    /// Uniforms for a chunk whose vertices are already in world space.
    pub fn for_chunk() -> Self {
        Self::new(Mat4::IDENTITY, Self::DEFAULT_COLOR)
    }

    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            color,
        }
    }

    /// Replaces the camera matrices.
    pub fn with_camera(mut self, view: Mat4, projection: Mat4) -> Self {
        self.view = view.to_cols_array_2d();
        self.projection = projection.to_cols_array_2d();
        self
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    /// `projection * view * model`.
    pub fn clip_from_local(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.projection)
            * Mat4::from_cols_array_2d(&self.view)
            * self.model_matrix()
    }
}

impl Default for ChunkUniforms {
    fn default() -> Self {
        Self::for_chunk()
    }
}
