use glam::Mat4;

/// Vertical field of view in degrees.
pub const FOV_Y_DEGREES: f32 = 45.0;
/// Width over height of the fixed display surface.
pub const ASPECT_RATIO: f32 = 4.0 / 3.0;
/// Near clipping plane distance.
pub const NEAR_PLANE: f32 = 0.1;
/// Far clipping plane distance.
pub const FAR_PLANE: f32 = 100.0;

/// Fixed perspective projection, computed once at startup.
pub fn projection() -> Mat4 {
    Mat4::perspective_rh(
        FOV_Y_DEGREES.to_radians(),
        ASPECT_RATIO,
        NEAR_PLANE,
        FAR_PLANE,
    )
}

/// Fixed model matrix; the triangles never move.
pub fn model() -> Mat4 {
    Mat4::IDENTITY
}

/// Combined transform, recomputed fresh every frame.
pub fn mvp(projection: Mat4, view: Mat4, model: Mat4) -> Mat4 {
    projection * view * model
}

/// MVP uniform buffer data for GPU, column-major.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub mvp: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn from_mat4(mvp: Mat4) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
        }
    }
}
