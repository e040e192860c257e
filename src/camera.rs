use glam::{Mat4, Vec3};
use std::f32::consts::PI;

/// Distance from the orbit center in the X-Z plane.
pub const ORBIT_RADIUS: f32 = 4.0;
/// Fixed eye height above the X-Z plane.
pub const ORBIT_HEIGHT: f32 = 1.0;
/// Angular step applied once per frame, in radians.
///
/// The step is a per-frame constant, not scaled by elapsed time, so the
/// apparent rotation speed tracks the display refresh rate.
pub const PHASE_STEP: f32 = PI / 720.0;

/// Camera orbiting the origin on a fixed circle.
///
/// The eye position is a pure function of the accumulated phase:
/// `(4·cos(phase), 1, 4·sin(phase))`, looking at the center with Y up.
pub struct OrbitCamera {
    phase: f32,
    center: Vec3,
    up: Vec3,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            center: Vec3::ZERO,
            up: Vec3::Y,
        }
    }

    /// Accumulated orbit phase in radians.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Eye position on the orbit circle for the current phase.
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            ORBIT_RADIUS * self.phase.cos(),
            ORBIT_HEIGHT,
            ORBIT_RADIUS * self.phase.sin(),
        )
    }

    /// View matrix looking from the current eye toward the center.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.center, self.up)
    }

    /// Advance the orbit by one frame step.
    pub fn advance(&mut self) {
        self.phase += PHASE_STEP;
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_starts_on_positive_x_axis() {
        let camera = OrbitCamera::new();
        let eye = camera.eye();
        assert!((eye.x - 4.0).abs() < 1e-6);
        assert!((eye.y - 1.0).abs() < 1e-6);
        assert!(eye.z.abs() < 1e-6);
    }

    #[test]
    fn eye_stays_on_orbit_circle() {
        let mut camera = OrbitCamera::new();
        for _ in 0..500 {
            let eye = camera.eye();
            let radius_sq = eye.x * eye.x + eye.z * eye.z;
            assert!(
                (radius_sq - 16.0).abs() < 1e-3,
                "eye left the radius-4 circle: {:?}",
                eye
            );
            assert!((eye.y - 1.0).abs() < 1e-6, "eye height drifted: {:?}", eye);
            camera.advance();
        }
    }

    #[test]
    fn phase_advances_by_fixed_step() {
        let mut camera = OrbitCamera::new();
        for frame in 0..10 {
            let expected = frame as f32 * PHASE_STEP;
            assert!((camera.phase() - expected).abs() < 1e-6);
            camera.advance();
        }
    }

    #[test]
    fn full_revolution_after_1440_frames() {
        let mut camera = OrbitCamera::new();
        let start = camera.eye();
        for _ in 0..1440 {
            camera.advance();
        }
        assert!((camera.phase() - 2.0 * PI).abs() < 1e-3);
        let end = camera.eye();
        assert!(start.distance(end) < 1e-2, "eye did not return: {:?}", end);
    }

    #[test]
    fn view_matrix_matches_look_at_literals() {
        let camera = OrbitCamera::new();
        let expected = Mat4::look_at_rh(Vec3::new(4.0, 1.0, 0.0), Vec3::ZERO, Vec3::Y);
        let view = camera.view_matrix();
        for (a, b) in view
            .to_cols_array()
            .iter()
            .zip(expected.to_cols_array().iter())
        {
            assert!((a - b).abs() < 1e-6);
        }
    }
}
