use anyhow::Result;
use glam::Mat4;

use crate::camera::OrbitCamera;
use crate::geometry::{self, DrawCommand};
use crate::transform;

/// Input observations gathered by the event loop since the last frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// The exit key (Escape) was observed pressed.
    pub exit_pressed: bool,
    /// The window-close signal was observed.
    pub close_requested: bool,
}

impl InputSnapshot {
    pub fn should_terminate(&self) -> bool {
        self.exit_pressed || self.close_requested
    }
}

/// Render-loop lifecycle. Terminated is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Frame sink the driver submits to.
///
/// The wgpu renderer is the production implementation; tests substitute a
/// recording mock.
pub trait DrawSurface {
    /// Present one frame: clear, upload the combined transform to each
    /// program, and issue the draw commands in order.
    fn submit_frame(&mut self, mvp: Mat4, commands: [DrawCommand; 2]) -> Result<()>;
}

/// Per-frame coordinator: owns the camera and the fixed transform stack,
/// advances the orbit, and submits draw work until terminated.
pub struct FrameDriver {
    camera: OrbitCamera,
    projection: Mat4,
    model: Mat4,
    state: LoopState,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            camera: OrbitCamera::new(),
            projection: transform::projection(),
            model: transform::model(),
            state: LoopState::Running,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Run one loop iteration.
    ///
    /// Checks the termination condition first; a terminated driver never
    /// submits another frame. Otherwise recomputes the view and combined
    /// transform, advances the orbit phase, and submits the two draw
    /// commands.
    pub fn advance(
        &mut self,
        input: InputSnapshot,
        surface: &mut dyn DrawSurface,
    ) -> Result<LoopState> {
        if self.state == LoopState::Terminated {
            return Ok(LoopState::Terminated);
        }
        if input.should_terminate() {
            self.state = LoopState::Terminated;
            return Ok(LoopState::Terminated);
        }

        let view = self.camera.view_matrix();
        let mvp = transform::mvp(self.projection, view, self.model);
        self.camera.advance();
        surface.submit_frame(mvp, geometry::draw_commands())?;

        Ok(LoopState::Running)
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        frames: Vec<(Mat4, [DrawCommand; 2])>,
    }

    impl DrawSurface for RecordingSurface {
        fn submit_frame(&mut self, mvp: Mat4, commands: [DrawCommand; 2]) -> Result<()> {
            self.frames.push((mvp, commands));
            Ok(())
        }
    }

    #[test]
    fn driver_starts_running() {
        let driver = FrameDriver::new();
        assert_eq!(driver.state(), LoopState::Running);
    }

    #[test]
    fn running_iteration_submits_one_frame() {
        let mut driver = FrameDriver::new();
        let mut surface = RecordingSurface::default();

        let state = driver
            .advance(InputSnapshot::default(), &mut surface)
            .unwrap();

        assert_eq!(state, LoopState::Running);
        assert_eq!(surface.frames.len(), 1);
    }

    #[test]
    fn exit_key_terminates_without_drawing() {
        let mut driver = FrameDriver::new();
        let mut surface = RecordingSurface::default();

        let input = InputSnapshot {
            exit_pressed: true,
            ..Default::default()
        };
        let state = driver.advance(input, &mut surface).unwrap();

        assert_eq!(state, LoopState::Terminated);
        assert!(surface.frames.is_empty());
    }

    #[test]
    fn close_request_terminates() {
        let mut driver = FrameDriver::new();
        let mut surface = RecordingSurface::default();

        let input = InputSnapshot {
            close_requested: true,
            ..Default::default()
        };
        assert_eq!(
            driver.advance(input, &mut surface).unwrap(),
            LoopState::Terminated
        );
    }

    #[test]
    fn terminated_driver_submits_no_further_frames() {
        let mut driver = FrameDriver::new();
        let mut surface = RecordingSurface::default();

        driver
            .advance(InputSnapshot::default(), &mut surface)
            .unwrap();
        let input = InputSnapshot {
            exit_pressed: true,
            ..Default::default()
        };
        driver.advance(input, &mut surface).unwrap();

        // Even with the exit condition gone, the driver stays terminated.
        for _ in 0..3 {
            let state = driver
                .advance(InputSnapshot::default(), &mut surface)
                .unwrap();
            assert_eq!(state, LoopState::Terminated);
        }
        assert_eq!(surface.frames.len(), 1);
    }

    #[test]
    fn phase_advances_once_per_submitted_frame() {
        let mut driver = FrameDriver::new();
        let mut surface = RecordingSurface::default();

        for _ in 0..5 {
            driver
                .advance(InputSnapshot::default(), &mut surface)
                .unwrap();
        }

        let expected = 5.0 * crate::camera::PHASE_STEP;
        assert!((driver.camera().phase() - expected).abs() < 1e-6);
    }
}
