use std::io::BufRead;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use orbiting_triangles::driver::{FrameDriver, InputSnapshot, LoopState};
use orbiting_triangles::renderer::Renderer;

const WINDOW_WIDTH: u32 = 1024;
const WINDOW_HEIGHT: u32 = 768;
const WINDOW_TITLE: &str = "Orbiting Triangles";

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    driver: FrameDriver,
    input: InputSnapshot,
    startup_failed: bool,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            renderer: None,
            driver: FrameDriver::new(),
            input: InputSnapshot::default(),
            startup_failed: false,
        }
    }

    fn fail_startup(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{err:#}");
        wait_for_acknowledgement();
        self.startup_failed = true;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false);

        let window = match event_loop
            .create_window(attributes)
            .context("failed to open window")
        {
            Ok(w) => Arc::new(w),
            Err(err) => {
                self.fail_startup(event_loop, err);
                return;
            }
        };

        match pollster::block_on(Renderer::new(window.clone())) {
            Ok(renderer) => {
                self.window = Some(window);
                self.renderer = Some(renderer);
            }
            Err(err) => self.fail_startup(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.input.close_requested = true,
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.input.exit_pressed = true,
            WindowEvent::RedrawRequested => {
                let Some(renderer) = self.renderer.as_mut() else {
                    return;
                };
                match self.driver.advance(self.input, renderer) {
                    Ok(LoopState::Terminated) => event_loop.exit(),
                    Ok(LoopState::Running) => {}
                    Err(err) => error!("frame dropped: {err:#}"),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Hold the diagnostic on screen until the user acknowledges it.
fn wait_for_acknowledgement() {
    eprintln!("press Enter to exit");
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
}

fn run() -> Result<bool> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new();

    println!("{WINDOW_TITLE} - press Escape or close the window to quit");
    event_loop.run_app(&mut app).context("event loop error")?;

    Ok(app.startup_failed)
}

fn main() -> Result<()> {
    env_logger::init();

    let startup_failed = match run() {
        Ok(failed) => failed,
        Err(err) => {
            error!("{err:#}");
            wait_for_acknowledgement();
            true
        }
    };

    if startup_failed {
        std::process::exit(1);
    }
    info!("clean shutdown");
    Ok(())
}
