use std::ffi::CString;
use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::geometry::Geometry;
use crate::renderer::GlRenderer;
use crate::shader::Program;

/// A window with a current 3.3 core context, ready to build GL resources
/// against. `run` takes over the thread until the window closes.
pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    renderer: GlRenderer,
}

impl App {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(width, height)))
            .with_title(title);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |mut configs| configs.next().unwrap())
            .map_err(|e| AppError::Window(e.to_string()))?;

        let window = window.ok_or_else(|| AppError::Window("no window was created".to_string()))?;

        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr) }
            .map_err(AppError::Context)?
            .make_current(&gl_window.surface)
            .map_err(AppError::Context)?;

        gl::load_with(|s| {
            gl_display
                .get_proc_address(CString::new(s).unwrap().as_c_str())
                .cast()
        });

        let renderer = GlRenderer::new();

        let size = gl_window.window.inner_size();
        renderer.resize(size.width, size.height);

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            renderer,
        })
    }

    /// Draws `geometry` with `program` until the window is closed, either
    /// from the window system or with Escape. Exits the process with 0.
    pub fn run(self, geometry: Geometry, program: Program) -> ! {
        let Self {
            event_loop,
            gl_context,
            gl_window,
            mut renderer,
        } = self;

        event_loop.run(move |event, _window_target, control_flow| {
            *control_flow = ControlFlow::Wait;
            match event {
                Event::RedrawEventsCleared => {
                    gl_window.window.request_redraw();
                    gl_window.surface.swap_buffers(&gl_context).unwrap();
                }
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(size) => {
                        if size.width != 0 && size.height != 0 {
                            gl_window.surface.resize(
                                &gl_context,
                                NonZeroU32::new(size.width).unwrap(),
                                NonZeroU32::new(size.height).unwrap(),
                            );
                            renderer.resize(size.width, size.height);
                        }
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        if close_requested(input.state, input.virtual_keycode) {
                            control_flow.set_exit();
                        }
                    }
                    WindowEvent::CloseRequested => {
                        control_flow.set_exit();
                    }
                    _ => (),
                },
                Event::RedrawRequested(_) => {
                    renderer.clear();
                    renderer.draw(&geometry, &program);
                }
                _ => (),
            }
        })
    }
}

/// Escape asks the loop to close; no draw is issued after the exit is set.
fn close_requested(state: ElementState, key: Option<VirtualKeyCode>) -> bool {
    state == ElementState::Pressed && key == Some(VirtualKeyCode::Escape)
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();

        let (width, height) = match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(AppError::Window("window surface has zero size".to_string())),
        };

        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window.raw_window_handle(),
            width,
            height,
        );

        let surface = unsafe {
            config
                .display()
                .create_window_surface(config, &attrs)
                .map_err(AppError::Surface)?
        };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not create window: {0}")]
    Window(String),
    #[error("could not create render surface: {0}")]
    Surface(glutin::error::Error),
    #[error("could not create OpenGL context: {0}")]
    Context(glutin::error::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_press_requests_close() {
        assert!(close_requested(
            ElementState::Pressed,
            Some(VirtualKeyCode::Escape)
        ));
    }

    #[test]
    fn escape_release_keeps_running() {
        assert!(!close_requested(
            ElementState::Released,
            Some(VirtualKeyCode::Escape)
        ));
    }

    #[test]
    fn bring_up_failure_diagnostic_text() {
        let err = AppError::Window("no window was created".to_string());

        assert_eq!(
            err.to_string(),
            "could not create window: no window was created"
        );
    }

    #[test]
    fn other_keys_keep_running() {
        assert!(!close_requested(
            ElementState::Pressed,
            Some(VirtualKeyCode::Q)
        ));
        assert!(!close_requested(ElementState::Pressed, None));
    }
}
