use std::ffi::CString;
use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasRawWindowHandle;
use thiserror::Error;
use winit::dpi::{PhysicalSize, Size};
use winit::event_loop::EventLoopWindowTarget;
use winit::window::{Window, WindowBuilder};

use crate::config::{ContextConfig, WindowConfig};

/// Window, surface and current GL context. GL function pointers are loaded
/// once the context is current.
pub struct GlContext {
    // XXX the context must be dropped before the surface.
    pub context: PossiblyCurrentContext,
    pub window: GlWindow,
}

impl GlContext {
    pub fn new<T>(
        event_loop: &EventLoopWindowTarget<T>,
        window_config: &WindowConfig,
        context_config: &ContextConfig,
    ) -> Result<Self, ContextError> {
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(
                window_config.width,
                window_config.height,
            )))
            .with_title(&window_config.title);

        Self::with_window_builder(event_loop, window_builder, window_config, context_config)
    }

    /// Same as [`GlContext::new`] with an invisible window, for running GL
    /// code without showing anything.
    pub fn hidden<T>(
        event_loop: &EventLoopWindowTarget<T>,
        context_config: &ContextConfig,
    ) -> Result<Self, ContextError> {
        let window_config = WindowConfig {
            vsync: false,
            ..Default::default()
        };

        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(64, 64)))
            .with_visible(false);

        Self::with_window_builder(event_loop, window_builder, &window_config, context_config)
    }

    fn with_window_builder<T>(
        event_loop: &EventLoopWindowTarget<T>,
        window_builder: WindowBuilder,
        window_config: &WindowConfig,
        context_config: &ContextConfig,
    ) -> Result<Self, ContextError> {
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(event_loop, template, |mut configs| {
                // find_configs errors out before the picker runs when nothing matches
                configs.next().expect("display returned no GL configs")
            })
            .map_err(|e| ContextError::Display(e.to_string()))?;

        let window = window.ok_or(ContextError::NoWindow)?;

        let handle = Some(window.raw_window_handle());
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_debug(context_config.debug)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(
                context_config.major,
                context_config.minor,
            ))))
            .build(handle);

        let gl_window = GlWindow::new(window, &gl_config)?;

        let context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| match CString::new(s) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        let interval = if window_config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };

        if let Err(e) = gl_window.surface.set_swap_interval(&context, interval) {
            log::warn!("Could not set swap interval: {e}");
        }

        log::info!(
            "Created OpenGL {}.{} context{}",
            context_config.major,
            context_config.minor,
            if context_config.debug { " (debug)" } else { "" }
        );

        Ok(Self {
            context,
            window: gl_window,
        })
    }

    /// Resizes the surface. Zero sizes (minimized windows) are ignored.
    pub fn resize(&self, width: u32, height: u32) -> bool {
        match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(w), Some(h)) => {
                self.window.surface.resize(&self.context, w, h);
                true
            }
            _ => false,
        }
    }

    pub fn swap_buffers(&self) -> Result<(), ContextError> {
        self.window.surface.swap_buffers(&self.context)?;
        Ok(())
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, ContextError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();

        let (width, height) = match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(ContextError::ZeroSizedWindow),
        };

        let attrs =
            SurfaceAttributesBuilder::<WindowSurface>::new().build(raw_window_handle, width, height);

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("could not create display: {0}")]
    Display(String),
    #[error("display did not create a window")]
    NoWindow,
    #[error("window has zero size")]
    ZeroSizedWindow,
    #[error(transparent)]
    Glutin(#[from] glutin::error::Error),
}
