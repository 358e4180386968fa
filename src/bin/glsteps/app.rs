use thiserror::Error;

use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;

use gl_wrapper::renderer::GlRenderer;

use glsteps::config::{Config, ConfigError};
use glsteps::context::{ContextError, GlContext};
use glsteps::lesson::Lesson;
use glsteps::scene::{LessonScene, SceneError};

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: GlContext,
    gl_renderer: GlRenderer,
    scene: LessonScene,
}

impl App {
    pub fn new(lesson: Lesson, mut config: Config) -> Result<Self, AppError> {
        if lesson.recipe().debug_output {
            config.context.debug = true;
        }

        let event_loop = EventLoop::new();

        let gl_context = GlContext::new(&event_loop, &config.window, &config.context)?;

        let gl_renderer = GlRenderer::new();
        let (width, height): (u32, u32) = gl_context.window.window.inner_size().into();
        gl_renderer.resize(width, height);

        let scene = LessonScene::new(lesson, &config)?;

        Ok(Self {
            event_loop,
            gl_context,
            gl_renderer,
            scene,
        })
    }

    pub fn run(self) -> ! {
        let Self {
            event_loop,
            gl_context,
            mut gl_renderer,
            scene,
        } = self;

        // taken on shutdown so GL objects go away while the context is current
        let mut scene = Some(scene);

        event_loop.run(move |event, _window_target, control_flow| {
            control_flow.set_poll();

            match event {
                Event::MainEventsCleared => {
                    gl_context.window.window.request_redraw();
                }
                Event::RedrawRequested(_) => {
                    if let Some(scene) = &mut scene {
                        scene.draw(&mut gl_renderer);
                    }

                    if let Err(e) = gl_context.swap_buffers() {
                        log::error!("Could not present frame: {e}");
                        control_flow.set_exit();
                    }
                }
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(size) => {
                        if gl_context.resize(size.width, size.height) {
                            gl_renderer.resize(size.width, size.height);
                        }
                    }
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(VirtualKeyCode::Escape),
                                ..
                            },
                        ..
                    }
                    | WindowEvent::CloseRequested => {
                        control_flow.set_exit();
                    }
                    _ => (),
                },
                Event::LoopDestroyed => {
                    scene.take();
                    log::info!("Released GL resources");
                }
                _ => (),
            }
        })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not create OpenGL context: {0}")]
    Context(#[from] ContextError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}
