use std::path::Path;

use gl::types::GLint;

use gl_wrapper::debug::{DebugOutput, Severity};
use gl_wrapper::error::{check_errors, GlError};
use gl_wrapper::geometry::{Geometry, GeometryBuilder, GeometryError};
use gl_wrapper::program::{Program, ProgramBuilder, ProgramError};
use gl_wrapper::renderer::GlRenderer;

use thiserror::Error;

use crate::config::{Config, ShaderErrorPolicy};
use crate::lesson::{ColorPulse, Lesson};

/// Every GL resource a lesson needs, created once before the render loop.
pub struct LessonScene {
    program: Option<Program>,
    geometry: Geometry,
    color: Option<(GLint, ColorPulse)>,
    clear_color: [f32; 4],
    // dropped last so teardown is still reported
    _debug: Option<DebugOutput>,
}

impl LessonScene {
    pub fn new(lesson: Lesson, config: &Config) -> Result<Self, SceneError> {
        let recipe = lesson.recipe();

        // installed first so setup errors are reported too
        let debug = if recipe.debug_output {
            DebugOutput::install(Severity::Low)
        } else {
            None
        };

        let mut builder = GeometryBuilder::new(recipe.vertices);
        for attr in recipe.attributes {
            builder = builder.with_attribute(*attr);
        }
        if let Some(indices) = recipe.indices {
            builder = builder.with_indices(indices);
        }
        let geometry = builder.build()?;

        let program = build_program(
            &config.shader_dir,
            recipe.vertex_shader,
            recipe.fragment_shader,
            config.on_shader_error,
        )?;

        let color = match (&program, recipe.color_uniform) {
            (Some(program), Some(name)) => match program.uniform_location(name) {
                Some(location) => Some((location, ColorPulse::default())),
                None => {
                    log::warn!("Uniform {name} is not active in the {lesson} program");
                    None
                }
            },
            _ => None,
        };

        check_errors()?;

        log::info!("Lesson {lesson} ready");

        Ok(Self {
            program,
            geometry,
            color,
            clear_color: config.clear_color,
            _debug: debug,
        })
    }

    pub fn has_program(&self) -> bool {
        self.program.is_some()
    }

    pub fn draw(&mut self, renderer: &mut GlRenderer) {
        renderer.clear_color(self.clear_color);

        let Some(program) = &self.program else {
            return;
        };

        if let Some((location, pulse)) = &mut self.color {
            renderer.use_program(program);
            program.set_uniform_4f(*location, pulse.advance());
        }

        renderer.draw(&self.geometry, program);
    }
}

fn build_program(
    shader_dir: &Path,
    vertex_shader: &str,
    fragment_shader: &str,
    policy: ShaderErrorPolicy,
) -> Result<Option<Program>, SceneError> {
    let vert_path = shader_dir.join(vertex_shader);
    let frag_path = shader_dir.join(fragment_shader);

    log::debug!("Building program from {vert_path:?} and {frag_path:?}");

    match ProgramBuilder::from_files(&vert_path, &frag_path).build() {
        Ok(program) => Ok(Some(program)),
        Err(e) => match policy {
            ShaderErrorPolicy::Abort => Err(e.into()),
            ShaderErrorPolicy::Continue => {
                log::warn!("Continuing without a program, nothing will be drawn");
                Ok(None)
            }
        },
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("could not build geometry: {0}")]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error("OpenGL reported an error during setup: {0}")]
    Gl(#[from] GlError),
}
