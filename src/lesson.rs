use std::fmt::{Display, Formatter};

use cgmath::Vector4;

use gl_wrapper::geometry::VertexAttribute;

#[rustfmt::skip]
pub const TRIANGLE: [f32; 6] = [
    -0.5, -0.5,
     0.0,  0.5,
     0.5, -0.5,
];

#[rustfmt::skip]
pub const QUAD: [f32; 8] = [
    -0.5, -0.5,
     0.5, -0.5,
     0.5,  0.5,
    -0.5,  0.5,
];

#[rustfmt::skip]
pub const QUAD_COLORED: [f32; 20] = [
    -0.5, -0.5, 1.0, 0.0, 0.0,
     0.5, -0.5, 0.0, 1.0, 0.0,
     0.5,  0.5, 0.0, 0.0, 1.0,
    -0.5,  0.5, 1.0, 1.0, 0.0,
];

#[rustfmt::skip]
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 2,
    2, 3, 0,
];

pub const COLOR_UNIFORM: &str = "u_Color";

/// One step of the tutorial sequence, each adding one concept to the last.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Lesson {
    Triangle,
    Quad,
    Uniform,
    Debug,
    Colored,
}

impl Lesson {
    pub const ALL: [Lesson; 5] = [
        Lesson::Triangle,
        Lesson::Quad,
        Lesson::Uniform,
        Lesson::Debug,
        Lesson::Colored,
    ];

    pub fn recipe(&self) -> Recipe {
        match self {
            Lesson::Triangle => Recipe {
                vertices: &TRIANGLE,
                indices: None,
                attributes: &[VertexAttribute::Vec2],
                vertex_shader: "basic.vert",
                fragment_shader: "basic.frag",
                color_uniform: None,
                debug_output: false,
            },
            Lesson::Quad => Recipe {
                vertices: &QUAD,
                indices: Some(&QUAD_INDICES),
                attributes: &[VertexAttribute::Vec2],
                vertex_shader: "basic.vert",
                fragment_shader: "basic.frag",
                color_uniform: None,
                debug_output: false,
            },
            Lesson::Uniform => Recipe {
                vertices: &QUAD,
                indices: Some(&QUAD_INDICES),
                attributes: &[VertexAttribute::Vec2],
                vertex_shader: "basic.vert",
                fragment_shader: "uniform.frag",
                color_uniform: Some(COLOR_UNIFORM),
                debug_output: false,
            },
            Lesson::Debug => Recipe {
                debug_output: true,
                ..Lesson::Uniform.recipe()
            },
            Lesson::Colored => Recipe {
                vertices: &QUAD_COLORED,
                indices: Some(&QUAD_INDICES),
                attributes: &[VertexAttribute::Vec2, VertexAttribute::Vec3],
                vertex_shader: "colored.vert",
                fragment_shader: "colored.frag",
                color_uniform: None,
                debug_output: false,
            },
        }
    }
}

impl Display for Lesson {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Lesson::Triangle => "triangle",
            Lesson::Quad => "quad",
            Lesson::Uniform => "uniform",
            Lesson::Debug => "debug",
            Lesson::Colored => "colored",
        };

        f.write_str(name)
    }
}

/// Literal data and shader file names making up a lesson.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub vertices: &'static [f32],
    pub indices: Option<&'static [u32]>,
    pub attributes: &'static [VertexAttribute],
    pub vertex_shader: &'static str,
    pub fragment_shader: &'static str,
    pub color_uniform: Option<&'static str>,
    pub debug_output: bool,
}

/// Red channel bouncing between 0 and 1.
#[derive(Debug, Clone)]
pub struct ColorPulse {
    color: Vector4<f32>,
    step: f32,
}

impl ColorPulse {
    pub fn new(step: f32) -> Self {
        Self {
            color: Vector4::new(0.0, 0.3, 0.8, 1.0),
            step,
        }
    }

    pub fn color(&self) -> [f32; 4] {
        self.color.into()
    }

    pub fn advance(&mut self) -> [f32; 4] {
        if self.color.x > 1.0 {
            self.step = -self.step.abs();
        } else if self.color.x < 0.0 {
            self.step = self.step.abs();
        }

        self.color.x += self.step;

        self.color()
    }
}

impl Default for ColorPulse {
    fn default() -> Self {
        Self::new(0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gl_wrapper::geometry::GeometryBuilder;

    #[test]
    fn recipes_validate() {
        for lesson in Lesson::ALL {
            let recipe = lesson.recipe();

            let mut builder = GeometryBuilder::new(recipe.vertices);
            for attr in recipe.attributes {
                builder = builder.with_attribute(*attr);
            }
            if let Some(indices) = recipe.indices {
                builder = builder.with_indices(indices);
            }

            let expected = match lesson {
                Lesson::Triangle => 3,
                _ => 4,
            };

            assert_eq!(builder.validate().unwrap(), expected, "{lesson}");
        }
    }

    #[test]
    fn debug_extends_uniform() {
        let uniform = Lesson::Uniform.recipe();
        let debug = Lesson::Debug.recipe();

        assert!(debug.debug_output);
        assert!(!uniform.debug_output);
        assert_eq!(debug.fragment_shader, uniform.fragment_shader);
        assert_eq!(debug.color_uniform, Some(COLOR_UNIFORM));
    }

    #[test]
    fn only_triangle_draws_arrays() {
        for lesson in Lesson::ALL {
            assert_eq!(
                lesson.recipe().indices.is_none(),
                lesson == Lesson::Triangle
            );
        }
    }

    #[test]
    fn pulse_bounces() {
        let mut pulse = ColorPulse::new(0.5);

        assert_eq!(pulse.advance()[0], 0.5);
        assert_eq!(pulse.advance()[0], 1.0);
        assert_eq!(pulse.advance()[0], 1.5);
        assert_eq!(pulse.advance()[0], 1.0);
        assert_eq!(pulse.advance()[0], 0.5);
        assert_eq!(pulse.advance()[0], 0.0);
        assert_eq!(pulse.advance()[0], -0.5);
        assert_eq!(pulse.advance()[0], 0.0);
    }

    #[test]
    fn pulse_keeps_other_channels() {
        let mut pulse = ColorPulse::default();
        let before = pulse.color();
        let after = pulse.advance();

        assert_eq!(before[1..], after[1..]);
    }
}
