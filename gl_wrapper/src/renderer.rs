use std::ffi::c_void;

use crate::geometry::Geometry;
use crate::program::Program;

pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program) {
        let p_id = program.id();
        if self.current_program != p_id {
            program.bind();
            self.current_program = p_id;
        }

        geometry.bind();

        unsafe {
            match geometry.index_count() {
                Some(count) => gl::DrawElements(
                    gl::TRIANGLES,
                    count as i32,
                    gl::UNSIGNED_INT,
                    std::ptr::null::<c_void>(),
                ),
                None => gl::DrawArrays(gl::TRIANGLES, 0, geometry.vertex_count() as i32),
            }
        }
    }

    /// Binds `program` ahead of a draw so uniforms can be set on it.
    pub fn use_program(&mut self, program: &Program) {
        program.bind();
        self.current_program = program.id();
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear_color(&self, color: [f32; 4]) {
        unsafe {
            gl::ClearColor(color[0], color[1], color[2], color[3]);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
