use crate::geometry::Geometry;
use crate::shader::Program;

/// Issues the per-frame GL commands. Keeps track of the bound program so
/// redraws with the same program skip the rebind.
pub struct GlRenderer {
    current_program: u32,
    clear_color: [f32; 4],
}

impl GlRenderer {
    pub fn new() -> Self {
        Self {
            current_program: 0,
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program) {
        let p_id = program.id();
        if self.current_program != p_id {
            unsafe { gl::UseProgram(p_id) }
            self.current_program = p_id;
        }

        unsafe {
            gl::BindVertexArray(geometry.vao());
            gl::DrawArrays(gl::TRIANGLES, 0, geometry.vertex_count() as i32);
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear(&self) {
        let [r, g, b, a] = self.clear_color;

        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
