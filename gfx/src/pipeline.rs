use glow::HasContext as _;

const VERTEX_SHADER: &str = r"#version 330 core
in vec3 position;
void main() {
    gl_Position = vec4(position, 1.0);
}
";

const FRAGMENT_SHADER: &str = r"#version 330 core
uniform vec4 color;
out vec4 frag_color;
void main() {
    frag_color = color;
}
";

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
}

pub const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex {
        position: [0.0, 0.5, 0.0],
    },
    Vertex {
        position: [0.5, -0.5, 0.0],
    },
    Vertex {
        position: [-0.5, -0.5, 0.0],
    },
];

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{stage} shader compilation failed: {log}")]
    Compile { stage: &'static str, log: String },
    #[error("shader program linking failed: {log}")]
    Link { log: String },
    #[error("gl object allocation failed: {0}")]
    Allocate(String),
}

fn compile_shader(
    gl: &glow::Context,
    stage: &'static str,
    kind: u32,
    src: &str,
) -> Result<glow::Shader, PipelineError> {
    unsafe {
        let shader = gl.create_shader(kind).map_err(PipelineError::Allocate)?;
        gl.shader_source(shader, src);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(PipelineError::Compile { stage, log });
        }
        Ok(shader)
    }
}

/// the one-time gpu setup: compiled program + static triangle mesh. stateless per frame; the
/// caller owns the draw order.
pub struct Pipeline {
    program: glow::Program,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    color_location: Option<glow::UniformLocation>,
}

impl Pipeline {
    pub fn new(gl: &glow::Context) -> Result<Self, PipelineError> {
        let vs = compile_shader(gl, "vertex", glow::VERTEX_SHADER, VERTEX_SHADER)?;
        let fs = compile_shader(gl, "fragment", glow::FRAGMENT_SHADER, FRAGMENT_SHADER)?;

        unsafe {
            let program = gl.create_program().map_err(PipelineError::Allocate)?;
            gl.attach_shader(program, vs);
            gl.attach_shader(program, fs);
            gl.link_program(program);
            let linked = gl.get_program_link_status(program);

            // shader objects are not needed once the program is linked
            gl.detach_shader(program, vs);
            gl.detach_shader(program, fs);
            gl.delete_shader(vs);
            gl.delete_shader(fs);

            if !linked {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(PipelineError::Link { log });
            }

            let vao = gl.create_vertex_array().map_err(PipelineError::Allocate)?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl.create_buffer().map_err(PipelineError::Allocate)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            let bytes = core::slice::from_raw_parts(
                TRIANGLE_VERTICES.as_ptr().cast::<u8>(),
                std::mem::size_of_val(&TRIANGLE_VERTICES),
            );
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytes, glow::STATIC_DRAW);

            let position_location = gl.get_attrib_location(program, "position").unwrap_or_else(|| {
                log::warn!("position attribute not found in linked program");
                0
            });
            gl.enable_vertex_attrib_array(position_location);
            gl.vertex_attrib_pointer_f32(
                position_location,
                3,
                glow::FLOAT,
                false,
                std::mem::size_of::<Vertex>() as i32,
                0,
            );

            gl.bind_vertex_array(None);

            // non-fatal: drawing continues with the uniform unset
            let color_location = gl.get_uniform_location(program, "color");
            if color_location.is_none() {
                log::warn!("color uniform not found in linked program; output color is undefined");
            }

            Ok(Self {
                program,
                vao,
                vbo,
                color_location,
            })
        }
    }

    /// clears, binds the mesh and issues the single draw call. presentation (buffer swap) is
    /// the runner's job.
    pub fn draw(&self, gl: &glow::Context, color: [f32; 4]) {
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            gl.use_program(Some(self.program));
            gl.uniform_4_f32(
                self.color_location.as_ref(),
                color[0],
                color[1],
                color[2],
                color[3],
            );
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::TRIANGLES, 0, TRIANGLE_VERTICES.len() as i32);
        }
    }

    /// must run exactly once, before the gl context goes away.
    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.program);
            gl.delete_buffer(self.vbo);
            gl.delete_vertex_array(self.vao);
        }
    }
}

#[test]
fn test_vertex_layout() {
    // the attrib pointer stride below relies on a tightly packed position-only vertex
    assert_eq!(std::mem::size_of::<Vertex>(), 3 * std::mem::size_of::<f32>());
    assert_eq!(TRIANGLE_VERTICES.len(), 3);
}
