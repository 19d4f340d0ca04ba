//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for compiling and linking
//! OpenGL shaders, and the [`Uniform`] trait for uploading uniform variables into a program.
//!
//! Programs are built from exactly two stages, a vertex and a fragment shader, either from
//! source files on disk ([`ShaderProgram::from_files`]) or from in-memory sources
//! ([`ShaderProgram::from_sources`]). Every failure is returned as a [`ShaderError`].

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use glam::{Mat4, Vec3};
use glow::HasContext;

/// A single stage of a shader program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    /// Returns the OpenGL enum for this stage.
    pub fn gl_type(self) -> u32 {
        match self {
            Stage::Vertex => glow::VERTEX_SHADER,
            Stage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    /// Returns the lowercase name of the stage.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything that can go wrong while building a [`ShaderProgram`].
#[derive(Debug)]
pub enum ShaderError {
    /// A source file could not be opened or read.
    FileRead {
        stage: Stage,
        path: PathBuf,
        source: io::Error,
    },
    /// The driver refused to allocate a shader or program object.
    Create(String),
    /// A stage failed to compile. `log` holds the driver's info log.
    Compile { stage: Stage, log: String },
    /// The program failed to link. `log` holds the driver's info log.
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::FileRead {
                stage,
                path,
                source,
            } => write!(
                f,
                "ERROR::SHADER::FILE_READ_FAILED ({stage} stage, {}): {source}",
                path.display()
            ),
            ShaderError::Create(msg) => write!(f, "ERROR::SHADER::CREATE_FAILED: {msg}"),
            ShaderError::Compile { stage, log } => write!(
                f,
                "ERROR::SHADER::COMPILATION_FAILED ({stage} stage)\n{}",
                log.trim_end()
            ),
            ShaderError::Link { log } => {
                write!(f, "ERROR::SHADER::LINK_FAILED\n{}", log.trim_end())
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn creation_failed(msg: String) -> ShaderError {
    let err = ShaderError::Create(msg);
    log::error!("{err}");
    err
}

/// Reads a whole shader source file as text.
pub fn read_source(stage: Stage, path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| {
        let err = ShaderError::FileRead {
            stage,
            path: path.to_path_buf(),
            source,
        };
        log::error!("{err}");
        err
    })
}

/// Represents an individual compiled OpenGL shader stage.
///
/// The stage object is deleted when this value is dropped, which is safe to do as soon as the
/// program it was attached to has been linked.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
    stage: Stage,
}

impl Shader {
    /// Compiles a new shader stage from the given source code.
    pub fn new(gl: &Arc<glow::Context>, stage: Stage, source: &str) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl.create_shader(stage.gl_type()).map_err(creation_failed)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                let err = ShaderError::Compile { stage, log };
                log::error!("{err}");
                return Err(err);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
                stage,
            })
        }
    }

    /// Returns which stage this shader is.
    pub fn stage(&self) -> Stage {
        self.stage
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// A value that can be uploaded into a uniform variable.
pub trait Uniform {
    /// Uploads the value to `location` in the currently bound program.
    fn upload(&self, gl: &glow::Context, location: &glow::UniformLocation);
}

impl Uniform for bool {
    fn upload(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe { gl.uniform_1_i32(Some(location), *self as i32) }
    }
}

impl Uniform for f32 {
    fn upload(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe { gl.uniform_1_f32(Some(location), *self) }
    }
}

impl Uniform for i32 {
    fn upload(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe { gl.uniform_1_i32(Some(location), *self) }
    }
}

impl Uniform for Vec3 {
    fn upload(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe { gl.uniform_3_f32(Some(location), self.x, self.y, self.z) }
    }
}

impl Uniform for Mat4 {
    fn upload(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe { gl.uniform_matrix_4_f32_slice(Some(location), false, self.as_ref()) }
    }
}

impl<T: Uniform> Uniform for &T {
    fn upload(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        (*self).upload(gl, location);
    }
}

/// Represents a linked OpenGL shader program made of a vertex and a fragment stage.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Reads, compiles and links a program from a vertex and a fragment source file.
    ///
    /// Both files are read before anything is handed to the driver, so a missing file never
    /// leaves driver objects behind.
    pub fn from_files(
        gl: &Arc<glow::Context>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vertex_path = vertex_path.as_ref();
        let fragment_path = fragment_path.as_ref();
        let vertex_source = read_source(Stage::Vertex, vertex_path)?;
        let fragment_source = read_source(Stage::Fragment, fragment_path)?;

        let program = Self::from_sources(gl, &vertex_source, &fragment_source)?;
        log::debug!(
            "linked shader program from {} and {}",
            vertex_path.display(),
            fragment_path.display()
        );
        Ok(program)
    }

    /// Compiles and links a program from in-memory vertex and fragment sources.
    pub fn from_sources(
        gl: &Arc<glow::Context>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let vert = Shader::new(gl, Stage::Vertex, vertex_source)?;
        let frag = Shader::new(gl, Stage::Fragment, fragment_source)?;
        Self::link(gl, &[&vert, &frag])
    }

    /// Links a new shader program from already compiled stages.
    ///
    /// The stages are detached again after a successful link; dropping them afterwards
    /// releases their driver objects.
    pub fn link(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(creation_failed)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                let err = ShaderError::Link { log };
                log::error!("{err}");
                return Err(err);
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Returns the driver handle of the program.
    pub fn handle(&self) -> glow::Program {
        self.id
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program.
    ///
    /// The program must be bound with [`ShaderProgram::use_program`] first. Names that do not
    /// resolve to an active uniform are ignored.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        match unsafe { self.gl.get_uniform_location(self.id, name) } {
            Some(location) => value.upload(&self.gl, &location),
            None => log::trace!("uniform `{name}` not found, skipping upload"),
        }
    }

    /// Reads the current value of a `mat4` uniform back from the program.
    pub fn get_uniform_mat4(&self, name: &str) -> Option<Mat4> {
        unsafe {
            let location = self.gl.get_uniform_location(self.id, name)?;
            let mut data = [0.0f32; 16];
            self.gl.get_uniform_f32(self.id, &location, &mut data);
            Some(Mat4::from_cols_array(&data))
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
