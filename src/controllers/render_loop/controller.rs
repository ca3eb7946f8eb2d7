use crate::config::ShaderPaths;
use crate::controllers::render_loop::errors::FrameError;
use crate::core::camera::CameraUniforms;
use crate::core::fractals::{FractalKinds, FractalParameters};
use crate::core::shader::ports::program_linker::ProgramLinkerPort;
use crate::core::shader::{ProgramBinding, ShaderError, ShaderProgram};

pub const BACKGROUND_COLOR: [f64; 4] = [0.7, 0.7, 0.7, 0.7];

pub const U_MAX_ITERATIONS: &str = "u_MaxIterations";
pub const U_SCREEN_SIZE: &str = "u_ScreenSize";
pub const U_ZOOM: &str = "u_Zoom";
pub const U_OFFSET: &str = "u_Offset";
pub const U_COLOR: &str = "u_Color";
pub const U_JULIA_REAL: &str = "u_JuliaReal";
pub const U_JULIA_IMAG: &str = "u_JuliaImag";

/// Everything one frame's uniforms are built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs<'a> {
    pub kind: FractalKinds,
    pub camera: CameraUniforms,
    pub params: &'a FractalParameters,
}

/// One program per fractal variant.
#[derive(Debug)]
pub struct ShaderPrograms<H> {
    mandelbrot: ShaderProgram<H>,
    julia: ShaderProgram<H>,
}

impl<H> Default for ShaderPrograms<H> {
    fn default() -> Self {
        Self {
            mandelbrot: ShaderProgram::new(),
            julia: ShaderProgram::new(),
        }
    }
}

impl<H> ShaderPrograms<H> {
    #[must_use]
    pub fn get(&self, kind: FractalKinds) -> &ShaderProgram<H> {
        match kind {
            FractalKinds::Mandelbrot => &self.mandelbrot,
            FractalKinds::Julia => &self.julia,
        }
    }

    pub fn get_mut(&mut self, kind: FractalKinds) -> &mut ShaderProgram<H> {
        match kind {
            FractalKinds::Mandelbrot => &mut self.mandelbrot,
            FractalKinds::Julia => &mut self.julia,
        }
    }
}

/// Per-frame driver: picks the variant's program, binds it and stages its
/// uniforms. Drawing is left to the presenter, which owns the GPU.
#[derive(Debug)]
pub struct RenderLoopController<H> {
    programs: ShaderPrograms<H>,
    binding: ProgramBinding,
    shader_paths: ShaderPaths,
    ui_captured_pointer: bool,
}

impl<H> RenderLoopController<H> {
    #[must_use]
    pub fn new(shader_paths: ShaderPaths) -> Self {
        Self {
            programs: ShaderPrograms::default(),
            binding: ProgramBinding::default(),
            shader_paths,
            ui_captured_pointer: false,
        }
    }

    /// (Re)loads every variant's program from its configured path.
    ///
    /// A failing variant keeps its previous program; its error is logged and
    /// returned alongside the others.
    pub fn load_all<L>(&mut self, linker: &L) -> Vec<(FractalKinds, ShaderError)>
    where
        L: ProgramLinkerPort<Handle = H>,
    {
        let mut failures = Vec::new();

        for &kind in FractalKinds::ALL {
            let path = self.shader_paths.path(kind);
            if let Err(error) = self.programs.get_mut(kind).load(linker, path) {
                log::error!("{kind}: {error}");
                failures.push((kind, error));
            }
        }

        failures
    }

    /// Binds the program for `inputs.kind` and stages this frame's uniforms
    /// into it. Returns the program to draw with.
    pub fn prepare_frame(
        &mut self,
        inputs: &FrameInputs<'_>,
    ) -> Result<&ShaderProgram<H>, FrameError> {
        let program = self.programs.get_mut(inputs.kind);

        program
            .bind(&mut self.binding)
            .map_err(|source| FrameError::ProgramUnavailable {
                kind: inputs.kind,
                source,
            })?;

        push_uniforms(program, inputs);

        Ok(program)
    }

    /// Records whether the UI held the pointer this frame, for the next
    /// frame's pan suppression.
    pub fn finish_frame(&mut self, ui_captured_pointer: bool) {
        self.ui_captured_pointer = ui_captured_pointer;
    }

    #[must_use]
    pub fn ui_captured_pointer(&self) -> bool {
        self.ui_captured_pointer
    }

    #[must_use]
    pub fn binding(&self) -> ProgramBinding {
        self.binding
    }

    #[must_use]
    pub fn programs(&self) -> &ShaderPrograms<H> {
        &self.programs
    }

    pub fn programs_mut(&mut self) -> &mut ShaderPrograms<H> {
        &mut self.programs
    }
}

fn push_uniforms<H>(program: &mut ShaderProgram<H>, inputs: &FrameInputs<'_>) {
    program.set_int(U_MAX_ITERATIONS, inputs.params.max_iterations);
    program.set_double2(U_SCREEN_SIZE, inputs.camera.viewport_size);
    program.set_double(U_ZOOM, inputs.camera.zoom_level);
    program.set_double2(U_OFFSET, inputs.camera.pan_offset);
    program.set_float4(U_COLOR, inputs.params.color);

    if inputs.kind.uses_julia_constant() {
        program.set_float(U_JULIA_REAL, inputs.params.julia.real);
        program.set_float(U_JULIA_IMAG, inputs.params.julia.imag);
    }
}
