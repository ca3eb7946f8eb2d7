use std::path::{Path, PathBuf};

use glam::{DVec2, DVec3, DVec4, Vec2, Vec3, Vec4};

use crate::core::shader::binding::{ProgramBinding, ProgramId};
use crate::core::shader::errors::ShaderError;
use crate::core::shader::layout::UniformLayout;
use crate::core::shader::ports::program_linker::ProgramLinkerPort;
use crate::core::shader::source::ShaderSources;
use crate::core::shader::stage::{CompiledStage, LinkedStages, ShaderStageKind};
use crate::core::shader::uniforms::{UniformBlock, UniformValue};

#[derive(Debug)]
struct LinkedProgram<H> {
    handle: H,
    uniforms: Option<UniformBlock>,
}

/// A vertex + fragment program loaded from one annotated resource.
///
/// `H` is the GPU handle produced by the linker. It is dropped exactly once:
/// when a later load replaces it, or when the program itself is dropped.
#[derive(Debug)]
pub struct ShaderProgram<H> {
    id: ProgramId,
    path: Option<PathBuf>,
    linked: Option<LinkedProgram<H>>,
}

impl<H> Default for ShaderProgram<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ShaderProgram<H> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ProgramId::next(),
            path: None,
            linked: None,
        }
    }

    pub fn from_path<L>(linker: &L, path: impl AsRef<Path>) -> Result<Self, ShaderError>
    where
        L: ProgramLinkerPort<Handle = H>,
    {
        let mut program = Self::new();
        program.load(linker, path)?;
        Ok(program)
    }

    /// Reads, compiles and links the resource at `path`.
    ///
    /// On any failure the program keeps whatever it had before.
    pub fn load<L>(&mut self, linker: &L, path: impl AsRef<Path>) -> Result<(), ShaderError>
    where
        L: ProgramLinkerPort<Handle = H>,
    {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ShaderError::ResourceLoad {
            path: path.to_path_buf(),
            source,
        })?;

        self.load_source(linker, path, &source)
    }

    /// Like [`load`](Self::load) with the resource text already in memory.
    /// `path` is used for labels and diagnostics only.
    pub fn load_source<L>(
        &mut self,
        linker: &L,
        path: impl AsRef<Path>,
        source: &str,
    ) -> Result<(), ShaderError>
    where
        L: ProgramLinkerPort<Handle = H>,
    {
        let path = path.as_ref();
        let sources = ShaderSources::split(source);

        let vertex = CompiledStage::compile(ShaderStageKind::Vertex, sources.vertex())?;
        let fragment = CompiledStage::compile(ShaderStageKind::Fragment, sources.fragment())?;
        let stages = LinkedStages::link(path.display().to_string(), vertex, fragment)?;

        let handle = linker.link(&stages)?;

        log::info!(
            "loaded shader program {} ({} uniforms)",
            path.display(),
            stages.uniforms.as_ref().map_or(0, UniformLayout::len)
        );

        self.linked = Some(LinkedProgram {
            handle,
            uniforms: stages.uniforms.map(UniformBlock::new),
        });
        self.path = Some(path.to_path_buf());

        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> ProgramId {
        self.id
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.linked.is_some()
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn handle(&self) -> Option<&H> {
        self.linked.as_ref().map(|linked| &linked.handle)
    }

    #[must_use]
    pub fn uniform_layout(&self) -> Option<&UniformLayout> {
        self.uniform_block().map(UniformBlock::layout)
    }

    /// The staged uniform block, ready for upload. `None` when the program
    /// is not loaded or declares no uniforms.
    #[must_use]
    pub fn uniform_bytes(&self) -> Option<&[u8]> {
        self.uniform_block().map(UniformBlock::as_bytes)
    }

    fn uniform_block(&self) -> Option<&UniformBlock> {
        self.linked.as_ref()?.uniforms.as_ref()
    }

    pub fn bind(&self, binding: &mut ProgramBinding) -> Result<(), ShaderError> {
        if !self.is_loaded() {
            return Err(ShaderError::NotLoaded);
        }

        binding.set(self.id);
        Ok(())
    }

    pub fn unbind(&self, binding: &mut ProgramBinding) {
        binding.clear();
    }

    /// Writes a uniform into the staged block.
    ///
    /// Unknown names and mismatched shapes are dropped silently. The program
    /// is expected to be bound; that is not checked here.
    pub fn set_uniform(&mut self, name: &str, value: UniformValue<'_>) {
        debug_assert!(
            self.is_loaded(),
            "uniform `{name}` set on a shader program that was never loaded"
        );

        if let Some(block) = self
            .linked
            .as_mut()
            .and_then(|linked| linked.uniforms.as_mut())
        {
            block.write(name, value);
        }
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.set_uniform(name, UniformValue::Float(value));
    }

    pub fn set_float2(&mut self, name: &str, value: Vec2) {
        self.set_uniform(name, UniformValue::Float2(value));
    }

    pub fn set_float3(&mut self, name: &str, value: Vec3) {
        self.set_uniform(name, UniformValue::Float3(value));
    }

    pub fn set_float4(&mut self, name: &str, value: Vec4) {
        self.set_uniform(name, UniformValue::Float4(value));
    }

    pub fn set_double(&mut self, name: &str, value: f64) {
        self.set_uniform(name, UniformValue::Double(value));
    }

    pub fn set_double2(&mut self, name: &str, value: DVec2) {
        self.set_uniform(name, UniformValue::Double2(value));
    }

    pub fn set_double3(&mut self, name: &str, value: DVec3) {
        self.set_uniform(name, UniformValue::Double3(value));
    }

    pub fn set_double4(&mut self, name: &str, value: DVec4) {
        self.set_uniform(name, UniformValue::Double4(value));
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.set_uniform(name, UniformValue::Int(value));
    }

    pub fn set_int_array(&mut self, name: &str, values: &[i32]) {
        self.set_uniform(name, UniformValue::IntArray(values));
    }

    pub fn set_float_array(&mut self, name: &str, values: &[f32]) {
        self.set_uniform(name, UniformValue::FloatArray(values));
    }

    pub fn set_double_array(&mut self, name: &str, values: &[f64]) {
        self.set_uniform(name, UniformValue::DoubleArray(values));
    }
}
