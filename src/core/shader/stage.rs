use std::fmt;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use crate::core::shader::errors::ShaderError;
use crate::core::shader::layout::UniformLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStageKind {
    Vertex,
    Fragment,
}

impl ShaderStageKind {
    pub const ALL: [Self; 2] = [Self::Vertex, Self::Fragment];

    #[must_use]
    pub const fn marker_name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }

    /// Picks the stage named on a marker line. `vertex` wins when a line
    /// names both.
    #[must_use]
    pub fn from_marker_line(line: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| line.contains(kind.marker_name()))
    }

    const fn naga_stage(self) -> naga::ShaderStage {
        match self {
            Self::Vertex => naga::ShaderStage::Vertex,
            Self::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker_name())
    }
}

/// A single validated WGSL stage.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStage {
    pub kind: ShaderStageKind,
    pub source: String,
    pub entry_point: String,
    pub uniforms: Option<UniformLayout>,
}

impl CompiledStage {
    /// Parses and validates one stage's source.
    ///
    /// Diagnostics are rendered against `source` itself, so the line numbers
    /// they report count from the first line after the stage marker.
    pub fn compile(kind: ShaderStageKind, source: &str) -> Result<Self, ShaderError> {
        let compile_error = |diagnostic: String| ShaderError::Compile {
            stage: kind,
            diagnostic,
        };

        let module = naga::front::wgsl::parse_str(source)
            .map_err(|error| compile_error(error.emit_to_string(source)))?;

        Validator::new(ValidationFlags::all(), Capabilities::all())
            .validate(&module)
            .map_err(|error| compile_error(error.emit_to_string(source)))?;

        let entry_point = module
            .entry_points
            .iter()
            .find(|entry_point| entry_point.stage == kind.naga_stage())
            .map(|entry_point| entry_point.name.clone())
            .ok_or_else(|| compile_error(format!("no @{kind} entry point found")))?;

        let uniforms = UniformLayout::reflect(&module).map_err(compile_error)?;

        Ok(Self {
            kind,
            source: source.to_owned(),
            entry_point,
            uniforms,
        })
    }
}

/// Both stages of a program, checked against each other and ready to hand to
/// a [`ProgramLinkerPort`](crate::core::shader::ports::program_linker::ProgramLinkerPort).
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedStages {
    pub label: String,
    pub vertex: CompiledStage,
    pub fragment: CompiledStage,
    pub uniforms: Option<UniformLayout>,
}

impl LinkedStages {
    pub fn link(
        label: impl Into<String>,
        vertex: CompiledStage,
        fragment: CompiledStage,
    ) -> Result<Self, ShaderError> {
        let uniforms = match (&vertex.uniforms, &fragment.uniforms) {
            (Some(vertex_layout), Some(fragment_layout)) if vertex_layout != fragment_layout => {
                return Err(ShaderError::Link {
                    diagnostic: "vertex and fragment stages declare different uniform blocks at @group(0) @binding(0)"
                        .to_owned(),
                });
            }
            (Some(layout), _) | (None, Some(layout)) => Some(layout.clone()),
            (None, None) => None,
        };

        Ok(Self {
            label: label.into(),
            vertex,
            fragment,
            uniforms,
        })
    }
}
